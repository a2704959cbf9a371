use crate::ast::Expr;
use crate::env::Env;
use crate::error::LowerError;

/// Rewrite `expr` with every locally assigned variable replaced by its
/// current definition from `env`.
///
/// Purely functional: the input tree is never mutated, the result is a
/// fresh structural copy. Host ternaries are normalized into single-case
/// guarded expressions here, so statement-level and expression-level
/// conditionals funnel through the same primitive.
///
/// Definitions stored in `env` were themselves substituted when they were
/// bound, so they only contain free names and the recursive lookup below
/// terminates.
pub fn substitute(expr: &Expr, env: &Env) -> Result<Expr, LowerError> {
    match expr {
        Expr::Literal(lit) => Ok(Expr::Literal(lit.clone())),

        Expr::Name(name) => match env.lookup(name) {
            Some(definition) => substitute(definition, env),
            None => Ok(Expr::Name(name.clone())),
        },

        Expr::Unary { op, operand } => Ok(Expr::Unary {
            op: *op,
            operand: Box::new(substitute(operand, env)?),
        }),

        Expr::Binary { op, left, right } => Ok(Expr::Binary {
            op: *op,
            left: Box::new(substitute(left, env)?),
            right: Box::new(substitute(right, env)?),
        }),

        Expr::Compare {
            left,
            ops,
            comparators,
        } => {
            if comparators.len() > 1 {
                return Err(LowerError::ChainedComparison);
            }
            let comparators = comparators
                .iter()
                .map(|c| substitute(c, env))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::Compare {
                left: Box::new(substitute(left, env)?),
                ops: ops.clone(),
                comparators,
            })
        }

        Expr::Call { func, args, kwargs } => {
            let args = args
                .iter()
                .map(|a| substitute(a, env))
                .collect::<Result<Vec<_>, _>>()?;
            let kwargs = kwargs
                .iter()
                .map(|(k, v)| Ok((k.clone(), substitute(v, env)?)))
                .collect::<Result<Vec<_>, LowerError>>()?;
            Ok(Expr::Call {
                func: func.clone(),
                args,
                kwargs,
            })
        }

        // `a if test else b` becomes when(test).then(a).otherwise(b).
        Expr::Ternary { test, body, orelse } => Ok(Expr::guarded_single(
            substitute(test, env)?,
            substitute(body, env)?,
            substitute(orelse, env)?,
        )),

        Expr::Tuple(elements) => {
            let elements = elements
                .iter()
                .map(|e| substitute(e, env))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::Tuple(elements))
        }

        // Guarded nodes re-enter via stored definitions (a normalized
        // ternary bound to a variable); substitute through them.
        Expr::Guarded { cases, default } => {
            let cases = cases
                .iter()
                .map(|(test, value)| Ok((substitute(test, env)?, substitute(value, env)?)))
                .collect::<Result<Vec<_>, LowerError>>()?;
            Ok(Expr::Guarded {
                cases,
                default: Box::new(substitute(default, env)?),
            })
        }

        Expr::Unsupported(kind) => Err(LowerError::UnsupportedExpression(kind.clone())),
    }
}
