use crate::ast::{AssignTarget, Expr, MatchCase, Stmt};
use crate::env::Env;
use crate::error::LowerError;
use crate::pattern;
use crate::subst::substitute;

/// The per-branch lowering state.
///
/// A statement sequence starts as `Pending` over the caller's environment.
/// Conditionals split it into a `Branch`; a return freezes a leaf as
/// `Terminal`. Every statement is applied to all still-open leaves of the
/// tree, so code after a conditional keeps flowing into exactly the
/// branches that have not returned yet.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    /// Accumulating assignments; not yet resolved.
    Pending(Env),
    /// A return was reached. Frozen: absorbs no further statements.
    Terminal(Expr),
    /// A multi-way conditional: ordered `(predicate, state)` cases plus the
    /// fall-through state. Nested conditionals nest under their own
    /// `otherwise`, never as sibling cases.
    Branch {
        cases: Vec<(Expr, FlowState)>,
        otherwise: Box<FlowState>,
    },
}

/// Lower a statement sequence starting from `env`.
///
/// Used both for whole function bodies and for branch bodies merging into a
/// larger flow; only the caller knows whether an unresolved result is legal
/// (a branch body may simply carry its environment forward, a function body
/// must return on every path).
pub fn lower_body(stmts: &[Stmt], env: Env) -> Result<FlowState, LowerError> {
    let mut state = FlowState::Pending(env);
    for stmt in stmts {
        // Once every leaf has returned, the rest of the sequence is
        // unreachable and must not be applied.
        if state.is_resolved() {
            break;
        }
        state.apply(stmt)?;
    }
    Ok(state)
}

impl FlowState {
    /// True when every leaf is `Terminal`.
    pub fn is_resolved(&self) -> bool {
        match self {
            FlowState::Pending(_) => false,
            FlowState::Terminal(_) => true,
            FlowState::Branch { cases, otherwise } => {
                cases.iter().all(|(_, state)| state.is_resolved()) && otherwise.is_resolved()
            }
        }
    }

    /// Apply one statement to every open leaf of this state.
    fn apply(&mut self, stmt: &Stmt) -> Result<(), LowerError> {
        match self {
            FlowState::Terminal(_) => Ok(()),
            FlowState::Branch { cases, otherwise } => {
                for (_, state) in cases.iter_mut() {
                    state.apply(stmt)?;
                }
                otherwise.apply(stmt)
            }
            FlowState::Pending(env) => match stmt {
                Stmt::Assign { targets, value } => {
                    // Substitute once, in the pre-assignment environment;
                    // every chained target receives the same value.
                    let value = substitute(value, env)?;
                    for target in targets {
                        bind_target(env, target, &value)?;
                    }
                    Ok(())
                }
                Stmt::If { test, body, orelse } => {
                    let test = substitute(test, env)?;
                    let then_state = lower_body(body, env.clone())?;
                    let else_state = lower_body(orelse, env.clone())?;
                    *self = FlowState::Branch {
                        cases: vec![(test, then_state)],
                        otherwise: Box::new(else_state),
                    };
                    Ok(())
                }
                Stmt::Match { subject, cases } => {
                    let lowered = lower_match(subject, cases, env)?;
                    *self = lowered;
                    Ok(())
                }
                Stmt::Return(Some(value)) => {
                    let value = substitute(value, env)?;
                    *self = FlowState::Terminal(value);
                    Ok(())
                }
                Stmt::Return(None) => Err(LowerError::MissingReturnValue),
                Stmt::Unsupported(kind) => Err(LowerError::UnsupportedStatement(kind.clone())),
            },
        }
    }
}

/// Bind one assignment target to an already substituted value.
fn bind_target(env: &mut Env, target: &AssignTarget, value: &Expr) -> Result<(), LowerError> {
    match target {
        AssignTarget::Name(name) => {
            env.define(name.clone(), value.clone());
            Ok(())
        }
        AssignTarget::Structural(targets) => {
            let values = match value {
                Expr::Tuple(elements) => elements,
                // Without a structural literal the arity is not statically
                // known, so element-wise distribution is impossible.
                _ => {
                    return Err(LowerError::UnsupportedExpression(
                        "destructuring non-structural value".to_string(),
                    ))
                }
            };
            if targets.len() != values.len() {
                return Err(LowerError::DestructuringArityMismatch {
                    targets: targets.len(),
                    values: values.len(),
                });
            }
            for (sub_target, sub_value) in targets.iter().zip(values) {
                bind_target(env, sub_target, sub_value)?;
            }
            Ok(())
        }
        AssignTarget::Unsupported(kind) => {
            Err(LowerError::UnsupportedAssignmentTarget(kind.clone()))
        }
    }
}

/// Lower a match statement into a `Branch`: one case per surviving compiled
/// pattern, in source order, with the catch-all body (or a plain
/// continuation of the current environment) as `otherwise`.
fn lower_match(
    subject: &Expr,
    match_cases: &[MatchCase],
    env: &Env,
) -> Result<FlowState, LowerError> {
    let subject = substitute(subject, env)?;
    let mut cases: Vec<(Expr, FlowState)> = Vec::new();
    let mut otherwise: Option<FlowState> = None;

    for case in match_cases {
        if case.is_catch_all() {
            // Host grammars only allow the catch-all as the final case.
            otherwise = Some(lower_body(&case.body, env.clone())?);
            break;
        }
        let compiled = match pattern::compile(&subject, &case.pattern)? {
            Some(compiled) => compiled,
            // Statically can never match (arity-mismatched sequence):
            // dropped, never emitted as a case.
            None => continue,
        };
        // Capture bindings reach this case's guard and body through a
        // cloned environment; sibling cases and the catch-all never see
        // them.
        let mut case_env = env.clone();
        for (name, definition) in &compiled.bindings {
            case_env.define(name.clone(), definition.clone());
        }
        let predicate = match &case.guard {
            Some(guard) => Expr::and(compiled.predicate(), substitute(guard, &case_env)?),
            None => compiled.predicate(),
        };
        let body_state = lower_body(&case.body, case_env)?;
        cases.push((predicate, body_state));
    }

    // With no catch-all, statements after the match keep applying to the
    // fall-through environment, exactly like an if/elif without else.
    let otherwise = otherwise.unwrap_or_else(|| FlowState::Pending(env.clone()));
    Ok(FlowState::Branch {
        cases,
        otherwise: Box::new(otherwise),
    })
}
