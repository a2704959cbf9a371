use crate::ast::Expr;
use crate::error::LowerError;
use crate::flow::FlowState;

/// Emit the guarded-expression tree for a fully merged flow state.
///
/// Fails with `NotAllBranchesReturn` if any leaf never resolved to a
/// return. Case order is preserved: evaluation of the emitted guarded
/// expression short-circuits at the first true predicate, identical to the
/// source if/elif/else or match chain.
pub fn finalize(state: &FlowState) -> Result<Expr, LowerError> {
    match state {
        FlowState::Pending(_) => Err(LowerError::NotAllBranchesReturn),
        FlowState::Terminal(expr) => Ok(expr.clone()),
        FlowState::Branch { cases, otherwise } => {
            let default = finalize(otherwise)?;
            // Every case compiled away (all statically unreachable): the
            // conditional degenerates to its fall-through value.
            if cases.is_empty() {
                return Ok(default);
            }
            let cases = cases
                .iter()
                .map(|(predicate, state)| Ok((predicate.clone(), finalize(state)?)))
                .collect::<Result<Vec<_>, LowerError>>()?;
            Ok(Expr::Guarded {
                cases,
                default: Box::new(default),
            })
        }
    }
}
