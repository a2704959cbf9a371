//! Lowers the body of an imperative function (assignment, if/elif/else,
//! structured match, early return) into a single side-effect-free
//! expression tree whose only conditional construct is the guarded
//! `when(test).then(value)...otherwise(default)` primitive.
//!
//! Input and output are in-memory trees: an external parser supplies the
//! [`ast::Stmt`] sequence, an external code generator consumes the final
//! [`ast::Expr`]. This crate is only the lowering in between: the symbolic
//! environment, the branch-merge state machine, the pattern-to-predicate
//! compiler, and the finalizer.

pub mod ast;
pub mod env;
pub mod error;
pub mod finalize;
pub mod flow;
pub mod pattern;
pub mod render;
pub mod subst;

pub use ast::{AssignTarget, BinaryOp, CmpOp, Expr, Literal, MatchCase, Pattern, Stmt, UnaryOp};
pub use env::Env;
pub use error::LowerError;
pub use flow::FlowState;

// ── Core API ───────────────────────────────────────────────────────

/// Lower a whole function body into one guarded expression tree.
///
/// The environment starts empty: function parameters stay free references
/// for the renderer's ambient context to resolve. Every control path must
/// end in a return.
pub fn lower_function_body(body: &[Stmt]) -> Result<Expr, LowerError> {
    let state = flow::lower_body(body, Env::new())?;
    if !state.is_resolved() {
        return Err(LowerError::MissingReturnStatement);
    }
    finalize::finalize(&state)
}

/// Lower a statement sequence starting from a caller-supplied environment,
/// without requiring every path to return. Useful for embedding the
/// lowering under an outer flow; see [`flow::lower_body`].
pub fn lower_body(body: &[Stmt], env: Env) -> Result<FlowState, LowerError> {
    flow::lower_body(body, env)
}
