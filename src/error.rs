use thiserror::Error;

/// A fatal lowering error. Compilation is fail-fast: the first unsupported
/// construct or broken invariant aborts the whole lowering with one of
/// these. There is no partial output and no internal recovery.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LowerError {
    /// A statement kind outside the supported subset.
    #[error("unsupported statement type: {0}")]
    UnsupportedStatement(String),

    /// An expression kind outside the supported subset.
    #[error("unsupported expression type: {0}")]
    UnsupportedExpression(String),

    /// A match pattern kind outside the supported subset.
    #[error("unsupported pattern type: {0}")]
    UnsupportedPattern(String),

    /// An assignment target outside the supported subset
    /// (attribute, subscript, ...).
    #[error("unsupported expression type inside assignment target: {0}")]
    UnsupportedAssignmentTarget(String),

    /// A comparison with more than one comparator (`a < b < c`). The
    /// guarded-expression primitive cannot express chained relations.
    #[error("chained comparisons are not supported")]
    ChainedComparison,

    /// Structural assignment where target and value arity differ.
    #[error("destructuring arity mismatch: {targets} targets but {values} values")]
    DestructuringArityMismatch { targets: usize, values: usize },

    /// `return` with no value.
    #[error("return needs a value")]
    MissingReturnValue,

    /// A function body control path reached its end without returning.
    #[error("not all code paths return a value")]
    MissingReturnStatement,

    /// Finalization reached a branch that never resolved to a return.
    #[error("not all branches return")]
    NotAllBranchesReturn,
}

impl LowerError {
    /// Machine-readable error code, stable across message edits. The error
    /// fixtures key on these.
    pub fn code(&self) -> &'static str {
        match self {
            LowerError::UnsupportedStatement(_) => "unsupported-statement",
            LowerError::UnsupportedExpression(_) => "unsupported-expression",
            LowerError::UnsupportedPattern(_) => "unsupported-pattern",
            LowerError::UnsupportedAssignmentTarget(_) => "unsupported-assignment-target",
            LowerError::ChainedComparison => "chained-comparison",
            LowerError::DestructuringArityMismatch { .. } => "destructuring-arity-mismatch",
            LowerError::MissingReturnValue => "missing-return-value",
            LowerError::MissingReturnStatement => "missing-return-statement",
            LowerError::NotAllBranchesReturn => "not-all-branches-return",
        }
    }
}
