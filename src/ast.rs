/// Input/output grammar shared by every stage of the lowering pipeline.
/// The external parser produces `Stmt`/`Expr`/`Pattern` trees from host
/// source; the finalizer hands a single `Expr` back out.

/// A literal constant value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

/// A unary operator (`-x`, `~x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

/// A binary operator. `And`/`Or` are the target library's `&`/`|`
/// element-wise boolean operators, not host short-circuit keywords
/// (those arrive as `Expr::Unsupported`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
}

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// An expression node. Immutable once constructed: substitution always
/// builds a fresh tree, so sub-expressions can be reused across sibling
/// branches without aliasing.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    /// A variable reference. Unresolved names are left for the ambient
    /// context of the renderer (e.g. function parameters).
    Name(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// A comparison. Host grammars allow chains (`a < b < c`), so the node
    /// carries parallel `ops`/`comparators` lists; anything beyond a single
    /// comparator is rejected during substitution.
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOp>,
        comparators: Vec<Expr>,
    },
    /// A call with positional and named arguments. The callee is opaque to
    /// the lowering (it may be a dotted target-library path).
    Call {
        func: String,
        args: Vec<Expr>,
        kwargs: Vec<(String, Expr)>,
    },
    /// A host conditional expression (`a if test else b`). Input-only:
    /// substitution normalizes it into a single-case `Guarded`.
    Ternary {
        test: Box<Expr>,
        body: Box<Expr>,
        orelse: Box<Expr>,
    },
    /// A structural literal (host tuple or list display). Required for
    /// destructuring values and sequence-pattern subjects.
    Tuple(Vec<Expr>),
    /// The guarded-expression primitive: ordered `(condition, value)` cases
    /// with first-match-wins semantics, then a default. The only
    /// conditional construct in lowered output.
    Guarded {
        cases: Vec<(Expr, Expr)>,
        default: Box<Expr>,
    },
    /// A host expression outside the supported subset, tagged with its
    /// host-grammar kind name. Rejected on first contact.
    Unsupported(String),
}

impl Expr {
    pub fn int(value: i64) -> Self {
        Expr::Literal(Literal::Int(value))
    }

    pub fn bool(value: bool) -> Self {
        Expr::Literal(Literal::Bool(value))
    }

    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name(name.into())
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// `left & right`, eliding literal-true operands so synthesized
    /// predicates stay readable.
    pub fn and(left: Expr, right: Expr) -> Self {
        match (left, right) {
            (Expr::Literal(Literal::Bool(true)), r) => r,
            (l, Expr::Literal(Literal::Bool(true))) => l,
            (l, r) => Expr::binary(BinaryOp::And, l, r),
        }
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::binary(BinaryOp::Or, left, right)
    }

    /// A single-comparator comparison.
    pub fn compare(op: CmpOp, left: Expr, right: Expr) -> Self {
        Expr::Compare {
            left: Box::new(left),
            ops: vec![op],
            comparators: vec![right],
        }
    }

    pub fn eq(left: Expr, right: Expr) -> Self {
        Expr::compare(CmpOp::Eq, left, right)
    }

    /// A one-case guarded expression (`when(test).then(body).otherwise(orelse)`).
    pub fn guarded_single(test: Expr, body: Expr, orelse: Expr) -> Self {
        Expr::Guarded {
            cases: vec![(test, body)],
            default: Box::new(orelse),
        }
    }
}

/// The left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    /// `name = ...`
    Name(String),
    /// `(a, b) = ...` or `[a, b] = ...` — distributes element-wise over a
    /// structural literal value of identical arity.
    Structural(Vec<AssignTarget>),
    /// Any other host target shape (attribute, subscript, ...).
    Unsupported(String),
}

/// One `case pattern [if guard]: body` arm of a match statement.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCase {
    pub pattern: Pattern,
    pub guard: Option<Expr>,
    pub body: Vec<Stmt>,
}

impl MatchCase {
    /// A catch-all is a bare nameless capture (`case _:`) with no guard.
    /// Host grammars guarantee it only appears as the final case.
    pub fn is_catch_all(&self) -> bool {
        matches!(self.pattern, Pattern::Capture(None)) && self.guard.is_none()
    }
}

/// A structured-match pattern. Compiled into a predicate plus capture
/// bindings by the pattern compiler and erased before reaching flow state.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// `case 0:` — equality against the subject.
    Literal(Literal),
    /// `case y:` binds the subject; `case _:` (None) binds nothing.
    Capture(Option<String>),
    /// `case 0 | 1:`
    Or(Vec<Pattern>),
    /// `case (p1, p2):` — fixed-arity, element-wise.
    Sequence(Vec<Pattern>),
    /// `case (0, *rest):` — host slurp sub-pattern. Representable so it can
    /// be rejected with a precise error.
    Rest(Option<String>),
    /// Any other host pattern kind (mapping, class, ...).
    Unsupported(String),
}

/// A statement in the supported imperative subset.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `t1 = t2 = value` — every target receives the same value.
    Assign {
        targets: Vec<AssignTarget>,
        value: Expr,
    },
    /// `if test: body else: orelse`. `elif` chains arrive pre-nested in
    /// `orelse`; a missing `else` is an empty `orelse`.
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    /// `match subject: case ...`. A catch-all case, if any, is last.
    Match {
        subject: Expr,
        cases: Vec<MatchCase>,
    },
    /// `return value` (`None` = bare return, always an error).
    Return(Option<Expr>),
    /// A host statement outside the supported subset.
    Unsupported(String),
}

impl Stmt {
    /// Single-target assignment.
    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Stmt::Assign {
            targets: vec![AssignTarget::Name(name.into())],
            value,
        }
    }

    pub fn ret(value: Expr) -> Self {
        Stmt::Return(Some(value))
    }
}
