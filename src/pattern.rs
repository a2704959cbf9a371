use crate::ast::{Expr, Pattern};
use crate::error::LowerError;

/// The result of compiling one pattern against a subject expression.
///
/// `test` is the structural predicate (`None` = matches unconditionally);
/// `bindings` are the capture side effects, applied by the caller to a
/// clone of the environment so they reach the case's guard and body but
/// never leak to sibling cases or the catch-all.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPattern {
    pub test: Option<Expr>,
    pub bindings: Vec<(String, Expr)>,
}

impl CompiledPattern {
    fn unconditional() -> Self {
        CompiledPattern {
            test: None,
            bindings: Vec::new(),
        }
    }

    /// Predicate as an expression, `true` for an unconditional match.
    pub fn predicate(&self) -> Expr {
        self.test.clone().unwrap_or(Expr::bool(true))
    }
}

/// Compile `pattern` against `subject` (already substituted by the caller).
///
/// Returns `Ok(None)` when the case statically can never match (an
/// arity-mismatched sequence pattern), so the caller drops it entirely.
/// A stricter implementation could error here instead; dropping matches
/// the host semantics of an arm that simply never fires.
pub fn compile(subject: &Expr, pattern: &Pattern) -> Result<Option<CompiledPattern>, LowerError> {
    match pattern {
        Pattern::Literal(lit) => Ok(Some(CompiledPattern {
            test: Some(Expr::eq(subject.clone(), Expr::Literal(lit.clone()))),
            bindings: Vec::new(),
        })),

        Pattern::Capture(Some(name)) => Ok(Some(CompiledPattern {
            test: None,
            bindings: vec![(name.clone(), subject.clone())],
        })),

        // The bare wildcard matches unconditionally. The flow machine
        // rewrites a guardless wildcard case into the match's `otherwise`
        // branch before compilation, so reaching here means the wildcard
        // carried a guard and stays an ordinary case.
        Pattern::Capture(None) => Ok(Some(CompiledPattern::unconditional())),

        Pattern::Or(alternatives) => compile_or(subject, alternatives),

        Pattern::Sequence(elements) => compile_sequence(subject, elements),

        Pattern::Rest(_) => Err(LowerError::UnsupportedPattern("starred".to_string())),

        Pattern::Unsupported(kind) => Err(LowerError::UnsupportedPattern(kind.clone())),
    }
}

/// `p1 | p2 | ...` — the OR of the alternatives' predicates against the
/// same subject. Alternatives that can never match drop out of the
/// disjunction; if none survive the whole case is dropped.
fn compile_or(subject: &Expr, alternatives: &[Pattern]) -> Result<Option<CompiledPattern>, LowerError> {
    let mut test: Option<Expr> = None;
    for alt in alternatives {
        let compiled = match compile(subject, alt)? {
            Some(c) => c,
            None => continue,
        };
        // A single OR'd predicate cannot carry per-alternative binding
        // values, so captures inside an alternation are rejected.
        if !compiled.bindings.is_empty() {
            return Err(LowerError::UnsupportedPattern(
                "capture-in-alternation".to_string(),
            ));
        }
        match compiled.test {
            // An unconditional alternative makes the whole pattern
            // unconditional.
            None => return Ok(Some(CompiledPattern::unconditional())),
            Some(t) => {
                test = Some(match test {
                    None => t,
                    Some(acc) => Expr::or(acc, t),
                });
            }
        }
    }
    // All alternatives statically unreachable: drop the whole case.
    Ok(test.map(|t| CompiledPattern {
        test: Some(t),
        bindings: Vec::new(),
    }))
}

/// `(p1, p2, ...)` — element-wise conjunction against a structural literal
/// subject of identical arity.
fn compile_sequence(subject: &Expr, elements: &[Pattern]) -> Result<Option<CompiledPattern>, LowerError> {
    if elements.iter().any(|p| matches!(p, Pattern::Rest(_))) {
        return Err(LowerError::UnsupportedPattern("starred".to_string()));
    }
    let subject_elements = match subject {
        Expr::Tuple(elems) => elems,
        // Open-ended sequences (a plain name, a call result) have no
        // statically known arity to check against.
        _ => {
            return Err(LowerError::UnsupportedPattern(
                "sequence-of-unknown-arity".to_string(),
            ))
        }
    };
    if subject_elements.len() != elements.len() {
        // Statically can never match: drop the case.
        return Ok(None);
    }

    let mut test: Option<Expr> = None;
    let mut bindings = Vec::new();
    for (sub_subject, sub_pattern) in subject_elements.iter().zip(elements) {
        let compiled = match compile(sub_subject, sub_pattern)? {
            Some(c) => c,
            // A nested never-matching sub-pattern sinks the whole case.
            None => return Ok(None),
        };
        if let Some(t) = compiled.test {
            test = Some(match test {
                None => t,
                Some(acc) => Expr::and(acc, t),
            });
        }
        bindings.extend(compiled.bindings);
    }
    Ok(Some(CompiledPattern { test, bindings }))
}
