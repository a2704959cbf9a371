use crate::ast::Expr;
use std::collections::BTreeMap;

/// The symbolic environment: every locally assigned variable mapped to its
/// current (already substituted) definition.
///
/// `Env` is a value type. Entering a conditional branch clones it, so an
/// assignment performed inside one branch can never be observed by a
/// sibling branch: branch isolation is structural, not conventional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Env {
    bindings: BTreeMap<String, Expr>,
}

impl Env {
    pub fn new() -> Self {
        Env {
            bindings: BTreeMap::new(),
        }
    }

    /// Insert or overwrite a definition.
    pub fn define(&mut self, name: impl Into<String>, expr: Expr) {
        self.bindings.insert(name.into(), expr);
    }

    /// Current definition of `name`, or `None` for a free reference.
    /// Free references are not an error: they are assumed to be externally
    /// supplied (function parameters) and pass through untouched.
    pub fn lookup(&self, name: &str) -> Option<&Expr> {
        self.bindings.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Expr)> {
        self.bindings.iter()
    }
}

impl FromIterator<(String, Expr)> for Env {
    fn from_iter<T: IntoIterator<Item = (String, Expr)>>(iter: T) -> Self {
        Env {
            bindings: iter.into_iter().collect(),
        }
    }
}
