//! Access path expressions.
//!
//! An [`AccessPath`] is the target-language expression that reads the value
//! currently being described, starting at a root binding (`$iv`, `$value`)
//! and growing through member and index access as resolution descends.
//! Array quantifiers introduce fresh element binders (`$e0`, `$e1`, ...), one
//! per nesting level, so nested predicates never shadow each other.

use std::fmt;

/// Target-language expression for a value under description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPath {
    expr: String,
    binders: usize,
}

impl AccessPath {
    /// Root path for a top-level field.
    #[must_use]
    pub fn field(name: &str) -> Self {
        Self::root(format!("${name}"))
    }

    /// Root path for a declaration whose value has no enclosing field.
    #[must_use]
    pub fn value() -> Self {
        Self::root("$value".to_string())
    }

    /// Marker path used for anonymous union variants.
    #[must_use]
    pub fn union_variant() -> Self {
        Self::root("$variant".to_string())
    }

    fn root(expr: String) -> Self {
        Self { expr, binders: 0 }
    }

    /// Extends this path with member access.
    #[must_use]
    pub fn member(&self, name: &str) -> Self {
        Self {
            expr: format!("{}.{name}", self.expr),
            binders: self.binders,
        }
    }

    /// Extends this path with positional access.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self {
            expr: format!("{}.{index}", self.expr),
            binders: self.binders,
        }
    }

    /// Returns a fresh element binder for quantifying over this path.
    #[must_use]
    pub fn element(&self) -> Self {
        Self {
            expr: format!("$e{}", self.binders),
            binders: self.binders + 1,
        }
    }

    /// Wraps `predicate`, written over `binder`, into an "every element
    /// satisfies" expression over this path.
    #[must_use]
    pub fn all_of(&self, binder: &Self, predicate: &str) -> String {
        format!("{}.allOf(fn({}) => {predicate})", self.expr, binder.expr)
    }

    /// Returns the path expression.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.expr
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)
    }
}
