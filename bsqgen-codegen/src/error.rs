//! Error types for code generation.

use std::fmt;
use thiserror::Error;

/// Error raised while resolving a single type node or facet set.
///
/// Carries the access path at which the failure occurred; the declaration
/// generators attach the enclosing [`DeclarationSite`] when converting it into
/// a [`CodegenError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A graph node kind with no target representation.
    #[error("unsupported graph node {kind} at '{path}'")]
    UnsupportedGraphNode {
        /// Offending node kind.
        kind: String,
        /// Access path of the node.
        path: String,
    },

    /// A refinement facet that cannot be synthesized.
    #[error("unsupported constraint facet '{facet}' at '{path}'")]
    UnsupportedConstraintFacet {
        /// Facet name.
        facet: String,
        /// Access path the facet is attached to.
        path: String,
    },
}

impl ResolveError {
    /// Creates an unsupported graph node error.
    pub fn unsupported_node(kind: impl Into<String>, path: impl Into<String>) -> Self {
        Self::UnsupportedGraphNode {
            kind: kind.into(),
            path: path.into(),
        }
    }

    /// Moves the error from the value at `from` to the value at `to`,
    /// keeping any sub-path below it.
    #[must_use]
    pub fn reanchor(self, from: &str, to: &str) -> Self {
        let rebase = |path: String| {
            let moved = match path.strip_prefix(from) {
                Some(rest) if rest.is_empty() || rest.starts_with('.') => {
                    Some(format!("{to}{rest}"))
                }
                _ => None,
            };
            moved.unwrap_or(path)
        };
        match self {
            Self::UnsupportedGraphNode { kind, path } => Self::UnsupportedGraphNode {
                kind,
                path: rebase(path),
            },
            Self::UnsupportedConstraintFacet { facet, path } => {
                Self::UnsupportedConstraintFacet {
                    facet,
                    path: rebase(path),
                }
            }
        }
    }

    /// Attaches a declaration site, producing a [`CodegenError`].
    #[must_use]
    pub fn at(self, site: DeclarationSite) -> CodegenError {
        match self {
            Self::UnsupportedGraphNode { kind, path } => {
                CodegenError::UnsupportedGraphNode { site, kind, path }
            }
            Self::UnsupportedConstraintFacet { facet, path } => {
                CodegenError::UnsupportedConstraintFacet { site, facet, path }
            }
        }
    }
}

/// Location of a declaration (and optionally one of its members) in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSite {
    /// Namespace name.
    pub namespace: String,
    /// Declaration name.
    pub declaration: String,
    /// Field or variant name.
    pub member: Option<String>,
}

impl DeclarationSite {
    /// Creates a site for a whole declaration.
    pub fn new(namespace: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            declaration: declaration.into(),
            member: None,
        }
    }

    /// Returns a copy of this site narrowed to a member, nested under any
    /// member already named.
    #[must_use]
    pub fn member(&self, member: &str) -> Self {
        let member = match &self.member {
            Some(outer) => format!("{outer}.{member}"),
            None => member.to_string(),
        };
        Self {
            member: Some(member),
            ..self.clone()
        }
    }
}

impl fmt::Display for DeclarationSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.namespace, self.declaration)?;
        if let Some(member) = &self.member {
            write!(f, ".{member}")?;
        }
        Ok(())
    }
}

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] bsqgen_schema::ParseError),

    /// Schema resolution or validation error.
    #[error("schema error: {0}")]
    Schema(#[from] bsqgen_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unsupported graph node kind.
    #[error("{site}: unsupported graph node {kind} at '{path}'")]
    UnsupportedGraphNode {
        /// Where the node occurred.
        site: DeclarationSite,
        /// Offending node kind.
        kind: String,
        /// Access path of the node.
        path: String,
    },

    /// Tagged union variant that is not an anonymous object literal.
    #[error("{site}: variant '{variant}' must be an object literal, found {kind}")]
    InvalidUnionVariantShape {
        /// The union declaration.
        site: DeclarationSite,
        /// Variant name.
        variant: String,
        /// Kind found instead.
        kind: String,
    },

    /// Refinement facet that cannot be synthesized.
    #[error("{site}: unsupported constraint facet '{facet}' at '{path}'")]
    UnsupportedConstraintFacet {
        /// Where the facet occurred.
        site: DeclarationSite,
        /// Facet name.
        facet: String,
        /// Access path the facet is attached to.
        path: String,
    },

    /// One or more declarations failed to generate.
    #[error("{} declaration(s) failed to generate", .errors.len())]
    Declarations {
        /// Individual failures in emission order.
        errors: Vec<CodegenError>,
    },
}

impl CodegenError {
    /// Returns the declaration site for per-declaration errors.
    #[must_use]
    pub fn site(&self) -> Option<&DeclarationSite> {
        match self {
            Self::UnsupportedGraphNode { site, .. }
            | Self::InvalidUnionVariantShape { site, .. }
            | Self::UnsupportedConstraintFacet { site, .. } => Some(site),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_display() {
        let site = DeclarationSite::new("Main", "M1");
        assert_eq!(site.to_string(), "Main::M1");
        assert_eq!(site.member("iv").to_string(), "Main::M1.iv");
        assert_eq!(site.member("a").member("b").to_string(), "Main::M1.a.b");
    }

    #[test]
    fn test_resolve_error_at_site() {
        let err = ResolveError::unsupported_node("'operation'", "$op");
        let err = err.at(DeclarationSite::new("Main", "M1").member("op"));

        assert_eq!(
            err.to_string(),
            "Main::M1.op: unsupported graph node 'operation' at '$op'"
        );
        assert_eq!(err.site().map(|s| s.declaration.as_str()), Some("M1"));
    }

    #[test]
    fn test_reanchor_keeps_sub_path() {
        let err = ResolveError::unsupported_node("'operation'", "$variant.k");
        assert_eq!(
            err.reanchor("$variant", "$u"),
            ResolveError::unsupported_node("'operation'", "$u.k")
        );

        let err = ResolveError::unsupported_node("'operation'", "$variants");
        assert_eq!(
            err.clone().reanchor("$variant", "$u"),
            err
        );
    }

    #[test]
    fn test_aggregate_display() {
        let site = DeclarationSite::new("Main", "Shape");
        let err = CodegenError::Declarations {
            errors: vec![CodegenError::InvalidUnionVariantShape {
                site,
                variant: "a".to_string(),
                kind: "tuple".to_string(),
            }],
        };
        assert_eq!(err.to_string(), "1 declaration(s) failed to generate");
        assert!(err.site().is_none());
    }
}
