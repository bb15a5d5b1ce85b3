//! Type reference resolution.
//!
//! [`TypeResolver::resolve`] turns a type graph node plus the access path of
//! the value it describes into a Bosque type expression and the invariants
//! gathered from every nested field and element, each anchored at its own
//! sub-path.

use crate::constraints::{conjoin, synthesize};
use crate::error::ResolveError;
use crate::naming::NameQualifier;
use crate::path::AccessPath;
use bsqgen_schema::{
    IntrinsicScalar, LiteralValue, PropertyNode, ScalarNode, TypeNode, UnionNode,
};

/// Type expression with the constraints collected while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// Bosque type expression.
    pub decl: String,
    /// Constraints anchored at the access path of the resolved node.
    pub constraints: Vec<String>,
}

impl ProcessResult {
    /// Creates a result with no constraints.
    #[must_use]
    pub fn bare(decl: impl Into<String>) -> Self {
        Self {
            decl: decl.into(),
            constraints: Vec::new(),
        }
    }
}

/// Resolves type nodes relative to one home namespace.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    names: NameQualifier<'a>,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver for declarations emitted into `home`.
    #[must_use]
    pub fn new(home: &'a str) -> Self {
        Self {
            names: NameQualifier::new(home),
        }
    }

    /// Returns the name qualifier.
    #[must_use]
    pub fn names(&self) -> &NameQualifier<'a> {
        &self.names
    }

    /// Resolves `node` describing the value at `path`.
    ///
    /// # Errors
    /// Returns `ResolveError` for node kinds and facets with no Bosque
    /// representation.
    pub fn resolve(
        &self,
        node: &TypeNode,
        path: &AccessPath,
    ) -> Result<ProcessResult, ResolveError> {
        match node {
            TypeNode::ObjectLiteral(props) => self.resolve_object(props, path),
            TypeNode::NamedReference(r)
            | TypeNode::Enum(r)
            | TypeNode::Union(UnionNode::Named(r)) => {
                Ok(ProcessResult::bare(self.names.qualify_ref(r)))
            }
            TypeNode::Scalar(scalar) => self.resolve_scalar(scalar, path),
            TypeNode::Tuple(elements) => self.resolve_tuple(elements, path),
            TypeNode::Union(UnionNode::Anonymous(variants)) => self.resolve_union(variants, path),
            TypeNode::Array(element) => self.resolve_array(element, path),
            TypeNode::Intrinsic(name) if name == "null" => {
                Ok(ProcessResult::bare(IntrinsicScalar::Null.bosque_type()))
            }
            TypeNode::Literal(literal) => Ok(ProcessResult::bare(literal_text(literal))),
            TypeNode::Intrinsic(_) | TypeNode::Unsupported(_) => {
                Err(ResolveError::unsupported_node(node.kind_name(), path.as_str()))
            }
        }
    }

    /// Resolves a property at `path`: its own facets first, then the
    /// constraints nested in its type.
    ///
    /// # Errors
    /// Returns `ResolveError` if the facets or the type cannot be resolved.
    pub fn resolve_property(
        &self,
        prop: &PropertyNode,
        path: &AccessPath,
    ) -> Result<ProcessResult, ResolveError> {
        let mut constraints = synthesize(&prop.facets, path)?;
        let ty = self.resolve(&prop.ty, path)?;
        constraints.extend(ty.constraints);
        Ok(ProcessResult {
            decl: ty.decl,
            constraints,
        })
    }

    fn resolve_object(
        &self,
        props: &[PropertyNode],
        path: &AccessPath,
    ) -> Result<ProcessResult, ResolveError> {
        let mut fields = Vec::with_capacity(props.len());
        let mut constraints = Vec::new();

        for prop in props {
            let result = self.resolve_property(prop, &path.member(&prop.name))?;
            fields.push(format!("{}: {}", prop.name, result.decl));
            constraints.extend(result.constraints);
        }

        let decl = if fields.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {} }}", fields.join(", "))
        };
        Ok(ProcessResult { decl, constraints })
    }

    /// Scalar refinement is transparent at a use site: the scalar's own
    /// invariants live on its declaration.
    fn resolve_scalar(
        &self,
        scalar: &ScalarNode,
        path: &AccessPath,
    ) -> Result<ProcessResult, ResolveError> {
        if scalar.namespace.is_none() {
            if let Some(intrinsic) = IntrinsicScalar::from_name(&scalar.name) {
                return Ok(ProcessResult::bare(intrinsic.bosque_type()));
            }
        }

        match scalar.base.as_deref() {
            Some(base) => self.resolve(base, path),
            None => Err(ResolveError::unsupported_node(
                format!("scalar '{}' without a base", scalar.name),
                path.as_str(),
            )),
        }
    }

    fn resolve_tuple(
        &self,
        elements: &[TypeNode],
        path: &AccessPath,
    ) -> Result<ProcessResult, ResolveError> {
        let mut decls = Vec::with_capacity(elements.len());
        let mut constraints = Vec::new();

        for (i, element) in elements.iter().enumerate() {
            let result = self.resolve(element, &path.index(i))?;
            decls.push(result.decl);
            constraints.extend(result.constraints);
        }

        Ok(ProcessResult {
            decl: format!("[{}]", decls.join(", ")),
            constraints,
        })
    }

    fn resolve_union(
        &self,
        variants: &[TypeNode],
        path: &AccessPath,
    ) -> Result<ProcessResult, ResolveError> {
        let marker = AccessPath::union_variant();
        let mut decls = Vec::with_capacity(variants.len());
        let mut dropped = 0;

        for variant in variants {
            let result = self
                .resolve(variant, &marker)
                .map_err(|e| e.reanchor(marker.as_str(), path.as_str()))?;
            dropped += result.constraints.len();
            decls.push(result.decl);
        }

        if dropped > 0 {
            tracing::warn!(
                path = %path,
                dropped,
                "constraints on anonymous union variants are not supported"
            );
        }

        Ok(ProcessResult::bare(decls.join(" | ")))
    }

    /// Resolves an array whose value is at `path`, quantifying element
    /// constraints over a fresh binder.
    pub(crate) fn resolve_array(
        &self,
        element: &TypeNode,
        path: &AccessPath,
    ) -> Result<ProcessResult, ResolveError> {
        let binder = path.element();
        let result = self.resolve(element, &binder)?;

        let constraints = if result.constraints.is_empty() {
            Vec::new()
        } else {
            vec![path.all_of(&binder, &conjoin(&result.constraints))]
        };

        Ok(ProcessResult {
            decl: format!("List<{}>", result.decl),
            constraints,
        })
    }
}

/// Renders a literal type as its JSON text.
fn literal_text(literal: &LiteralValue) -> String {
    match literal {
        LiteralValue::Boolean(b) => b.to_string(),
        LiteralValue::Numeric(n) => n.to_string(),
        LiteralValue::String(s) => serde_json::Value::String(s.clone()).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsqgen_schema::{NamedRef, RefinementFacets};

    fn string() -> TypeNode {
        TypeNode::intrinsic_scalar(IntrinsicScalar::String)
    }

    fn length(min: u64, max: u64) -> RefinementFacets {
        RefinementFacets {
            min_length: Some(min),
            max_length: Some(max),
            ..Default::default()
        }
    }

    #[test]
    fn test_intrinsic_scalars() {
        let resolver = TypeResolver::new("Main");
        let path = AccessPath::field("x");

        let result = resolver
            .resolve(&TypeNode::intrinsic_scalar(IntrinsicScalar::Int64), &path)
            .unwrap();
        assert_eq!(result, ProcessResult::bare("BigInt"));

        let result = resolver
            .resolve(&TypeNode::Intrinsic("null".to_string()), &path)
            .unwrap();
        assert_eq!(result.decl, "None");
    }

    #[test]
    fn test_object_literal_reanchors_constraints() {
        let resolver = TypeResolver::new("Main");
        let node = TypeNode::ObjectLiteral(vec![
            PropertyNode::new("p", string()).with_facets(length(1, 4)),
        ]);

        let result = resolver.resolve(&node, &AccessPath::field("x")).unwrap();
        assert_eq!(result.decl, "{ p: String }");
        assert_eq!(result.constraints, vec!["$x.p.length() in [1, 4]"]);
    }

    #[test]
    fn test_object_literal_preserves_order() {
        let resolver = TypeResolver::new("Main");
        let node = TypeNode::ObjectLiteral(vec![
            PropertyNode::new("a", string()).with_facets(length(1, 1)),
            PropertyNode::new("b", string()).with_facets(length(2, 2)),
            PropertyNode::new("c", string()).with_facets(length(3, 3)),
        ]);

        let result = resolver.resolve(&node, &AccessPath::field("x")).unwrap();
        assert_eq!(result.decl, "{ a: String, b: String, c: String }");
        assert_eq!(
            result.constraints,
            vec![
                "$x.a.length() in [1, 1]",
                "$x.b.length() in [2, 2]",
                "$x.c.length() in [3, 3]",
            ]
        );
    }

    #[test]
    fn test_property_facets_precede_nested_constraints() {
        let resolver = TypeResolver::new("Main");
        let inner = TypeNode::ObjectLiteral(vec![
            PropertyNode::new("s", string()).with_facets(length(0, 2)),
        ]);
        let prop = PropertyNode::new("o", inner).with_facets(RefinementFacets {
            pattern: Some(".*".to_string()),
            ..Default::default()
        });

        let result = resolver
            .resolve_property(&prop, &AccessPath::field("o"))
            .unwrap();
        assert_eq!(
            result.constraints,
            vec!["/.*/.accepts($o)", "$o.s.length() in [0, 2]"]
        );
    }

    #[test]
    fn test_tuple_positions() {
        let resolver = TypeResolver::new("Main");
        let node = TypeNode::Tuple(vec![
            TypeNode::intrinsic_scalar(IntrinsicScalar::Float64),
            TypeNode::ObjectLiteral(vec![
                PropertyNode::new("n", string()).with_facets(length(1, 2)),
            ]),
        ]);

        let result = resolver.resolve(&node, &AccessPath::field("t")).unwrap();
        assert_eq!(result.decl, "[Float, { n: String }]");
        assert_eq!(result.constraints, vec!["$t.1.n.length() in [1, 2]"]);
    }

    #[test]
    fn test_named_references_are_qualified() {
        let resolver = TypeResolver::new("Main");
        let path = AccessPath::field("x");

        let local = TypeNode::NamedReference(NamedRef::new("M", Some("Main")));
        let remote = TypeNode::Enum(NamedRef::new("Color", Some("Paint")));
        let union = TypeNode::Union(UnionNode::Named(NamedRef::new("Shape", Some("Geo"))));

        assert_eq!(resolver.resolve(&local, &path).unwrap().decl, "M");
        assert_eq!(resolver.resolve(&remote, &path).unwrap().decl, "Paint::Color");
        assert_eq!(resolver.resolve(&union, &path).unwrap().decl, "Geo::Shape");
    }

    #[test]
    fn test_scalar_chain_is_transparent() {
        let resolver = TypeResolver::new("Main");
        let node = TypeNode::Scalar(ScalarNode {
            name: "Short".to_string(),
            namespace: Some("Main".to_string()),
            base: Some(Box::new(TypeNode::Scalar(ScalarNode {
                name: "Name".to_string(),
                namespace: Some("Main".to_string()),
                base: Some(Box::new(string())),
            }))),
        });

        let result = resolver.resolve(&node, &AccessPath::field("x")).unwrap();
        assert_eq!(result, ProcessResult::bare("String"));
    }

    #[test]
    fn test_array_quantifies_once() {
        let resolver = TypeResolver::new("Main");
        let node = TypeNode::Array(Box::new(TypeNode::ObjectLiteral(vec![
            PropertyNode::new("s", string()).with_facets(length(1, 3)),
        ])));

        let result = resolver.resolve(&node, &AccessPath::field("xs")).unwrap();
        assert_eq!(result.decl, "List<{ s: String }>");
        assert_eq!(
            result.constraints,
            vec!["$xs.allOf(fn($e0) => $e0.s.length() in [1, 3])"]
        );
    }

    #[test]
    fn test_nested_arrays_use_fresh_binders() {
        let resolver = TypeResolver::new("Main");
        let node = TypeNode::Array(Box::new(TypeNode::Array(Box::new(
            TypeNode::ObjectLiteral(vec![
                PropertyNode::new("s", string()).with_facets(length(1, 3)),
            ]),
        ))));

        let result = resolver.resolve(&node, &AccessPath::field("g")).unwrap();
        assert_eq!(result.decl, "List<List<{ s: String }>>");
        assert_eq!(
            result.constraints,
            vec!["$g.allOf(fn($e0) => $e0.allOf(fn($e1) => $e1.s.length() in [1, 3]))"]
        );
    }

    #[test]
    fn test_array_without_element_constraints() {
        let resolver = TypeResolver::new("Main");
        let node = TypeNode::Array(Box::new(string()));

        let result = resolver.resolve(&node, &AccessPath::field("xs")).unwrap();
        assert_eq!(result, ProcessResult::bare("List<String>"));
    }

    #[test]
    fn test_anonymous_union_drops_constraints() {
        let resolver = TypeResolver::new("Main");
        let node = TypeNode::Union(UnionNode::Anonymous(vec![
            string(),
            TypeNode::ObjectLiteral(vec![
                PropertyNode::new("s", string()).with_facets(length(1, 3)),
            ]),
            TypeNode::Intrinsic("null".to_string()),
        ]));

        let result = resolver.resolve(&node, &AccessPath::field("u")).unwrap();
        assert_eq!(result.decl, "String | { s: String } | None");
        assert!(result.constraints.is_empty());
    }

    #[test]
    fn test_anonymous_union_errors_name_the_union_path() {
        let resolver = TypeResolver::new("Main");
        let node = TypeNode::Union(UnionNode::Anonymous(vec![
            string(),
            TypeNode::ObjectLiteral(vec![PropertyNode::new(
                "k",
                TypeNode::Unsupported("operation".to_string()),
            )]),
        ]));

        let err = resolver.resolve(&node, &AccessPath::field("u")).unwrap_err();
        assert_eq!(err, ResolveError::unsupported_node("'operation'", "$u.k"));

        let bare = TypeNode::Union(UnionNode::Anonymous(vec![TypeNode::Intrinsic(
            "never".to_string(),
        )]));
        let err = resolver.resolve(&bare, &AccessPath::field("u")).unwrap_err();
        assert_eq!(err, ResolveError::unsupported_node("intrinsic 'never'", "$u"));
    }

    #[test]
    fn test_literals_render_as_json_text() {
        let resolver = TypeResolver::new("Main");
        let path = AccessPath::field("x");
        let node = TypeNode::Union(UnionNode::Anonymous(vec![
            TypeNode::Literal(LiteralValue::String("on \"air\"".to_string())),
            TypeNode::Literal(LiteralValue::Boolean(true)),
            TypeNode::Literal(LiteralValue::Numeric(
                bsqgen_schema::NumericLiteral::parse("9007199254740993").unwrap(),
            )),
        ]));

        let result = resolver.resolve(&node, &path).unwrap();
        assert_eq!(
            result,
            ProcessResult::bare(r#""on \"air\"" | true | 9007199254740993"#)
        );
    }

    #[test]
    fn test_unsupported_nodes_are_errors() {
        let resolver = TypeResolver::new("Main");
        let path = AccessPath::field("x").member("y");

        let err = resolver
            .resolve(&TypeNode::Intrinsic("unknown".to_string()), &path)
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::unsupported_node("intrinsic 'unknown'", "$x.y")
        );

        let err = resolver
            .resolve(&TypeNode::Unsupported("operation".to_string()), &path)
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedGraphNode { .. }));
    }

    #[test]
    fn test_nested_unsupported_node_reports_full_path() {
        let resolver = TypeResolver::new("Main");
        let node = TypeNode::ObjectLiteral(vec![PropertyNode::new(
            "inner",
            TypeNode::Tuple(vec![string(), TypeNode::Unsupported("operation".to_string())]),
        )]);

        let err = resolver.resolve(&node, &AccessPath::field("x")).unwrap_err();
        assert_eq!(
            err,
            ResolveError::unsupported_node("'operation'", "$x.inner.1")
        );
    }
}
