//! Resolved type graph.
//!
//! This module provides the immutable, name-resolved representation of a
//! type graph document that code generation walks. Every reference is
//! resolved to the kind of thing it names, scalar refinement chains are
//! attached to each scalar use, and models extended by others are marked as
//! concepts.

use crate::error::SchemaError;
use crate::models::{ModelBody, PropertyDef};
use crate::types::{
    DeclKind, INTRINSIC_TYPES, IntrinsicScalar, LiteralValue, NamespaceDef, RefinementFacets,
    SchemaDocument, TypeExpr,
};
use std::collections::HashSet;

/// Resolved type graph, one entry per namespace.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    /// Namespaces in document order.
    pub namespaces: Vec<Namespace>,
}

/// Resolved namespace.
#[derive(Debug, Clone)]
pub struct Namespace {
    /// Namespace name.
    pub name: String,
    /// Object and array models in declaration order.
    pub models: Vec<ModelDecl>,
    /// Enum declarations.
    pub enums: Vec<EnumDecl>,
    /// Refined scalar declarations.
    pub scalars: Vec<ScalarDecl>,
    /// Tagged union declarations.
    pub unions: Vec<UnionDecl>,
}

impl Namespace {
    /// Creates a new empty namespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            models: Vec::new(),
            enums: Vec::new(),
            scalars: Vec::new(),
            unions: Vec::new(),
        }
    }
}

/// Model declaration.
#[derive(Debug, Clone)]
pub enum ModelDecl {
    /// Object model.
    Object(ObjectDecl),
    /// Named array model.
    Array(ArrayDecl),
}

impl ModelDecl {
    /// Returns the declaration name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Object(o) => &o.name,
            Self::Array(a) => &a.name,
        }
    }
}

/// Object model declaration.
#[derive(Debug, Clone)]
pub struct ObjectDecl {
    /// Model name.
    pub name: String,
    /// Base model.
    pub base: Option<NamedRef>,
    /// True if another model extends this one.
    pub is_concept: bool,
    /// Properties in declaration order.
    pub properties: Vec<PropertyNode>,
}

/// Named array model declaration.
#[derive(Debug, Clone)]
pub struct ArrayDecl {
    /// Model name.
    pub name: String,
    /// Element type.
    pub element: TypeNode,
    /// Facets on the array itself.
    pub facets: RefinementFacets,
}

/// Enum declaration.
#[derive(Debug, Clone)]
pub struct EnumDecl {
    /// Enum name.
    pub name: String,
    /// Member names in declaration order.
    pub members: Vec<String>,
}

/// Refined scalar declaration.
#[derive(Debug, Clone)]
pub struct ScalarDecl {
    /// Scalar name.
    pub name: String,
    /// Resolved base scalar.
    pub base: Option<TypeNode>,
    /// Facets on the scalar itself.
    pub facets: RefinementFacets,
}

/// Tagged union declaration.
#[derive(Debug, Clone)]
pub struct UnionDecl {
    /// Union name.
    pub name: String,
    /// Variants in declaration order.
    pub variants: Vec<UnionVariant>,
}

/// Named union variant.
#[derive(Debug, Clone)]
pub struct UnionVariant {
    /// Variant name.
    pub name: String,
    /// Variant type.
    pub ty: TypeNode,
}

/// Property with its resolved type and facets.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyNode {
    /// Property name.
    pub name: String,
    /// Property type.
    pub ty: TypeNode,
    /// Facets attached to the property.
    pub facets: RefinementFacets,
}

impl PropertyNode {
    /// Creates a property without facets.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            name: name.into(),
            ty,
            facets: RefinementFacets::default(),
        }
    }

    /// Sets the facets.
    #[must_use]
    pub fn with_facets(mut self, facets: RefinementFacets) -> Self {
        self.facets = facets;
        self
    }
}

/// Reference to a named declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedRef {
    /// Declaration name.
    pub name: String,
    /// Defining namespace.
    pub namespace: Option<String>,
}

impl NamedRef {
    /// Creates a reference to a declaration in `namespace`.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: Option<&str>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.map(str::to_string),
        }
    }
}

/// Scalar use site with its refinement chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarNode {
    /// Scalar name.
    pub name: String,
    /// Defining namespace (`None` for intrinsic scalars).
    pub namespace: Option<String>,
    /// Base scalar this one refines.
    pub base: Option<Box<TypeNode>>,
}

impl ScalarNode {
    /// Creates an intrinsic scalar node.
    #[must_use]
    pub fn intrinsic(scalar: IntrinsicScalar) -> Self {
        Self {
            name: scalar.name().to_string(),
            namespace: None,
            base: None,
        }
    }
}

/// Union type node.
#[derive(Debug, Clone, PartialEq)]
pub enum UnionNode {
    /// Reference to a named tagged union.
    Named(NamedRef),
    /// Anonymous union of types.
    Anonymous(Vec<TypeNode>),
}

/// Node of the resolved type graph.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    /// Anonymous object literal.
    ObjectLiteral(Vec<PropertyNode>),
    /// Reference to a named model.
    NamedReference(NamedRef),
    /// Scalar use.
    Scalar(ScalarNode),
    /// Reference to an enum.
    Enum(NamedRef),
    /// Positional tuple.
    Tuple(Vec<TypeNode>),
    /// Union.
    Union(UnionNode),
    /// Array of an element type.
    Array(Box<TypeNode>),
    /// Intrinsic type (`null`, `void`, `never`, `unknown`).
    Intrinsic(String),
    /// Literal type.
    Literal(LiteralValue),
    /// Upstream node kind with no target representation.
    Unsupported(String),
}

impl TypeNode {
    /// Creates a use of an intrinsic scalar.
    #[must_use]
    pub fn intrinsic_scalar(scalar: IntrinsicScalar) -> Self {
        Self::Scalar(ScalarNode::intrinsic(scalar))
    }

    /// Returns a short description of the node kind for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> String {
        match self {
            Self::ObjectLiteral(_) => "object literal".to_string(),
            Self::NamedReference(r) => format!("model reference '{}'", r.name),
            Self::Scalar(s) => format!("scalar '{}'", s.name),
            Self::Enum(r) => format!("enum reference '{}'", r.name),
            Self::Tuple(_) => "tuple".to_string(),
            Self::Union(UnionNode::Named(r)) => format!("union reference '{}'", r.name),
            Self::Union(UnionNode::Anonymous(_)) => "anonymous union".to_string(),
            Self::Array(_) => "array".to_string(),
            Self::Intrinsic(name) => format!("intrinsic '{name}'"),
            Self::Literal(LiteralValue::Boolean(b)) => format!("boolean literal {b}"),
            Self::Literal(LiteralValue::Numeric(n)) => format!("numeric literal {n}"),
            Self::Literal(LiteralValue::String(s)) => format!("string literal {s:?}"),
            Self::Unsupported(kind) => format!("'{kind}'"),
        }
    }
}

impl TypeGraph {
    /// Resolves a parsed document into a type graph.
    ///
    /// # Errors
    /// Returns `SchemaError` if a reference cannot be resolved, a scalar
    /// chain is circular, or a base names the wrong kind of declaration.
    pub fn from_document(document: &SchemaDocument) -> Result<Self, SchemaError> {
        let resolver = NameResolver { document };
        let extended = resolver.extended_models()?;

        let mut graph = Self::default();
        for ns in &document.namespaces {
            graph
                .namespaces
                .push(resolver.resolve_namespace(ns, &extended)?);
        }

        tracing::debug!(
            namespaces = graph.namespaces.len(),
            "resolved type graph"
        );
        Ok(graph)
    }

    /// Gets a namespace by name.
    #[must_use]
    pub fn get_namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }
}

/// Resolves document-level names against the whole document.
struct NameResolver<'a> {
    document: &'a SchemaDocument,
}

impl<'a> NameResolver<'a> {
    /// Finds the namespace a reference points into.
    fn target_namespace(
        &self,
        explicit: Option<&str>,
        home: &'a NamespaceDef,
        context: &str,
    ) -> Result<&'a NamespaceDef, SchemaError> {
        match explicit {
            None => Ok(home),
            Some(name) => {
                self.document
                    .get_namespace(name)
                    .ok_or_else(|| SchemaError::NamespaceNotFound {
                        name: name.to_string(),
                        context: context.to_string(),
                    })
            }
        }
    }

    /// Collects `(namespace, model)` pairs that some other model extends.
    fn extended_models(&self) -> Result<HashSet<NamedRef>, SchemaError> {
        let mut extended = HashSet::new();
        for ns in &self.document.namespaces {
            for model in &ns.models {
                let Some(base) = &model.base else { continue };
                let context = format!("{}::{}", ns.name, model.name);
                let base_ref = self.resolve_model_base(base, ns, &model.name, &context)?;
                extended.insert(base_ref);
            }
        }
        Ok(extended)
    }

    fn resolve_model_base(
        &self,
        base: &TypeExpr,
        home: &'a NamespaceDef,
        model: &str,
        context: &str,
    ) -> Result<NamedRef, SchemaError> {
        let TypeExpr::Reference { name, namespace } = base else {
            return Err(SchemaError::InvalidModelBase {
                model: model.to_string(),
                base: format!("{base:?}"),
            });
        };
        let target = self.target_namespace(namespace.as_deref(), home, context)?;
        match target.declaration_kind(name) {
            Some(DeclKind::Model) => Ok(NamedRef::new(name, Some(target.name.as_str()))),
            Some(_) => Err(SchemaError::InvalidModelBase {
                model: model.to_string(),
                base: name.clone(),
            }),
            None => Err(SchemaError::type_not_found(name, context)),
        }
    }

    fn resolve_namespace(
        &self,
        ns: &'a NamespaceDef,
        extended: &HashSet<NamedRef>,
    ) -> Result<Namespace, SchemaError> {
        let mut out = Namespace::new(&ns.name);

        for model in &ns.models {
            let context = format!("{}::{}", ns.name, model.name);
            let decl = match &model.body {
                ModelBody::Properties(props) => {
                    let base = match &model.base {
                        Some(base) => {
                            Some(self.resolve_model_base(base, ns, &model.name, &context)?)
                        }
                        None => None,
                    };
                    ModelDecl::Object(ObjectDecl {
                        name: model.name.clone(),
                        base,
                        is_concept: extended
                            .contains(&NamedRef::new(&model.name, Some(ns.name.as_str()))),
                        properties: self.resolve_properties(props, ns, &context)?,
                    })
                }
                ModelBody::Array { element, facets } => ModelDecl::Array(ArrayDecl {
                    name: model.name.clone(),
                    element: self.resolve_expr(element, ns, &context)?,
                    facets: facets.clone(),
                }),
            };
            out.models.push(decl);
        }

        for enum_def in &ns.enums {
            out.enums.push(EnumDecl {
                name: enum_def.name.clone(),
                members: enum_def.members.iter().map(|m| m.name.clone()).collect(),
            });
        }

        for scalar in &ns.scalars {
            let context = format!("{}::{}", ns.name, scalar.name);
            let base = match &scalar.base {
                Some(base) => {
                    let mut visiting = vec![format!("{}::{}", ns.name, scalar.name)];
                    Some(self.resolve_scalar_base(
                        &scalar.name,
                        base,
                        ns,
                        &context,
                        &mut visiting,
                    )?)
                }
                None => None,
            };
            out.scalars.push(ScalarDecl {
                name: scalar.name.clone(),
                base,
                facets: scalar.facets.clone(),
            });
        }

        for union_def in &ns.unions {
            let mut variants = Vec::with_capacity(union_def.variants.len());
            for variant in &union_def.variants {
                let context = format!("{}::{}.{}", ns.name, union_def.name, variant.name);
                variants.push(UnionVariant {
                    name: variant.name.clone(),
                    ty: self.resolve_expr(&variant.ty, ns, &context)?,
                });
            }
            out.unions.push(UnionDecl {
                name: union_def.name.clone(),
                variants,
            });
        }

        Ok(out)
    }

    fn resolve_properties(
        &self,
        props: &[PropertyDef],
        home: &'a NamespaceDef,
        context: &str,
    ) -> Result<Vec<PropertyNode>, SchemaError> {
        props
            .iter()
            .map(|p| {
                let context = format!("{context}.{}", p.name);
                Ok(PropertyNode {
                    name: p.name.clone(),
                    ty: self.resolve_expr(&p.ty, home, &context)?,
                    facets: p.facets.clone(),
                })
            })
            .collect()
    }

    fn resolve_expr(
        &self,
        expr: &TypeExpr,
        home: &'a NamespaceDef,
        context: &str,
    ) -> Result<TypeNode, SchemaError> {
        match expr {
            TypeExpr::Reference { name, namespace } => {
                self.resolve_reference(name, namespace.as_deref(), home, context, &mut Vec::new())
            }
            TypeExpr::Object(props) => Ok(TypeNode::ObjectLiteral(
                self.resolve_properties(props, home, context)?,
            )),
            TypeExpr::Tuple(elements) => Ok(TypeNode::Tuple(
                elements
                    .iter()
                    .map(|e| self.resolve_expr(e, home, context))
                    .collect::<Result<_, _>>()?,
            )),
            TypeExpr::Union(variants) => Ok(TypeNode::Union(UnionNode::Anonymous(
                variants
                    .iter()
                    .map(|v| self.resolve_expr(v, home, context))
                    .collect::<Result<_, _>>()?,
            ))),
            TypeExpr::Array(element) => Ok(TypeNode::Array(Box::new(
                self.resolve_expr(element, home, context)?,
            ))),
            TypeExpr::Intrinsic(name) => Ok(TypeNode::Intrinsic(name.clone())),
            TypeExpr::Literal(literal) => Ok(TypeNode::Literal(literal.clone())),
            TypeExpr::Other(kind) => Ok(TypeNode::Unsupported(kind.clone())),
        }
    }

    fn resolve_reference(
        &self,
        name: &str,
        namespace: Option<&str>,
        home: &'a NamespaceDef,
        context: &str,
        visiting: &mut Vec<String>,
    ) -> Result<TypeNode, SchemaError> {
        let target = self.target_namespace(namespace, home, context)?;

        match target.declaration_kind(name) {
            Some(DeclKind::Model | DeclKind::ArrayModel) => Ok(TypeNode::NamedReference(
                NamedRef::new(name, Some(target.name.as_str())),
            )),
            Some(DeclKind::Enum) => Ok(TypeNode::Enum(NamedRef::new(
                name,
                Some(target.name.as_str()),
            ))),
            Some(DeclKind::Union) => Ok(TypeNode::Union(UnionNode::Named(NamedRef::new(
                name,
                Some(target.name.as_str()),
            )))),
            Some(DeclKind::Scalar) => self.resolve_scalar_use(name, target, context, visiting),
            None if namespace.is_none() => {
                if INTRINSIC_TYPES.contains(&name) {
                    Ok(TypeNode::Intrinsic(name.to_string()))
                } else if let Some(scalar) = IntrinsicScalar::from_name(name) {
                    Ok(TypeNode::intrinsic_scalar(scalar))
                } else {
                    Err(SchemaError::type_not_found(name, context))
                }
            }
            None => Err(SchemaError::type_not_found(
                format!("{}::{name}", target.name),
                context,
            )),
        }
    }

    /// Builds the scalar node for a use of a declared scalar, following its
    /// refinement chain.
    fn resolve_scalar_use(
        &self,
        name: &str,
        target: &'a NamespaceDef,
        context: &str,
        visiting: &mut Vec<String>,
    ) -> Result<TypeNode, SchemaError> {
        let key = format!("{}::{name}", target.name);
        if visiting.contains(&key) {
            visiting.push(key);
            return Err(SchemaError::CircularReference {
                path: visiting.join(" -> "),
            });
        }

        let Some(def) = target.get_scalar(name) else {
            return Err(SchemaError::type_not_found(&key, context));
        };

        visiting.push(key);
        let base = match &def.base {
            Some(base) => Some(Box::new(
                self.resolve_scalar_base(name, base, target, context, visiting)?,
            )),
            None => None,
        };
        visiting.pop();

        Ok(TypeNode::Scalar(ScalarNode {
            name: name.to_string(),
            namespace: Some(target.name.clone()),
            base,
        }))
    }

    fn resolve_scalar_base(
        &self,
        scalar: &str,
        base: &TypeExpr,
        home: &'a NamespaceDef,
        context: &str,
        visiting: &mut Vec<String>,
    ) -> Result<TypeNode, SchemaError> {
        let invalid = |base: String| SchemaError::InvalidScalarBase {
            scalar: scalar.to_string(),
            base,
        };

        let TypeExpr::Reference { name, namespace } = base else {
            return Err(invalid(format!("{base:?}")));
        };
        match self.resolve_reference(name, namespace.as_deref(), home, context, visiting)? {
            node @ TypeNode::Scalar(_) => Ok(node),
            _ => Err(invalid(name.clone())),
        }
    }
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;

    fn graph(xml: &str) -> TypeGraph {
        let doc = parse_document(xml).expect("Failed to parse");
        TypeGraph::from_document(&doc).expect("Failed to resolve")
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("circle"), "Circle");
        assert_eq!(to_pascal_case("named_shape"), "NamedShape");
        assert_eq!(to_pascal_case("order-type"), "OrderType");
    }

    #[test]
    fn test_resolve_references_by_kind() {
        let g = graph(
            r#"<typeGraph><namespace name="Main">
                <model name="M">
                    <property name="s" type="string"/>
                    <property name="n"><null/></property>
                    <property name="u" type="unknown"/>
                    <property name="c" type="Color"/>
                    <property name="o" type="Other"/>
                    <property name="sh" type="Shape"/>
                </model>
                <model name="Other"/>
                <enum name="Color"><member name="red"/></enum>
                <union name="Shape"><variant name="a"><object/></variant></union>
            </namespace></typeGraph>"#,
        );

        let ns = g.get_namespace("Main").unwrap();
        let ModelDecl::Object(m) = &ns.models[0] else {
            panic!("expected object model");
        };
        let kinds: Vec<_> = m.properties.iter().map(|p| &p.ty).collect();
        assert_eq!(kinds[0], &TypeNode::intrinsic_scalar(IntrinsicScalar::String));
        assert_eq!(kinds[1], &TypeNode::Intrinsic("null".to_string()));
        assert_eq!(kinds[2], &TypeNode::Intrinsic("unknown".to_string()));
        assert_eq!(kinds[3], &TypeNode::Enum(NamedRef::new("Color", Some("Main"))));
        assert_eq!(
            kinds[4],
            &TypeNode::NamedReference(NamedRef::new("Other", Some("Main")))
        );
        assert_eq!(
            kinds[5],
            &TypeNode::Union(UnionNode::Named(NamedRef::new("Shape", Some("Main"))))
        );
    }

    #[test]
    fn test_literal_types_are_carried() {
        let g = graph(
            r#"<typeGraph><namespace name="Main">
                <model name="M">
                    <property name="on"><literal kind="boolean" value="false"/></property>
                    <property name="n"><literal kind="numeric" value="1.50"/></property>
                </model>
            </namespace></typeGraph>"#,
        );

        let ModelDecl::Object(m) = &g.namespaces[0].models[0] else {
            panic!("expected object model");
        };
        assert_eq!(m.properties[0].ty, TypeNode::Literal(LiteralValue::Boolean(false)));
        assert_eq!(m.properties[0].ty.kind_name(), "boolean literal false");
        assert_eq!(m.properties[1].ty.kind_name(), "numeric literal 1.50");
    }

    #[test]
    fn test_scalar_chain_is_attached() {
        let g = graph(
            r#"<typeGraph><namespace name="Main">
                <scalar name="Short" extends="Name" maxLength="8"/>
                <scalar name="Name" extends="string" minLength="1"/>
                <model name="M"><property name="s" type="Short"/></model>
            </namespace></typeGraph>"#,
        );

        let ns = g.get_namespace("Main").unwrap();
        let ModelDecl::Object(m) = &ns.models[0] else {
            panic!("expected object model");
        };
        let TypeNode::Scalar(short) = &m.properties[0].ty else {
            panic!("expected scalar");
        };
        assert_eq!(short.name, "Short");
        let Some(base) = short.base.as_deref() else {
            panic!("expected base");
        };
        let TypeNode::Scalar(name) = base else {
            panic!("expected scalar base");
        };
        assert_eq!(name.name, "Name");
        assert_eq!(
            name.base.as_deref(),
            Some(&TypeNode::intrinsic_scalar(IntrinsicScalar::String))
        );
    }

    #[test]
    fn test_cross_namespace_reference() {
        let g = graph(
            r#"<typeGraph>
                <namespace name="Main">
                    <model name="M"><property name="w"><ref type="Widget" namespace="Parts"/></property></model>
                </namespace>
                <namespace name="Parts"><model name="Widget"/></namespace>
            </typeGraph>"#,
        );

        let ModelDecl::Object(m) = &g.namespaces[0].models[0] else {
            panic!("expected object model");
        };
        assert_eq!(
            m.properties[0].ty,
            TypeNode::NamedReference(NamedRef::new("Widget", Some("Parts")))
        );
    }

    #[test]
    fn test_concept_marking() {
        let g = graph(
            r#"<typeGraph><namespace name="Main">
                <model name="Dog" extends="Animal"/>
                <model name="Animal"/>
            </namespace></typeGraph>"#,
        );

        let ns = g.get_namespace("Main").unwrap();
        let ModelDecl::Object(dog) = &ns.models[0] else {
            panic!("expected object model");
        };
        let ModelDecl::Object(animal) = &ns.models[1] else {
            panic!("expected object model");
        };
        assert!(!dog.is_concept);
        assert_eq!(dog.base, Some(NamedRef::new("Animal", Some("Main"))));
        assert!(animal.is_concept);
    }

    #[test]
    fn test_unknown_type_reference() {
        let doc = parse_document(
            r#"<typeGraph><namespace name="Main">
                <model name="M"><property name="x" type="Missing"/></model>
            </namespace></typeGraph>"#,
        )
        .unwrap();
        let result = TypeGraph::from_document(&doc);
        assert!(matches!(result, Err(SchemaError::TypeNotFound { .. })));
    }

    #[test]
    fn test_circular_scalar_chain() {
        let doc = parse_document(
            r#"<typeGraph><namespace name="Main">
                <scalar name="A" extends="B"/>
                <scalar name="B" extends="A"/>
            </namespace></typeGraph>"#,
        )
        .unwrap();
        let result = TypeGraph::from_document(&doc);
        assert!(matches!(result, Err(SchemaError::CircularReference { .. })));
    }

    #[test]
    fn test_scalar_cannot_extend_model() {
        let doc = parse_document(
            r#"<typeGraph><namespace name="Main">
                <scalar name="A" extends="M"/>
                <model name="M"/>
            </namespace></typeGraph>"#,
        )
        .unwrap();
        let result = TypeGraph::from_document(&doc);
        assert!(matches!(result, Err(SchemaError::InvalidScalarBase { .. })));
    }

    #[test]
    fn test_unsupported_kind_survives_resolution() {
        let g = graph(
            r#"<typeGraph><namespace name="Main">
                <model name="M"><property name="op"><operation/></property></model>
            </namespace></typeGraph>"#,
        );
        let ModelDecl::Object(m) = &g.namespaces[0].models[0] else {
            panic!("expected object model");
        };
        assert_eq!(m.properties[0].ty, TypeNode::Unsupported("operation".to_string()));
        assert_eq!(m.properties[0].ty.kind_name(), "'operation'");
    }
}
