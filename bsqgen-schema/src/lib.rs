//! # bsqgen Schema
//!
//! Type graph model, loader and validation.
//!
//! This crate provides:
//! - XML parsing of resolved schema type graphs
//! - Document definitions for namespaces and declarations
//! - Document validation
//! - The resolved, immutable type graph consumed by code generation

pub mod error;
pub mod ir;
pub mod models;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use ir::{
    ArrayDecl, EnumDecl, ModelDecl, NamedRef, Namespace, ObjectDecl, PropertyNode, ScalarDecl,
    ScalarNode, TypeGraph, TypeNode, UnionDecl, UnionNode, UnionVariant,
};
pub use models::{ModelBody, ModelDef, PropertyDef, UnionDef, VariantDef};
pub use parser::{parse_document, parse_document_file};
pub use types::{
    DeclKind, EnumDef, EnumMember, IntrinsicScalar, LiteralValue, NamespaceDef, NumericLiteral,
    RefinementFacets, ScalarDef, SchemaDocument, TypeExpr,
};
pub use validation::validate_document;

/// Parses, validates and resolves a type graph document.
///
/// # Errors
/// Returns `SchemaError` if the document is malformed, invalid, or contains
/// unresolvable references.
pub fn load_type_graph(xml: &str) -> Result<TypeGraph, SchemaError> {
    let document = parse_document(xml)?;
    validate_document(&document)?;
    TypeGraph::from_document(&document)
}
