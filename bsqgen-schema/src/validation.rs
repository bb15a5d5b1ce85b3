//! Type graph document validation.
//!
//! This module checks a parsed document for structural defects the upstream
//! compiler would normally rule out: duplicate names, inverted facet bounds,
//! empty unions and user scalars shadowing intrinsic names.

use crate::error::SchemaError;
use crate::ir::to_pascal_case;
use crate::models::{ModelBody, PropertyDef, UnionDef};
use crate::types::{
    EnumDef, IntrinsicScalar, NamespaceDef, RefinementFacets, SchemaDocument, TypeExpr,
};
use std::collections::{HashMap, HashSet};

/// Validates a parsed document for correctness.
///
/// # Arguments
/// * `document` - The document to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_document(document: &SchemaDocument) -> Result<(), SchemaError> {
    let mut seen_namespaces = HashSet::new();

    for ns in &document.namespaces {
        if !seen_namespaces.insert(&ns.name) {
            return Err(SchemaError::validation(format!(
                "Duplicate namespace '{}'",
                ns.name
            )));
        }
        validate_namespace(ns)?;
    }

    Ok(())
}

/// Validates all declarations in one namespace.
fn validate_namespace(ns: &NamespaceDef) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();
    for (name, kind) in ns.declarations() {
        if !seen_names.insert(name) {
            return Err(SchemaError::validation(format!(
                "Duplicate declaration '{}' in namespace '{}' ({})",
                name,
                ns.name,
                kind.as_str()
            )));
        }
    }

    for model in &ns.models {
        let context = format!("{}::{}", ns.name, model.name);
        match &model.body {
            ModelBody::Properties(props) => validate_properties(props, &context)?,
            ModelBody::Array { element, facets } => {
                validate_facets(facets, &context)?;
                validate_type_expr(element, &context)?;
            }
        }
    }

    for enum_def in &ns.enums {
        validate_enum(enum_def)?;
    }

    for scalar in &ns.scalars {
        if IntrinsicScalar::from_name(&scalar.name).is_some() {
            return Err(SchemaError::validation(format!(
                "Scalar '{}' in namespace '{}' shadows an intrinsic scalar",
                scalar.name, ns.name
            )));
        }
        validate_facets(&scalar.facets, &format!("{}::{}", ns.name, scalar.name))?;
    }

    for union_def in &ns.unions {
        validate_union(ns, union_def)?;
    }

    Ok(())
}

/// Validates the properties of an object model or literal.
fn validate_properties(props: &[PropertyDef], context: &str) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();

    for prop in props {
        if !seen_names.insert(&prop.name) {
            return Err(SchemaError::validation(format!(
                "Duplicate property '{}' in '{}'",
                prop.name, context
            )));
        }

        let prop_context = format!("{}.{}", context, prop.name);
        validate_facets(&prop.facets, &prop_context)?;
        validate_type_expr(&prop.ty, &prop_context)?;
    }

    Ok(())
}

/// Validates nested object literals inside a type expression.
fn validate_type_expr(expr: &TypeExpr, context: &str) -> Result<(), SchemaError> {
    match expr {
        TypeExpr::Object(props) => validate_properties(props, context),
        TypeExpr::Tuple(members) | TypeExpr::Union(members) => members
            .iter()
            .try_for_each(|m| validate_type_expr(m, context)),
        TypeExpr::Array(element) => validate_type_expr(element, context),
        TypeExpr::Reference { .. }
        | TypeExpr::Intrinsic(_)
        | TypeExpr::Literal(_)
        | TypeExpr::Other(_) => Ok(()),
    }
}

/// Validates that every facet pair is ordered.
fn validate_facets(facets: &RefinementFacets, context: &str) -> Result<(), SchemaError> {
    fn ordered<T: PartialOrd + std::fmt::Display>(
        min: Option<T>,
        max: Option<T>,
        facet: &str,
        context: &str,
    ) -> Result<(), SchemaError> {
        match (min, max) {
            (Some(min), Some(max)) if min > max => Err(SchemaError::validation(format!(
                "Inverted {facet} bounds [{min}, {max}] on '{context}'"
            ))),
            _ => Ok(()),
        }
    }

    ordered(facets.min_length.as_ref(), facets.max_length.as_ref(), "length", context)?;
    ordered(facets.min_items.as_ref(), facets.max_items.as_ref(), "item count", context)?;
    ordered(facets.min_value.as_ref(), facets.max_value.as_ref(), "value", context)?;
    Ok(())
}

/// Validates an enum declaration.
fn validate_enum(enum_def: &EnumDef) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();

    for member in &enum_def.members {
        if !seen_names.insert(&member.name) {
            return Err(SchemaError::validation(format!(
                "Duplicate enum member '{}' in enum '{}'",
                member.name, enum_def.name
            )));
        }
    }

    Ok(())
}

/// Validates a union declaration.
fn validate_union(ns: &NamespaceDef, union_def: &UnionDef) -> Result<(), SchemaError> {
    if union_def.variants.is_empty() {
        return Err(SchemaError::validation(format!(
            "Union '{}' in namespace '{}' has no variants",
            union_def.name, ns.name
        )));
    }

    let mut seen_names = HashSet::new();
    let mut seen_tags: HashMap<String, &str> = HashMap::new();
    for variant in &union_def.variants {
        if !seen_names.insert(&variant.name) {
            return Err(SchemaError::validation(format!(
                "Duplicate variant '{}' in union '{}'",
                variant.name, union_def.name
            )));
        }
        let tag = to_pascal_case(&variant.name);
        if let Some(first) = seen_tags.get(&tag) {
            return Err(SchemaError::validation(format!(
                "Variants '{}' and '{}' in union '{}' both map to tag '{}'",
                first, variant.name, union_def.name, tag
            )));
        }
        seen_tags.insert(tag, &variant.name);
        let context = format!("{}::{}.{}", ns.name, union_def.name, variant.name);
        validate_type_expr(&variant.ty, &context)?;
    }

    Ok(())
}
