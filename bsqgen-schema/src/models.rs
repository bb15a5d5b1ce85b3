//! Model and union definitions for type graph documents.
//!
//! This module contains the data structures representing object models,
//! array models, their properties, and tagged unions.

use crate::types::{RefinementFacets, TypeExpr};

/// Model definition.
#[derive(Debug, Clone)]
pub struct ModelDef {
    /// Model name.
    pub name: String,
    /// Base model this model extends.
    pub base: Option<TypeExpr>,
    /// Model body.
    pub body: ModelBody,
}

/// Body of a model: either a property list or an array of elements.
#[derive(Debug, Clone)]
pub enum ModelBody {
    /// Object model with ordered properties.
    Properties(Vec<PropertyDef>),
    /// Array model.
    Array {
        /// Element type.
        element: TypeExpr,
        /// Facets on the array itself.
        facets: RefinementFacets,
    },
}

impl ModelDef {
    /// Creates a new model definition.
    #[must_use]
    pub fn new(name: impl Into<String>, body: ModelBody) -> Self {
        Self {
            name: name.into(),
            base: None,
            body,
        }
    }

    /// Returns true if this is an array model.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self.body, ModelBody::Array { .. })
    }

    /// Adds a property to an object model. Ignored for array models.
    pub fn add_property(&mut self, property: PropertyDef) {
        if let ModelBody::Properties(props) = &mut self.body {
            props.push(property);
        }
    }
}

/// Property definition.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    /// Property name.
    pub name: String,
    /// Property type.
    pub ty: TypeExpr,
    /// Facets attached to the property.
    pub facets: RefinementFacets,
}

impl PropertyDef {
    /// Creates a new property definition.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
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

/// Tagged union definition.
#[derive(Debug, Clone)]
pub struct UnionDef {
    /// Union name.
    pub name: String,
    /// Named variants in declaration order.
    pub variants: Vec<VariantDef>,
}

impl UnionDef {
    /// Creates a new union definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    /// Adds a variant.
    pub fn add_variant(&mut self, variant: VariantDef) {
        self.variants.push(variant);
    }
}

/// Named union variant.
#[derive(Debug, Clone)]
pub struct VariantDef {
    /// Variant name.
    pub name: String,
    /// Variant type.
    pub ty: TypeExpr,
}

impl VariantDef {
    /// Creates a new variant definition.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}
