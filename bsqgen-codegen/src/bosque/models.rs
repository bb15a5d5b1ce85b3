//! Entity, concept and array model generation.

use crate::bosque::DeclarationBlock;
use crate::constraints::{conjoin, synthesize};
use crate::error::{CodegenError, DeclarationSite};
use crate::path::AccessPath;
use crate::resolver::TypeResolver;
use bsqgen_schema::{ArrayDecl, ModelDecl, Namespace, ObjectDecl, PropertyNode};

/// Field lines and invariants of a record-shaped declaration.
#[derive(Debug, Default)]
pub(crate) struct RecordBody {
    fields: Vec<String>,
    invariants: Vec<String>,
}

impl RecordBody {
    /// Resolves every property at its own root path.
    pub(crate) fn build(
        resolver: &TypeResolver<'_>,
        props: &[PropertyNode],
        site: &DeclarationSite,
    ) -> Result<Self, CodegenError> {
        let mut body = Self::default();

        for prop in props {
            let path = AccessPath::field(&prop.name);
            let result = resolver
                .resolve_property(prop, &path)
                .map_err(|e| e.at(site.member(&prop.name)))?;
            body.fields
                .push(format!("field {}: {};", prop.name, result.decl));
            body.invariants.extend(
                result
                    .constraints
                    .into_iter()
                    .map(|c| format!("invariant {c};")),
            );
        }

        Ok(body)
    }

    /// Returns every statement, fields first.
    pub(crate) fn statements(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .chain(self.invariants.iter())
            .map(String::as_str)
    }
}

/// Generator for entity, concept and array model declarations.
pub struct ModelGenerator<'a> {
    ns: &'a Namespace,
    resolver: TypeResolver<'a>,
}

impl<'a> ModelGenerator<'a> {
    /// Creates a new model generator.
    #[must_use]
    pub fn new(ns: &'a Namespace) -> Self {
        Self {
            ns,
            resolver: TypeResolver::new(&ns.name),
        }
    }

    /// Generates all model declarations.
    #[must_use]
    pub fn generate(&self) -> DeclarationBlock {
        let mut block = DeclarationBlock::default();

        for model in &self.ns.models {
            let result = match model {
                ModelDecl::Object(decl) => self.generate_object(decl),
                ModelDecl::Array(decl) => self.generate_array(decl),
            };
            block.push(result);
        }

        block
    }

    /// Generates an entity or concept declaration.
    ///
    /// # Errors
    /// Returns `CodegenError` if a property cannot be resolved.
    pub fn generate_object(&self, decl: &ObjectDecl) -> Result<String, CodegenError> {
        let site = DeclarationSite::new(&self.ns.name, &decl.name);
        let body = RecordBody::build(&self.resolver, &decl.properties, &site)?;

        let kind = if decl.is_concept { "concept" } else { "entity" };
        let mut output = format!("{kind} {}", decl.name);
        if let Some(base) = &decl.base {
            output.push_str(&format!(
                " provides {}",
                self.resolver.names().qualify_ref(base)
            ));
        }

        let mut statements = body.statements().peekable();
        if statements.peek().is_none() {
            output.push_str(" {}\n");
        } else {
            output.push_str(" {\n");
            for statement in statements {
                output.push_str(&format!("    {statement}\n"));
            }
            output.push_str("}\n");
        }

        tracing::debug!(declaration = %site, kind, "generated model");
        Ok(output)
    }

    /// Generates a named array type.
    ///
    /// # Errors
    /// Returns `CodegenError` if the element type or a facet cannot be
    /// resolved.
    pub fn generate_array(&self, decl: &ArrayDecl) -> Result<String, CodegenError> {
        let site = DeclarationSite::new(&self.ns.name, &decl.name);
        let path = AccessPath::value();

        let mut constraints =
            synthesize(&decl.facets, &path).map_err(|e| e.at(site.clone()))?;
        let list = self
            .resolver
            .resolve_array(&decl.element, &path)
            .map_err(|e| e.at(site.clone()))?;
        constraints.extend(list.constraints);

        tracing::debug!(declaration = %site, "generated array model");
        Ok(refined_alias(&decl.name, &list.decl, &constraints))
    }
}

/// Renders `type Name = Base;`, adding an invariant clause when there are
/// constraints.
pub(crate) fn refined_alias(name: &str, base: &str, constraints: &[String]) -> String {
    if constraints.is_empty() {
        format!("type {name} = {base};\n")
    } else {
        format!(
            "type {name} = {base} & {{ invariant {}; }}\n",
            conjoin(constraints)
        )
    }
}
