//! Refined scalar generation.

use crate::bosque::DeclarationBlock;
use crate::bosque::models::refined_alias;
use crate::constraints::synthesize;
use crate::error::{CodegenError, DeclarationSite, ResolveError};
use crate::path::AccessPath;
use crate::resolver::{ProcessResult, TypeResolver};
use bsqgen_schema::{IntrinsicScalar, Namespace, ScalarDecl, TypeNode};

/// Generator for refined scalar declarations.
pub struct ScalarGenerator<'a> {
    ns: &'a Namespace,
    resolver: TypeResolver<'a>,
}

impl<'a> ScalarGenerator<'a> {
    /// Creates a new scalar generator.
    #[must_use]
    pub fn new(ns: &'a Namespace) -> Self {
        Self {
            ns,
            resolver: TypeResolver::new(&ns.name),
        }
    }

    /// Generates all scalar declarations.
    #[must_use]
    pub fn generate(&self) -> DeclarationBlock {
        let mut block = DeclarationBlock::default();

        for decl in &self.ns.scalars {
            block.push(self.generate_scalar(decl));
        }

        block
    }

    /// Generates one scalar declaration. The scalar's own facets are
    /// anchored at `$value`.
    ///
    /// # Errors
    /// Returns `CodegenError` if the base or a facet cannot be resolved.
    pub fn generate_scalar(&self, decl: &ScalarDecl) -> Result<String, CodegenError> {
        let site = DeclarationSite::new(&self.ns.name, &decl.name);
        let path = AccessPath::value();

        let base = self.resolve_base(decl, &path).map_err(|e| e.at(site.clone()))?;
        let mut constraints = synthesize(&decl.facets, &path).map_err(|e| e.at(site.clone()))?;
        constraints.extend(base.constraints);

        tracing::debug!(declaration = %site, "generated scalar");
        Ok(refined_alias(&decl.name, &base.decl, &constraints))
    }

    fn resolve_base(
        &self,
        decl: &ScalarDecl,
        path: &AccessPath,
    ) -> Result<ProcessResult, ResolveError> {
        let Some(base) = &decl.base else {
            return Err(ResolveError::unsupported_node(
                format!("scalar '{}' without a base", decl.name),
                path.as_str(),
            ));
        };

        if let TypeNode::Scalar(scalar) = base {
            if scalar.namespace.is_none() {
                if let Some(bosque) = IntrinsicScalar::lookup(&scalar.name) {
                    return Ok(ProcessResult::bare(bosque));
                }
            }
        }

        self.resolver.resolve(base, path)
    }
}
