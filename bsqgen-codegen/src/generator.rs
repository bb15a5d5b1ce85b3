//! Main code generator.

use crate::bosque::{NamespaceGenerator, NamespaceOutput};
use crate::error::CodegenError;
use crate::options::EmitterOptions;
use bsqgen_schema::{Namespace, SchemaError, TypeGraph};
use rayon::prelude::*;

/// Main code generator that coordinates per-namespace generation.
pub struct Generator<'a> {
    graph: &'a TypeGraph,
    options: EmitterOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator with default options.
    #[must_use]
    pub fn new(graph: &'a TypeGraph) -> Self {
        Self::with_options(graph, EmitterOptions::default())
    }

    /// Creates a new generator with the given options.
    #[must_use]
    pub fn with_options(graph: &'a TypeGraph, options: EmitterOptions) -> Self {
        Self { graph, options }
    }

    /// Returns the options.
    #[must_use]
    pub fn options(&self) -> &EmitterOptions {
        &self.options
    }

    /// Generates every selected namespace, keeping failed declarations as
    /// values alongside the text that did generate.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` if a selected namespace does not exist.
    pub fn emit(&self) -> Result<Emission, CodegenError> {
        for name in self.options.get_namespaces() {
            if self.graph.get_namespace(name).is_none() {
                return Err(SchemaError::NamespaceNotFound {
                    name: name.clone(),
                    context: "emitter options".to_string(),
                }
                .into());
            }
        }

        let selected: Vec<&Namespace> = self
            .graph
            .namespaces
            .iter()
            .filter(|ns| self.options.includes(&ns.name))
            .collect();

        let generate = |ns: &&Namespace| NamespaceGenerator::new(ns).generate();
        let namespaces: Vec<NamespaceOutput> = if self.options.is_parallel() {
            selected.par_iter().map(generate).collect()
        } else {
            selected.iter().map(generate).collect()
        };

        Ok(Emission { namespaces })
    }

    /// Generates every selected namespace into one string.
    ///
    /// # Errors
    /// Returns `CodegenError` if a selected namespace does not exist, or
    /// `CodegenError::Declarations` if any declaration failed and the
    /// options fail on error.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let emission = self.emit()?.check(self.options.is_fail_on_error())?;
        Ok(emission.combined_source())
    }
}

/// Generated namespaces, in document order.
#[derive(Debug)]
pub struct Emission {
    /// One entry per emitted namespace.
    pub namespaces: Vec<NamespaceOutput>,
}

impl Emission {
    /// Returns true if any declaration failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.namespaces.iter().any(|ns| !ns.errors.is_empty())
    }

    /// Iterates over every failed declaration.
    pub fn errors(&self) -> impl Iterator<Item = &CodegenError> {
        self.namespaces.iter().flat_map(|ns| ns.errors.iter())
    }

    /// Turns failed declarations into an error when `fail_on_error` is set.
    ///
    /// # Errors
    /// Returns `CodegenError::Declarations` holding every failure.
    pub fn check(mut self, fail_on_error: bool) -> Result<Self, CodegenError> {
        if fail_on_error && self.has_errors() {
            let errors = self
                .namespaces
                .iter_mut()
                .flat_map(|ns| std::mem::take(&mut ns.errors))
                .collect();
            return Err(CodegenError::Declarations { errors });
        }
        Ok(self)
    }

    /// Joins every namespace block into one text.
    #[must_use]
    pub fn combined_source(&self) -> String {
        self.namespaces
            .iter()
            .map(|ns| ns.source.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
