//! Bosque declaration generation modules.

pub mod enums;
pub mod models;
pub mod scalars;
pub mod unions;

pub use enums::EnumGenerator;
pub use models::ModelGenerator;
pub use scalars::ScalarGenerator;
pub use unions::UnionGenerator;

use crate::error::CodegenError;
use bsqgen_schema::Namespace;

/// Rendered declarations together with the declarations that failed.
#[derive(Debug, Default)]
pub struct DeclarationBlock {
    /// Generated text, one declaration per paragraph.
    pub source: String,
    /// Failed declarations, in emission order.
    pub errors: Vec<CodegenError>,
}

impl DeclarationBlock {
    /// Records the outcome of generating one declaration.
    pub fn push(&mut self, result: Result<String, CodegenError>) {
        match result {
            Ok(text) => {
                self.source.push_str(&text);
                self.source.push('\n');
            }
            Err(e) => {
                tracing::warn!("Skipping declaration: {}", e);
                self.errors.push(e);
            }
        }
    }

    /// Appends another block.
    pub fn append(&mut self, other: Self) {
        self.source.push_str(&other.source);
        self.errors.extend(other.errors);
    }
}

/// Generated text for one namespace.
#[derive(Debug)]
pub struct NamespaceOutput {
    /// Namespace name.
    pub name: String,
    /// Namespace header followed by every declaration that generated.
    pub source: String,
    /// Declarations that failed to generate.
    pub errors: Vec<CodegenError>,
}

/// Generator for a whole namespace.
pub struct NamespaceGenerator<'a> {
    ns: &'a Namespace,
}

impl<'a> NamespaceGenerator<'a> {
    /// Creates a new namespace generator.
    #[must_use]
    pub fn new(ns: &'a Namespace) -> Self {
        Self { ns }
    }

    /// Generates the namespace header and all declarations, in the order
    /// models, enums, scalars, unions.
    #[must_use]
    pub fn generate(&self) -> NamespaceOutput {
        let mut block = DeclarationBlock::default();
        block.append(ModelGenerator::new(self.ns).generate());
        block.append(EnumGenerator::new(self.ns).generate());
        block.append(ScalarGenerator::new(self.ns).generate());
        block.append(UnionGenerator::new(self.ns).generate());

        tracing::debug!(
            namespace = %self.ns.name,
            failed = block.errors.len(),
            "generated namespace"
        );

        NamespaceOutput {
            name: self.ns.name.clone(),
            source: format!("namespace {};\n\n{}", self.ns.name, block.source),
            errors: block.errors,
        }
    }
}
