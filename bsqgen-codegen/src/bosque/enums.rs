//! Enum generation.

use crate::bosque::DeclarationBlock;
use bsqgen_schema::{EnumDecl, Namespace};

/// Generator for enum declarations.
pub struct EnumGenerator<'a> {
    ns: &'a Namespace,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(ns: &'a Namespace) -> Self {
        Self { ns }
    }

    /// Generates all enum declarations.
    #[must_use]
    pub fn generate(&self) -> DeclarationBlock {
        let mut block = DeclarationBlock::default();

        for decl in &self.ns.enums {
            block.push(Ok(self.generate_enum(decl)));
        }

        block
    }

    /// Generates one enum declaration.
    #[must_use]
    pub fn generate_enum(&self, decl: &EnumDecl) -> String {
        tracing::debug!(
            namespace = %self.ns.name,
            declaration = %decl.name,
            "generated enum"
        );

        if decl.members.is_empty() {
            return format!("enum {} {{}}\n", decl.name);
        }

        let members = decl
            .members
            .iter()
            .map(|m| format!("    {m}"))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("enum {} {{\n{members}\n}}\n", decl.name)
    }
}
