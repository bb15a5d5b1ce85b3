//! # bsqgen Codegen
//!
//! Bosque declaration generation from resolved type graphs.
//!
//! This crate provides:
//! - Type reference resolution with access-path anchored invariants
//! - Constraint synthesis from refinement facets
//! - Entity, enum, refined type and datatype generation
//! - Emitter options and output writing

pub mod bosque;
pub mod constraints;
pub mod error;
pub mod generator;
pub mod naming;
pub mod options;
pub mod output;
pub mod path;
pub mod resolver;

pub use error::{CodegenError, DeclarationSite, ResolveError};
pub use generator::{Emission, Generator};
pub use naming::NameQualifier;
pub use options::EmitterOptions;
pub use output::OutputWriter;
pub use path::AccessPath;
pub use resolver::{ProcessResult, TypeResolver};

use bsqgen_schema::TypeGraph;
use std::path::{Path, PathBuf};

/// Parses, validates and resolves a type graph document.
fn load_graph(xml: &str) -> Result<TypeGraph, CodegenError> {
    let document = bsqgen_schema::parse_document(xml)?;
    bsqgen_schema::validate_document(&document)?;
    Ok(TypeGraph::from_document(&document)?)
}

/// Generates Bosque declarations from a type graph XML string.
///
/// # Arguments
/// * `xml` - Type graph document content
///
/// # Returns
/// Generated Bosque source for every namespace.
///
/// # Errors
/// Returns `CodegenError` if loading fails or any declaration fails to
/// generate.
pub fn generate_from_xml(xml: &str) -> Result<String, CodegenError> {
    let graph = load_graph(xml)?;
    let generator = Generator::new(&graph);
    generator.generate()
}

/// Generates Bosque declarations from a type graph XML file.
///
/// # Arguments
/// * `path` - Path to the type graph document
///
/// # Returns
/// Generated Bosque source for every namespace.
///
/// # Errors
/// Returns `CodegenError` if reading, loading, or generation fails.
pub fn generate_from_file(path: &Path) -> Result<String, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml)
}

/// Generates Bosque declarations from a type graph XML string and writes
/// them as configured.
///
/// # Returns
/// The paths written.
///
/// # Errors
/// Returns `CodegenError` if loading, generation, or writing fails.
pub fn emit_to_files(
    xml: &str,
    options: &EmitterOptions,
) -> Result<Vec<PathBuf>, CodegenError> {
    let graph = load_graph(xml)?;
    let emission = Generator::with_options(&graph, options.clone()).emit()?;
    OutputWriter::new(options).write(emission)
}
