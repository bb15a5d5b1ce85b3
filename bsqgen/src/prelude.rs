//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use bsqgen::prelude::*;
//! ```

// Schema types
pub use bsqgen_schema::{
    IntrinsicScalar, NamedRef, Namespace, ParseError, PropertyNode, RefinementFacets,
    SchemaError, TypeGraph, TypeNode, load_type_graph,
};

// Codegen types
pub use bsqgen_codegen::{
    AccessPath, CodegenError, DeclarationSite, Emission, EmitterOptions, Generator,
    OutputWriter, ProcessResult, ResolveError, TypeResolver,
};
pub use bsqgen_codegen::{emit_to_files, generate_from_file, generate_from_xml};
