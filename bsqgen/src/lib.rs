//! # bsqgen
//!
//! Translates resolved schema type graphs into Bosque declarations with
//! invariants.
//!
//! An upstream schema compiler hands over a fully resolved type graph
//! (models, scalars, enums, unions, tuples, arrays and their refinement
//! facets). bsqgen emits one Bosque block per namespace: entities and
//! concepts with `field` and `invariant` statements, enums, refined type
//! aliases and datatypes.
//!
//! ## Features
//!
//! - **Access-path anchored invariants** - every facet is rendered against the
//!   exact expression that reads the constrained value
//! - **Recursive type algebra** - object literals, tuples, unions, arrays and
//!   scalar refinement chains at any depth
//! - **Structured failures** - unsupported constructs are returned as errors
//!   naming the namespace, declaration, member and access path
//! - **Parallel emission** - namespaces are generated independently
//!
//! ## Quick Start
//!
//! ```ignore
//! use bsqgen::prelude::*;
//!
//! let source = generate_from_xml(xml)?;
//!
//! let options = EmitterOptions::new().output_dir("out").namespaces_from_list("Main");
//! let written = emit_to_files(xml, &options)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Type graph document, XML loader, validation and resolution
//! - [`codegen`] - Resolver, constraint synthesis and Bosque generation

pub mod prelude;

/// Type graph loading, validation and resolution.
pub mod schema {
    pub use bsqgen_schema::*;
}

/// Bosque code generation from type graphs.
pub mod codegen {
    pub use bsqgen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use bsqgen_codegen::{
    CodegenError, EmitterOptions, Generator, emit_to_files, generate_from_file, generate_from_xml,
};
pub use bsqgen_schema::{SchemaError, TypeGraph, load_type_graph};
