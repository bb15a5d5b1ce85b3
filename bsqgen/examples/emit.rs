//! Example emitter turning a type graph document into Bosque sources.
//!
//! Run with: `cargo run --example emit -- [graph.xml] [output-dir] [namespaces]`
//!
//! Without arguments a built-in document is generated and printed.

use bsqgen::prelude::*;
use std::path::Path;

const DEMO_GRAPH: &str = r#"<typeGraph>
    <namespace name="Main">
        <model name="Order" extends="Record">
            <property name="id" type="string" pattern="[A-Z]{2}[0-9]+" maxLength="16"/>
            <property name="qty" type="Quantity"/>
            <property name="lines" minItems="1">
                <array>
                    <object>
                        <property name="sku" type="string" minLength="4" maxLength="12"/>
                        <property name="price" type="decimal" minValue="0"/>
                    </object>
                </array>
            </property>
            <property name="shipTo"><ref type="Address" namespace="Geo"/></property>
        </model>
        <model name="Record">
            <property name="created" type="utcDateTime"/>
        </model>
        <array name="Tags" element="string" maxItems="8"/>
        <enum name="Status">
            <member name="open"/>
            <member name="filled"/>
            <member name="cancelled"/>
        </enum>
        <scalar name="Quantity" extends="uint32" minValue="1" maxValue="10000"/>
        <union name="Event">
            <variant name="placed"><object><property name="at" type="utcDateTime"/></object></variant>
            <variant name="partial_fill">
                <object><property name="filled" type="uint32" minValue="1"/></object>
            </variant>
        </union>
    </namespace>
    <namespace name="Geo">
        <model name="Address">
            <property name="line" type="string" minLength="1"/>
            <property name="point"><tuple><ref type="float64"/><ref type="float64"/></tuple></property>
        </model>
    </namespace>
</typeGraph>"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let Some(input) = args.first() else {
        println!("{}", generate_from_xml(DEMO_GRAPH)?);
        return Ok(());
    };

    let xml = std::fs::read_to_string(Path::new(input))?;
    let mut options = EmitterOptions::new();
    if let Some(dir) = args.get(1) {
        options = options.output_dir(dir);
    }
    if let Some(list) = args.get(2) {
        options = options.namespaces_from_list(list);
    }

    let written = emit_to_files(&xml, &options)?;
    tracing::info!(files = written.len(), "emission finished");
    for path in written {
        println!("{}", path.display());
    }

    Ok(())
}
