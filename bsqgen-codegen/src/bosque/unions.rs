//! Tagged union (datatype) generation.

use crate::bosque::DeclarationBlock;
use crate::bosque::models::RecordBody;
use crate::error::{CodegenError, DeclarationSite};
use crate::resolver::TypeResolver;
use bsqgen_schema::ir::to_pascal_case;
use bsqgen_schema::{Namespace, TypeNode, UnionDecl};

/// Generator for tagged union declarations.
pub struct UnionGenerator<'a> {
    ns: &'a Namespace,
    resolver: TypeResolver<'a>,
}

impl<'a> UnionGenerator<'a> {
    /// Creates a new union generator.
    #[must_use]
    pub fn new(ns: &'a Namespace) -> Self {
        Self {
            ns,
            resolver: TypeResolver::new(&ns.name),
        }
    }

    /// Generates all union declarations.
    #[must_use]
    pub fn generate(&self) -> DeclarationBlock {
        let mut block = DeclarationBlock::default();

        for decl in &self.ns.unions {
            block.push(self.generate_union(decl));
        }

        block
    }

    /// Generates one datatype declaration with a tagged alternative per
    /// variant.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidUnionVariantShape` if a variant is not an
    /// object literal, or any error raised while resolving variant fields.
    pub fn generate_union(&self, decl: &UnionDecl) -> Result<String, CodegenError> {
        let site = DeclarationSite::new(&self.ns.name, &decl.name);
        let mut alternatives = Vec::with_capacity(decl.variants.len());

        for variant in &decl.variants {
            let TypeNode::ObjectLiteral(props) = &variant.ty else {
                return Err(CodegenError::InvalidUnionVariantShape {
                    site,
                    variant: variant.name.clone(),
                    kind: variant.ty.kind_name(),
                });
            };

            // Fields are roots of the alternative, not members of the union.
            let body = RecordBody::build(&self.resolver, props, &site.member(&variant.name))?;
            let statements = body.statements().collect::<Vec<_>>();
            let tag = to_pascal_case(&variant.name);
            alternatives.push(if statements.is_empty() {
                format!("{tag} {{}}")
            } else {
                format!("{tag} {{ {} }}", statements.join(" "))
            });
        }

        tracing::debug!(
            declaration = %site,
            variants = alternatives.len(),
            "generated union"
        );
        Ok(format!(
            "datatype {} of\n    {}\n;\n",
            decl.name,
            alternatives.join("\n    | ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsqgen_schema::load_type_graph;

    fn generate(xml: &str) -> DeclarationBlock {
        let graph = load_type_graph(xml).expect("Failed to load");
        UnionGenerator::new(&graph.namespaces[0]).generate()
    }

    #[test]
    fn test_two_variants_without_cross_contamination() {
        let block = generate(
            r#"<typeGraph><namespace name="Main">
                <union name="Shape">
                    <variant name="circle">
                        <object><property name="r" type="float64" minValue="0"/></object>
                    </variant>
                    <variant name="named_rect">
                        <object>
                            <property name="w" type="float64"/>
                            <property name="label" type="string" maxLength="4"/>
                        </object>
                    </variant>
                </union>
            </namespace></typeGraph>"#,
        );

        assert_eq!(
            block.source,
            "datatype Shape of\n    \
             Circle { field r: Float; invariant $r >= 0; }\n    \
             | NamedRect { field w: Float; field label: String; \
             invariant $label.length() in [, 4]; }\n;\n\n"
        );
        assert!(block.errors.is_empty());
    }

    #[test]
    fn test_empty_variant() {
        let block = generate(
            r#"<typeGraph><namespace name="Main">
                <union name="Opt"><variant name="none"><object/></variant></union>
            </namespace></typeGraph>"#,
        );
        assert_eq!(block.source, "datatype Opt of\n    None {}\n;\n\n");
    }

    #[test]
    fn test_non_object_variant_is_rejected() {
        let block = generate(
            r#"<typeGraph><namespace name="Main">
                <union name="Bad">
                    <variant name="ok"><object/></variant>
                    <variant name="text" type="string"/>
                </union>
            </namespace></typeGraph>"#,
        );

        assert!(block.source.is_empty());
        match &block.errors[0] {
            CodegenError::InvalidUnionVariantShape { site, variant, kind } => {
                assert_eq!(site.to_string(), "Main::Bad");
                assert_eq!(variant, "text");
                assert_eq!(kind, "scalar 'string'");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_variant_field_error_names_variant() {
        let block = generate(
            r#"<typeGraph><namespace name="Main">
                <union name="U">
                    <variant name="a"><object><property name="k" type="string" knownValues="x"/></object></variant>
                </union>
            </namespace></typeGraph>"#,
        );
        assert_eq!(
            block.errors[0].to_string(),
            "Main::U.a.k: unsupported constraint facet 'knownValues' at '$k'"
        );
    }
}
