//! Type graph XML document parser.
//!
//! This module parses the XML rendering of a resolved type graph into the
//! document representation. Names are not resolved here; see
//! [`crate::ir::TypeGraph::from_document`].

use crate::error::ParseError;
use crate::models::{ModelBody, ModelDef, PropertyDef, UnionDef, VariantDef};
use crate::types::{
    EnumDef, EnumMember, LiteralValue, NamespaceDef, RefinementFacets, ScalarDef, SchemaDocument,
    TypeExpr,
};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

/// Parses a type graph document from a string.
///
/// # Arguments
/// * `xml` - XML document content
///
/// # Returns
/// Parsed document or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid elements.
pub fn parse_document(xml: &str) -> Result<SchemaDocument, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut document: Option<SchemaDocument> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match element_name(e)?.as_str() {
                "typeGraph" => document = Some(SchemaDocument::new()),
                "namespace" => {
                    let doc = document
                        .as_mut()
                        .ok_or_else(|| ParseError::structure("namespace outside typeGraph"))?;
                    doc.add_namespace(parse_namespace(&mut reader, e, true)?);
                }
                other => return Err(ParseError::unknown_element(other, "document")),
            },
            Ok(Event::Empty(ref e)) => match element_name(e)?.as_str() {
                "typeGraph" => document = Some(SchemaDocument::new()),
                "namespace" => {
                    let doc = document
                        .as_mut()
                        .ok_or_else(|| ParseError::structure("namespace outside typeGraph"))?;
                    doc.add_namespace(parse_namespace(&mut reader, e, false)?);
                }
                other => return Err(ParseError::unknown_element(other, "document")),
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    document.ok_or_else(|| ParseError::structure("no typeGraph element found"))
}

/// Parses a type graph document from a file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_document_file(path: &std::path::Path) -> Result<SchemaDocument, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_document(&xml)
}

/// Unescaped attributes of one element.
struct Attributes {
    element: String,
    values: Vec<(String, String)>,
}

impl Attributes {
    fn read(e: &BytesStart<'_>) -> Result<Self, ParseError> {
        let element = element_name(e)?;
        let mut values = Vec::new();

        for attr in e.attributes().flatten() {
            let key = std::str::from_utf8(attr.key.as_ref())?;
            let raw = std::str::from_utf8(&attr.value)?;
            values.push((key.to_string(), unescape(raw)?.into_owned()));
        }

        Ok(Self { element, values })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn require(&self, key: &str) -> Result<&str, ParseError> {
        self.get(key)
            .ok_or_else(|| ParseError::missing_attr(&self.element, key))
    }

    fn owned(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    /// Collects every facet attribute on the element.
    fn facets(&self) -> Result<RefinementFacets, ParseError> {
        let mut facets = RefinementFacets::default();
        for (key, value) in &self.values {
            facets
                .set(key, value)
                .map_err(|bad| ParseError::invalid_attr(&self.element, key, bad))?;
        }
        Ok(facets)
    }

    /// Fails on the first facet attribute; nested type expressions carry
    /// none, their enclosing property does.
    fn reject_facets(&self) -> Result<(), ParseError> {
        match self.values.iter().find(|(k, _)| RefinementFacets::is_facet(k)) {
            Some((key, value)) => Err(ParseError::invalid_attr(&self.element, key, value)),
            None => Ok(()),
        }
    }

    /// Reads a reference held in `key`, qualified by `namespace_key`.
    fn reference(&self, key: &str, namespace_key: &str) -> Option<TypeExpr> {
        self.get(key).map(|name| TypeExpr::Reference {
            name: name.to_string(),
            namespace: self.owned(namespace_key),
        })
    }
}

fn element_name(e: &BytesStart<'_>) -> Result<String, ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    Ok(std::str::from_utf8(&name_bytes)?.to_string())
}

/// Visits every child element until the end tag of the current element.
///
/// The callback receives the reader, the child start tag, and whether the
/// child has a body that it must consume.
fn for_each_child<F>(
    reader: &mut Reader<&[u8]>,
    context: &str,
    mut visit: F,
) -> Result<(), ParseError>
where
    F: FnMut(&mut Reader<&[u8]>, &BytesStart<'_>, bool) -> Result<(), ParseError>,
{
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => visit(reader, e, true)?,
            Ok(Event::Empty(ref e)) => visit(reader, e, false)?,
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::structure(format!(
                    "unexpected end of document inside '{context}'"
                )));
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses a namespace and its declarations.
fn parse_namespace(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<NamespaceDef, ParseError> {
    let attrs = Attributes::read(e)?;
    let mut namespace = NamespaceDef::new(attrs.require("name")?);

    if has_body {
        for_each_child(reader, "namespace", |reader, child, body| {
            match element_name(child)?.as_str() {
                "model" => namespace.add_model(parse_model(reader, child, body)?),
                "array" => namespace.add_model(parse_array_model(reader, child, body)?),
                "enum" => namespace.add_enum(parse_enum(reader, child, body)?),
                "scalar" => namespace.add_scalar(parse_scalar(reader, child, body)?),
                "union" => namespace.add_union(parse_union(reader, child, body)?),
                other => return Err(ParseError::unknown_element(other, "namespace")),
            }
            Ok(())
        })?;
    }

    Ok(namespace)
}

/// Parses an object model definition.
fn parse_model(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<ModelDef, ParseError> {
    let attrs = Attributes::read(e)?;
    let mut model = ModelDef::new(attrs.require("name")?, ModelBody::Properties(Vec::new()));
    model.base = attrs.reference("extends", "extendsNamespace");

    if has_body {
        for_each_child(reader, "model", |reader, child, body| {
            match element_name(child)?.as_str() {
                "property" => model.add_property(parse_property(reader, child, body)?),
                other => return Err(ParseError::unknown_element(other, "model")),
            }
            Ok(())
        })?;
    }

    Ok(model)
}

/// Parses a named array model definition.
fn parse_array_model(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<ModelDef, ParseError> {
    let attrs = Attributes::read(e)?;
    let name = attrs.require("name")?.to_string();
    let element = parse_type_slot(
        reader,
        has_body,
        &format!("array '{name}'"),
        attrs.reference("element", "elementNamespace"),
    )?;

    Ok(ModelDef::new(
        name,
        ModelBody::Array {
            element,
            facets: attrs.facets()?,
        },
    ))
}

/// Parses a property definition.
fn parse_property(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<PropertyDef, ParseError> {
    let attrs = Attributes::read(e)?;
    let name = attrs.require("name")?.to_string();
    let ty = parse_type_slot(
        reader,
        has_body,
        &format!("property '{name}'"),
        attrs.reference("type", "namespace"),
    )?;

    Ok(PropertyDef::new(name, ty).with_facets(attrs.facets()?))
}

/// Reads the single type held by a property, variant or array: either the
/// attribute reference or exactly one nested type expression.
fn parse_type_slot(
    reader: &mut Reader<&[u8]>,
    has_body: bool,
    context: &str,
    attribute: Option<TypeExpr>,
) -> Result<TypeExpr, ParseError> {
    let mut nested = Vec::new();
    if has_body {
        for_each_child(reader, context, |reader, child, body| {
            nested.push(parse_type_expr(reader, child, body)?);
            Ok(())
        })?;
    }

    match (attribute, nested.len()) {
        (Some(ty), 0) => Ok(ty),
        (None, 1) => Ok(nested.remove(0)),
        (Some(_), _) => Err(ParseError::structure(format!(
            "{context} has both a type attribute and a nested type"
        ))),
        (None, 0) => Err(ParseError::structure(format!("{context} has no type"))),
        (None, n) => Err(ParseError::structure(format!(
            "{context} has {n} nested types, expected one"
        ))),
    }
}

/// Parses a nested type expression element.
fn parse_type_expr(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<TypeExpr, ParseError> {
    let attrs = Attributes::read(e)?;
    attrs.reject_facets()?;

    let expr = match attrs.element.as_str() {
        "ref" => {
            let name = attrs.require("type")?;
            if has_body {
                skip_to_end(reader)?;
            }
            TypeExpr::Reference {
                name: name.to_string(),
                namespace: attrs.owned("namespace"),
            }
        }
        "object" => {
            let mut properties = Vec::new();
            if has_body {
                for_each_child(reader, "object", |reader, child, body| {
                    match element_name(child)?.as_str() {
                        "property" => properties.push(parse_property(reader, child, body)?),
                        other => return Err(ParseError::unknown_element(other, "object")),
                    }
                    Ok(())
                })?;
            }
            TypeExpr::Object(properties)
        }
        "tuple" | "union" => {
            let mut members = Vec::new();
            if has_body {
                for_each_child(reader, &attrs.element, |reader, child, body| {
                    members.push(parse_type_expr(reader, child, body)?);
                    Ok(())
                })?;
            }
            if attrs.element == "tuple" {
                TypeExpr::Tuple(members)
            } else {
                TypeExpr::Union(members)
            }
        }
        "array" => {
            let element = parse_type_slot(
                reader,
                has_body,
                "array",
                attrs.reference("element", "elementNamespace"),
            )?;
            TypeExpr::Array(Box::new(element))
        }
        "null" => {
            if has_body {
                skip_to_end(reader)?;
            }
            TypeExpr::Intrinsic("null".to_string())
        }
        "intrinsic" => {
            let name = attrs.require("name")?.to_string();
            if has_body {
                skip_to_end(reader)?;
            }
            TypeExpr::Intrinsic(name)
        }
        "literal" => {
            let kind = attrs.require("kind")?;
            let value = attrs.require("value")?;
            if has_body {
                skip_to_end(reader)?;
            }
            let literal = LiteralValue::parse(kind, value).map_err(|attribute| {
                let bad = if attribute == "kind" { kind } else { value };
                ParseError::invalid_attr("literal", attribute, bad)
            })?;
            TypeExpr::Literal(literal)
        }
        other => {
            if has_body {
                skip_to_end(reader)?;
            }
            TypeExpr::Other(other.to_string())
        }
    };

    Ok(expr)
}

/// Parses an enum definition.
fn parse_enum(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<EnumDef, ParseError> {
    let attrs = Attributes::read(e)?;
    let mut enum_def = EnumDef::new(attrs.require("name")?);

    if has_body {
        for_each_child(reader, "enum", |reader, child, body| {
            let member = Attributes::read(child)?;
            if member.element != "member" {
                return Err(ParseError::unknown_element(&member.element, "enum"));
            }
            if body {
                skip_to_end(reader)?;
            }
            enum_def.add_member(EnumMember {
                name: member.require("name")?.to_string(),
            });
            Ok(())
        })?;
    }

    Ok(enum_def)
}

/// Parses a scalar definition.
fn parse_scalar(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<ScalarDef, ParseError> {
    let attrs = Attributes::read(e)?;
    if has_body {
        skip_to_end(reader)?;
    }

    let mut scalar = ScalarDef::new(
        attrs.require("name")?,
        attrs.reference("extends", "extendsNamespace"),
    );
    scalar.facets = attrs.facets()?;

    Ok(scalar)
}

/// Parses a tagged union definition.
fn parse_union(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<UnionDef, ParseError> {
    let attrs = Attributes::read(e)?;
    let mut union_def = UnionDef::new(attrs.require("name")?);

    if has_body {
        for_each_child(reader, "union", |reader, child, body| {
            let variant = Attributes::read(child)?;
            if variant.element != "variant" {
                return Err(ParseError::unknown_element(&variant.element, "union"));
            }
            let name = variant.require("name")?.to_string();
            let ty = parse_type_slot(
                reader,
                body,
                &format!("variant '{name}'"),
                variant.reference("type", "namespace"),
            )?;
            union_def.add_variant(VariantDef::new(name, ty));
            Ok(())
        })?;
    }

    Ok(union_def)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn properties(model: &ModelDef) -> &[PropertyDef] {
        match &model.body {
            ModelBody::Properties(props) => props,
            ModelBody::Array { .. } => panic!("expected object model"),
        }
    }

    const SIMPLE_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<typeGraph>
    <namespace name="Main">
        <model name="Order" extends="Base">
            <property name="id" type="string" pattern="[A-Z]{3}-\d+"/>
            <property name="qty" type="int32" minValue="1" maxValue="500"/>
            <property name="pos">
                <tuple>
                    <ref type="float64"/>
                    <ref type="float64"/>
                </tuple>
            </property>
            <property name="tags" minItems="1">
                <array element="string"/>
            </property>
        </model>
        <model name="Base"/>
        <array name="Lines" element="Order" maxItems="10"/>
        <enum name="Side">
            <member name="buy"/>
            <member name="sell"/>
        </enum>
        <scalar name="Percent" extends="int32" minValue="0" maxValue="100"/>
        <union name="Shape">
            <variant name="circle">
                <object>
                    <property name="radius" type="float64"/>
                </object>
            </variant>
            <variant name="named" type="Order"/>
        </union>
    </namespace>
    <namespace name="Other"/>
</typeGraph>"#;

    #[test]
    fn test_parse_simple_document() {
        let doc = parse_document(SIMPLE_DOCUMENT).expect("Failed to parse document");

        assert_eq!(doc.namespaces.len(), 2);
        let ns = doc.get_namespace("Main").expect("Main namespace");
        assert_eq!(ns.models.len(), 3);
        assert_eq!(ns.enums.len(), 1);
        assert_eq!(ns.scalars.len(), 1);
        assert_eq!(ns.unions.len(), 1);
        assert!(doc.get_namespace("Other").is_some());
    }

    #[test]
    fn test_parse_model_properties() {
        let doc = parse_document(SIMPLE_DOCUMENT).expect("Failed to parse document");
        let ns = doc.get_namespace("Main").unwrap();
        let order = ns.get_model("Order").unwrap();

        assert_eq!(order.base, Some(TypeExpr::named("Base")));
        let props = properties(order);
        assert_eq!(props.len(), 4);
        assert_eq!(props[0].facets.pattern.as_deref(), Some(r"[A-Z]{3}-\d+"));
        assert_eq!(props[1].facets.min_value.as_ref().map(|v| v.as_str()), Some("1"));
        assert_eq!(props[1].facets.max_value.as_ref().map(|v| v.as_str()), Some("500"));
        assert_eq!(
            props[2].ty,
            TypeExpr::Tuple(vec![TypeExpr::named("float64"), TypeExpr::named("float64")])
        );
        assert_eq!(
            props[3].ty,
            TypeExpr::Array(Box::new(TypeExpr::named("string")))
        );
        assert_eq!(props[3].facets.min_items, Some(1));
    }

    #[test]
    fn test_parse_array_model() {
        let doc = parse_document(SIMPLE_DOCUMENT).expect("Failed to parse document");
        let lines = doc.get_namespace("Main").unwrap().get_model("Lines").unwrap();

        match &lines.body {
            ModelBody::Array { element, facets } => {
                assert_eq!(element, &TypeExpr::named("Order"));
                assert_eq!(facets.max_items, Some(10));
            }
            ModelBody::Properties(_) => panic!("expected array model"),
        }
    }

    #[test]
    fn test_parse_enum_and_union() {
        let doc = parse_document(SIMPLE_DOCUMENT).expect("Failed to parse document");
        let ns = doc.get_namespace("Main").unwrap();

        let side = &ns.enums[0];
        assert_eq!(side.members.len(), 2);
        assert_eq!(side.members[1].name, "sell");

        let shape = &ns.unions[0];
        assert_eq!(shape.variants.len(), 2);
        assert!(matches!(shape.variants[0].ty, TypeExpr::Object(ref p) if p.len() == 1));
        assert_eq!(shape.variants[1].ty, TypeExpr::named("Order"));
    }

    #[test]
    fn test_pattern_attribute_is_unescaped() {
        let xml = r#"<typeGraph><namespace name="Main">
            <scalar name="Tag" extends="string" pattern="a&lt;b&amp;c"/>
        </namespace></typeGraph>"#;

        let doc = parse_document(xml).expect("Failed to parse document");
        let tag = doc.get_namespace("Main").unwrap().get_scalar("Tag").unwrap();
        assert_eq!(tag.facets.pattern.as_deref(), Some("a<b&c"));
    }

    #[test]
    fn test_unknown_type_element_is_kept() {
        let xml = r#"<typeGraph><namespace name="Main">
            <model name="M">
                <property name="p"><operation name="op"><ref type="string"/></operation></property>
                <property name="q"><intrinsic name="unknown"/></property>
            </model>
        </namespace></typeGraph>"#;

        let doc = parse_document(xml).expect("Failed to parse document");
        let props = properties(&doc.get_namespace("Main").unwrap().models[0]).to_vec();
        assert_eq!(props[0].ty, TypeExpr::Other("operation".to_string()));
        assert_eq!(props[1].ty, TypeExpr::Intrinsic("unknown".to_string()));
    }

    #[test]
    fn test_parse_literal_types() {
        let xml = r#"<typeGraph><namespace name="Main">
            <model name="M">
                <property name="flag"><literal kind="boolean" value="true"/></property>
                <property name="mode">
                    <union>
                        <literal kind="string" value="on"/>
                        <literal kind="numeric" value="9007199254740993"/>
                    </union>
                </property>
            </model>
        </namespace></typeGraph>"#;

        let doc = parse_document(xml).expect("Failed to parse document");
        let props = properties(&doc.get_namespace("Main").unwrap().models[0]).to_vec();
        assert_eq!(props[0].ty, TypeExpr::Literal(LiteralValue::Boolean(true)));
        let TypeExpr::Union(members) = &props[1].ty else {
            panic!("expected union");
        };
        assert_eq!(
            members[0],
            TypeExpr::Literal(LiteralValue::String("on".to_string()))
        );
        assert!(matches!(
            &members[1],
            TypeExpr::Literal(LiteralValue::Numeric(n)) if n.as_str() == "9007199254740993"
        ));
    }

    #[test]
    fn test_invalid_literal() {
        let bad_value = r#"<typeGraph><namespace name="Main">
            <model name="M"><property name="f"><literal kind="boolean" value="yes"/></property></model>
        </namespace></typeGraph>"#;
        let bad_kind = r#"<typeGraph><namespace name="Main">
            <model name="M"><property name="f"><literal kind="date" value="x"/></property></model>
        </namespace></typeGraph>"#;

        match parse_document(bad_value) {
            Err(ParseError::InvalidAttribute { attribute, value, .. }) => {
                assert_eq!(attribute, "value");
                assert_eq!(value, "yes");
            }
            other => panic!("expected invalid attribute, got {other:?}"),
        }
        match parse_document(bad_kind) {
            Err(ParseError::InvalidAttribute { attribute, .. }) => assert_eq!(attribute, "kind"),
            other => panic!("expected invalid attribute, got {other:?}"),
        }
    }

    #[test]
    fn test_facets_on_nested_types_are_rejected() {
        let xml = r#"<typeGraph><namespace name="Main">
            <model name="M">
                <property name="t">
                    <tuple><array minItems="1" element="string"/><ref type="int32"/></tuple>
                </property>
            </model>
        </namespace></typeGraph>"#;

        match parse_document(xml) {
            Err(ParseError::InvalidAttribute { element, attribute, value }) => {
                assert_eq!(element, "array");
                assert_eq!(attribute, "minItems");
                assert_eq!(value, "1");
            }
            other => panic!("expected invalid attribute, got {other:?}"),
        }

        let xml = r#"<typeGraph><namespace name="Main">
            <model name="M"><property name="r"><ref type="string" maxLength="3"/></property></model>
        </namespace></typeGraph>"#;
        assert!(matches!(
            parse_document(xml),
            Err(ParseError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn test_missing_name_attribute() {
        let xml = r#"<typeGraph><namespace><model name="M"/></namespace></typeGraph>"#;
        let result = parse_document(xml);
        assert!(matches!(result, Err(ParseError::MissingAttribute { .. })));
    }

    #[test]
    fn test_property_without_type() {
        let xml = r#"<typeGraph><namespace name="Main">
            <model name="M"><property name="p"/></model>
        </namespace></typeGraph>"#;
        let result = parse_document(xml);
        assert!(matches!(result, Err(ParseError::InvalidStructure { .. })));
    }

    #[test]
    fn test_invalid_facet_value() {
        let xml = r#"<typeGraph><namespace name="Main">
            <model name="M"><property name="p" type="string" maxLength="ten"/></model>
        </namespace></typeGraph>"#;
        let result = parse_document(xml);
        assert!(matches!(result, Err(ParseError::InvalidAttribute { .. })));
    }

    #[test]
    fn test_unknown_declaration_element() {
        let xml = r#"<typeGraph><namespace name="Main"><interface name="I"/></namespace></typeGraph>"#;
        let result = parse_document(xml);
        assert!(matches!(result, Err(ParseError::UnknownElement { .. })));
    }

    #[test]
    fn test_missing_root() {
        let result = parse_document("<other/>");
        assert!(result.is_err());
    }
}
