//! Type graph document definitions.
//!
//! This module contains the data structures for a type graph document as
//! handed over by the upstream schema compiler: namespaces, enums, scalars,
//! unresolved type expressions, refinement facets and the intrinsic scalar
//! table.

use crate::models::{ModelDef, UnionDef};
use std::collections::HashMap;
use std::fmt;

/// Complete type graph document.
#[derive(Debug, Clone, Default)]
pub struct SchemaDocument {
    /// Namespaces in document order.
    pub namespaces: Vec<NamespaceDef>,
}

impl SchemaDocument {
    /// Creates a new empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a namespace to the document.
    pub fn add_namespace(&mut self, namespace: NamespaceDef) {
        self.namespaces.push(namespace);
    }

    /// Looks up a namespace by name.
    #[must_use]
    pub fn get_namespace(&self, name: &str) -> Option<&NamespaceDef> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }
}

/// Kind of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// Object model.
    Model,
    /// Array model.
    ArrayModel,
    /// Enumeration.
    Enum,
    /// Refined scalar.
    Scalar,
    /// Tagged union.
    Union,
}

impl DeclKind {
    /// Returns a human readable name for diagnostics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::ArrayModel => "array",
            Self::Enum => "enum",
            Self::Scalar => "scalar",
            Self::Union => "union",
        }
    }
}

/// A named container of top-level declarations.
#[derive(Debug, Clone)]
pub struct NamespaceDef {
    /// Namespace name.
    pub name: String,
    /// Object and array models in declaration order.
    pub models: Vec<ModelDef>,
    /// Enum declarations.
    pub enums: Vec<EnumDef>,
    /// Scalar declarations.
    pub scalars: Vec<ScalarDef>,
    /// Union declarations.
    pub unions: Vec<UnionDef>,
    /// Declaration lookup map (built while declarations are added).
    decl_map: HashMap<String, DeclKind>,
}

impl NamespaceDef {
    /// Creates a new empty namespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            models: Vec::new(),
            enums: Vec::new(),
            scalars: Vec::new(),
            unions: Vec::new(),
            decl_map: HashMap::new(),
        }
    }

    /// Adds a model declaration.
    pub fn add_model(&mut self, model: ModelDef) {
        let kind = if model.is_array() {
            DeclKind::ArrayModel
        } else {
            DeclKind::Model
        };
        self.decl_map.insert(model.name.clone(), kind);
        self.models.push(model);
    }

    /// Adds an enum declaration.
    pub fn add_enum(&mut self, enum_def: EnumDef) {
        self.decl_map.insert(enum_def.name.clone(), DeclKind::Enum);
        self.enums.push(enum_def);
    }

    /// Adds a scalar declaration.
    pub fn add_scalar(&mut self, scalar: ScalarDef) {
        self.decl_map.insert(scalar.name.clone(), DeclKind::Scalar);
        self.scalars.push(scalar);
    }

    /// Adds a union declaration.
    pub fn add_union(&mut self, union_def: UnionDef) {
        self.decl_map.insert(union_def.name.clone(), DeclKind::Union);
        self.unions.push(union_def);
    }

    /// Returns the kind of the declaration with the given name.
    #[must_use]
    pub fn declaration_kind(&self, name: &str) -> Option<DeclKind> {
        self.decl_map.get(name).copied()
    }

    /// Looks up a scalar declaration by name.
    #[must_use]
    pub fn get_scalar(&self, name: &str) -> Option<&ScalarDef> {
        self.scalars.iter().find(|s| s.name == name)
    }

    /// Looks up a model declaration by name.
    #[must_use]
    pub fn get_model(&self, name: &str) -> Option<&ModelDef> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Returns the total number of declarations.
    #[must_use]
    pub fn declaration_count(&self) -> usize {
        self.models.len() + self.enums.len() + self.scalars.len() + self.unions.len()
    }

    /// Iterates over every declaration name with its kind, in emission order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, DeclKind)> {
        let models = self.models.iter().map(|m| {
            let kind = if m.is_array() {
                DeclKind::ArrayModel
            } else {
                DeclKind::Model
            };
            (m.name.as_str(), kind)
        });
        let enums = self.enums.iter().map(|e| (e.name.as_str(), DeclKind::Enum));
        let scalars = self
            .scalars
            .iter()
            .map(|s| (s.name.as_str(), DeclKind::Scalar));
        let unions = self.unions.iter().map(|u| (u.name.as_str(), DeclKind::Union));
        models.chain(enums).chain(scalars).chain(unions)
    }
}

/// Unresolved type expression as written in the document.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// Reference to a declaration or intrinsic by name.
    Reference {
        /// Referenced name.
        name: String,
        /// Explicit namespace, if any.
        namespace: Option<String>,
    },
    /// Anonymous object literal.
    Object(Vec<crate::models::PropertyDef>),
    /// Positional tuple.
    Tuple(Vec<TypeExpr>),
    /// Anonymous union.
    Union(Vec<TypeExpr>),
    /// Array of an element type.
    Array(Box<TypeExpr>),
    /// Intrinsic type by name (`null`, `unknown`, ...).
    Intrinsic(String),
    /// Literal type.
    Literal(LiteralValue),
    /// Upstream node kind with no representation in the target language.
    Other(String),
}

impl TypeExpr {
    /// Creates an unqualified reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Reference {
            name: name.into(),
            namespace: None,
        }
    }
}

/// Number kept exactly as written.
///
/// The text is checked to be a finite number; comparisons use the parsed
/// value, display reproduces the original text.
#[derive(Debug, Clone)]
pub struct NumericLiteral {
    text: String,
    value: f64,
}

impl NumericLiteral {
    /// Parses a finite number, keeping its text.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(Self {
                text: text.to_string(),
                value,
            }),
            _ => None,
        }
    }

    /// Returns the text as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the parsed value, used only for ordering checks.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }
}

impl PartialEq for NumericLiteral {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for NumericLiteral {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl fmt::Display for NumericLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Value of a literal type.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// `true` or `false`.
    Boolean(bool),
    /// Number.
    Numeric(NumericLiteral),
    /// String.
    String(String),
}

impl LiteralValue {
    /// Parses a literal from its `kind` and `value` attributes. Returns the
    /// name of the offending attribute on failure.
    ///
    /// # Errors
    /// Returns `"kind"` for an unknown kind, `"value"` for a value that does
    /// not fit the kind.
    pub fn parse(kind: &str, value: &str) -> Result<Self, &'static str> {
        match kind {
            "boolean" => match value {
                "true" => Ok(Self::Boolean(true)),
                "false" => Ok(Self::Boolean(false)),
                _ => Err("value"),
            },
            "numeric" => NumericLiteral::parse(value)
                .map(Self::Numeric)
                .ok_or("value"),
            "string" => Ok(Self::String(value.to_string())),
            _ => Err("kind"),
        }
    }
}

/// Independently present refinement facets on a property, scalar or array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefinementFacets {
    /// Regular expression the value must match.
    pub pattern: Option<String>,
    /// Known values (kept opaque).
    pub known_values: Option<String>,
    /// Minimum string length.
    pub min_length: Option<u64>,
    /// Maximum string length.
    pub max_length: Option<u64>,
    /// Minimum item count.
    pub min_items: Option<u64>,
    /// Maximum item count.
    pub max_items: Option<u64>,
    /// Minimum numeric value.
    pub min_value: Option<NumericLiteral>,
    /// Maximum numeric value.
    pub max_value: Option<NumericLiteral>,
}

impl RefinementFacets {
    /// Attribute names that carry a facet.
    pub const ATTRIBUTES: [&'static str; 8] = [
        "pattern",
        "knownValues",
        "minLength",
        "maxLength",
        "minItems",
        "maxItems",
        "minValue",
        "maxValue",
    ];

    /// Returns true if `attribute` names a facet.
    #[must_use]
    pub fn is_facet(attribute: &str) -> bool {
        Self::ATTRIBUTES.contains(&attribute)
    }

    /// Returns true if no facet is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Sets a facet from its attribute name. Returns false for attributes
    /// that are not facets.
    ///
    /// # Errors
    /// Returns the offending value if a numeric facet cannot be parsed.
    pub fn set(&mut self, attribute: &str, value: &str) -> Result<bool, String> {
        fn count(value: &str) -> Result<Option<u64>, String> {
            value.parse().map(Some).map_err(|_| value.to_string())
        }
        fn number(value: &str) -> Result<Option<NumericLiteral>, String> {
            NumericLiteral::parse(value)
                .map(Some)
                .ok_or_else(|| value.to_string())
        }

        match attribute {
            "pattern" => self.pattern = Some(value.to_string()),
            "knownValues" => self.known_values = Some(value.to_string()),
            "minLength" => self.min_length = count(value)?,
            "maxLength" => self.max_length = count(value)?,
            "minItems" => self.min_items = count(value)?,
            "maxItems" => self.max_items = count(value)?,
            "minValue" => self.min_value = number(value)?,
            "maxValue" => self.max_value = number(value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Enum declaration.
#[derive(Debug, Clone)]
pub struct EnumDef {
    /// Enum name.
    pub name: String,
    /// Members in declaration order.
    pub members: Vec<EnumMember>,
}

impl EnumDef {
    /// Creates a new enum definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Adds a member.
    pub fn add_member(&mut self, member: EnumMember) {
        self.members.push(member);
    }
}

/// Enum member.
#[derive(Debug, Clone)]
pub struct EnumMember {
    /// Member name.
    pub name: String,
}

/// Scalar declaration.
#[derive(Debug, Clone)]
pub struct ScalarDef {
    /// Scalar name.
    pub name: String,
    /// Base scalar reference.
    pub base: Option<TypeExpr>,
    /// Refinement facets on the scalar itself.
    pub facets: RefinementFacets,
}

impl ScalarDef {
    /// Creates a new scalar definition.
    #[must_use]
    pub fn new(name: impl Into<String>, base: Option<TypeExpr>) -> Self {
        Self {
            name: name.into(),
            base,
            facets: RefinementFacets::default(),
        }
    }
}

/// Built-in scalars of the upstream schema language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntrinsicScalar {
    /// Byte buffer.
    Bytes,
    /// Signed 64-bit integer.
    Int64,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 64-bit integer.
    Uint64,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 8-bit integer.
    Uint8,
    /// 64-bit floating point.
    Float64,
    /// 32-bit floating point.
    Float32,
    /// Arbitrary precision decimal.
    Decimal,
    /// UTF-8 string.
    String,
    /// Calendar date.
    PlainDate,
    /// Wall-clock time.
    PlainTime,
    /// Instant in UTC.
    UtcDateTime,
    /// Date-time with zone.
    ZonedDateTime,
    /// Duration.
    Duration,
    /// Boolean.
    Boolean,
    /// The null value.
    Null,
}

impl IntrinsicScalar {
    /// Every intrinsic scalar.
    pub const ALL: [Self; 20] = [
        Self::Bytes,
        Self::Int64,
        Self::Int32,
        Self::Int16,
        Self::Int8,
        Self::Uint64,
        Self::Uint32,
        Self::Uint16,
        Self::Uint8,
        Self::Float64,
        Self::Float32,
        Self::Decimal,
        Self::String,
        Self::PlainDate,
        Self::PlainTime,
        Self::UtcDateTime,
        Self::ZonedDateTime,
        Self::Duration,
        Self::Boolean,
        Self::Null,
    ];

    /// Looks up the Bosque type name for an intrinsic scalar name.
    #[must_use]
    pub fn lookup(name: &str) -> Option<&'static str> {
        Self::from_name(name).map(|s| s.bosque_type())
    }

    /// Returns the Bosque type name for this intrinsic.
    #[must_use]
    pub const fn bosque_type(&self) -> &'static str {
        match self {
            Self::Bytes => "ByteBuffer",
            Self::Int64 => "BigInt",
            Self::Int32 | Self::Int16 | Self::Int8 => "Int",
            Self::Uint64 => "BigNat",
            Self::Uint32 | Self::Uint16 | Self::Uint8 => "Nat",
            Self::Float64 | Self::Float32 => "Float",
            Self::Decimal => "Decimal",
            Self::String => "String",
            Self::PlainDate => "PlainDate",
            Self::PlainTime => "PlainTime",
            Self::UtcDateTime => "UTCDateTime",
            Self::ZonedDateTime => "DateTime",
            Self::Duration => "Duration",
            Self::Boolean => "Bool",
            Self::Null => "None",
        }
    }

    /// Returns the schema-language name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::Int64 => "int64",
            Self::Int32 => "int32",
            Self::Int16 => "int16",
            Self::Int8 => "int8",
            Self::Uint64 => "uint64",
            Self::Uint32 => "uint32",
            Self::Uint16 => "uint16",
            Self::Uint8 => "uint8",
            Self::Float64 => "float64",
            Self::Float32 => "float32",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::PlainDate => "plainDate",
            Self::PlainTime => "plainTime",
            Self::UtcDateTime => "utcDateTime",
            Self::ZonedDateTime => "zonedDateTime",
            Self::Duration => "duration",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }

    /// Parses an intrinsic scalar from its schema-language name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

/// Intrinsic (non-scalar) type names of the upstream schema language.
pub const INTRINSIC_TYPES: [&str; 4] = ["null", "void", "never", "unknown"];
