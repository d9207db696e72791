//! Avro schema types and representations.
//!
//! Composite values (unions, logical types, enums, fields, records) keep their
//! fields private: the only way to obtain one is through the catalog functions
//! and builders, which enforce every invariant at construction time. Named
//! types are held behind `Arc` so one definition can be referenced from many
//! places of a schema graph without copying.

use std::sync::Arc;

use serde_json::Value;

use super::names;

/// Represents an Avro schema.
#[derive(Debug, Clone, PartialEq)]
pub enum AvroSchema {
    // Primitive types
    /// Null type - no value.
    Null,
    /// Boolean type.
    Boolean,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit IEEE 754 floating-point.
    Float,
    /// 64-bit IEEE 754 floating-point.
    Double,
    /// Sequence of bytes.
    Bytes,
    /// Unicode string.
    String,

    /// Logical tag layered over a primitive.
    Logical(LogicalType),
    /// Nullable union, `[null, T]`.
    Union(UnionSchema),
    /// Array of items with a single schema.
    Array(Box<AvroSchema>),
    /// Map with string keys and values of a single schema.
    Map(Box<AvroSchema>),
    /// Enumeration type.
    Enum(Arc<EnumSchema>),
    /// Record type with named fields.
    Record(Arc<RecordSchema>),
}

impl AvroSchema {
    /// Array of `items`.
    pub fn array(items: impl Into<AvroSchema>) -> Self {
        AvroSchema::Array(Box::new(items.into()))
    }

    /// Map from string keys to `values`.
    pub fn map(values: impl Into<AvroSchema>) -> Self {
        AvroSchema::Map(Box::new(values.into()))
    }

    /// Check if this schema is a primitive type.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            AvroSchema::Null
                | AvroSchema::Boolean
                | AvroSchema::Int
                | AvroSchema::Long
                | AvroSchema::Float
                | AvroSchema::Double
                | AvroSchema::Bytes
                | AvroSchema::String
        )
    }

    /// Check if this schema is a named type (record or enum).
    pub fn is_named(&self) -> bool {
        matches!(self, AvroSchema::Record(_) | AvroSchema::Enum(_))
    }

    /// Get the fully qualified name of a named type, if applicable.
    pub fn fullname(&self) -> Option<String> {
        match self {
            AvroSchema::Record(r) => Some(r.fullname()),
            AvroSchema::Enum(e) => Some(e.fullname()),
            _ => None,
        }
    }

    /// Check if this schema is a nullable union.
    pub fn is_nullable(&self) -> bool {
        matches!(self, AvroSchema::Union(_))
    }

    /// For a nullable union, get the non-null schema.
    pub fn nullable_inner(&self) -> Option<&AvroSchema> {
        match self {
            AvroSchema::Union(u) => Some(u.inner()),
            _ => None,
        }
    }

    /// Bare Avro tag for primitives (`"long"`, `"string"`, ...).
    pub fn primitive_tag(&self) -> Option<&'static str> {
        match self {
            AvroSchema::Null => Some("null"),
            AvroSchema::Boolean => Some("boolean"),
            AvroSchema::Int => Some("int"),
            AvroSchema::Long => Some("long"),
            AvroSchema::Float => Some("float"),
            AvroSchema::Double => Some("double"),
            AvroSchema::Bytes => Some("bytes"),
            AvroSchema::String => Some("string"),
            _ => None,
        }
    }

    /// Primitive for a bare Avro tag.
    pub fn from_primitive_tag(tag: &str) -> Option<AvroSchema> {
        match tag {
            "null" => Some(AvroSchema::Null),
            "boolean" => Some(AvroSchema::Boolean),
            "int" => Some(AvroSchema::Int),
            "long" => Some(AvroSchema::Long),
            "float" => Some(AvroSchema::Float),
            "double" => Some(AvroSchema::Double),
            "bytes" => Some(AvroSchema::Bytes),
            "string" => Some(AvroSchema::String),
            _ => None,
        }
    }

    /// Short human-readable description used in error messages.
    pub fn type_name(&self) -> String {
        match self {
            AvroSchema::Logical(lt) => {
                format!("{}:{}", lt.base().type_name(), lt.logical_type().name())
            }
            AvroSchema::Union(u) => format!("[null, {}]", u.inner().type_name()),
            AvroSchema::Array(items) => format!("array<{}>", items.type_name()),
            AvroSchema::Map(values) => format!("map<{}>", values.type_name()),
            AvroSchema::Enum(e) => format!("enum {}", e.fullname()),
            AvroSchema::Record(r) => format!("record {}", r.fullname()),
            primitive => primitive.primitive_tag().unwrap_or("unknown").to_string(),
        }
    }
}

impl From<EnumSchema> for AvroSchema {
    fn from(schema: EnumSchema) -> Self {
        AvroSchema::Enum(Arc::new(schema))
    }
}

impl From<RecordSchema> for AvroSchema {
    fn from(schema: RecordSchema) -> Self {
        AvroSchema::Record(Arc::new(schema))
    }
}

impl From<Arc<RecordSchema>> for AvroSchema {
    fn from(schema: Arc<RecordSchema>) -> Self {
        AvroSchema::Record(schema)
    }
}

impl From<LogicalType> for AvroSchema {
    fn from(schema: LogicalType) -> Self {
        AvroSchema::Logical(schema)
    }
}

impl From<UnionSchema> for AvroSchema {
    fn from(schema: UnionSchema) -> Self {
        AvroSchema::Union(schema)
    }
}

/// Nullable union: exactly two members, `null` first.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionSchema {
    members: Vec<AvroSchema>,
}

impl UnionSchema {
    /// Callers guarantee `inner` is neither null nor a union.
    pub(crate) fn nullable_unchecked(inner: AvroSchema) -> Self {
        Self {
            members: vec![AvroSchema::Null, inner],
        }
    }

    /// Both members in wire order.
    pub fn members(&self) -> &[AvroSchema] {
        &self.members
    }

    /// The wrapped, non-null member.
    pub fn inner(&self) -> &AvroSchema {
        &self.members[1]
    }
}

/// Logical type wrapper around a primitive base schema.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalType {
    base: Box<AvroSchema>,
    logical_type: LogicalTypeName,
}

impl LogicalType {
    /// Callers guarantee `base` matches `logical_type.base_type()`.
    pub(crate) fn new_unchecked(logical_type: LogicalTypeName) -> Self {
        Self {
            base: Box::new(logical_type.base_type()),
            logical_type,
        }
    }

    /// The physical representation.
    pub fn base(&self) -> &AvroSchema {
        &self.base
    }

    /// The logical tag.
    pub fn logical_type(&self) -> LogicalTypeName {
        self.logical_type
    }
}

/// Logical type names supported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalTypeName {
    /// Date (days since Unix epoch).
    Date,
    /// Time of day in milliseconds.
    TimeMillis,
    /// Time of day in microseconds.
    TimeMicros,
    /// Timestamp in milliseconds since Unix epoch.
    TimestampMillis,
    /// Timestamp in microseconds since Unix epoch.
    TimestampMicros,
    /// Local timestamp in milliseconds (no timezone).
    LocalTimestampMillis,
    /// Local timestamp in microseconds (no timezone).
    LocalTimestampMicros,
    /// UUID stored as a string.
    Uuid,
}

impl LogicalTypeName {
    /// Every supported tag.
    pub const ALL: [LogicalTypeName; 8] = [
        LogicalTypeName::Date,
        LogicalTypeName::TimeMillis,
        LogicalTypeName::TimeMicros,
        LogicalTypeName::TimestampMillis,
        LogicalTypeName::TimestampMicros,
        LogicalTypeName::LocalTimestampMillis,
        LogicalTypeName::LocalTimestampMicros,
        LogicalTypeName::Uuid,
    ];

    /// Get the string name of the logical type.
    pub fn name(&self) -> &'static str {
        match self {
            LogicalTypeName::Date => "date",
            LogicalTypeName::TimeMillis => "time-millis",
            LogicalTypeName::TimeMicros => "time-micros",
            LogicalTypeName::TimestampMillis => "timestamp-millis",
            LogicalTypeName::TimestampMicros => "timestamp-micros",
            LogicalTypeName::LocalTimestampMillis => "local-timestamp-millis",
            LogicalTypeName::LocalTimestampMicros => "local-timestamp-micros",
            LogicalTypeName::Uuid => "uuid",
        }
    }

    /// Look up a tag by its string name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lt| lt.name() == name)
    }

    /// The only primitive this tag may annotate.
    pub fn base_type(&self) -> AvroSchema {
        match self {
            LogicalTypeName::Date | LogicalTypeName::TimeMillis => AvroSchema::Int,
            LogicalTypeName::TimeMicros
            | LogicalTypeName::TimestampMillis
            | LogicalTypeName::TimestampMicros
            | LogicalTypeName::LocalTimestampMillis
            | LogicalTypeName::LocalTimestampMicros => AvroSchema::Long,
            LogicalTypeName::Uuid => AvroSchema::String,
        }
    }
}

/// Schema for an enumeration type.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    pub(crate) name: String,
    pub(crate) namespace: Option<String>,
    pub(crate) doc: Option<String>,
    pub(crate) symbols: Vec<String>,
}

impl EnumSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Symbols in declaration order; a symbol's position is its wire code.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Get the fully qualified name.
    pub fn fullname(&self) -> String {
        names::fullname(self.namespace.as_deref(), &self.name)
    }

    /// Get the index of a symbol.
    pub fn symbol_index(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }
}

/// Declared default of a field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldDefault {
    /// No default: producers must always supply a value.
    #[default]
    Required,
    /// Default to "no value"; only legal on nullable unions.
    Null,
    /// Any other JSON default.
    Value(Value),
}

impl FieldDefault {
    /// JSON rendering of the default, `None` for required fields.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            FieldDefault::Required => None,
            FieldDefault::Null => Some(Value::Null),
            FieldDefault::Value(v) => Some(v.clone()),
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, FieldDefault::Required)
    }
}

impl From<Value> for FieldDefault {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldDefault::Null,
            other => FieldDefault::Value(other),
        }
    }
}

/// Schema for a field within a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub(crate) name: String,
    pub(crate) doc: Option<String>,
    pub(crate) schema: AvroSchema,
    pub(crate) default: FieldDefault,
}

impl FieldSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// The schema of the field's value.
    pub fn schema(&self) -> &AvroSchema {
        &self.schema
    }

    pub fn default(&self) -> &FieldDefault {
        &self.default
    }
}

/// Schema for a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub(crate) name: String,
    pub(crate) namespace: String,
    pub(crate) doc: Option<String>,
    pub(crate) fields: Vec<FieldSchema>,
}

impl RecordSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get the fully qualified name.
    pub fn fullname(&self) -> String {
        names::fullname(Some(&self.namespace), &self.name)
    }
}
