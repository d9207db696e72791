//! JSON schema parser.
//!
//! Parses schema text back into the validated type graph. Every composite
//! node goes through the same builders callers use, so a parsed schema obeys
//! exactly the invariants of a hand-built one. Together with the serializer
//! this gives the canonical fixed point: `serialize(parse(serialize(s)))`
//! equals `serialize(s)`.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{SchemaError, SchemaResult};
use crate::schema::names::{self, split_fullname};
use crate::schema::{
    optional, with_logical_tag, AvroSchema, EnumBuilder, FieldBuilder, FieldDefault, FieldSchema,
    LogicalTypeName, RecordBuilder, RecordSchema,
};

/// Parse schema text of any type.
///
/// # Example
/// ```
/// use avsc_forge::schema::{parse_schema, AvroSchema};
///
/// let schema = parse_schema(r#"["null", "string"]"#).unwrap();
/// assert_eq!(schema.nullable_inner(), Some(&AvroSchema::String));
/// ```
pub fn parse_schema(json: &str) -> SchemaResult<AvroSchema> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| SchemaError::Parse(format!("Invalid JSON: {}", e)))?;
    SchemaParser::new().parse(&value)
}

/// Parse schema text whose top level must be a record.
pub fn parse_record(json: &str) -> SchemaResult<RecordSchema> {
    match parse_schema(json)? {
        AvroSchema::Record(record) => Ok(RecordSchema::clone(&record)),
        other => Err(SchemaError::Parse(format!(
            "Expected a record at the top level, found {}",
            other.type_name()
        ))),
    }
}

/// Schema parser with named type resolution context.
///
/// Named types are registered by full name once built; a reference to a name
/// whose definition is still being parsed is a recursive reference and is
/// rejected.
#[derive(Debug, Default)]
pub struct SchemaParser {
    named_types: HashMap<String, AvroSchema>,
    in_progress: HashSet<String>,
    current_namespace: Option<String>,
}

impl SchemaParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON value into an AvroSchema.
    pub fn parse(&mut self, value: &Value) -> SchemaResult<AvroSchema> {
        match value {
            Value::String(s) => self.parse_string_schema(s),
            Value::Object(obj) => self.parse_object_schema(obj),
            Value::Array(arr) => self.parse_union_schema(arr),
            _ => Err(SchemaError::Parse(format!(
                "Expected string, object, or array, found: {}",
                value
            ))),
        }
    }

    /// Get a named type from the registry.
    pub fn get_named_type(&self, fullname: &str) -> Option<&AvroSchema> {
        self.named_types.get(fullname)
    }

    /// Parse a primitive type or named type reference from a string.
    fn parse_string_schema(&self, s: &str) -> SchemaResult<AvroSchema> {
        if let Some(primitive) = AvroSchema::from_primitive_tag(s) {
            return Ok(primitive);
        }

        let fullname = self.resolve_name(s);
        if self.in_progress.contains(&fullname) {
            return Err(SchemaError::CyclicTypeReference { record: fullname });
        }
        self.named_types
            .get(&fullname)
            .or_else(|| self.named_types.get(s))
            .cloned()
            .ok_or_else(|| SchemaError::Parse(format!("Unknown type: {}", s)))
    }

    /// Parse a complex type from a JSON object.
    fn parse_object_schema(&mut self, obj: &Map<String, Value>) -> SchemaResult<AvroSchema> {
        let type_value = obj
            .get("type")
            .ok_or_else(|| SchemaError::Parse("Missing 'type' field".to_string()))?;

        let type_str = match type_value {
            Value::String(s) => s.as_str(),
            // {"type": {...}} or {"type": [...]}: a wrapped schema
            nested => return self.parse(nested),
        };

        if let Some(base) = AvroSchema::from_primitive_tag(type_str) {
            return match obj.get("logicalType") {
                Some(tag) => self.parse_logical_type(base, tag),
                None => Ok(base),
            };
        }

        match type_str {
            "record" => self.parse_record_schema(obj),
            "enum" => self.parse_enum_schema(obj),
            "array" => {
                let items = obj
                    .get("items")
                    .ok_or_else(|| SchemaError::Parse("Array missing 'items' field".to_string()))?;
                Ok(AvroSchema::array(self.parse(items)?))
            }
            "map" => {
                let values = obj
                    .get("values")
                    .ok_or_else(|| SchemaError::Parse("Map missing 'values' field".to_string()))?;
                Ok(AvroSchema::map(self.parse(values)?))
            }
            "fixed" => Err(SchemaError::Parse("Unsupported type: fixed".to_string())),
            other => self.parse_string_schema(other),
        }
    }

    /// Only `[null, T]` unions are representable.
    fn parse_union_schema(&mut self, arr: &[Value]) -> SchemaResult<AvroSchema> {
        let variants = arr
            .iter()
            .map(|v| self.parse(v))
            .collect::<SchemaResult<Vec<_>>>()?;

        match <[AvroSchema; 2]>::try_from(variants) {
            Ok([AvroSchema::Null, inner]) => optional(inner),
            Ok(_) => Err(SchemaError::InvalidTypeComposition(
                "unions must list 'null' first".to_string(),
            )),
            Err(variants) => Err(SchemaError::InvalidTypeComposition(format!(
                "only two-member nullable unions are supported, found {} members",
                variants.len()
            ))),
        }
    }

    fn parse_record_schema(&mut self, obj: &Map<String, Value>) -> SchemaResult<AvroSchema> {
        let (name, namespace) = self.name_and_namespace(obj, "Record")?;
        let fullname = names::fullname(namespace.as_deref(), &name);
        if self.named_types.contains_key(&fullname) || self.in_progress.contains(&fullname) {
            return Err(SchemaError::ConflictingTypeDefinition(fullname));
        }

        let fields_value = obj
            .get("fields")
            .and_then(Value::as_array)
            .ok_or_else(|| SchemaError::Parse("Record missing 'fields' array".to_string()))?;

        // Nested types inherit the record's namespace.
        let prev_namespace = std::mem::replace(&mut self.current_namespace, namespace.clone());
        self.in_progress.insert(fullname.clone());
        let fields = fields_value
            .iter()
            .map(|f| self.parse_field_schema(f))
            .collect::<SchemaResult<Vec<_>>>();
        self.in_progress.remove(&fullname);
        self.current_namespace = prev_namespace;

        let mut builder = RecordBuilder::new(name, namespace.unwrap_or_default()).fields(fields?);
        if let Some(doc) = string_attr(obj, "doc") {
            builder = builder.with_doc(doc);
        }

        let schema = AvroSchema::from(builder.build()?);
        self.named_types.insert(fullname, schema.clone());
        Ok(schema)
    }

    fn parse_field_schema(&mut self, value: &Value) -> SchemaResult<FieldSchema> {
        let obj = value
            .as_object()
            .ok_or_else(|| SchemaError::Parse("Field must be an object".to_string()))?;

        let name = string_attr(obj, "name")
            .ok_or_else(|| SchemaError::Parse("Field missing 'name'".to_string()))?;
        let type_value = obj
            .get("type")
            .ok_or_else(|| SchemaError::Parse(format!("Field '{}' missing 'type'", name)))?;

        let mut builder = FieldBuilder::new(name, self.parse(type_value)?);
        if let Some(doc) = string_attr(obj, "doc") {
            builder = builder.with_doc(doc);
        }
        if let Some(default) = obj.get("default") {
            builder = builder.with_default(FieldDefault::from(default.clone()));
        }
        builder.build()
    }

    fn parse_enum_schema(&mut self, obj: &Map<String, Value>) -> SchemaResult<AvroSchema> {
        let (name, namespace) = self.name_and_namespace(obj, "Enum")?;
        let fullname = names::fullname(namespace.as_deref(), &name);
        if self.named_types.contains_key(&fullname) || self.in_progress.contains(&fullname) {
            return Err(SchemaError::ConflictingTypeDefinition(fullname));
        }

        let symbols = obj
            .get("symbols")
            .and_then(Value::as_array)
            .ok_or_else(|| SchemaError::Parse("Enum missing 'symbols' array".to_string()))?
            .iter()
            .map(|v| {
                v.as_str()
                    .map(String::from)
                    .ok_or_else(|| SchemaError::Parse(format!("Enum symbol must be a string, found {}", v)))
            })
            .collect::<SchemaResult<Vec<_>>>()?;

        let mut builder = EnumBuilder::new(name)
            .with_namespace(namespace.unwrap_or_default())
            .with_symbols(symbols);
        if let Some(doc) = string_attr(obj, "doc") {
            builder = builder.with_doc(doc);
        }

        let schema = AvroSchema::from(builder.build()?);
        self.named_types.insert(fullname, schema.clone());
        Ok(schema)
    }

    /// Unknown logical tags are ignored and the base type kept; a known tag
    /// over the wrong base is an error.
    fn parse_logical_type(&self, base: AvroSchema, tag: &Value) -> SchemaResult<AvroSchema> {
        let tag = tag
            .as_str()
            .ok_or_else(|| SchemaError::Parse("logicalType must be a string".to_string()))?;

        match with_logical_tag(base.clone(), tag) {
            Ok(schema) => Ok(schema),
            Err(err) if LogicalTypeName::from_name(tag).is_some() => Err(err),
            Err(_) => {
                warn!(logical_type = tag, base = %base.type_name(), "ignoring unknown logical type");
                Ok(base)
            }
        }
    }

    /// Extract the short name and effective namespace of a named type.
    ///
    /// A dotted name carries its own namespace; otherwise an explicit
    /// `namespace` wins, then the enclosing one.
    fn name_and_namespace(
        &self,
        obj: &Map<String, Value>,
        kind: &str,
    ) -> SchemaResult<(String, Option<String>)> {
        let raw = string_attr(obj, "name")
            .ok_or_else(|| SchemaError::Parse(format!("{} missing 'name' field", kind)))?;

        let (dotted_ns, short) = split_fullname(raw);
        let namespace = dotted_ns
            .map(String::from)
            .or_else(|| string_attr(obj, "namespace").map(String::from))
            .or_else(|| self.current_namespace.clone())
            .filter(|ns| !ns.is_empty());

        Ok((short.to_string(), namespace))
    }

    /// Resolve a type name to its fully qualified form.
    fn resolve_name(&self, name: &str) -> String {
        if name.contains('.') {
            name.to_string()
        } else {
            names::fullname(self.current_namespace.as_deref(), name)
        }
    }
}

fn string_attr<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}
