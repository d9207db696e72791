//! Canonical JSON rendering of schemas.
//!
//! Key order is fixed per object kind and field order is declaration order,
//! so the same schema value always renders to the same bytes:
//!
//! - record: `type`, `name`, `namespace`, `doc`?, `fields`
//! - field: `name`, `type`, `doc`?, `default`?
//! - enum: `type`, `name`, `namespace`?, `doc`?, `symbols`; a namespace-less
//!   enum inside a namespaced record carries `"namespace": ""` so readers do
//!   not attach the enclosing namespace to it
//! - logical: `type`, `logicalType`
//! - array: `type`, `items`; map: `type`, `values`
//!
//! A named type is defined inline where it first appears (depth-first, in
//! field order) and referenced by its full name afterwards.

use std::collections::HashSet;

use serde_json::{json, Map, Value};
use tracing::trace;

use crate::schema::{AvroSchema, EnumSchema, FieldSchema, LogicalType, RecordSchema};

/// Output formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerOptions {
    /// Pretty-print with two-space indentation (default: true).
    pub pretty: bool,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl SerializerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set pretty-printing.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Renders a validated [`RecordSchema`] to schema text.
///
/// Rendering is total: every record that passed its builder renders.
///
/// # Example
/// ```
/// use avsc_forge::schema::{catalog, FieldBuilder, RecordBuilder, SchemaSerializer, SerializerOptions};
///
/// let record = RecordBuilder::new("ErrorRecord", "tv.pluto.nile.avro")
///     .field(FieldBuilder::new("type", catalog::STRING).build().unwrap())
///     .build()
///     .unwrap();
/// let compact = SchemaSerializer::with_options(SerializerOptions::new().with_pretty(false));
/// assert_eq!(
///     compact.serialize(&record),
///     r#"{"type":"record","name":"ErrorRecord","namespace":"tv.pluto.nile.avro","fields":[{"name":"type","type":"string"}]}"#
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaSerializer {
    options: SerializerOptions,
}

impl SchemaSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SerializerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> SerializerOptions {
        self.options
    }

    /// Render the record as schema text.
    pub fn serialize(&self, record: &RecordSchema) -> String {
        let value = self.to_json_value(record);
        if self.options.pretty {
            format!("{:#}", value)
        } else {
            value.to_string()
        }
    }

    /// Render the record as a JSON value.
    pub fn to_json_value(&self, record: &RecordSchema) -> Value {
        trace!(record = %record.fullname(), "serializing schema");
        Renderer::default().record(record)
    }
}

/// Render `record` with the default (pretty) options.
pub fn serialize_schema(record: &RecordSchema) -> String {
    SchemaSerializer::new().serialize(record)
}

/// Per-call rendering state: the named types already defined and the
/// namespace of the record being rendered.
#[derive(Default)]
struct Renderer {
    defined: HashSet<String>,
    scope: Option<String>,
}

impl Renderer {
    fn schema(&mut self, schema: &AvroSchema) -> Value {
        match schema {
            AvroSchema::Logical(lt) => logical(lt),
            AvroSchema::Union(u) => {
                Value::Array(u.members().iter().map(|m| self.schema(m)).collect())
            }
            AvroSchema::Array(items) => {
                let items = self.schema(items);
                json!({ "type": "array", "items": items })
            }
            AvroSchema::Map(values) => {
                let values = self.schema(values);
                json!({ "type": "map", "values": values })
            }
            AvroSchema::Enum(e) => self.enumeration(e),
            AvroSchema::Record(r) => self.record(r),
            primitive => json!(primitive.primitive_tag().unwrap_or("null")),
        }
    }

    fn record(&mut self, record: &RecordSchema) -> Value {
        let fullname = record.fullname();
        if !self.defined.insert(fullname.clone()) {
            return json!(fullname);
        }

        let mut obj = Map::new();
        obj.insert("type".to_string(), json!("record"));
        obj.insert("name".to_string(), json!(record.name()));
        obj.insert("namespace".to_string(), json!(record.namespace()));
        if let Some(doc) = record.doc() {
            obj.insert("doc".to_string(), json!(doc));
        }

        let outer = self.scope.replace(record.namespace().to_string());
        let fields: Vec<Value> = record.fields().iter().map(|f| self.field(f)).collect();
        self.scope = outer;
        obj.insert("fields".to_string(), Value::Array(fields));

        Value::Object(obj)
    }

    /// Keys follow Avro's own field order, `name`, `type`, `doc`, `default`,
    /// so `type` precedes `doc`.
    fn field(&mut self, field: &FieldSchema) -> Value {
        let mut obj = Map::new();
        obj.insert("name".to_string(), json!(field.name()));
        obj.insert("type".to_string(), self.schema(field.schema()));
        if let Some(doc) = field.doc() {
            obj.insert("doc".to_string(), json!(doc));
        }
        if let Some(default) = field.default().to_json() {
            obj.insert("default".to_string(), default);
        }
        Value::Object(obj)
    }

    fn enumeration(&mut self, schema: &EnumSchema) -> Value {
        let fullname = schema.fullname();
        if !self.defined.insert(fullname.clone()) {
            return json!(fullname);
        }

        let mut obj = Map::new();
        obj.insert("type".to_string(), json!("enum"));
        obj.insert("name".to_string(), json!(schema.name()));
        match (schema.namespace(), &self.scope) {
            (Some(ns), _) => {
                obj.insert("namespace".to_string(), json!(ns));
            }
            (None, Some(_)) => {
                obj.insert("namespace".to_string(), json!(""));
            }
            (None, None) => {}
        }
        if let Some(doc) = schema.doc() {
            obj.insert("doc".to_string(), json!(doc));
        }
        obj.insert("symbols".to_string(), json!(schema.symbols()));
        Value::Object(obj)
    }
}

fn logical(lt: &LogicalType) -> Value {
    let mut obj = Map::new();
    obj.insert(
        "type".to_string(),
        json!(lt.base().primitive_tag().unwrap_or("null")),
    );
    obj.insert("logicalType".to_string(), json!(lt.logical_type().name()));
    Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{catalog, optional, with_logical_tag, EnumBuilder, FieldBuilder, RecordBuilder};

    const NS: &str = "tv.pluto.nile.avro";

    fn compact() -> SchemaSerializer {
        SchemaSerializer::with_options(SerializerOptions::new().with_pretty(false))
    }

    fn render_type(schema: &AvroSchema) -> Value {
        Renderer::default().schema(schema)
    }

    #[test]
    fn test_primitive_rendering() {
        for p in catalog::PRIMITIVES {
            assert_eq!(render_type(&p), json!(p.primitive_tag().unwrap()));
        }
    }

    #[test]
    fn test_optional_rendering() {
        assert_eq!(render_type(&catalog::optional_string()), json!(["null", "string"]));
        assert_eq!(render_type(&catalog::optional_double()), json!(["null", "double"]));
    }

    #[test]
    fn test_logical_rendering() {
        let ts = with_logical_tag(catalog::LONG, "timestamp-millis").unwrap();
        assert_eq!(
            render_type(&ts).to_string(),
            r#"{"type":"long","logicalType":"timestamp-millis"}"#
        );
        assert_eq!(
            render_type(&optional(ts).unwrap()).to_string(),
            r#"["null",{"type":"long","logicalType":"timestamp-millis"}]"#
        );
    }

    #[test]
    fn test_map_rendering() {
        assert_eq!(
            render_type(&catalog::optional_map_of_string()).to_string(),
            r#"["null",{"type":"map","values":"string"}]"#
        );
    }

    #[test]
    fn test_enum_rendering_keeps_symbol_order() {
        let e = EnumBuilder::new("EventName")
            .with_namespace(NS)
            .with_doc("Identifies the Name of the Event being fired.")
            .with_symbols(["clipStart", "clipEnd"])
            .build()
            .unwrap();
        assert_eq!(
            render_type(&AvroSchema::from(e)).to_string(),
            r#"{"type":"enum","name":"EventName","namespace":"tv.pluto.nile.avro","doc":"Identifies the Name of the Event being fired.","symbols":["clipStart","clipEnd"]}"#
        );
    }

    #[test]
    fn test_error_record_rendering() {
        let record = RecordBuilder::new("ErrorRecord", NS)
            .field(FieldBuilder::new("type", catalog::STRING).build().unwrap())
            .field(
                FieldBuilder::new("message", catalog::optional_string())
                    .default_null()
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(
            compact().serialize(&record),
            r#"{"type":"record","name":"ErrorRecord","namespace":"tv.pluto.nile.avro","fields":[{"name":"type","type":"string"},{"name":"message","type":["null","string"],"default":null}]}"#
        );
    }

    #[test]
    fn test_field_doc_before_default() {
        let record = RecordBuilder::new("Doc", NS)
            .with_doc("Documented record")
            .field(
                FieldBuilder::new("eventType", catalog::STRING)
                    .with_doc("Kind of event")
                    .default_value("unstruct")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(
            compact().serialize(&record),
            r#"{"type":"record","name":"Doc","namespace":"tv.pluto.nile.avro","doc":"Documented record","fields":[{"name":"eventType","type":"string","doc":"Kind of event","default":"unstruct"}]}"#
        );
    }

    #[test]
    fn test_repeated_named_type_rendered_by_name() {
        let status = AvroSchema::from(
            EnumBuilder::new("Status")
                .with_namespace(NS)
                .with_symbols(["OK", "FAILED"])
                .build()
                .unwrap(),
        );
        let record = RecordBuilder::new("Pair", NS)
            .field(FieldBuilder::new("first", status.clone()).build().unwrap())
            .field(
                FieldBuilder::new("second", optional(status).unwrap())
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let value = compact().to_json_value(&record);
        assert_eq!(value["fields"][0]["type"]["type"], json!("enum"));
        assert_eq!(
            value["fields"][1]["type"],
            json!(["null", "tv.pluto.nile.avro.Status"])
        );
    }

    #[test]
    fn test_namespace_less_enum_keeps_null_namespace() {
        let color = AvroSchema::from(
            EnumBuilder::new("Color")
                .with_symbols(["RED", "GREEN"])
                .build()
                .unwrap(),
        );
        let record = RecordBuilder::new("Paint", NS)
            .field(FieldBuilder::new("primary", color.clone()).build().unwrap())
            .field(
                FieldBuilder::new("secondary", optional(color).unwrap())
                    .default_null()
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let text = compact().serialize(&record);
        assert_eq!(
            text,
            r#"{"type":"record","name":"Paint","namespace":"tv.pluto.nile.avro","fields":[{"name":"primary","type":{"type":"enum","name":"Color","namespace":"","symbols":["RED","GREEN"]}},{"name":"secondary","type":["null","Color"],"default":null}]}"#
        );

        let reparsed = crate::schema::parse_record(&text).unwrap();
        assert_eq!(reparsed, record);
        assert_eq!(compact().serialize(&reparsed), text);
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let record = RecordBuilder::new("R", NS)
            .field(FieldBuilder::new("a", catalog::INT).build().unwrap())
            .build()
            .unwrap();
        let text = SchemaSerializer::new().serialize(&record);
        assert!(text.starts_with("{\n  \"type\": \"record\""));
        let reparsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed, compact().to_json_value(&record));
    }

    #[test]
    fn test_serialization_is_repeatable() {
        let record = RecordBuilder::new("R", NS)
            .field(FieldBuilder::new("b", catalog::optional_long()).build().unwrap())
            .field(FieldBuilder::new("a", catalog::timestamp_millis()).build().unwrap())
            .build()
            .unwrap();
        let serializer = SchemaSerializer::new();
        assert_eq!(serializer.serialize(&record), serializer.serialize(&record));
    }
}
