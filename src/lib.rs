//! Canonical Avro schema construction for telemetry pipelines
//!
//! This library builds record and enum schemas from a small catalog of
//! primitive, optional and logical types, validates them while they are
//! built, and renders them to byte-reproducible `.avsc` text.

pub mod definitions;
pub mod error;
pub mod output;
pub mod schema;

// Re-export main types
pub use error::{OutputError, SchemaError, SchemaResult};
pub use schema::{
    catalog, optional, parse_record, parse_schema, serialize_schema, with_logical_tag,
    AvroSchema, EnumBuilder, EnumSchema, FieldBuilder, FieldDefault, FieldSchema, LogicalType,
    LogicalTypeName, RecordBuilder, RecordSchema, SchemaParser, SchemaSerializer,
    SerializerOptions, UnionSchema,
};
