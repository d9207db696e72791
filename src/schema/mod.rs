//! Avro schema types, builders and canonical serialization.
//!
//! Construction flows leaves-first: obtain types from [`catalog`], wrap them
//! with [`optional`] or [`with_logical_tag`], assemble fields with
//! [`FieldBuilder`], enums with [`EnumBuilder`] and records with
//! [`RecordBuilder`], then render the top-level record with
//! [`SchemaSerializer`]. [`parse_schema`] reads rendered text back.

pub mod catalog;
mod enums;
mod field;
pub mod names;
mod parser;
mod record;
mod serializer;
mod types;
mod union;

pub use catalog::with_logical_tag;
pub use enums::EnumBuilder;
pub use field::{check_default, FieldBuilder};
pub use parser::{parse_record, parse_schema, SchemaParser};
pub use record::RecordBuilder;
pub use serializer::{serialize_schema, SchemaSerializer, SerializerOptions};
pub use types::*;
pub use union::optional;
