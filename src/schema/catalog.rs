//! Catalog of reusable primitive, optional and logical types.
//!
//! Everything here is a constant or a pure function returning a fresh value,
//! so schemas built on different threads never share hidden state.

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{AvroSchema, LogicalType, LogicalTypeName, UnionSchema};

pub const NULL: AvroSchema = AvroSchema::Null;
pub const BOOLEAN: AvroSchema = AvroSchema::Boolean;
pub const INT: AvroSchema = AvroSchema::Int;
pub const LONG: AvroSchema = AvroSchema::Long;
pub const FLOAT: AvroSchema = AvroSchema::Float;
pub const DOUBLE: AvroSchema = AvroSchema::Double;
pub const BYTES: AvroSchema = AvroSchema::Bytes;
pub const STRING: AvroSchema = AvroSchema::String;

/// All primitive types, `null` first.
pub const PRIMITIVES: [AvroSchema; 8] = [NULL, BOOLEAN, INT, LONG, FLOAT, DOUBLE, BYTES, STRING];

/// Attach a logical tag to a primitive base.
///
/// Fails with [`SchemaError::IncompatibleLogicalTag`] when the tag is unknown
/// or registered against a different base (`timestamp-millis` only annotates
/// `long`).
///
/// # Example
/// ```
/// use avsc_forge::schema::{with_logical_tag, AvroSchema};
///
/// assert!(with_logical_tag(AvroSchema::Long, "timestamp-millis").is_ok());
/// assert!(with_logical_tag(AvroSchema::Int, "timestamp-millis").is_err());
/// ```
pub fn with_logical_tag(base: AvroSchema, tag: &str) -> SchemaResult<AvroSchema> {
    let incompatible = || SchemaError::IncompatibleLogicalTag {
        tag: tag.to_string(),
        base: base.type_name(),
    };

    let logical_type = LogicalTypeName::from_name(tag).ok_or_else(incompatible)?;
    if logical_type.base_type() != base {
        return Err(incompatible());
    }

    Ok(AvroSchema::Logical(LogicalType::new_unchecked(logical_type)))
}

/// `{"type": "long", "logicalType": "timestamp-millis"}`
pub fn timestamp_millis() -> AvroSchema {
    AvroSchema::Logical(LogicalType::new_unchecked(LogicalTypeName::TimestampMillis))
}

/// `{"type": "map", "values": "string"}`
pub fn map_of_string() -> AvroSchema {
    AvroSchema::map(STRING)
}

fn nullable(inner: AvroSchema) -> AvroSchema {
    AvroSchema::Union(UnionSchema::nullable_unchecked(inner))
}

/// `["null", "string"]`
pub fn optional_string() -> AvroSchema {
    nullable(STRING)
}

/// `["null", "int"]`
pub fn optional_int() -> AvroSchema {
    nullable(INT)
}

/// `["null", "long"]`
pub fn optional_long() -> AvroSchema {
    nullable(LONG)
}

/// `["null", "float"]`
pub fn optional_float() -> AvroSchema {
    nullable(FLOAT)
}

/// `["null", "double"]`
pub fn optional_double() -> AvroSchema {
    nullable(DOUBLE)
}

/// `["null", "boolean"]`
pub fn optional_boolean() -> AvroSchema {
    nullable(BOOLEAN)
}

/// `["null", {"type": "long", "logicalType": "timestamp-millis"}]`
pub fn optional_timestamp_millis() -> AvroSchema {
    nullable(timestamp_millis())
}

/// `["null", {"type": "map", "values": "string"}]`
pub fn optional_map_of_string() -> AvroSchema {
    nullable(map_of_string())
}
