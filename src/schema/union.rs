//! Nullable union composition.

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{AvroSchema, UnionSchema};

/// Wrap `schema` in a `[null, schema]` union.
///
/// Null always comes first, so `null` is the only legal field default.
/// Wrapping `null` itself or an existing union is rejected.
///
/// # Example
/// ```
/// use avsc_forge::schema::{optional, AvroSchema};
///
/// let schema = optional(AvroSchema::Int).unwrap();
/// assert_eq!(schema.nullable_inner(), Some(&AvroSchema::Int));
/// assert!(optional(schema).is_err());
/// ```
pub fn optional(schema: impl Into<AvroSchema>) -> SchemaResult<AvroSchema> {
    let schema = schema.into();
    match schema {
        AvroSchema::Null => Err(SchemaError::InvalidTypeComposition(
            "cannot make 'null' optional".to_string(),
        )),
        AvroSchema::Union(_) => Err(SchemaError::InvalidTypeComposition(format!(
            "type '{}' is already optional",
            schema.type_name()
        ))),
        inner => Ok(AvroSchema::Union(UnionSchema::nullable_unchecked(inner))),
    }
}
