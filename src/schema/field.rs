//! Field construction and default value validation.
//!
//! Defaults follow Avro semantics: a default for a union must match the
//! union's first member, so `["null", T]` fields only admit a `null` default.

use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};
use crate::schema::names::is_valid_name;
use crate::schema::{AvroSchema, FieldDefault, FieldSchema, RecordSchema};

/// Builder for [`FieldSchema`].
///
/// # Example
/// ```
/// use avsc_forge::schema::{catalog, FieldBuilder};
///
/// let message = FieldBuilder::new("message", catalog::optional_string())
///     .with_doc("Detailed error message.")
///     .default_null()
///     .build()
///     .unwrap();
/// assert_eq!(message.name(), "message");
/// ```
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    name: String,
    doc: Option<String>,
    schema: AvroSchema,
    default: FieldDefault,
}

impl FieldBuilder {
    /// Start a required field of the given type.
    pub fn new(name: impl Into<String>, schema: impl Into<AvroSchema>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            schema: schema.into(),
            default: FieldDefault::Required,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = default;
        self
    }

    /// Default to "no value".
    pub fn default_null(self) -> Self {
        self.with_default(FieldDefault::Null)
    }

    /// Default to a JSON value; `Value::Null` is the same as [`default_null`](Self::default_null).
    pub fn default_value(self, value: impl Into<Value>) -> Self {
        self.with_default(FieldDefault::from(value.into()))
    }

    /// Remove any default, making the field required.
    pub fn no_default(self) -> Self {
        self.with_default(FieldDefault::Required)
    }

    /// Validate and produce the field.
    pub fn build(self) -> SchemaResult<FieldSchema> {
        if !is_valid_name(&self.name) {
            return Err(SchemaError::InvalidFieldName(self.name));
        }

        if let Some(default) = self.default.to_json() {
            if let Err(reason) = check_default(&self.schema, &default) {
                return Err(SchemaError::DefaultTypeMismatch {
                    field: self.name,
                    expected: self.schema.type_name(),
                    reason,
                });
            }
        }

        Ok(FieldSchema {
            name: self.name,
            doc: self.doc,
            schema: self.schema,
            default: self.default,
        })
    }
}

/// Check that `value` is a legal default for `schema`, returning the reason
/// when it is not.
pub fn check_default(schema: &AvroSchema, value: &Value) -> Result<(), String> {
    let mismatch = || {
        Err(format!(
            "expected {}, found {}",
            schema.type_name(),
            json_kind(value)
        ))
    };

    match schema {
        AvroSchema::Null => match value {
            Value::Null => Ok(()),
            _ => mismatch(),
        },
        AvroSchema::Boolean => match value {
            Value::Bool(_) => Ok(()),
            _ => mismatch(),
        },
        AvroSchema::Int => match value.as_i64() {
            Some(n) if i32::try_from(n).is_ok() => Ok(()),
            Some(n) => Err(format!("{} does not fit in a 32-bit int", n)),
            None => mismatch(),
        },
        AvroSchema::Long => match value.as_i64() {
            Some(_) => Ok(()),
            None => mismatch(),
        },
        AvroSchema::Float | AvroSchema::Double => match value {
            Value::Number(_) => Ok(()),
            _ => mismatch(),
        },
        AvroSchema::Bytes | AvroSchema::String => match value {
            Value::String(_) => Ok(()),
            _ => mismatch(),
        },
        AvroSchema::Logical(lt) => check_default(lt.base(), value),
        AvroSchema::Union(u) => check_default(&u.members()[0], value)
            .map_err(|reason| format!("union defaults must match its first member: {}", reason)),
        AvroSchema::Enum(e) => match value {
            Value::String(symbol) if e.symbol_index(symbol).is_some() => Ok(()),
            Value::String(symbol) => Err(format!(
                "'{}' is not a symbol of enum {}",
                symbol,
                e.fullname()
            )),
            _ => mismatch(),
        },
        AvroSchema::Array(items) => match value {
            Value::Array(elements) => elements
                .iter()
                .enumerate()
                .try_for_each(|(i, element)| {
                    check_default(items, element).map_err(|reason| format!("[{}]: {}", i, reason))
                }),
            _ => mismatch(),
        },
        AvroSchema::Map(values) => match value {
            Value::Object(entries) => entries.iter().try_for_each(|(key, entry)| {
                check_default(values, entry).map_err(|reason| format!("'{}': {}", key, reason))
            }),
            _ => mismatch(),
        },
        AvroSchema::Record(record) => match value {
            Value::Object(entries) => check_record_default(record, entries),
            _ => mismatch(),
        },
    }
}

fn check_record_default(
    record: &RecordSchema,
    entries: &serde_json::Map<String, Value>,
) -> Result<(), String> {
    if let Some(unknown) = entries.keys().find(|key| record.field(key).is_none()) {
        return Err(format!(
            "record {} has no field '{}'",
            record.fullname(),
            unknown
        ));
    }

    for field in record.fields() {
        match entries.get(field.name()) {
            Some(entry) => check_default(field.schema(), entry)
                .map_err(|reason| format!("{}: {}", field.name(), reason))?,
            None if field.default().is_required() => {
                return Err(format!(
                    "missing value for required field '{}' of record {}",
                    field.name(),
                    record.fullname()
                ));
            }
            None => {}
        }
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{catalog, optional, EnumBuilder, RecordBuilder};
    use serde_json::json;

    #[test]
    fn test_optional_with_null_default() {
        let field = FieldBuilder::new("count", optional(catalog::INT).unwrap())
            .with_doc("How many")
            .default_null()
            .build()
            .unwrap();
        assert_eq!(field.default(), &FieldDefault::Null);
        assert_eq!(field.doc(), Some("How many"));
    }

    #[test]
    fn test_required_with_null_default_rejected() {
        let err = FieldBuilder::new("count", catalog::INT)
            .default_null()
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::DefaultTypeMismatch { ref field, .. } if field == "count"
        ));
    }

    #[test]
    fn test_optional_with_non_null_default_rejected() {
        let err = FieldBuilder::new("count", catalog::optional_int())
            .default_value(3)
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DefaultTypeMismatch { .. }));
    }

    #[test]
    fn test_required_field_without_default() {
        let field = FieldBuilder::new("appName", catalog::STRING).build().unwrap();
        assert!(field.default().is_required());
    }

    #[test]
    fn test_optional_without_default_is_legal() {
        let field = FieldBuilder::new("appId", catalog::optional_string())
            .build()
            .unwrap();
        assert!(field.default().is_required());
    }

    #[test]
    fn test_string_default() {
        FieldBuilder::new("eventType", catalog::STRING)
            .default_value("unstruct")
            .build()
            .unwrap();

        let err = FieldBuilder::new("eventType", catalog::INT)
            .default_value("unstruct")
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DefaultTypeMismatch { .. }));
    }

    #[test]
    fn test_numeric_defaults() {
        assert!(check_default(&catalog::INT, &json!(42)).is_ok());
        assert!(check_default(&catalog::INT, &json!(i64::from(i32::MAX) + 1)).is_err());
        assert!(check_default(&catalog::INT, &json!(1.5)).is_err());
        assert!(check_default(&catalog::LONG, &json!(i64::MAX)).is_ok());
        assert!(check_default(&catalog::LONG, &json!(u64::MAX)).is_err());
        assert!(check_default(&catalog::DOUBLE, &json!(1.5)).is_ok());
        assert!(check_default(&catalog::FLOAT, &json!(2)).is_ok());
        assert!(check_default(&catalog::FLOAT, &json!("2")).is_err());
        assert!(check_default(&catalog::BOOLEAN, &json!(false)).is_ok());
        assert!(check_default(&catalog::timestamp_millis(), &json!(0)).is_ok());
    }

    #[test]
    fn test_enum_default() {
        let e = AvroSchema::from(
            EnumBuilder::new("Status")
                .with_symbols(["OK", "FAILED"])
                .build()
                .unwrap(),
        );
        assert!(check_default(&e, &json!("OK")).is_ok());
        let reason = check_default(&e, &json!("UNKNOWN")).unwrap_err();
        assert!(reason.contains("UNKNOWN"));
    }

    #[test]
    fn test_collection_defaults() {
        let list = AvroSchema::array(catalog::STRING);
        assert!(check_default(&list, &json!([])).is_ok());
        assert!(check_default(&list, &json!(["a", "b"])).is_ok());
        assert!(check_default(&list, &json!(["a", 1])).is_err());

        let map = catalog::map_of_string();
        assert!(check_default(&map, &json!({"k": "v"})).is_ok());
        assert!(check_default(&map, &json!({"k": 1})).is_err());
        assert!(check_default(&map, &json!([])).is_err());
    }

    #[test]
    fn test_record_default() {
        let point = RecordBuilder::new("Point", "geo")
            .field(FieldBuilder::new("x", catalog::DOUBLE).build().unwrap())
            .field(
                FieldBuilder::new("label", catalog::optional_string())
                    .default_null()
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let schema = AvroSchema::from(point);

        assert!(check_default(&schema, &json!({"x": 1.0})).is_ok());
        assert!(check_default(&schema, &json!({"x": 1.0, "label": null})).is_ok());
        assert!(check_default(&schema, &json!({"label": null})).is_err());
        assert!(check_default(&schema, &json!({"x": 1.0, "z": 2})).is_err());
    }

    #[test]
    fn test_invalid_field_names() {
        for bad in ["", "9lives", "user-id", "user id"] {
            let err = FieldBuilder::new(bad, catalog::STRING).build().unwrap_err();
            assert_eq!(err, SchemaError::InvalidFieldName(bad.to_string()));
        }
    }
}
