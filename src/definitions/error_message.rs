//! Schema for payloads the pipeline failed to process.

use super::NAMESPACE;
use crate::error::SchemaResult;
use crate::schema::{catalog, AvroSchema, FieldBuilder, RecordBuilder, RecordSchema};

/// Default location of the rendered error-message schema.
pub const ERROR_MESSAGE_PATH: &str = "schemas/error-message.avsc";

const INDEX_DOC: &str =
    "First index of invalid event if we do not split jsonEvent into bad and good";

/// One error attached to a rejected payload.
pub fn error_record_schema() -> SchemaResult<RecordSchema> {
    RecordBuilder::new("ErrorRecord", NAMESPACE)
        .field(
            FieldBuilder::new("type", catalog::STRING)
                .with_doc("The general type of the error, like UNEXPECTED_ERROR, SCHEMA_REGISTRY_ERROR, ...")
                .build()?,
        )
        .field(
            FieldBuilder::new("message", catalog::optional_string())
                .with_doc("Detailed error message.")
                .default_null()
                .build()?,
        )
        .field(
            FieldBuilder::new("rawEventIndex", catalog::optional_int())
                .with_doc(INDEX_DOC)
                .default_null()
                .build()?,
        )
        .field(
            FieldBuilder::new("customContextIndex", catalog::optional_int())
                .with_doc(INDEX_DOC)
                .default_null()
                .build()?,
        )
        .build()
}

/// The rejected payload together with all of its errors.
pub fn error_message_schema() -> SchemaResult<RecordSchema> {
    let errors = AvroSchema::array(error_record_schema()?);

    RecordBuilder::new("ErrorMessage", NAMESPACE)
        .field(
            FieldBuilder::new("content", catalog::STRING)
                .with_doc("The content of the incoming payload data event.")
                .build()?,
        )
        .field(
            FieldBuilder::new("errors", errors)
                .with_doc("A list of errors associated with content.")
                .build()?,
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{parse_record, SchemaSerializer, SerializerOptions};
    use serde_json::json;

    #[test]
    fn test_error_message_shape() {
        let value = SchemaSerializer::new().to_json_value(&error_message_schema().unwrap());
        assert_eq!(value["name"], json!("ErrorMessage"));
        assert_eq!(value["namespace"], json!(NAMESPACE));
        assert_eq!(value["fields"][0]["name"], json!("content"));
        assert_eq!(value["fields"][0]["type"], json!("string"));
        assert!(value["fields"][0].get("default").is_none());

        let errors_type = &value["fields"][1]["type"];
        assert_eq!(errors_type["type"], json!("array"));
        assert_eq!(errors_type["items"]["name"], json!("ErrorRecord"));

        let names: Vec<&str> = errors_type["items"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["type", "message", "rawEventIndex", "customContextIndex"]);
    }

    #[test]
    fn test_error_message_reparses() {
        let serializer = SchemaSerializer::with_options(SerializerOptions::new().with_pretty(false));
        let original = error_message_schema().unwrap();
        let text = serializer.serialize(&original);
        assert_eq!(parse_record(&text).unwrap(), original);
    }
}
