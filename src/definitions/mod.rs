//! Concrete pipeline schemas built with the engine.

mod error_message;

pub use error_message::{error_message_schema, error_record_schema, ERROR_MESSAGE_PATH};

/// Namespace shared by the pipeline's schemas.
pub const NAMESPACE: &str = "tv.pluto.nile.avro";
