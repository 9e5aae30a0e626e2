//! Codec - Bytes to attributes and back.

use serde_json::Value;

use crate::error::RecordError;
use crate::record::{json_kind, Attributes};

/// Trait for turning stored bytes into record attributes and back.
pub trait JsonCodec: Send + Sync {
    /// Decode a document. The top level must be an object.
    fn decode(&self, bytes: &[u8]) -> Result<Attributes, RecordError>;

    /// Encode attributes as a document.
    fn encode(&self, attributes: &Attributes) -> Result<Vec<u8>, RecordError>;
}

/// `serde_json` codec. Compact output unless built with [`SerdeJsonCodec::pretty`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonCodec {
    pretty: bool,
}

impl SerdeJsonCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output, for files meant to be edited by hand.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl JsonCodec for SerdeJsonCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Attributes, RecordError> {
        match serde_json::from_slice(bytes).map_err(|e| RecordError::Serde(e.to_string()))? {
            Value::Object(attributes) => Ok(attributes),
            other => Err(RecordError::Serde(format!(
                "expected a JSON object at the top level, got {}",
                json_kind(&other)
            ))),
        }
    }

    fn encode(&self, attributes: &Attributes) -> Result<Vec<u8>, RecordError> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(attributes)
        } else {
            serde_json::to_vec(attributes)
        };
        encoded.map_err(|e| RecordError::Serde(e.to_string()))
    }
}
