use std::fmt;

/// Error type for every record store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The identifier is not a valid resource name (or the record has none yet).
    NotFound { id: String },
    /// No file exists for the identifier.
    FileNotFound { filename: String },
    /// The target file already exists and will not be overwritten.
    FileExists { filename: String },
    /// Missing primary key, or the validator rejected the attributes.
    InvalidAttributes(Vec<String>),
    /// Encoding/decoding error.
    Serde(String),
    /// Filesystem-level error.
    Storage(String),
}

impl RecordError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        RecordError::InvalidAttributes(vec![message.into()])
    }

    /// Validator messages carried by an `InvalidAttributes` error.
    pub fn messages(&self) -> &[String] {
        match self {
            RecordError::InvalidAttributes(messages) => messages,
            _ => &[],
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::NotFound { id } => write!(f, "invalid resource name: {:?}", id),
            RecordError::FileNotFound { filename } => write!(f, "file not found: {}", filename),
            RecordError::FileExists { filename } => {
                write!(f, "target file cannot be overwritten: {}", filename)
            }
            RecordError::InvalidAttributes(messages) => {
                write!(f, "invalid attributes: {}", messages.join("; "))
            }
            RecordError::Serde(msg) => write!(f, "record serialization error: {}", msg),
            RecordError::Storage(msg) => write!(f, "record storage error: {}", msg),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<std::io::Error> for RecordError {
    fn from(err: std::io::Error) -> Self {
        RecordError::Storage(err.to_string())
    }
}
