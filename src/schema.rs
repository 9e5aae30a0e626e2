//! Schema - Per-record-type storage settings.

use serde::{de::DeserializeOwned, Serialize};

/// Default file extension for stored records (without the dot).
pub const DEFAULT_EXTENSION: &str = "json";

/// Primary key and file extension shared by every record of one type.
///
/// One directory holds one record type: every file in it with the schema's
/// extension is expected to hold a document of the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Schema {
    pk: String,
    ext: String,
}

impl Schema {
    /// Create a schema keyed on the given attribute, stored as `.json`.
    pub fn new(pk: impl Into<String>) -> Self {
        Self {
            pk: pk.into(),
            ext: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Schema declared by a typed record.
    pub fn of<T: FileRecord>() -> Self {
        Self::new(T::PK).with_extension(T::EXT)
    }

    /// Set the file extension. A leading dot is ignored.
    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        let ext = ext.into();
        self.ext = ext.trim_start_matches('.').to_string();
        self
    }

    /// Name of the primary-key attribute (may be a dotted path).
    pub fn pk(&self) -> &str {
        &self.pk
    }

    /// File extension, without the dot.
    pub fn ext(&self) -> &str {
        &self.ext
    }
}

/// Trait for typed structs that map onto stored records.
///
/// Usually derived with `#[derive(FileRecord)]`.
pub trait FileRecord: Serialize + DeserializeOwned {
    /// The attribute holding the record's identifier.
    const PK: &'static str;

    /// The file extension for this record type.
    const EXT: &'static str = DEFAULT_EXTENSION;
}
