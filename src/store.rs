//! RecordStore - One directory of JSON files, one record per file.
//!
//! The store maps a record identifier to `<id>.<ext>` inside its directory and
//! performs CRUD through the injected [`Filesystem`], [`JsonCodec`] and
//! [`Validator`]. It holds no per-record state: every load returns a fresh
//! [`Record`], and `save`/`rename` update the record they are given.
//!
//! ## Example
//!
//! ```ignore
//! use flatfile_rust::{Filters, InMemoryFilesystem, RecordStore, Schema};
//!
//! let store = RecordStore::new(InMemoryFilesystem::new(), Schema::new("id"));
//!
//! let mut alice = store.new_record().with("id", "alice").with("age", 30);
//! store.save(&mut alice)?;
//!
//! let loaded = store.get_item("alice")?;
//! let adults = store.get_collection(&Filters::new().eq("age", 30))?;
//! ```

#[cfg(feature = "emitter")]
use std::sync::Mutex;

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;

use crate::codec::{JsonCodec, SerdeJsonCodec};
use crate::error::RecordError;
use crate::filesystem::{join, normalize, Filesystem};
use crate::filter::Filters;
use crate::identifier::is_valid_identifier;
use crate::record::{id_from_value, is_blank, Context, Record};
use crate::schema::Schema;
use crate::validator::{AcceptAll, Validator};

/// Event names emitted after successful store operations. The payload is the
/// affected record id (the new id for duplicate and rename). Each operation
/// emits exactly one event; the copy written by `duplicate` does not also
/// emit `SAVED`.
pub mod events {
    pub const SAVED: &str = "record:saved";
    pub const DELETED: &str = "record:deleted";
    pub const DUPLICATED: &str = "record:duplicated";
    pub const RENAMED: &str = "record:renamed";
}

/// CRUD over a directory of JSON records.
pub struct RecordStore<F, C = SerdeJsonCodec, V = AcceptAll> {
    filesystem: F,
    codec: C,
    validator: V,
    schema: Schema,
    directory: String,
    #[cfg(feature = "emitter")]
    emitter: Option<Mutex<EventEmitter>>,
}

impl<F: Filesystem> RecordStore<F> {
    /// Create a store at the filesystem root with the default codec and no
    /// validation.
    pub fn new(filesystem: F, schema: Schema) -> Self {
        Self {
            filesystem,
            codec: SerdeJsonCodec::new(),
            validator: AcceptAll,
            schema,
            directory: String::new(),
            #[cfg(feature = "emitter")]
            emitter: None,
        }
    }
}

impl<F, C, V> RecordStore<F, C, V> {
    /// Replace the codec.
    pub fn with_codec<C2: JsonCodec>(self, codec: C2) -> RecordStore<F, C2, V> {
        RecordStore {
            filesystem: self.filesystem,
            codec,
            validator: self.validator,
            schema: self.schema,
            directory: self.directory,
            #[cfg(feature = "emitter")]
            emitter: self.emitter,
        }
    }

    /// Replace the validator run before every write.
    pub fn with_validator<V2: Validator>(self, validator: V2) -> RecordStore<F, C, V2> {
        RecordStore {
            filesystem: self.filesystem,
            codec: self.codec,
            validator,
            schema: self.schema,
            directory: self.directory,
            #[cfg(feature = "emitter")]
            emitter: self.emitter,
        }
    }

    /// Keep this store's files in a subdirectory of the filesystem, so several
    /// record types can share one filesystem.
    pub fn with_directory(mut self, directory: impl AsRef<str>) -> Self {
        self.directory = normalize(directory.as_ref()).to_string();
        self
    }

    /// Emit lifecycle events (see [`events`]) through the given emitter.
    #[cfg(feature = "emitter")]
    pub fn with_emitter(mut self, emitter: EventEmitter) -> Self {
        self.emitter = Some(Mutex::new(emitter));
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn filesystem(&self) -> &F {
        &self.filesystem
    }

    /// Subdirectory holding the records (`""` for the filesystem root).
    pub fn directory(&self) -> &str {
        &self.directory
    }
}

impl<F, C, V> RecordStore<F, C, V>
where
    F: Filesystem,
    C: JsonCodec,
    V: Validator,
{
    /// File name for an identifier, or `NotFound` if the identifier is not a
    /// safe resource name.
    pub fn resolve_filename(&self, id: &str) -> Result<String, RecordError> {
        if !is_valid_identifier(id) {
            tracing::warn!(id, "rejected invalid resource name");
            return Err(RecordError::NotFound { id: id.to_string() });
        }
        Ok(format!("{}.{}", id, self.schema.ext()))
    }

    /// A fresh, unsaved record of this store's type.
    pub fn new_record(&self) -> Record {
        Record::new(self.schema.clone())
    }

    /// Load the record stored under `id`.
    pub fn get_item(&self, id: &str) -> Result<Record, RecordError> {
        let filename = self.resolve_filename(id)?;
        let path = self.path(&filename);

        if !self.filesystem.has(&path)? {
            return Err(RecordError::FileNotFound { filename: path });
        }

        let attributes = self.codec.decode(&self.filesystem.read(&path)?)?;
        tracing::trace!(id, path = %path, "record loaded");
        Ok(Record::loaded(self.schema.clone(), id, attributes))
    }

    /// Load every record in the directory that matches `filters`, in listing
    /// order. Re-lists and re-reads on every call.
    pub fn get_collection(&self, filters: &Filters) -> Result<Vec<Record>, RecordError> {
        let entries = self.filesystem.list_contents(&self.directory)?;
        let ext = self.schema.ext();

        let mut records = Vec::new();
        for entry in entries {
            if !entry.is_file() || entry.extension.as_deref() != Some(ext) {
                continue;
            }
            let record = self.get_item(&entry.filename)?;
            if filters.matches(&record) {
                records.push(record);
            }
        }

        tracing::debug!(
            directory = %self.directory,
            ext,
            count = records.len(),
            "collection loaded"
        );
        Ok(records)
    }

    /// Validate and write the record to `<pk value>.<ext>`, overwriting any
    /// existing file.
    ///
    /// The record's id is taken from its primary-key attribute. The record
    /// only switches to the update context once the write has succeeded.
    pub fn save(&self, record: &mut Record) -> Result<(), RecordError> {
        let id = self.write(record)?;
        self.emit(events::SAVED, &id);
        Ok(())
    }

    /// Everything `save` does except emitting; returns the written id.
    fn write(&self, record: &mut Record) -> Result<String, RecordError> {
        self.check_schema(record)?;

        let id = match record.pk_value() {
            Some(value) if !is_blank(value) => id_from_value(value).ok_or_else(|| {
                RecordError::invalid(format!(
                    "Primary key {} must be a string or a number.",
                    self.schema.pk()
                ))
            })?,
            _ => return Err(RecordError::invalid("Missing primary key.")),
        };
        record.set_id(id.as_str());

        self.validator
            .validate(record.attributes(), record.context())
            .map_err(RecordError::InvalidAttributes)?;

        let path = self.path(&self.resolve_filename(&id)?);
        let bytes = self.codec.encode(record.attributes())?;
        self.filesystem.put(&path, &bytes)?;

        tracing::debug!(id = %id, path = %path, context = %record.context(), "record saved");
        record.mark_persisted();
        Ok(id)
    }

    /// Delete the record's file. Returns what the filesystem reports.
    pub fn delete(&self, record: &Record) -> Result<bool, RecordError> {
        let id = Self::require_id(record)?;
        let path = self.path(&self.resolve_filename(id)?);

        let removed = self.filesystem.delete(&path)?;
        tracing::debug!(id, path = %path, removed, "record deleted");
        if removed {
            self.emit(events::DELETED, id);
        }
        Ok(removed)
    }

    /// Copy the record's stored file to `new_id`.
    ///
    /// This is a file operation: unsaved changes on `record` are not part of
    /// the copy. The copy gets `new_id` as its primary key and is saved as a
    /// new record, so it passes through create-context validation.
    pub fn duplicate(&self, record: &Record, new_id: &str) -> Result<Record, RecordError> {
        let target = self.path(&self.resolve_filename(new_id)?);
        if self.filesystem.has(&target)? {
            return Err(RecordError::FileExists { filename: target });
        }

        let source = self.get_item(Self::require_id(record)?)?;
        let mut copy = Record::from_attributes(self.schema.clone(), source.into_attributes());
        copy.set(self.schema.pk(), new_id);
        self.write(&mut copy)?;

        tracing::debug!(from = record.id(), to = new_id, "record duplicated");
        self.emit(events::DUPLICATED, new_id);
        Ok(copy)
    }

    /// Move the record to `new_id`, updating its primary-key attribute.
    ///
    /// The record's current attributes are written to the new file before the
    /// old file is removed; `record` is only updated once both steps succeed.
    pub fn rename(&self, record: &mut Record, new_id: &str) -> Result<(), RecordError> {
        self.check_schema(record)?;

        let old_id = Self::require_id(record)?.to_string();
        let old_path = self.path(&self.resolve_filename(&old_id)?);
        let new_path = self.path(&self.resolve_filename(new_id)?);

        if old_path == new_path {
            return Ok(());
        }
        if self.filesystem.has(&new_path)? {
            return Err(RecordError::FileExists { filename: new_path });
        }
        if !self.filesystem.has(&old_path)? {
            return Err(RecordError::FileNotFound { filename: old_path });
        }

        let mut renamed = record.clone();
        renamed.set(self.schema.pk(), new_id);
        self.validator
            .validate(renamed.attributes(), Context::Update)
            .map_err(RecordError::InvalidAttributes)?;

        let bytes = self.codec.encode(renamed.attributes())?;
        self.filesystem.put(&new_path, &bytes)?;
        self.filesystem.delete(&old_path)?;

        renamed.set_id(new_id);
        renamed.mark_persisted();
        *record = renamed;

        tracing::debug!(from = %old_id, to = new_id, "record renamed");
        self.emit(events::RENAMED, new_id);
        Ok(())
    }

    fn path(&self, filename: &str) -> String {
        join(&self.directory, filename)
    }

    fn require_id(record: &Record) -> Result<&str, RecordError> {
        record.id().ok_or_else(|| RecordError::NotFound { id: String::new() })
    }

    fn check_schema(&self, record: &Record) -> Result<(), RecordError> {
        if record.schema() == &self.schema {
            Ok(())
        } else {
            Err(RecordError::invalid(format!(
                "record keyed on {}.{} does not belong to a store keyed on {}.{}",
                record.pk(),
                record.ext(),
                self.schema.pk(),
                self.schema.ext()
            )))
        }
    }

    #[cfg(feature = "emitter")]
    fn emit(&self, event: &str, id: &str) {
        let Some(emitter) = &self.emitter else {
            return;
        };
        match emitter.lock() {
            Ok(mut emitter) => {
                emitter.emit(event, id.to_string());
            }
            Err(_) => tracing::warn!(event, id, "event emitter lock poisoned"),
        }
    }

    #[cfg(not(feature = "emitter"))]
    fn emit(&self, _event: &str, _id: &str) {}
}
