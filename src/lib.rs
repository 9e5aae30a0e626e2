mod codec;
mod error;
mod filesystem;
mod filter;
mod identifier;
mod record;
mod schema;
mod store;
mod validator;

pub use codec::{JsonCodec, SerdeJsonCodec};
pub use error::RecordError;
pub use filesystem::{Entry, EntryKind, Filesystem, InMemoryFilesystem, LocalFilesystem};
pub use filter::Filters;
pub use identifier::is_valid_identifier;
pub use record::{Attributes, Context, Record};
pub use schema::{FileRecord, Schema, DEFAULT_EXTENSION};
pub use store::{events, RecordStore};
pub use validator::{AcceptAll, RequiredAttributes, Validator};

// Derive macro for typed records; shares its name with the trait above.
pub use flatfile_rust_macros::FileRecord;

// Re-export the EventEmitter used for store lifecycle events
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
