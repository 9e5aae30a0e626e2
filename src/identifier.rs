//! Record identifiers double as file names, so they are restricted to a
//! conservative syntax: a letter, underscore or high byte, followed by
//! letters, digits, underscores or high bytes. No `.`, no `/`, no `..`.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

// Byte-oriented so every byte of a multi-byte UTF-8 character is in 0x80..=0xff.
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)^[A-Za-z_\x7f-\xff][A-Za-z0-9_\x7f-\xff]*$")
        .expect("identifier pattern is valid")
});

/// Whether `id` can be used as a record identifier (and thus a file name).
pub fn is_valid_identifier(id: &str) -> bool {
    IDENTIFIER.is_match(id.as_bytes())
}
