mod file_record;

use proc_macro::TokenStream;

/// Derive macro for the `FileRecord` trait.
///
/// # Usage
///
/// ```ignore
/// use flatfile_rust::FileRecord;
///
/// #[derive(Serialize, Deserialize, FileRecord)]
/// #[record(ext = "post")]
/// pub struct Post {
///     #[record(pk)]
///     pub slug: String,
///     pub title: String,
/// }
/// ```
///
/// - `#[record(pk)]` on a field marks it as the primary key. Without it, a
///   field named `id` is used. A `#[serde(rename = "...")]` on that field
///   becomes the stored attribute name.
/// - `#[record(pk = "...")]` on the struct names the primary-key attribute
///   directly (useful for dotted paths such as `"meta.slug"`).
/// - `#[record(ext = "...")]` on the struct sets the file extension.
///   Defaults to `json`.
#[proc_macro_derive(FileRecord, attributes(record))]
pub fn derive_file_record(input: TokenStream) -> TokenStream {
    file_record::derive_file_record(input)
}
