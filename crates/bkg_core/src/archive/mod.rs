//! ZIP container introspection and plaintext archive creation.

mod builder;
mod contents;
mod creator;
pub mod offsets;
mod types;

pub use builder::{create_plaintext_archive, CompressionChoice};
pub use contents::{entry_names, find_entry_ignore_case, list_entries, EntryInfo};
pub use creator::{detect_zip_creator, CreatorInfo};
pub use types::{ArchiveError, ArchiveResult};
