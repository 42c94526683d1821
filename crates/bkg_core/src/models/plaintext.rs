//! Plaintext source selection for an attack.

use std::path::PathBuf;

/// Where the known plaintext for an attack comes from.
///
/// Mirrors the priority the UI applies: a plaintext archive wins over a
/// standalone file, and a literal string is written to a temp file just
/// before the command is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaintextSource {
    /// A plaintext archive (`-P`), optionally naming the entry inside it (`-p`).
    Archive {
        path: PathBuf,
        entry: Option<String>,
    },
    /// A standalone plaintext file on disk (`-p`).
    File(PathBuf),
    /// Literal plaintext typed into the UI; materialized as a temp file.
    Literal(String),
}
