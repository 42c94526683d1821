//! Shared data types used across the core crate.

mod keys;
mod plaintext;

pub use keys::{KeyParseError, KeyTriple};
pub use plaintext::PlaintextSource;
