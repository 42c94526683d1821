//! Error types for bkcrack invocation.

use std::io;

use thiserror::Error;

/// Errors that can occur while running bkcrack.
#[derive(Error, Debug)]
pub enum BkcrackError {
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type for bkcrack operations.
pub type BkcrackResult<T> = Result<T, BkcrackError>;
