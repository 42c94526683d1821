//! Error types for archive operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing archives.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("No central directory header found in {0}")]
    NoCentralDirectory(PathBuf),

    #[error("No input files to compress")]
    NoInputFiles,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;
