//! Creation of candidate plaintext archives for `-P`.
//!
//! The attack needs a plaintext archive whose entry was compressed the same
//! way as the target. Files are added sorted by path with their base name as
//! entry name, matching how the first (sorted) entry later becomes the
//! default `-p` value.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use zip::unstable::write::FileOptionsExt;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::types::{ArchiveError, ArchiveResult};

/// Compression method for the created archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionChoice {
    Store,
    Deflate,
}

impl CompressionChoice {
    fn method(self) -> CompressionMethod {
        match self {
            CompressionChoice::Store => CompressionMethod::Stored,
            CompressionChoice::Deflate => CompressionMethod::Deflated,
        }
    }

    /// Label used in log output.
    pub fn label(self) -> &'static str {
        match self {
            CompressionChoice::Store => "store",
            CompressionChoice::Deflate => "deflate",
        }
    }
}

/// Create a plaintext archive next to the first input file.
///
/// The output name is the first file's stem with a `.zip` extension. With a
/// password the entries use legacy ZipCrypto encryption, which is what the
/// attack targets.
pub fn create_plaintext_archive(
    files: &[PathBuf],
    method: CompressionChoice,
    password: Option<&str>,
) -> ArchiveResult<PathBuf> {
    let first = files.first().ok_or(ArchiveError::NoInputFiles)?;

    let output_path = first.with_extension("zip");
    let mut sorted: Vec<&PathBuf> = files.iter().collect();
    sorted.sort();

    let mut writer = ZipWriter::new(File::create(&output_path)?);

    for path in sorted {
        let entry_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut options = SimpleFileOptions::default().compression_method(method.method());
        if let Some(password) = password {
            options = options.with_deprecated_encryption(password.as_bytes());
        }

        writer.start_file(entry_name, options)?;
        let mut input = File::open(path)?;
        io::copy(&mut input, &mut writer)?;
    }

    writer.finish()?;
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::contents::list_entries;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn creates_store_archive_next_to_first_file() {
        let dir = tempdir().unwrap();
        let input_b = dir.path().join("b_header.bin");
        let input_a = dir.path().join("a_header.bin");
        fs::write(&input_b, b"second").unwrap();
        fs::write(&input_a, b"first").unwrap();

        let output = create_plaintext_archive(
            &[input_b.clone(), input_a],
            CompressionChoice::Store,
            None,
        )
        .unwrap();
        assert_eq!(output, dir.path().join("b_header.zip"));

        // Entries are added in sorted order with base names only.
        let entries = list_entries(&output).unwrap();
        assert_eq!(entries[0].name, "a_header.bin");
        assert_eq!(entries[1].name, "b_header.bin");
        assert_eq!(entries[0].method, "Store");
        assert!(!entries[0].encrypted);
    }

    #[test]
    fn password_enables_zipcrypto() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("plain.txt");
        fs::write(&input, b"known plaintext material").unwrap();

        let output = create_plaintext_archive(
            &[input],
            CompressionChoice::Deflate,
            Some("hunter2"),
        )
        .unwrap();

        let entries = list_entries(&output).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].encrypted);
        assert_eq!(entries[0].method, "Deflate");
    }

    #[test]
    fn empty_input_is_rejected() {
        let result = create_plaintext_archive(&[], CompressionChoice::Store, None);
        assert!(matches!(result, Err(ArchiveError::NoInputFiles)));
    }
}
