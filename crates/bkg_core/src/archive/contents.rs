//! Archive entry listing via the `zip` crate.

use std::fs::File;
use std::path::Path;

use zip::{CompressionMethod, ZipArchive};

use super::types::{ArchiveError, ArchiveResult};

/// Summary of one archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Entry name as stored in the archive.
    pub name: String,
    /// Human-readable compression method.
    pub method: String,
    /// Whether the entry is encrypted.
    pub encrypted: bool,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Compressed size in bytes.
    pub compressed_size: u64,
}

/// List all entries of a zip archive.
pub fn list_entries(path: &Path) -> ArchiveResult<Vec<EntryInfo>> {
    let mut archive = open(path)?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        entries.push(EntryInfo {
            name: entry.name().to_string(),
            method: method_label(entry.compression()).to_string(),
            encrypted: entry.encrypted(),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
        });
    }

    Ok(entries)
}

/// List just the entry names, in archive order.
pub fn entry_names(path: &Path) -> ArchiveResult<Vec<String>> {
    let archive = open(path)?;
    Ok(archive.file_names().map(|name| name.to_string()).collect())
}

/// Find an entry by name, ignoring case.
///
/// Returns the archive's exact spelling so the command line matches what
/// bkcrack will look up.
pub fn find_entry_ignore_case(path: &Path, target: &str) -> ArchiveResult<Option<String>> {
    let wanted = target.to_lowercase();
    let names = entry_names(path)?;
    Ok(names.into_iter().find(|name| name.to_lowercase() == wanted))
}

fn open(path: &Path) -> ArchiveResult<ZipArchive<File>> {
    if !path.exists() {
        return Err(ArchiveError::FileNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    Ok(ZipArchive::new(file)?)
}

fn method_label(method: CompressionMethod) -> &'static str {
    match method {
        CompressionMethod::Stored => "Store",
        CompressionMethod::Deflated => "Deflate",
        _ => "Other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn sample_archive(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("sample.zip");
        let file = File::create(&path).unwrap();
        let mut writer = ZipWriter::new(file);

        writer
            .start_file(
                "Readme.TXT",
                SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
            )
            .unwrap();
        writer.write_all(b"hello").unwrap();

        writer
            .start_file(
                "data/flag.png",
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            )
            .unwrap();
        writer.write_all(&[0u8; 256]).unwrap();

        writer.finish().unwrap();
        path
    }

    #[test]
    fn lists_entries_with_methods() {
        let dir = tempdir().unwrap();
        let path = sample_archive(dir.path());

        let entries = list_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Readme.TXT");
        assert_eq!(entries[0].method, "Store");
        assert!(!entries[0].encrypted);
        assert_eq!(entries[1].method, "Deflate");
        assert_eq!(entries[1].size, 256);
    }

    #[test]
    fn finds_entry_ignoring_case() {
        let dir = tempdir().unwrap();
        let path = sample_archive(dir.path());

        let found = find_entry_ignore_case(&path, "readme.txt").unwrap();
        assert_eq!(found.as_deref(), Some("Readme.TXT"));

        let missing = find_entry_ignore_case(&path, "nope.bin").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn missing_file_is_reported() {
        let result = entry_names(Path::new("/nonexistent/archive.zip"));
        assert!(matches!(result, Err(ArchiveError::FileNotFound(_))));
    }
}
