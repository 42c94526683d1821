//! Blocking work that runs off the UI thread.
//!
//! Every helper here is synchronous; callers wrap them in
//! `tokio::task::spawn_blocking` through [`run_blocking`] so the event loop
//! never stalls on subprocess or archive IO.

use std::path::{Path, PathBuf};

use bkg_core::archive::{detect_zip_creator, entry_names, CreatorInfo};
use bkg_core::bkcrack::output::{scan_listing, ListingSummary};
use bkg_core::bkcrack::{run_capture, BkcrackCommand};

/// Run a blocking closure on the tokio blocking pool.
pub async fn run_blocking<T, F>(work: F) -> Result<T, String>
where
    F: FnOnce() -> Result<T, String> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result,
        Err(err) => Err(format!("background task failed: {err}")),
    }
}

/// Everything the archive info panel reports in one go.
#[derive(Debug, Clone)]
pub struct ArchiveInfoReport {
    /// The echoed `-L` command line.
    pub command: String,
    /// Raw listing output.
    pub stdout: String,
    /// Compression methods seen in the listing.
    pub summary: ListingSummary,
    /// Entry names read directly from the central directory.
    pub entries: Result<Vec<String>, String>,
    /// Creator fingerprint from the raw bytes.
    pub creator: Result<CreatorInfo, String>,
}

/// Run `-L` and collect listing, entry names and creator information.
pub fn load_archive_info(bkcrack: &str, archive: &Path) -> Result<ArchiveInfoReport, String> {
    let cmd = BkcrackCommand::new(bkcrack).list(archive);
    let output = run_capture(&cmd, None).map_err(|err| err.to_string())?;

    if !output.success() {
        let detail = pick_error_text(&output.stderr, &output.stdout);
        return Err(format!("listing failed: {detail}"));
    }

    Ok(ArchiveInfoReport {
        command: cmd.to_string(),
        summary: scan_listing(&output.stdout),
        entries: entry_names(archive).map_err(|err| err.to_string()),
        creator: detect_zip_creator(archive).map_err(|err| err.to_string()),
        stdout: output.stdout,
    })
}

/// Result of a one-shot key operation (`-d`, `-D`, `-U`).
#[derive(Debug, Clone)]
pub struct OneShotReport {
    /// The echoed command line.
    pub command: String,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    /// Where the output file was expected to land.
    pub output_path: PathBuf,
    /// Whether that file exists after the run.
    pub output_exists: bool,
}

/// Run a command to completion and check for the expected output file.
pub fn run_one_shot(
    cmd: &BkcrackCommand,
    cwd: Option<&Path>,
    output_path: PathBuf,
) -> Result<OneShotReport, String> {
    let output = run_capture(cmd, cwd).map_err(|err| err.to_string())?;

    Ok(OneShotReport {
        command: cmd.to_string(),
        exit_code: output.exit_code,
        output_exists: output_path.exists(),
        output_path,
        stdout: output.stdout,
        stderr: output.stderr,
    })
}

/// A file name under `dir` that does not collide with an existing file.
///
/// `flag.png` becomes `flag_1.png`, `flag_2.png` and so on until free.
pub fn unique_output_name(dir: &Path, entry_name: &str) -> String {
    let base = entry_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(entry_name)
        .to_string();

    if !dir.join(&base).exists() {
        return base;
    }

    let (stem, ext) = match base.rsplit_once('.') {
        Some((stem, ext)) => (stem.to_string(), Some(ext.to_string())),
        None => (base.clone(), None),
    };

    let mut index = 1;
    loop {
        let candidate = match &ext {
            Some(ext) => format!("{stem}_{index}.{ext}"),
            None => format!("{stem}_{index}"),
        };
        if !dir.join(&candidate).exists() {
            return candidate;
        }
        index += 1;
    }
}

/// Prefer stderr for error text, falling back to stdout.
pub fn pick_error_text(stderr: &str, stdout: &str) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = stdout.trim();
    if stdout.is_empty() {
        "no output".to_string()
    } else {
        stdout.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn unique_name_avoids_collisions() {
        let dir = tempdir().unwrap();
        assert_eq!(unique_output_name(dir.path(), "data/flag.png"), "flag.png");

        fs::write(dir.path().join("flag.png"), b"x").unwrap();
        assert_eq!(unique_output_name(dir.path(), "data/flag.png"), "flag_1.png");

        fs::write(dir.path().join("flag_1.png"), b"x").unwrap();
        assert_eq!(unique_output_name(dir.path(), "flag.png"), "flag_2.png");
    }

    #[test]
    fn unique_name_without_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("README"), b"x").unwrap();
        assert_eq!(unique_output_name(dir.path(), "README"), "README_1");
    }

    #[test]
    fn error_text_prefers_stderr() {
        assert_eq!(pick_error_text("bad\n", "out"), "bad");
        assert_eq!(pick_error_text("", "out"), "out");
        assert_eq!(pick_error_text("", ""), "no output");
    }
}
