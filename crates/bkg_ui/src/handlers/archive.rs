//! Archive inspection: `-L` listing, entry names and creator fingerprint.

use std::path::{Path, PathBuf};

use iced::Task;

use bkg_core::archive::entry_names;

use crate::app::{App, Message};
use crate::handlers::helpers::{load_archive_info, run_blocking, ArchiveInfoReport};
use crate::types::LogKind;

impl App {
    pub fn handle_show_archive_info(&mut self) -> Task<Message> {
        let Some(archive) = self.require_encrypted_zip() else {
            return Task::none();
        };

        let bkcrack = self.config.settings().tools.bkcrack_path.clone();
        self.log(
            LogKind::Info,
            format!("Inspecting {}", archive.display()),
        );

        Task::perform(
            run_blocking(move || load_archive_info(&bkcrack, &archive)),
            |result| Message::ArchiveInfoLoaded(Box::new(result)),
        )
    }

    pub fn handle_archive_info_loaded(
        &mut self,
        result: Result<ArchiveInfoReport, String>,
    ) -> Task<Message> {
        let report = match result {
            Ok(report) => report,
            Err(err) => {
                self.log(LogKind::Error, err);
                return Task::none();
            }
        };

        self.echo_command_line(&report.command);
        self.log_block(LogKind::Detail, &report.stdout);

        if report.summary.store {
            self.log(
                LogKind::Success,
                "Store entries present: stored data keeps its 12-byte header, the easiest target.",
            );
        }
        if report.summary.deflate {
            self.log(
                LogKind::Notice,
                "Deflate entries present: known plaintext must match the compressed stream.",
            );
        }
        if report.summary.is_empty() {
            self.log(LogKind::Warn, "No Store or Deflate entries reported.");
        }

        match report.entries {
            Ok(entries) => {
                self.log(
                    LogKind::Notice,
                    format!("{} entries in the central directory.", entries.len()),
                );
                self.set_target_entries(entries);
            }
            Err(err) => self.log(LogKind::Warn, format!("Could not read entries: {err}")),
        }

        match report.creator {
            Ok(creator) => {
                self.log_block(LogKind::Notice, &creator.to_string());
                if creator.store_hint() {
                    self.log(
                        LogKind::Success,
                        "Version 0x001F suggests a store-only creation tool.",
                    );
                }
            }
            Err(err) => self.log(LogKind::Warn, format!("Creator detection failed: {err}")),
        }

        Task::none()
    }

    /// Repopulate the target entry picker from the encrypted archive.
    pub fn refresh_target_entries(&mut self) {
        let path = PathBuf::from(&self.encrypted_zip);
        match entry_names(&path) {
            Ok(entries) => self.set_target_entries(entries),
            Err(err) => {
                self.target_entries.clear();
                self.selected_target = None;
                self.log(LogKind::Warn, format!("Could not list entries: {err}"));
            }
        }
    }

    fn set_target_entries(&mut self, entries: Vec<String>) {
        let keep = self
            .selected_target
            .as_ref()
            .is_some_and(|selected| entries.contains(selected));
        if !keep {
            self.selected_target = entries.first().cloned();
        }
        self.target_entries = entries;
    }

    /// The encrypted archive path, or a logged error when unusable.
    pub fn require_encrypted_zip(&mut self) -> Option<PathBuf> {
        let trimmed = self.encrypted_zip.trim();
        if trimmed.is_empty() {
            self.log(LogKind::Error, "Select an encrypted archive first.");
            return None;
        }
        let path = PathBuf::from(trimmed);
        if !path.exists() {
            self.log(
                LogKind::Error,
                format!("File not found: {}", path.display()),
            );
            return None;
        }
        Some(path)
    }

    /// The selected target entry, or a logged error when none is picked.
    pub fn require_target_entry(&mut self) -> Option<String> {
        match &self.selected_target {
            Some(entry) if !entry.is_empty() => Some(entry.clone()),
            _ => {
                self.log(LogKind::Error, "Pick a target entry inside the archive.");
                None
            }
        }
    }

    /// Use a zip as the plaintext archive and preselect its first entry.
    pub fn adopt_plain_zip(&mut self, path: PathBuf) {
        self.plain_zip = path.to_string_lossy().into_owned();
        self.log(LogKind::Info, format!("Plaintext archive: {}", self.plain_zip));

        match entry_names(&path) {
            Ok(mut entries) => {
                entries.sort();
                if let Some(first) = entries.first() {
                    self.plain_entry = first.clone();
                    self.log(
                        LogKind::Notice,
                        format!("Plaintext entry preset to {first}"),
                    );
                    let name = first.clone();
                    self.autofill_offset(&name);
                }
            }
            Err(err) => self.log(LogKind::Warn, format!("Could not list entries: {err}")),
        }
    }

    /// Fill the offset field from the known header offset table.
    pub fn autofill_offset(&mut self, name: &str) {
        if !self.config.settings().attack.auto_fill_offset {
            return;
        }
        if let Some(hit) = bkg_core::archive::offsets::auto_offset(name) {
            self.offset = hit.offset.to_string();
            self.log(
                LogKind::Notice,
                format!("Offset auto-filled to {} for {}", hit.offset, short_name(name)),
            );
        }
    }
}

fn short_name(name: &str) -> &str {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name)
}
