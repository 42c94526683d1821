//! Small tools: hex converter, drag-drop routing, clear all.

use std::path::PathBuf;

use iced::Task;

use bkg_core::util::text_to_hex;

use crate::app::{App, Message};
use crate::types::LogKind;

impl App {
    /// Convert typed text to an uppercase `-x` pattern and copy it.
    pub fn handle_convert_to_hex(&mut self) -> Task<Message> {
        let input = self.hex_convert_input.clone();
        if input.is_empty() {
            self.log(LogKind::Warn, "Nothing to convert.");
            return Task::none();
        }

        let hex = text_to_hex(&input);
        self.log(LogKind::Info, format!("Hex: {hex}"));
        self.log(LogKind::Notice, "Copied to clipboard.");
        iced::clipboard::write(hex)
    }

    /// Route a dropped file to the field its type belongs to.
    pub fn handle_file_dropped(&mut self, path: PathBuf) -> Task<Message> {
        let is_zip = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));

        if is_zip && !self.route_zip_drops_to_plaintext {
            self.encrypted_zip = path.to_string_lossy().into_owned();
            self.log(
                LogKind::Info,
                format!("Encrypted archive: {}", self.encrypted_zip),
            );
            self.refresh_target_entries();
        } else if is_zip {
            self.adopt_plain_zip(path);
        } else {
            self.plain_file = path.to_string_lossy().into_owned();
            self.log(LogKind::Info, format!("Plaintext file: {}", self.plain_file));
            let name = path.to_string_lossy().into_owned();
            self.autofill_offset(&name);
        }
        Task::none()
    }

    /// Reset every field and the log. A running worker is killed first.
    pub fn handle_clear_all(&mut self) -> Task<Message> {
        if let Some(worker) = self.worker.take() {
            worker.terminate();
        }
        self.run = None;
        // Anything the killed worker still emits is stale.
        self.run_seq += 1;

        self.encrypted_zip.clear();
        self.target_entries.clear();
        self.selected_target = None;
        self.plain_file.clear();
        self.plain_zip.clear();
        self.plain_entry.clear();
        self.offset.clear();
        self.hex_offset.clear();
        self.hex_pattern.clear();
        self.hex_literal.clear();
        self.direct_hex_pairs.clear();
        self.key_input.clear();
        self.password_length.clear();
        self.output_zip_name.clear();
        self.new_password.clear();
        self.files_to_compress.clear();
        self.compress_password.clear();
        self.compress_output = None;
        self.hex_convert_input.clear();

        self.log.clear();
        self.log(LogKind::Notice, "Cleared.");
        Task::none()
    }
}
