//! Plaintext archive creation (the `-P` side of the attack).

use std::path::PathBuf;

use iced::Task;

use bkg_core::archive::{create_plaintext_archive, CompressionChoice};

use crate::app::{App, Message};
use crate::handlers::helpers::run_blocking;
use crate::types::LogKind;

impl App {
    pub fn handle_compress_inputs_picked(&mut self, files: Vec<PathBuf>) -> Task<Message> {
        if files.is_empty() {
            return Task::none();
        }
        if let Some(first) = files.first() {
            let first = first.clone();
            self.remember_dir(&first);
        }
        self.log(
            LogKind::Info,
            format!("{} file(s) selected for compression.", files.len()),
        );
        self.files_to_compress = files;
        Task::none()
    }

    pub fn handle_compress(&mut self, choice: CompressionChoice) -> Task<Message> {
        if self.files_to_compress.is_empty() {
            self.log(LogKind::Error, "Select files to compress first.");
            return Task::none();
        }

        let files = self.files_to_compress.clone();
        let password = self.compress_password.clone();
        let password = (!password.is_empty()).then_some(password);
        if password.is_some() {
            self.log(
                LogKind::Notice,
                "Entries will use legacy ZipCrypto encryption.",
            );
        }

        self.log(
            LogKind::Info,
            format!("Creating {} archive from {} file(s)", choice.label(), files.len()),
        );

        Task::perform(
            run_blocking(move || {
                create_plaintext_archive(&files, choice, password.as_deref())
                    .map_err(|err| err.to_string())
            }),
            Message::CompressFinished,
        )
    }

    pub fn handle_compress_finished(
        &mut self,
        result: Result<PathBuf, String>,
    ) -> Task<Message> {
        match result {
            Ok(path) => {
                self.log(
                    LogKind::Success,
                    format!("Archive written to {}", path.display()),
                );
                self.compress_output = Some(path);
            }
            Err(err) => self.log(LogKind::Error, format!("Compression failed: {err}")),
        }
        Task::none()
    }

    /// Adopt the freshly built archive as the attack's plaintext side.
    pub fn handle_use_compressed_as_plaintext(&mut self) -> Task<Message> {
        match self.compress_output.clone() {
            Some(path) => self.adopt_plain_zip(path),
            None => self.log(LogKind::Error, "Create an archive first."),
        }
        Task::none()
    }
}
