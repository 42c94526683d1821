//! Key-based operations: decipher, export, change password, recover.

use std::fs;
use std::path::{Path, PathBuf};

use iced::Task;

use bkg_core::archive::find_entry_ignore_case;
use bkg_core::bkcrack::output::{is_zip_error, PasswordScraper, RecoveredPassword};
use bkg_core::bkcrack::BkcrackCommand;
use bkg_core::models::KeyTriple;
use bkg_core::util::analyze_password;

use crate::app::{App, Message};
use crate::handlers::helpers::{pick_error_text, run_blocking, run_one_shot, OneShotReport};
use crate::types::{LogKind, RunKind};

impl App {
    /// Decipher the target entry into the output folder (`-d`).
    pub fn handle_direct_extract(&mut self) -> Task<Message> {
        let Some((archive, target, keys)) = self.key_operation_inputs() else {
            return Task::none();
        };

        let Some(output_dir) = self.prepared_output_dir() else {
            return Task::none();
        };

        // bkcrack writes -d relative to its working directory, so the
        // archive path has to be absolute.
        let archive = match std::path::absolute(&archive) {
            Ok(path) => path,
            Err(err) => {
                self.log(LogKind::Error, err.to_string());
                return Task::none();
            }
        };

        let target = match find_entry_ignore_case(&archive, &target) {
            Ok(Some(actual)) => actual,
            Ok(None) => {
                self.log(
                    LogKind::Error,
                    format!("Entry {target} not found in the archive."),
                );
                return Task::none();
            }
            Err(err) => {
                self.log(LogKind::Error, err.to_string());
                return Task::none();
            }
        };

        self.log(LogKind::Info, format!("Deciphering {target}"));
        let bkcrack = self.bkcrack_program();

        Task::perform(
            run_blocking(move || {
                let name = super::helpers::unique_output_name(&output_dir, &target);
                let cmd = BkcrackCommand::new(bkcrack)
                    .ciphertext_archive(&archive)
                    .ciphertext_entry(&target)
                    .keys(&keys)
                    .decipher(&name);
                run_one_shot(&cmd, Some(&output_dir), output_dir.join(&name))
            }),
            Message::ExtractFinished,
        )
    }

    pub fn handle_extract_finished(
        &mut self,
        result: Result<OneShotReport, String>,
    ) -> Task<Message> {
        self.report_one_shot(result, "Deciphered to");
        Task::none()
    }

    /// Export a password-less copy of the archive (`-D`).
    pub fn handle_export_no_pass(&mut self) -> Task<Message> {
        let Some((archive, target, keys)) = self.key_operation_inputs() else {
            return Task::none();
        };

        let stem = archive
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "archive".to_string());
        let output = archive.with_file_name(format!("{stem}_NO_PASS.zip"));

        self.log(
            LogKind::Info,
            format!("Exporting password-less copy to {}", output.display()),
        );
        let bkcrack = self.bkcrack_program();

        Task::perform(
            run_blocking(move || {
                let cmd = BkcrackCommand::new(bkcrack)
                    .ciphertext_archive(&archive)
                    .ciphertext_entry(&target)
                    .keys(&keys)
                    .decrypted_archive(&output);
                run_one_shot(&cmd, None, output)
            }),
            Message::ExportFinished,
        )
    }

    pub fn handle_export_finished(
        &mut self,
        result: Result<OneShotReport, String>,
    ) -> Task<Message> {
        self.report_one_shot(result, "Exported");
        Task::none()
    }

    /// Re-encrypt the archive with a new password (`-U`).
    pub fn handle_change_password(&mut self) -> Task<Message> {
        let Some((archive, target, keys)) = self.key_operation_inputs() else {
            return Task::none();
        };

        let new_password = self.new_password.clone();
        if new_password.is_empty() {
            self.log(LogKind::Error, "Enter the new password.");
            return Task::none();
        }

        let mut name = self.output_zip_name.trim().to_string();
        if name.is_empty() {
            self.log(LogKind::Error, "Enter a name for the output archive.");
            return Task::none();
        }
        if !name.to_lowercase().ends_with(".zip") {
            name.push_str(".zip");
        }

        let Some(output_dir) = self.prepared_output_dir() else {
            return Task::none();
        };
        let output = output_dir.join(name);

        self.log(
            LogKind::Info,
            format!("Re-encrypting into {}", output.display()),
        );
        let bkcrack = self.bkcrack_program();

        Task::perform(
            run_blocking(move || {
                let cmd = BkcrackCommand::new(bkcrack)
                    .ciphertext_archive(&archive)
                    .ciphertext_entry(&target)
                    .keys(&keys)
                    .change_password(&output, &new_password);
                run_one_shot(&cmd, None, output)
            }),
            Message::ChangePasswordFinished,
        )
    }

    pub fn handle_change_password_finished(
        &mut self,
        result: Result<OneShotReport, String>,
    ) -> Task<Message> {
        if self.report_one_shot(result, "Re-encrypted archive written to") {
            self.log(
                LogKind::Notice,
                format!("New password: {}", self.new_password),
            );
        }
        Task::none()
    }

    /// Brute-force the original password from the keys (`-r`).
    pub fn handle_recover_password(&mut self) -> Task<Message> {
        if self.worker.is_some() {
            self.log(LogKind::Warn, "A command is already running.");
            return Task::none();
        }
        let Some(keys) = self.require_keys() else {
            return Task::none();
        };

        let range = self.password_length.trim().to_string();
        if range.is_empty() {
            self.log(
                LogKind::Error,
                "Enter a password length or range, e.g. 9 or 6..10",
            );
            return Task::none();
        }

        let charset = self.config.settings().attack.recovery_charset.clone();
        let cmd = BkcrackCommand::new(self.bkcrack_program())
            .keys(&keys)
            .recover_password(&range, &charset);

        self.log(
            LogKind::Info,
            format!("Recovering password (length {range}, charset {charset})"),
        );
        self.start_streaming(cmd, None, RunKind::Recover(PasswordScraper::new()))
    }

    pub(crate) fn finish_recovery(&mut self, scraper: PasswordScraper, exit_code: Option<i32>) {
        match scraper.finish() {
            Some(RecoveredPassword { text, hex }) => {
                let report = analyze_password(&text);
                self.log(LogKind::Success, format!("Password: {}", report.display));
                self.log(
                    LogKind::Notice,
                    format!("Spelled out: {}", report.spelled),
                );
                self.log(LogKind::Notice, format!("Hex bytes: {}", report.hex));
                self.log(
                    LogKind::Notice,
                    format!("{} character(s)", report.char_count),
                );
                if let Some(hex) = hex {
                    tracing::debug!("password bytes as printed: {hex}");
                }
            }
            None => match exit_code {
                Some(0) | None => self.log(LogKind::Warn, "No password line in the output."),
                Some(code) => self.log(
                    LogKind::Error,
                    format!("Recovery failed (exit code {code})."),
                ),
            },
        }
    }

    /// Log a finished `-d`/`-D`/`-U` run; true on success.
    fn report_one_shot(&mut self, result: Result<OneShotReport, String>, verb: &str) -> bool {
        let report = match result {
            Ok(report) => report,
            Err(err) => {
                self.log(LogKind::Error, err);
                return false;
            }
        };

        self.echo_command_line(&report.command);
        self.log_block(LogKind::Detail, &report.stdout);

        let zip_error = is_zip_error(&report.stdout) || is_zip_error(&report.stderr);
        if report.output_exists && !zip_error {
            self.log(
                LogKind::Success,
                format!("{verb} {}", report.output_path.display()),
            );
            true
        } else if zip_error {
            self.log(
                LogKind::Error,
                format!(
                    "bkcrack reported a zip error: {}",
                    pick_error_text(&report.stderr, &report.stdout)
                ),
            );
            false
        } else {
            self.log(
                LogKind::Error,
                format!(
                    "No output file was written: {}",
                    pick_error_text(&report.stderr, &report.stdout)
                ),
            );
            false
        }
    }

    /// Common inputs of every `-k` based archive operation.
    fn key_operation_inputs(&mut self) -> Option<(PathBuf, String, KeyTriple)> {
        let archive = self.require_encrypted_zip()?;
        let target = self.require_target_entry()?;
        let keys = self.require_keys()?;
        Some((archive, target, keys))
    }

    fn require_keys(&mut self) -> Option<KeyTriple> {
        match self.key_input.trim().parse::<KeyTriple>() {
            Ok(keys) => Some(keys),
            Err(err) => {
                self.log(LogKind::Error, format!("Bad keys: {err}"));
                None
            }
        }
    }

    /// Output folder as an absolute, existing directory.
    fn prepared_output_dir(&mut self) -> Option<PathBuf> {
        let dir = self.config.output_folder();
        if let Err(err) = fs::create_dir_all(&dir) {
            self.log(
                LogKind::Error,
                format!("Could not create {}: {err}", dir.display()),
            );
            return None;
        }
        match std::path::absolute(Path::new(&dir)) {
            Ok(path) => Some(path),
            Err(err) => {
                self.log(LogKind::Error, err.to_string());
                None
            }
        }
    }
}
