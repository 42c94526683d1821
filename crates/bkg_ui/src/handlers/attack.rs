//! Attack launch, streamed output handling and key capture.

use std::path::PathBuf;

use iced::Task;
use tempfile::TempPath;
use tokio::sync::mpsc::UnboundedReceiver;

use bkg_core::archive::find_entry_ignore_case;
use bkg_core::bkcrack::output::scrape_keys;
use bkg_core::bkcrack::{materialize_literal, spawn_streaming, BkcrackCommand, WorkerEvent};
use bkg_core::models::PlaintextSource;
use bkg_core::util::decode_hex;

use crate::app::{App, Message};
use crate::types::{LogKind, RunKind};

impl App {
    pub fn handle_start_attack(&mut self) -> Task<Message> {
        if self.reject_when_busy() {
            return Task::none();
        }
        let Some(archive) = self.require_encrypted_zip() else {
            return Task::none();
        };
        let Some(target) = self.require_target_entry() else {
            return Task::none();
        };
        let Some(target) = self.resolve_target(&archive, &target) else {
            return Task::none();
        };

        let plain_zip = self.plain_zip.trim().to_string();
        let plain_file = self.plain_file.trim().to_string();
        let plain_entry = self.plain_entry.trim().to_string();

        // A plaintext archive wins over a standalone file.
        let source = if !plain_zip.is_empty() {
            let path = PathBuf::from(&plain_zip);
            if !path.exists() {
                self.log(LogKind::Error, format!("File not found: {plain_zip}"));
                return Task::none();
            }
            PlaintextSource::Archive {
                path,
                entry: (!plain_entry.is_empty()).then_some(plain_entry),
            }
        } else if !plain_file.is_empty() {
            let path = PathBuf::from(&plain_file);
            if !path.exists() {
                self.log(LogKind::Error, format!("File not found: {plain_file}"));
                return Task::none();
            }
            PlaintextSource::File(path)
        } else {
            self.log(
                LogKind::Error,
                "Provide a plaintext file or a plaintext archive.",
            );
            return Task::none();
        };

        let mut cmd = BkcrackCommand::new(self.bkcrack_program())
            .ciphertext_archive(&archive)
            .ciphertext_entry(&target)
            .plaintext_from(&source, None);

        let offset = self.offset.trim().to_string();
        if !offset.is_empty() {
            cmd = cmd.data_offset(&offset);
        }

        self.log(LogKind::Info, format!("Attacking {target}"));
        self.start_streaming(cmd, None, RunKind::Attack { keys_found: false })
    }

    /// Attack with a typed literal plaintext and/or one `-x` pair.
    pub fn handle_start_hex_attack(&mut self) -> Task<Message> {
        if self.reject_when_busy() {
            return Task::none();
        }
        let Some(archive) = self.require_encrypted_zip() else {
            return Task::none();
        };
        let Some(target) = self.require_target_entry() else {
            return Task::none();
        };
        let Some(target) = self.resolve_target(&archive, &target) else {
            return Task::none();
        };

        let literal = self.hex_literal.trim().to_string();
        let pattern: String = self.hex_pattern.split_whitespace().collect();
        if literal.is_empty() && pattern.is_empty() {
            self.log(
                LogKind::Error,
                "Provide literal plaintext or a hex pattern.",
            );
            return Task::none();
        }
        if !pattern.is_empty() && decode_hex(&pattern).is_none() {
            self.log(LogKind::Error, format!("Not valid hex: {pattern}"));
            return Task::none();
        }

        let mut cmd = BkcrackCommand::new(self.bkcrack_program())
            .ciphertext_archive(&archive)
            .ciphertext_entry(&target);

        let mut temp = None;
        if !literal.is_empty() {
            match materialize_literal(&literal) {
                Ok(path) => {
                    cmd = cmd.plaintext(&path.to_string_lossy());
                    temp = Some(path);
                }
                Err(err) => {
                    self.log(
                        LogKind::Error,
                        format!("Could not write temp plaintext: {err}"),
                    );
                    return Task::none();
                }
            }
        }
        if !pattern.is_empty() {
            let offset = self.hex_offset.trim();
            let offset = if offset.is_empty() { "0" } else { offset };
            cmd = cmd.extra_plaintext(offset, &pattern);
        }

        self.log(LogKind::Info, format!("Hex attack on {target}"));
        self.start_streaming(cmd, temp, RunKind::Attack { keys_found: false })
    }

    /// Attack from `-x` pairs only, given as `offset:hex` separated by `;`.
    pub fn handle_start_direct_hex_attack(&mut self) -> Task<Message> {
        if self.reject_when_busy() {
            return Task::none();
        }
        let Some(archive) = self.require_encrypted_zip() else {
            return Task::none();
        };
        let Some(target) = self.require_target_entry() else {
            return Task::none();
        };
        let Some(target) = self.resolve_target(&archive, &target) else {
            return Task::none();
        };

        let pairs = match parse_hex_pairs(&self.direct_hex_pairs) {
            Ok(pairs) if !pairs.is_empty() => pairs,
            Ok(_) => {
                self.log(
                    LogKind::Error,
                    "Enter offset:hex pairs separated by ';', e.g. 172:504B0506;180:00000100",
                );
                return Task::none();
            }
            Err(err) => {
                self.log(LogKind::Error, err);
                return Task::none();
            }
        };

        let mut cmd = BkcrackCommand::new(self.bkcrack_program())
            .ciphertext_archive(&archive)
            .ciphertext_entry(&target);
        for (offset, hex) in &pairs {
            cmd = cmd.extra_plaintext(offset, hex);
        }

        self.log(
            LogKind::Info,
            format!("Direct hex attack on {target} with {} pair(s)", pairs.len()),
        );
        self.start_streaming(cmd, None, RunKind::Attack { keys_found: false })
    }

    pub fn handle_stop_worker(&mut self) -> Task<Message> {
        if let Some(worker) = &self.worker {
            worker.terminate();
            self.log(LogKind::Warn, "Stop requested.");
        }
        Task::none()
    }

    pub fn handle_worker_event(&mut self, run_id: u64, event: WorkerEvent) -> Task<Message> {
        // Events from a run that was cleared or replaced are stale.
        if run_id != self.run_seq {
            return Task::none();
        }
        match event {
            WorkerEvent::Line(line) => {
                if !line.is_empty() {
                    self.log(LogKind::Detail, line.clone());
                }
                let captured = match &mut self.run {
                    Some(RunKind::Attack { keys_found }) if !*keys_found => {
                        match scrape_keys(&line) {
                            Some(keys) => {
                                *keys_found = true;
                                Some(keys)
                            }
                            None => None,
                        }
                    }
                    Some(RunKind::Recover(scraper)) => {
                        scraper.observe(&line);
                        None
                    }
                    _ => None,
                };
                if let Some(keys) = captured {
                    self.key_input = keys.clone();
                    self.log(LogKind::Success, format!("Keys captured: {keys}"));
                    self.log(
                        LogKind::Notice,
                        "Use them to decipher, export or recover the password.",
                    );
                    // No need to let the search run on.
                    if let Some(worker) = &self.worker {
                        worker.terminate();
                    }
                }
                Task::none()
            }
            WorkerEvent::Terminated { exit_code } => {
                self.worker = None;
                match self.run.take() {
                    Some(RunKind::Attack { keys_found: true }) => {}
                    Some(RunKind::Attack { keys_found: false }) => match exit_code {
                        Some(0) => self.log(
                            LogKind::Warn,
                            "Attack finished without printing keys.",
                        ),
                        Some(code) => self
                            .log(LogKind::Error, format!("Attack failed (exit code {code}).")),
                        None => self.log(LogKind::Warn, "Attack stopped."),
                    },
                    Some(RunKind::Recover(scraper)) => self.finish_recovery(scraper, exit_code),
                    None => {}
                }
                Task::none()
            }
        }
    }

    /// Spawn a streaming command and route its events into the update loop.
    pub fn start_streaming(
        &mut self,
        cmd: BkcrackCommand,
        temp_plaintext: Option<TempPath>,
        run: RunKind,
    ) -> Task<Message> {
        self.echo_command(&cmd);
        match spawn_streaming(&cmd, temp_plaintext) {
            Ok((worker, rx)) => {
                self.worker = Some(worker);
                self.run = Some(run);
                self.run_seq += 1;
                stream_events(rx, self.run_seq)
            }
            Err(err) => {
                self.log(LogKind::Error, err.to_string());
                Task::none()
            }
        }
    }

    /// Resolve the exact entry spelling bkcrack will find.
    fn resolve_target(&mut self, archive: &std::path::Path, target: &str) -> Option<String> {
        match find_entry_ignore_case(archive, target) {
            Ok(Some(actual)) => {
                if actual != target {
                    self.log(
                        LogKind::Notice,
                        format!("Entry resolved to archive spelling {actual}"),
                    );
                }
                Some(actual)
            }
            Ok(None) => {
                self.log(
                    LogKind::Error,
                    format!("Entry {target} not found in the archive."),
                );
                None
            }
            Err(err) => {
                self.log(LogKind::Error, err.to_string());
                None
            }
        }
    }

    fn reject_when_busy(&mut self) -> bool {
        if self.worker.is_some() {
            self.log(LogKind::Warn, "A command is already running.");
            true
        } else {
            false
        }
    }
}

fn stream_events(rx: UnboundedReceiver<WorkerEvent>, run_id: u64) -> Task<Message> {
    let stream = futures_util::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|event| (event, rx))
    });
    Task::run(stream, move |event| Message::Worker(run_id, event))
}

/// Parse `offset:hex` pairs separated by `;`.
fn parse_hex_pairs(input: &str) -> Result<Vec<(String, String)>, String> {
    let mut pairs = Vec::new();
    for segment in input.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (offset, hex) = segment
            .split_once(':')
            .ok_or_else(|| format!("Expected offset:hex, got {segment}"))?;
        let offset = offset.trim();
        // Negative offsets count from the end of the entry.
        if offset.parse::<i64>().is_err() {
            return Err(format!("Not a valid offset: {offset}"));
        }
        let hex: String = hex.split_whitespace().collect();
        if decode_hex(&hex).is_none() {
            return Err(format!("Not valid hex: {hex}"));
        }
        pairs.push((offset.to_string(), hex));
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::parse_hex_pairs;

    #[test]
    fn parses_multiple_pairs() {
        let pairs = parse_hex_pairs("172:504B0506; 180:00 00 01 00;").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("172".to_string(), "504B0506".to_string()),
                ("180".to_string(), "00000100".to_string()),
            ]
        );
    }

    #[test]
    fn accepts_negative_offsets() {
        let pairs = parse_hex_pairs("-22:504B0506").unwrap();
        assert_eq!(pairs[0].0, "-22");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_hex_pairs("nonsense").is_err());
        assert!(parse_hex_pairs("12:zz").is_err());
        assert!(parse_hex_pairs("x:504B").is_err());
        assert!(parse_hex_pairs(" ; ").unwrap().is_empty());
    }
}
