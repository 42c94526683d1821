//! Subprocess execution for bkcrack commands.
//!
//! Two modes:
//! - streaming: one worker per long-running command, reader threads pushing
//!   decoded stdout/stderr lines into a channel the UI consumes as a stream,
//! - capture: run to completion and hand back the full output.
//!
//! Cancellation is a kill on the child process; readers drain to EOF and the
//! closer thread reports the exit code.

use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;

use tempfile::{NamedTempFile, TempPath};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::command::BkcrackCommand;
use super::types::{BkcrackError, BkcrackResult};

/// Events emitted by a streaming worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    /// One decoded line of subprocess output.
    Line(String),
    /// The process ended; `exit_code` is `None` when killed by a signal.
    Terminated { exit_code: Option<i32> },
}

/// Handle to a running streaming command.
///
/// Dropping the handle does not stop the process; call [`terminate`] for
/// that. A temp plaintext file owned by the worker is removed on drop.
///
/// [`terminate`]: CommandWorker::terminate
pub struct CommandWorker {
    child: Arc<Mutex<Child>>,
    _temp_plaintext: Option<TempPath>,
}

impl CommandWorker {
    /// Kill the child process. The reader threads drain and the channel
    /// still delivers a final [`WorkerEvent::Terminated`].
    pub fn terminate(&self) {
        if let Ok(mut child) = self.child.lock() {
            let _ = child.kill();
        }
    }
}

/// Spawn a command and stream its output line by line.
///
/// `temp_plaintext` transfers ownership of a materialized literal plaintext
/// file so it lives as long as the process needs it.
pub fn spawn_streaming(
    cmd: &BkcrackCommand,
    temp_plaintext: Option<TempPath>,
) -> BkcrackResult<(CommandWorker, UnboundedReceiver<WorkerEvent>)> {
    tracing::debug!("spawning {cmd}");
    let mut child = Command::new(cmd.program())
        .args(cmd.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| BkcrackError::Spawn {
            program: cmd.program().to_string(),
            source,
        })?;

    let (tx, rx) = mpsc::unbounded_channel();

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let child = Arc::new(Mutex::new(child));

    let mut readers = Vec::new();
    if let Some(stdout) = stdout {
        let tx = tx.clone();
        readers.push(thread::spawn(move || read_lines(stdout, &tx)));
    }
    if let Some(stderr) = stderr {
        let tx = tx.clone();
        readers.push(thread::spawn(move || read_lines(stderr, &tx)));
    }

    // Closer thread: both pipes hit EOF once the process is gone, so the
    // wait below returns promptly and never starves terminate() of the lock.
    let closer_child = Arc::clone(&child);
    thread::spawn(move || {
        for reader in readers {
            let _ = reader.join();
        }
        let exit_code = closer_child
            .lock()
            .ok()
            .and_then(|mut c| c.wait().ok())
            .and_then(|status| status.code());
        let _ = tx.send(WorkerEvent::Terminated { exit_code });
    });

    Ok((
        CommandWorker {
            child,
            _temp_plaintext: temp_plaintext,
        },
        rx,
    ))
}

/// Read a pipe to EOF, sending each line lossily decoded and trimmed.
fn read_lines(pipe: impl Read, tx: &UnboundedSender<WorkerEvent>) {
    let mut reader = BufReader::new(pipe);
    let mut bytes = Vec::new();
    loop {
        bytes.clear();
        match reader.read_until(b'\n', &mut bytes) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&bytes);
                let line = line.trim_end_matches(['\n', '\r']).trim();
                if tx.send(WorkerEvent::Line(line.to_string())).is_err() {
                    break;
                }
            }
        }
    }
}

/// Captured output of a one-shot command.
#[derive(Debug, Clone)]
pub struct CaptureOutput {
    /// Process exit code, `None` when killed by a signal.
    pub exit_code: Option<i32>,
    /// Lossily decoded stdout.
    pub stdout: String,
    /// Lossily decoded stderr.
    pub stderr: String,
}

impl CaptureOutput {
    /// True when the process exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run a command to completion and capture its output.
///
/// `cwd` overrides the working directory; bkcrack's `-d` writes relative to
/// it, which direct extraction relies on.
pub fn run_capture(cmd: &BkcrackCommand, cwd: Option<&Path>) -> BkcrackResult<CaptureOutput> {
    tracing::debug!("running {cmd}");
    let mut command = Command::new(cmd.program());
    command.args(cmd.args()).stdin(Stdio::null());
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command.output().map_err(|source| BkcrackError::Spawn {
        program: cmd.program().to_string(),
        source,
    })?;

    Ok(CaptureOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Write literal plaintext typed in the UI to a temp file for `-p`.
///
/// The returned path deletes the file on drop; hand it to the worker that
/// runs the command so it outlives the subprocess.
pub fn materialize_literal(content: &str) -> std::io::Result<TempPath> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file.into_temp_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_failure_reports_program_name() {
        let cmd = BkcrackCommand::new("definitely-not-a-real-binary-bkg");
        let err = run_capture(&cmd, None).unwrap_err();
        match err {
            BkcrackError::Spawn { program, .. } => {
                assert_eq!(program, "definitely-not-a-real-binary-bkg");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn capture_collects_stdout_and_exit_code() {
        // `true` is argv-compatible with an empty BkcrackCommand.
        let cmd = BkcrackCommand::new("true");
        let output = run_capture(&cmd, None).unwrap();
        assert!(output.success());
        assert!(output.stdout.is_empty());
    }

    #[test]
    fn streaming_delivers_terminated_event() {
        let cmd = BkcrackCommand::new("true");
        let (_worker, mut rx) = spawn_streaming(&cmd, None).unwrap();

        let mut terminated = None;
        while let Some(event) = rx.blocking_recv() {
            if let WorkerEvent::Terminated { exit_code } = event {
                terminated = Some(exit_code);
            }
        }
        assert_eq!(terminated, Some(Some(0)));
    }

    #[test]
    fn materialized_literal_is_removed_on_drop() {
        let temp = materialize_literal("PK\x03\x04").unwrap();
        let path = temp.to_path_buf();
        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"PK\x03\x04");
        drop(temp);
        assert!(!path.exists());
    }
}
