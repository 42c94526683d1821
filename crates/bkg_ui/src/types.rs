//! UI-side state types.

use bkg_core::bkcrack::output::PasswordScraper;

/// Color class of one line in the GUI log pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// General progress output (yellow).
    Info,
    /// Secondary detail such as entry listings (cyan).
    Notice,
    /// Successful outcome (green).
    Success,
    /// Failure (red).
    Error,
    /// Caution (orange).
    Warn,
    /// Raw subprocess output (white).
    Detail,
}

/// One line of the GUI log pane.
#[derive(Debug, Clone)]
pub struct LogLine {
    pub kind: LogKind,
    pub text: String,
}

impl LogLine {
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// What the active streaming worker is doing.
///
/// Decides how its output lines are scraped.
#[derive(Debug)]
pub enum RunKind {
    /// A known-plaintext attack; watching for the `Keys:` line.
    Attack { keys_found: bool },
    /// Password recovery (`-r`); accumulating password lines.
    Recover(PasswordScraper),
}
