//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// External tool configuration.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Attack defaults.
    #[serde(default)]
    pub attack: AttackSettings,
}

/// Path configuration for outputs and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder where deciphered files and exported archives are written.
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Last directory used in a file dialog.
    #[serde(default)]
    pub last_open_dir: String,
}

fn default_output_folder() -> String {
    "cracked_output".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_folder: default_output_folder(),
            logs_folder: default_logs_folder(),
            last_open_dir: String::new(),
        }
    }
}

/// External tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Name or full path of the bkcrack executable.
    #[serde(default = "default_bkcrack_path")]
    pub bkcrack_path: String,
}

fn default_bkcrack_path() -> String {
    "bkcrack".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            bkcrack_path: default_bkcrack_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Auto-scroll the GUI log pane.
    #[serde(default = "default_true")]
    pub autoscroll: bool,

    /// Echo each executed command into the GUI log.
    #[serde(default = "default_true")]
    pub echo_commands: bool,

    /// Also write tracing output to a file in the logs folder.
    #[serde(default)]
    pub log_to_file: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            autoscroll: true,
            echo_commands: true,
            log_to_file: false,
        }
    }
}

/// Attack defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackSettings {
    /// Auto-fill the plaintext offset from the file extension table.
    #[serde(default = "default_true")]
    pub auto_fill_offset: bool,

    /// Charset argument passed to `-r` during password recovery.
    #[serde(default = "default_charset")]
    pub recovery_charset: String,
}

fn default_charset() -> String {
    "?p".to_string()
}

impl Default for AttackSettings {
    fn default() -> Self {
        Self {
            auto_fill_offset: true,
            recovery_charset: default_charset(),
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Paths,
    Tools,
    Logging,
    Attack,
}

impl ConfigSection {
    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Tools => "tools",
            ConfigSection::Logging => "logging",
            ConfigSection::Attack => "attack",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[tools]"));
        assert!(toml.contains("bkcrack_path"));
    }

    #[test]
    fn settings_round_trip() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.tools.bkcrack_path, settings.tools.bkcrack_path);
        assert_eq!(parsed.attack.recovery_charset, "?p");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[tools]\nbkcrack_path = \"/opt/bkcrack/bkcrack\"";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        // Custom value preserved
        assert_eq!(parsed.tools.bkcrack_path, "/opt/bkcrack/bkcrack");
        // Defaults applied for missing
        assert!(parsed.logging.autoscroll);
        assert!(parsed.attack.auto_fill_offset);
    }
}
