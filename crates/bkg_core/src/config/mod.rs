//! Configuration loading, saving, and atomic updates.

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    AttackSettings, ConfigSection, LoggingSettings, PathSettings, Settings, ToolSettings,
};
