//! bkg_core - Backend logic for bkcrack GUI
//!
//! This crate contains all business logic with zero UI dependencies:
//! bkcrack command assembly and execution, output scraping, ZIP
//! introspection, and configuration. It can be used by the GUI
//! application or a CLI tool.

pub mod archive;
pub mod bkcrack;
pub mod config;
pub mod logging;
pub mod models;
pub mod util;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
