//! Scraping of bkcrack's text output.
//!
//! bkcrack's output format is not ours to define; everything here is plain
//! substring matching on the lines it prints, the same markers the original
//! relied on.

use crate::util::decode_hex;

/// Marker bkcrack prints when `-d` starts writing the deciphered entry.
pub const DECIPHER_OK_MARKER: &str = "Writing deciphered data";

/// Marker bkcrack prints on archive-level failures.
pub const ZIP_ERROR_MARKER: &str = "Zip error";

/// Extract the key triple from a `Keys: <x> <y> <z>` line, if present.
pub fn scrape_keys(line: &str) -> Option<String> {
    let idx = line.find("Keys:")?;
    let rest = line[idx + "Keys:".len()..].trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

/// True when the line signals a successful decipher write.
pub fn is_decipher_success(line: &str) -> bool {
    line.contains(DECIPHER_OK_MARKER)
}

/// True when the line signals an archive-level error.
pub fn is_zip_error(line: &str) -> bool {
    line.contains(ZIP_ERROR_MARKER)
}

/// A password recovered through `-r`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredPassword {
    /// The password text.
    pub text: String,
    /// Space-separated hex bytes as printed by bkcrack, when available.
    pub hex: Option<String>,
}

/// Incremental scraper for `-r` output.
///
/// bkcrack prints the recovered password twice (`as bytes:` and `as text:`)
/// plus a bare `Password:` line in some versions. The byte form is
/// authoritative because it survives passwords containing spaces.
#[derive(Debug, Default)]
pub struct PasswordScraper {
    password: Option<String>,
    hex_bytes: Option<String>,
}

impl PasswordScraper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one output line to the scraper.
    pub fn observe(&mut self, line: &str) {
        if let Some((_, value)) = line.split_once("as text:") {
            self.password = Some(value.trim().trim_matches(['"', '\'']).to_string());
        } else if let Some((_, value)) = line.split_once("as bytes:") {
            self.hex_bytes = Some(value.trim().to_string());
        } else if let Some((_, value)) = line.split_once("Password:") {
            if self.password.is_none() {
                self.password = Some(value.trim().to_string());
            }
        }
    }

    /// Consume the scraper once the command has finished.
    ///
    /// Returns `None` when no password line was seen at all.
    pub fn finish(self) -> Option<RecoveredPassword> {
        let mut text = self.password?;

        // Rebuild from the hex bytes when possible; the text form may have
        // been trimmed of significant whitespace.
        if let Some(hex) = &self.hex_bytes {
            if let Some(bytes) = decode_hex(hex) {
                text = String::from_utf8_lossy(&bytes).into_owned();
            }
        }

        Some(RecoveredPassword {
            text,
            hex: self.hex_bytes,
        })
    }
}

/// What a `-L` listing told us about the encrypted entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingSummary {
    /// At least one entry uses the Store method.
    pub store: bool,
    /// At least one entry uses the Deflate method.
    pub deflate: bool,
}

impl ListingSummary {
    /// Neither method was detected.
    pub fn is_empty(&self) -> bool {
        !self.store && !self.deflate
    }
}

/// Scan a full `-L` stdout capture for compression methods.
pub fn scan_listing(stdout: &str) -> ListingSummary {
    ListingSummary {
        store: stdout.contains("Store"),
        deflate: stdout.contains("Deflate"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrapes_keys_line() {
        let line = "[14:03:21] Keys: cafebabe deadbeef 0badf00d";
        assert_eq!(
            scrape_keys(line).as_deref(),
            Some("cafebabe deadbeef 0badf00d")
        );
    }

    #[test]
    fn ignores_unrelated_lines() {
        assert_eq!(scrape_keys("Attack on 1234 Z values"), None);
        assert_eq!(scrape_keys("Keys:"), None);
    }

    #[test]
    fn password_scraper_prefers_byte_form() {
        let mut scraper = PasswordScraper::new();
        scraper.observe("[14:07:33] Password");
        scraper.observe("as bytes: 70 61 73 73 20 31");
        scraper.observe("as text: pass 1");
        let recovered = scraper.finish().unwrap();
        assert_eq!(recovered.text, "pass 1");
        assert_eq!(recovered.hex.as_deref(), Some("70 61 73 73 20 31"));
    }

    #[test]
    fn password_scraper_strips_quotes_from_text_form() {
        let mut scraper = PasswordScraper::new();
        scraper.observe("as text: \"hunter2\"");
        let recovered = scraper.finish().unwrap();
        assert_eq!(recovered.text, "hunter2");
        assert_eq!(recovered.hex, None);
    }

    #[test]
    fn password_scraper_falls_back_to_password_line() {
        let mut scraper = PasswordScraper::new();
        scraper.observe("Password: letmein");
        assert_eq!(scraper.finish().unwrap().text, "letmein");
    }

    #[test]
    fn password_scraper_reports_nothing_without_matches() {
        let mut scraper = PasswordScraper::new();
        scraper.observe("length 9...");
        assert_eq!(scraper.finish(), None);
    }

    #[test]
    fn listing_summary_detects_methods() {
        let stdout = "Archive: secret.zip\n\
                      Index Encryption Compression CRC32    Uncompressed  Packed size Name\n\
                      ----- ---------- ----------- -------- ------------ ------------ ----\n\
                      0     ZipCrypto  Deflate     12345678         1024          512 a.txt\n\
                      1     ZipCrypto  Store       9abcdef0         2048         2060 b.png\n";
        let summary = scan_listing(stdout);
        assert!(summary.store);
        assert!(summary.deflate);
        assert!(!summary.is_empty());
    }

    #[test]
    fn decipher_markers() {
        assert!(is_decipher_success("Writing deciphered data flag.png"));
        assert!(is_zip_error("Zip error: could not find entry"));
        assert!(!is_zip_error("all good"));
    }
}
