//! Creator detection from raw central-directory bytes.
//!
//! The "version made by" field of the first central-directory header is two
//! bytes: the high byte names the host OS, the low byte the PKZIP spec
//! version the creating tool claimed. Well-known tools pin recognizable
//! values, which is often enough to guess what produced an archive.

use std::fmt;
use std::fs;
use std::path::Path;

use super::types::{ArchiveError, ArchiveResult};

/// Central directory header signature.
const CENTRAL_DIR_SIG: &[u8] = &[0x50, 0x4B, 0x01, 0x02];

/// ZIP64 end-of-central-directory signature.
const ZIP64_EOCD_SIG: &[u8] = &[0x50, 0x4B, 0x06, 0x06];

/// What the central directory says about the creating tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatorInfo {
    /// Raw "version made by" value.
    pub version_raw: u16,
    /// High byte: host OS identifier.
    pub os_id: u8,
    /// Low byte: PKZIP spec version.
    pub version_number: u8,
    /// Whether a ZIP64 end-of-central-directory record is present.
    pub zip64: bool,
}

impl CreatorInfo {
    /// Host OS name for the high byte.
    pub fn os_name(&self) -> String {
        let name = match self.os_id {
            0 => "MS-DOS and OS/2",
            1 => "Amiga",
            2 => "OpenVMS",
            3 => "UNIX",
            4 => "VM/CMS",
            5 => "Atari ST",
            6 => "OS/2 HPFS",
            7 => "Macintosh",
            8 => "Z-System",
            9 => "CP/M",
            10 => "Windows NTFS",
            11 => "MVS",
            12 => "VSE",
            13 => "Acorn Risc",
            14 => "VFAT",
            15 => "Alternate MVS",
            16 => "BeOS",
            17 => "Tandem",
            18 => "OS/400",
            19 => "OS/X (Darwin)",
            other => return format!("Unknown OS (0x{:02X})", other),
        };
        name.to_string()
    }

    /// Likely creating software for the low byte.
    pub fn software(&self) -> String {
        let name = match self.version_number {
            10 => "PKZIP 1.0",
            20 => "Bandizip 7.06 / Windows built-in zip",
            21 => "PKZIP 2.0",
            25 => "PKZIP 2.5",
            27 => "PKZIP 2.7",
            31 => "WinRAR 4.20 / WinRAR 5.70",
            45 => "PKZIP 4.5",
            46 => "PKZIP 4.6",
            50 => "PKZIP 5.0",
            62 => "PKZIP 6.2",
            63 => "7-Zip / 360zip",
            other => return format!("Unknown PKZIP version (0x{:02X})", other),
        };
        name.to_string()
    }

    /// `0x001F` shows up on archives produced by simple store-only tools;
    /// those are the easiest attack targets.
    pub fn store_hint(&self) -> bool {
        self.version_raw == 0x001F
    }
}

impl fmt::Display for CreatorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Version Made By: 0x{:04X}", self.version_raw)?;
        writeln!(f, " - Host OS: {}", self.os_name())?;
        writeln!(f, " - Creating software (likely): {}", self.software())?;
        write!(f, " - ZIP64 format: {}", if self.zip64 { "yes" } else { "no" })
    }
}

/// Scan a zip file's raw bytes and report its creator information.
pub fn detect_zip_creator(path: &Path) -> ArchiveResult<CreatorInfo> {
    if !path.exists() {
        return Err(ArchiveError::FileNotFound(path.to_path_buf()));
    }

    let data = fs::read(path)?;
    parse_creator(&data).ok_or_else(|| ArchiveError::NoCentralDirectory(path.to_path_buf()))
}

/// Parse creator information out of raw archive bytes.
fn parse_creator(data: &[u8]) -> Option<CreatorInfo> {
    let index = find(data, CENTRAL_DIR_SIG)?;

    // "Version made by" is the u16 right after the signature.
    let version_bytes = data.get(index + 4..index + 6)?;
    let version_raw = u16::from_le_bytes([version_bytes[0], version_bytes[1]]);

    Some(CreatorInfo {
        version_raw,
        os_id: (version_raw >> 8) as u8,
        version_number: (version_raw & 0xFF) as u8,
        zip64: find(data, ZIP64_EOCD_SIG).is_some(),
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes_with_version(version: u16) -> Vec<u8> {
        let mut data = vec![0u8; 16];
        data.extend_from_slice(CENTRAL_DIR_SIG);
        data.extend_from_slice(&version.to_le_bytes());
        data.extend_from_slice(&[0u8; 8]);
        data
    }

    #[test]
    fn parses_version_made_by() {
        let info = parse_creator(&bytes_with_version(0x031F)).unwrap();
        assert_eq!(info.os_id, 3);
        assert_eq!(info.version_number, 0x1F);
        assert_eq!(info.os_name(), "UNIX");
        assert!(info.software().contains("WinRAR"));
        assert!(!info.zip64);
    }

    #[test]
    fn detects_store_hint() {
        let info = parse_creator(&bytes_with_version(0x001F)).unwrap();
        assert!(info.store_hint());
        assert_eq!(info.os_name(), "MS-DOS and OS/2");
    }

    #[test]
    fn detects_zip64_record() {
        let mut data = bytes_with_version(0x0314);
        data.extend_from_slice(ZIP64_EOCD_SIG);
        let info = parse_creator(&data).unwrap();
        assert!(info.zip64);
        assert_eq!(info.software(), "Bandizip 7.06 / Windows built-in zip");
    }

    #[test]
    fn unknown_values_are_labelled() {
        let info = parse_creator(&bytes_with_version(0xFF99)).unwrap();
        assert!(info.os_name().contains("Unknown OS"));
        assert!(info.software().contains("Unknown PKZIP version"));
    }

    #[test]
    fn missing_central_directory_is_none() {
        assert_eq!(parse_creator(&[0u8; 64]), None);
    }
}
