//! Known plaintext offsets by file type.
//!
//! Common formats have a fixed-position header usable as known plaintext.
//! The table maps extensions (and `_plain`-suffixed stems of pre-extracted
//! header files) to the offset where that plaintext sits in the target.

/// Extension / keyword to plaintext offset.
const EXTENSION_OFFSETS: &[(&str, u64)] = &[
    ("png", 0),
    ("exe", 64),
    ("xml", 0),
    ("pcapng", 6),
    ("svg", 0),
    ("vmdk", 0),
    ("png_plain", 0),
    ("exe_plain", 64),
    ("xml_plain", 0),
    ("pcapng_plain", 6),
    ("svg_plain", 0),
    ("jpg_plain", 0),
];

/// Which rule produced an offset match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetRule {
    /// Matched a `_plain`-suffixed stem (e.g. `png_plain.bin`).
    PlainSuffix,
    /// Matched the file extension directly.
    Extension,
    /// Matched a table keyword somewhere in the file name.
    Keyword(&'static str),
}

/// A resolved plaintext offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetMatch {
    pub offset: u64,
    pub rule: OffsetRule,
}

/// Resolve the plaintext offset for a file name or path.
///
/// Three steps, first hit wins: `_plain` combined stem, plain extension,
/// keyword anywhere in the name.
pub fn auto_offset(name: &str) -> Option<OffsetMatch> {
    let file_name = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .to_lowercase();

    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem, ext),
        None => (file_name.as_str(), ""),
    };

    // Pre-extracted header files named like `png_plain.bin`.
    if stem.contains("_plain") {
        let main_ext = stem.split("_plain").next().unwrap_or("");
        let combined = format!("{}_plain", main_ext);
        if let Some(offset) = lookup(&combined) {
            return Some(OffsetMatch {
                offset,
                rule: OffsetRule::PlainSuffix,
            });
        }
    }

    if let Some(offset) = lookup(extension) {
        return Some(OffsetMatch {
            offset,
            rule: OffsetRule::Extension,
        });
    }

    for (keyword, offset) in EXTENSION_OFFSETS {
        if file_name.contains(keyword) {
            return Some(OffsetMatch {
                offset: *offset,
                rule: OffsetRule::Keyword(keyword),
            });
        }
    }

    None
}

fn lookup(key: &str) -> Option<u64> {
    EXTENSION_OFFSETS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, offset)| *offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_plain_extension() {
        let hit = auto_offset("/data/captures/dump.pcapng").unwrap();
        assert_eq!(hit.offset, 6);
        assert_eq!(hit.rule, OffsetRule::Extension);
    }

    #[test]
    fn exe_header_offset() {
        let hit = auto_offset("setup.exe").unwrap();
        assert_eq!(hit.offset, 64);
    }

    #[test]
    fn matches_plain_suffixed_stem() {
        let hit = auto_offset("exe_plain.bin").unwrap();
        assert_eq!(hit.offset, 64);
        assert_eq!(hit.rule, OffsetRule::PlainSuffix);
    }

    #[test]
    fn falls_back_to_keyword_in_name() {
        let hit = auto_offset("my-png-header.dat").unwrap();
        assert_eq!(hit.offset, 0);
        assert_eq!(hit.rule, OffsetRule::Keyword("png"));
    }

    #[test]
    fn unknown_names_have_no_offset() {
        assert_eq!(auto_offset("notes.txt"), None);
        assert_eq!(auto_offset(""), None);
    }

    #[test]
    fn case_insensitive() {
        let hit = auto_offset("FLAG.PNG").unwrap();
        assert_eq!(hit.rule, OffsetRule::Extension);
    }
}
