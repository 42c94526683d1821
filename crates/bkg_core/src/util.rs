//! Small text helpers: hex conversion and password reporting.

/// Printable ASCII characters treated as "special" in the password report.
const SPECIAL_CHARS: &str = " !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Encode text as uppercase hex without separators, for `-x` patterns.
pub fn text_to_hex(text: &str) -> String {
    text.bytes().map(|b| format!("{:02X}", b)).collect()
}

/// Render bytes as space-separated lowercase hex pairs.
pub fn format_hex_spaced(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode hex that may contain whitespace between pairs.
///
/// Returns `None` for odd lengths or non-hex characters.
pub fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    let compact: String = hex.split_whitespace().collect();
    // Non-ASCII input can never be hex, and byte slicing below relies on it.
    if !compact.is_ascii() || compact.len() % 2 != 0 {
        return None;
    }

    (0..compact.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&compact[i..i + 2], 16).ok())
        .collect()
}

/// A readable breakdown of a recovered password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReport {
    /// The password with spaces made visible as `[space]`.
    pub display: String,
    /// Every special character bracketed, e.g. `pass[!]word`.
    pub spelled: String,
    /// Space-separated hex of the UTF-8 bytes.
    pub hex: String,
    /// Character count of the actual password.
    pub char_count: usize,
}

/// Break a recovered password down so lookalike characters are obvious.
pub fn analyze_password(password: &str) -> PasswordReport {
    let display = password.replace(' ', "[space]");

    let mut spelled = String::new();
    for c in password.chars() {
        if c == ' ' {
            spelled.push_str("[space]");
        } else if SPECIAL_CHARS.contains(c) {
            spelled.push('[');
            spelled.push(c);
            spelled.push(']');
        } else {
            spelled.push(c);
        }
    }

    PasswordReport {
        display,
        spelled,
        hex: format_hex_spaced(password.as_bytes()),
        char_count: password.chars().count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_to_hex_is_uppercase_and_compact() {
        assert_eq!(text_to_hex("PK\x03\x04"), "504B0304");
        assert_eq!(text_to_hex(""), "");
    }

    #[test]
    fn decode_hex_accepts_spacing() {
        assert_eq!(decode_hex("50 4b 03 04"), Some(vec![0x50, 0x4b, 3, 4]));
        assert_eq!(decode_hex("504B0304"), Some(vec![0x50, 0x4b, 3, 4]));
        assert_eq!(decode_hex("50 4"), None);
        assert_eq!(decode_hex("zz"), None);
    }

    #[test]
    fn decode_hex_rejects_non_ascii() {
        // Pasted text can contain multi-byte characters; must not panic.
        assert_eq!(decode_hex("€€"), None);
        assert_eq!(decode_hex("50 4b €"), None);
    }

    #[test]
    fn hex_round_trip() {
        let bytes = b"pass 1";
        let spaced = format_hex_spaced(bytes);
        assert_eq!(spaced, "70 61 73 73 20 31");
        assert_eq!(decode_hex(&spaced).unwrap(), bytes);
    }

    #[test]
    fn password_report_marks_spaces_and_specials() {
        let report = analyze_password("pa s!");
        assert_eq!(report.display, "pa[space]s!");
        assert_eq!(report.spelled, "pa[space]s[!]");
        assert_eq!(report.char_count, 5);
        assert_eq!(report.hex, "70 61 20 73 21");
    }

    #[test]
    fn plain_password_is_untouched() {
        let report = analyze_password("hunter2");
        assert_eq!(report.display, "hunter2");
        assert_eq!(report.spelled, "hunter2");
        assert_eq!(report.char_count, 7);
    }
}
