//! Internal key representation.
//!
//! bkcrack reports the internal state of the PKZIP stream cipher as three
//! 32-bit values printed as hex. Every key-based operation (`-k`) takes the
//! same triple back on the command line.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors from parsing a key triple out of user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("expected 3 key parts, got {0}")]
    WrongPartCount(usize),

    #[error("key part '{0}' is not a hex value")]
    NotHex(String),

    #[error("key part '{0}' is longer than 8 hex digits")]
    TooLong(String),
}

/// The three internal keys (X, Y, Z) of the PKZIP stream cipher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTriple {
    parts: [String; 3],
}

impl KeyTriple {
    /// The keys in command-line order, for splicing after `-k`.
    pub fn as_args(&self) -> [&str; 3] {
        [&self.parts[0], &self.parts[1], &self.parts[2]]
    }
}

impl FromStr for KeyTriple {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(KeyParseError::WrongPartCount(tokens.len()));
        }

        let mut parts: [String; 3] = Default::default();
        for (slot, token) in parts.iter_mut().zip(&tokens) {
            if !token.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(KeyParseError::NotHex(token.to_string()));
            }
            if token.len() > 8 {
                return Err(KeyParseError::TooLong(token.to_string()));
            }
            *slot = token.to_string();
        }

        Ok(Self { parts })
    }
}

impl fmt::Display for KeyTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.parts[0], self.parts[1], self.parts[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_hex_parts() {
        let keys: KeyTriple = "12345678 23456789 34567890".parse().unwrap();
        assert_eq!(keys.as_args(), ["12345678", "23456789", "34567890"]);
        assert_eq!(keys.to_string(), "12345678 23456789 34567890");
    }

    #[test]
    fn tolerates_extra_whitespace() {
        let keys: KeyTriple = "  cafebabe\tdeadbeef  0badf00d ".parse().unwrap();
        assert_eq!(keys.as_args()[2], "0badf00d");
    }

    #[test]
    fn rejects_wrong_count() {
        let err = "cafebabe deadbeef".parse::<KeyTriple>().unwrap_err();
        assert_eq!(err, KeyParseError::WrongPartCount(2));
    }

    #[test]
    fn rejects_non_hex() {
        let err = "cafebabe deadbeef nothexxx".parse::<KeyTriple>().unwrap_err();
        assert!(matches!(err, KeyParseError::NotHex(_)));
    }

    #[test]
    fn rejects_overlong_part() {
        let err = "cafebabe1 deadbeef 0badf00d".parse::<KeyTriple>().unwrap_err();
        assert!(matches!(err, KeyParseError::TooLong(_)));
    }
}
