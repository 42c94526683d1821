//! bkcrack command-line assembly.
//!
//! The builder covers the flag surface the GUI drives:
//! `-C -c -p -P -x -o -k -d -D -U -r -L`.

use std::fmt;
use std::path::Path;

use crate::models::{KeyTriple, PlaintextSource};

/// Builder for a single bkcrack invocation.
#[derive(Debug, Clone)]
pub struct BkcrackCommand {
    program: String,
    args: Vec<String>,
}

impl BkcrackCommand {
    /// Start a command for the given executable name or path.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// `-L <archive>`: list the entries of a zip archive.
    pub fn list(mut self, archive: &Path) -> Self {
        self.push_flag("-L", archive.to_string_lossy());
        self
    }

    /// `-C <archive>`: the encrypted zip archive.
    pub fn ciphertext_archive(mut self, archive: &Path) -> Self {
        self.push_flag("-C", archive.to_string_lossy());
        self
    }

    /// `-c <entry>`: the target entry inside the encrypted archive.
    pub fn ciphertext_entry(mut self, entry: &str) -> Self {
        self.push_flag("-c", entry);
        self
    }

    /// `-p <value>`: plaintext file path, or entry name when `-P` is present.
    pub fn plaintext(mut self, value: &str) -> Self {
        self.push_flag("-p", value);
        self
    }

    /// `-P <archive>`: zip archive containing the plaintext entry.
    pub fn plaintext_archive(mut self, archive: &Path) -> Self {
        self.push_flag("-P", archive.to_string_lossy());
        self
    }

    /// Apply a [`PlaintextSource`] with the original priority rules.
    ///
    /// A literal source must already be materialized to a file by the
    /// caller; its path is passed as `literal_path`.
    pub fn plaintext_from(self, source: &PlaintextSource, literal_path: Option<&Path>) -> Self {
        match source {
            PlaintextSource::Archive { path, entry } => {
                let cmd = self.plaintext_archive(path);
                match entry {
                    Some(name) => cmd.plaintext(name),
                    None => cmd,
                }
            }
            PlaintextSource::File(path) => {
                let value = path.to_string_lossy().into_owned();
                self.plaintext(&value)
            }
            PlaintextSource::Literal(_) => match literal_path {
                Some(path) => {
                    let value = path.to_string_lossy().into_owned();
                    self.plaintext(&value)
                }
                None => self,
            },
        }
    }

    /// `-x <offset> <hex>`: additional known plaintext bytes. Repeatable.
    pub fn extra_plaintext(mut self, offset: &str, hex: &str) -> Self {
        self.push_flag("-x", offset);
        self.args.push(hex.to_string());
        self
    }

    /// `-o <offset>`: offset of the known plaintext inside the ciphertext.
    pub fn data_offset(mut self, offset: &str) -> Self {
        self.push_flag("-o", offset);
        self
    }

    /// `-k <x> <y> <z>`: the recovered internal keys.
    pub fn keys(mut self, keys: &KeyTriple) -> Self {
        self.args.push("-k".to_string());
        for part in keys.as_args() {
            self.args.push(part.to_string());
        }
        self
    }

    /// `-d <file>`: decipher the target entry into a file.
    pub fn decipher(mut self, output: &str) -> Self {
        self.push_flag("-d", output);
        self
    }

    /// `-D <archive>`: export a copy of the archive with encryption removed.
    pub fn decrypted_archive(mut self, output: &Path) -> Self {
        self.push_flag("-D", output.to_string_lossy());
        self
    }

    /// `-U <archive> <password>`: export a copy encrypted with a new password.
    pub fn change_password(mut self, output: &Path, new_password: &str) -> Self {
        self.push_flag("-U", output.to_string_lossy());
        self.args.push(new_password.to_string());
        self
    }

    /// `-r <length> <charset>`: brute-force the password from the keys.
    pub fn recover_password(mut self, length_range: &str, charset: &str) -> Self {
        self.push_flag("-r", length_range);
        self.args.push(charset.to_string());
        self
    }

    /// The executable name or path.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The assembled argument list.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn push_flag(&mut self, flag: &str, value: impl AsRef<str>) {
        self.args.push(flag.to_string());
        self.args.push(value.as_ref().to_string());
    }
}

impl fmt::Display for BkcrackCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn keys() -> KeyTriple {
        "cafebabe deadbeef 0badf00d".parse().unwrap()
    }

    #[test]
    fn list_command() {
        let cmd = BkcrackCommand::new("bkcrack").list(Path::new("secret.zip"));
        assert_eq!(cmd.args(), &["-L", "secret.zip"]);
    }

    #[test]
    fn attack_with_plaintext_file() {
        let cmd = BkcrackCommand::new("bkcrack")
            .ciphertext_archive(Path::new("secret.zip"))
            .ciphertext_entry("flag.png")
            .plaintext_from(&PlaintextSource::File(PathBuf::from("header.png")), None)
            .data_offset("0");
        assert_eq!(
            cmd.args(),
            &["-C", "secret.zip", "-c", "flag.png", "-p", "header.png", "-o", "0"]
        );
    }

    #[test]
    fn attack_with_plaintext_archive_and_entry() {
        let source = PlaintextSource::Archive {
            path: PathBuf::from("plain.zip"),
            entry: Some("readme.txt".to_string()),
        };
        let cmd = BkcrackCommand::new("bkcrack")
            .ciphertext_archive(Path::new("secret.zip"))
            .ciphertext_entry("readme.txt")
            .plaintext_from(&source, None);
        assert_eq!(
            cmd.args(),
            &["-C", "secret.zip", "-c", "readme.txt", "-P", "plain.zip", "-p", "readme.txt"]
        );
    }

    #[test]
    fn literal_plaintext_uses_materialized_path() {
        let source = PlaintextSource::Literal("PK".to_string());
        let cmd = BkcrackCommand::new("bkcrack")
            .plaintext_from(&source, Some(Path::new("/tmp/literal.bin")));
        assert_eq!(cmd.args(), &["-p", "/tmp/literal.bin"]);
    }

    #[test]
    fn repeated_extra_plaintext() {
        let cmd = BkcrackCommand::new("bkcrack")
            .ciphertext_archive(Path::new("attachment.zip"))
            .ciphertext_entry("flag.zip")
            .extra_plaintext("172", "504B0506")
            .extra_plaintext("180", "00000100");
        assert_eq!(
            cmd.args(),
            &[
                "-C", "attachment.zip", "-c", "flag.zip", "-x", "172", "504B0506", "-x", "180",
                "00000100"
            ]
        );
    }

    #[test]
    fn key_based_operations() {
        let cmd = BkcrackCommand::new("bkcrack")
            .ciphertext_archive(Path::new("secret.zip"))
            .ciphertext_entry("flag.png")
            .keys(&keys())
            .decrypted_archive(Path::new("secret_NO_PASS.zip"));
        assert_eq!(
            cmd.args(),
            &[
                "-C", "secret.zip", "-c", "flag.png", "-k", "cafebabe", "deadbeef", "0badf00d",
                "-D", "secret_NO_PASS.zip"
            ]
        );

        let cmd = BkcrackCommand::new("bkcrack")
            .keys(&keys())
            .recover_password("8..12", "?p");
        assert_eq!(
            cmd.args(),
            &["-k", "cafebabe", "deadbeef", "0badf00d", "-r", "8..12", "?p"]
        );
    }

    #[test]
    fn change_password_command() {
        let cmd = BkcrackCommand::new("bkcrack")
            .ciphertext_archive(Path::new("secret.zip"))
            .ciphertext_entry("flag.png")
            .keys(&keys())
            .change_password(Path::new("rekeyed.zip"), "hunter2");
        assert!(cmd.to_string().ends_with("-U rekeyed.zip hunter2"));
    }

    #[test]
    fn display_echoes_full_command_line() {
        let cmd = BkcrackCommand::new("bkcrack").list(Path::new("a.zip"));
        assert_eq!(cmd.to_string(), "bkcrack -L a.zip");
    }
}
