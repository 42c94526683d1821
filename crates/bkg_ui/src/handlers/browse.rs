//! File dialog handlers.

use std::path::{Path, PathBuf};

use iced::Task;

use bkg_core::config::ConfigSection;

use crate::app::{App, Message};
use crate::types::LogKind;

impl App {
    pub fn handle_browse_encrypted(&self) -> Task<Message> {
        let dir = self.start_dir();
        Task::perform(
            pick_zip("Select encrypted archive", dir),
            Message::EncryptedSelected,
        )
    }

    pub fn handle_encrypted_selected(&mut self, path: Option<PathBuf>) -> Task<Message> {
        if let Some(path) = path {
            self.remember_dir(&path);
            self.encrypted_zip = path.to_string_lossy().into_owned();
            self.log(
                LogKind::Info,
                format!("Encrypted archive: {}", self.encrypted_zip),
            );
            self.refresh_target_entries();
        }
        Task::none()
    }

    pub fn handle_browse_plain_file(&self) -> Task<Message> {
        let dir = self.start_dir();
        Task::perform(
            async move {
                let mut dialog =
                    rfd::AsyncFileDialog::new().set_title("Select known plaintext file");
                if let Some(dir) = dir {
                    dialog = dialog.set_directory(dir);
                }
                dialog
                    .pick_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            Message::PlainFileSelected,
        )
    }

    pub fn handle_plain_file_selected(&mut self, path: Option<PathBuf>) -> Task<Message> {
        if let Some(path) = path {
            self.remember_dir(&path);
            self.plain_file = path.to_string_lossy().into_owned();
            self.log(LogKind::Info, format!("Plaintext file: {}", self.plain_file));
            let name = path.to_string_lossy().into_owned();
            self.autofill_offset(&name);
        }
        Task::none()
    }

    pub fn handle_browse_plain_zip(&self) -> Task<Message> {
        let dir = self.start_dir();
        Task::perform(
            pick_zip("Select plaintext archive", dir),
            Message::PlainZipSelected,
        )
    }

    pub fn handle_plain_zip_selected(&mut self, path: Option<PathBuf>) -> Task<Message> {
        if let Some(path) = path {
            self.remember_dir(&path);
            self.adopt_plain_zip(path);
        }
        Task::none()
    }

    pub fn handle_pick_compress_inputs(&self) -> Task<Message> {
        let dir = self.start_dir();
        Task::perform(
            async move {
                let mut dialog =
                    rfd::AsyncFileDialog::new().set_title("Select files to compress");
                if let Some(dir) = dir {
                    dialog = dialog.set_directory(dir);
                }
                match dialog.pick_files().await {
                    Some(handles) => handles
                        .into_iter()
                        .map(|handle| handle.path().to_path_buf())
                        .collect(),
                    None => Vec::new(),
                }
            },
            Message::CompressInputsPicked,
        )
    }

    /// Directory the next file dialog opens in.
    pub fn start_dir(&self) -> Option<PathBuf> {
        let dir = &self.config.settings().paths.last_open_dir;
        if dir.is_empty() {
            None
        } else {
            Some(PathBuf::from(dir))
        }
    }

    /// Persist the parent of a picked path as the next dialog start dir.
    pub fn remember_dir(&mut self, path: &Path) {
        let Some(parent) = path.parent() else {
            return;
        };
        self.config.settings_mut().paths.last_open_dir =
            parent.to_string_lossy().into_owned();
        if let Err(err) = self.config.update_section(ConfigSection::Paths) {
            tracing::warn!("could not persist last open dir: {err}");
        }
    }
}

async fn pick_zip(title: &str, dir: Option<PathBuf>) -> Option<PathBuf> {
    let mut dialog = rfd::AsyncFileDialog::new()
        .set_title(title)
        .add_filter("Zip archives", &["zip"])
        .add_filter("All files", &["*"]);
    if let Some(dir) = dir {
        dialog = dialog.set_directory(dir);
    }
    dialog
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}
