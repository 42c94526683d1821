//! Application state and the update/view loop.

use std::path::PathBuf;

use iced::widget::{
    button, checkbox, column, pick_list, row, text, text_input, Column,
};
use iced::{Element, Length, Subscription, Task, Theme};
use tracing_appender::non_blocking::WorkerGuard;

use bkg_core::archive::CompressionChoice;
use bkg_core::bkcrack::{BkcrackCommand, CommandWorker, WorkerEvent};
use bkg_core::config::ConfigManager;

use crate::handlers::helpers::{ArchiveInfoReport, OneShotReport};
use crate::types::{LogKind, LogLine, RunKind};
use crate::widgets::{field_row, log_view::log_view, panel, path_row};

#[derive(Debug, Clone)]
pub enum Message {
    // encrypted archive
    EncryptedChanged(String),
    BrowseEncrypted,
    EncryptedSelected(Option<PathBuf>),
    ShowArchiveInfo,
    ArchiveInfoLoaded(Box<Result<ArchiveInfoReport, String>>),
    TargetSelected(String),

    // plaintext side
    PlainFileChanged(String),
    BrowsePlainFile,
    PlainFileSelected(Option<PathBuf>),
    PlainZipChanged(String),
    BrowsePlainZip,
    PlainZipSelected(Option<PathBuf>),
    PlainEntryChanged(String),
    OffsetChanged(String),

    // attacks
    StartAttack,
    StartHexAttack,
    StartDirectHexAttack,
    StopWorker,
    HexOffsetChanged(String),
    HexPatternChanged(String),
    HexLiteralChanged(String),
    DirectHexPairsChanged(String),
    Worker(u64, WorkerEvent),

    // key operations
    KeysChanged(String),
    DirectExtract,
    ExtractFinished(Result<OneShotReport, String>),
    ExportNoPass,
    ExportFinished(Result<OneShotReport, String>),
    OutputZipChanged(String),
    NewPasswordChanged(String),
    ChangePassword,
    ChangePasswordFinished(Result<OneShotReport, String>),
    PasswordLengthChanged(String),
    RecoverPassword,

    // plaintext archive creation
    PickCompressInputs,
    CompressInputsPicked(Vec<PathBuf>),
    CompressPasswordChanged(String),
    Compress(CompressionChoice),
    CompressFinished(Result<PathBuf, String>),
    UseCompressedAsPlaintext,

    // tools
    HexConvertChanged(String),
    ConvertToHex,
    RouteZipDropsToggled(bool),
    ClearAll,
    FileDropped(PathBuf),
}

pub struct App {
    pub config: ConfigManager,
    _log_guard: Option<WorkerGuard>,

    pub encrypted_zip: String,
    pub target_entries: Vec<String>,
    pub selected_target: Option<String>,

    pub plain_file: String,
    pub plain_zip: String,
    pub plain_entry: String,
    pub offset: String,

    pub hex_offset: String,
    pub hex_pattern: String,
    pub hex_literal: String,
    pub direct_hex_pairs: String,

    pub key_input: String,
    pub password_length: String,
    pub output_zip_name: String,
    pub new_password: String,

    pub files_to_compress: Vec<PathBuf>,
    pub compress_password: String,
    pub compress_output: Option<PathBuf>,

    pub hex_convert_input: String,
    pub route_zip_drops_to_plaintext: bool,

    pub worker: Option<CommandWorker>,
    pub run: Option<RunKind>,
    pub run_seq: u64,
    pub log: Vec<LogLine>,
}

impl App {
    pub fn new(config: ConfigManager, log_guard: Option<WorkerGuard>) -> (Self, Task<Message>) {
        let mut app = Self {
            config,
            _log_guard: log_guard,
            encrypted_zip: String::new(),
            target_entries: Vec::new(),
            selected_target: None,
            plain_file: String::new(),
            plain_zip: String::new(),
            plain_entry: String::new(),
            offset: String::new(),
            hex_offset: String::new(),
            hex_pattern: String::new(),
            hex_literal: String::new(),
            direct_hex_pairs: String::new(),
            key_input: String::new(),
            password_length: String::new(),
            output_zip_name: String::new(),
            new_password: String::new(),
            files_to_compress: Vec::new(),
            compress_password: String::new(),
            compress_output: None,
            hex_convert_input: String::new(),
            route_zip_drops_to_plaintext: false,
            worker: None,
            run: None,
            run_seq: 0,
            log: Vec::new(),
        };
        app.log(
            LogKind::Notice,
            "Drop an encrypted zip here or browse for one to begin.",
        );
        (app, Task::none())
    }

    pub fn title(&self) -> String {
        "bkcrack GUI".to_string()
    }

    pub fn theme(&self) -> Theme {
        Theme::TokyoNight
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::event::listen_with(filter_event)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::EncryptedChanged(value) => {
                self.encrypted_zip = value;
                Task::none()
            }
            Message::BrowseEncrypted => self.handle_browse_encrypted(),
            Message::EncryptedSelected(path) => self.handle_encrypted_selected(path),
            Message::ShowArchiveInfo => self.handle_show_archive_info(),
            Message::ArchiveInfoLoaded(result) => self.handle_archive_info_loaded(*result),
            Message::TargetSelected(entry) => {
                self.selected_target = Some(entry);
                Task::none()
            }

            Message::PlainFileChanged(value) => {
                self.plain_file = value;
                Task::none()
            }
            Message::BrowsePlainFile => self.handle_browse_plain_file(),
            Message::PlainFileSelected(path) => self.handle_plain_file_selected(path),
            Message::PlainZipChanged(value) => {
                self.plain_zip = value;
                Task::none()
            }
            Message::BrowsePlainZip => self.handle_browse_plain_zip(),
            Message::PlainZipSelected(path) => self.handle_plain_zip_selected(path),
            Message::PlainEntryChanged(value) => {
                self.plain_entry = value;
                Task::none()
            }
            Message::OffsetChanged(value) => {
                self.offset = value;
                Task::none()
            }

            Message::StartAttack => self.handle_start_attack(),
            Message::StartHexAttack => self.handle_start_hex_attack(),
            Message::StartDirectHexAttack => self.handle_start_direct_hex_attack(),
            Message::StopWorker => self.handle_stop_worker(),
            Message::HexOffsetChanged(value) => {
                self.hex_offset = value;
                Task::none()
            }
            Message::HexPatternChanged(value) => {
                self.hex_pattern = value;
                Task::none()
            }
            Message::HexLiteralChanged(value) => {
                self.hex_literal = value;
                Task::none()
            }
            Message::DirectHexPairsChanged(value) => {
                self.direct_hex_pairs = value;
                Task::none()
            }
            Message::Worker(id, event) => self.handle_worker_event(id, event),

            Message::KeysChanged(value) => {
                self.key_input = value;
                Task::none()
            }
            Message::DirectExtract => self.handle_direct_extract(),
            Message::ExtractFinished(result) => self.handle_extract_finished(result),
            Message::ExportNoPass => self.handle_export_no_pass(),
            Message::ExportFinished(result) => self.handle_export_finished(result),
            Message::OutputZipChanged(value) => {
                self.output_zip_name = value;
                Task::none()
            }
            Message::NewPasswordChanged(value) => {
                self.new_password = value;
                Task::none()
            }
            Message::ChangePassword => self.handle_change_password(),
            Message::ChangePasswordFinished(result) => {
                self.handle_change_password_finished(result)
            }
            Message::PasswordLengthChanged(value) => {
                self.password_length = value;
                Task::none()
            }
            Message::RecoverPassword => self.handle_recover_password(),

            Message::PickCompressInputs => self.handle_pick_compress_inputs(),
            Message::CompressInputsPicked(files) => self.handle_compress_inputs_picked(files),
            Message::CompressPasswordChanged(value) => {
                self.compress_password = value;
                Task::none()
            }
            Message::Compress(choice) => self.handle_compress(choice),
            Message::CompressFinished(result) => self.handle_compress_finished(result),
            Message::UseCompressedAsPlaintext => self.handle_use_compressed_as_plaintext(),

            Message::HexConvertChanged(value) => {
                self.hex_convert_input = value;
                Task::none()
            }
            Message::ConvertToHex => self.handle_convert_to_hex(),
            Message::RouteZipDropsToggled(value) => {
                self.route_zip_drops_to_plaintext = value;
                Task::none()
            }
            Message::ClearAll => self.handle_clear_all(),
            Message::FileDropped(path) => self.handle_file_dropped(path),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let left = Column::new()
            .push(self.ciphertext_panel())
            .push(self.plaintext_panel())
            .push(self.attack_panel())
            .push(self.keys_panel())
            .push(self.compress_panel())
            .push(self.tools_panel())
            .spacing(10)
            .width(Length::Fill);

        row![
            iced::widget::scrollable(left).width(Length::FillPortion(3)),
            iced::widget::container(
                log_view(&self.log, self.config.settings().logging.autoscroll)
            )
            .width(Length::FillPortion(2))
            .height(Length::Fill),
        ]
        .spacing(10)
        .padding(10)
        .into()
    }

    fn ciphertext_panel(&self) -> Element<'_, Message> {
        let idle = self.worker.is_none();

        let picker = row![
            text("Target entry (-c)").size(13).width(Length::Fixed(130.0)),
            pick_list(
                &self.target_entries[..],
                self.selected_target.clone(),
                Message::TargetSelected,
            )
            .placeholder("entry inside the archive")
            .text_size(13)
            .width(Length::Fill),
            button(text("Info").size(13)).on_press_maybe(idle.then_some(Message::ShowArchiveInfo)),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center);

        panel(
            "Encrypted archive (-C)",
            column![
                path_row(
                    "Archive",
                    "path to the encrypted zip",
                    &self.encrypted_zip,
                    Message::EncryptedChanged,
                    Message::BrowseEncrypted,
                ),
                picker,
            ]
            .spacing(8),
        )
    }

    fn plaintext_panel(&self) -> Element<'_, Message> {
        panel(
            "Known plaintext (-p / -P)",
            column![
                path_row(
                    "Plaintext file",
                    "file whose bytes are known",
                    &self.plain_file,
                    Message::PlainFileChanged,
                    Message::BrowsePlainFile,
                ),
                path_row(
                    "Plaintext archive",
                    "zip holding the plaintext entry",
                    &self.plain_zip,
                    Message::PlainZipChanged,
                    Message::BrowsePlainZip,
                ),
                field_row(
                    "Plaintext entry",
                    "entry name inside the plaintext archive",
                    &self.plain_entry,
                    Message::PlainEntryChanged,
                ),
                field_row(
                    "Offset (-o)",
                    "offset of the plaintext in the target",
                    &self.offset,
                    Message::OffsetChanged,
                ),
            ]
            .spacing(8),
        )
    }

    fn attack_panel(&self) -> Element<'_, Message> {
        let idle = self.worker.is_none();

        panel(
            "Attack",
            column![
                row![
                    button(text("Start attack").size(13))
                        .on_press_maybe(idle.then_some(Message::StartAttack)),
                    button(text("Stop").size(13))
                        .on_press_maybe((!idle).then_some(Message::StopWorker)),
                ]
                .spacing(8),
                field_row(
                    "Literal plaintext",
                    "typed plaintext, written to a temp file",
                    &self.hex_literal,
                    Message::HexLiteralChanged,
                ),
                field_row(
                    "Hex offset (-x)",
                    "0",
                    &self.hex_offset,
                    Message::HexOffsetChanged,
                ),
                field_row(
                    "Hex pattern",
                    "e.g. 504B0304",
                    &self.hex_pattern,
                    Message::HexPatternChanged,
                ),
                row![
                    button(text("Hex attack").size(13))
                        .on_press_maybe(idle.then_some(Message::StartHexAttack)),
                ]
                .spacing(8),
                field_row(
                    "Direct -x pairs",
                    "offset:hex;offset:hex, e.g. 172:504B0506;180:00000100",
                    &self.direct_hex_pairs,
                    Message::DirectHexPairsChanged,
                ),
                row![
                    button(text("Direct hex attack").size(13))
                        .on_press_maybe(idle.then_some(Message::StartDirectHexAttack)),
                ]
                .spacing(8),
            ]
            .spacing(8),
        )
    }

    fn keys_panel(&self) -> Element<'_, Message> {
        let idle = self.worker.is_none();

        panel(
            "Keys (-k)",
            column![
                field_row(
                    "Keys",
                    "x y z, e.g. cafebabe deadbeef 0badf00d",
                    &self.key_input,
                    Message::KeysChanged,
                ),
                row![
                    button(text("Decipher entry").size(13))
                        .on_press_maybe(idle.then_some(Message::DirectExtract)),
                    button(text("Export without password").size(13))
                        .on_press_maybe(idle.then_some(Message::ExportNoPass)),
                ]
                .spacing(8),
                field_row(
                    "Output zip (-U)",
                    "name for the re-encrypted archive",
                    &self.output_zip_name,
                    Message::OutputZipChanged,
                ),
                field_row(
                    "New password",
                    "password for the re-encrypted archive",
                    &self.new_password,
                    Message::NewPasswordChanged,
                ),
                row![
                    button(text("Change password").size(13))
                        .on_press_maybe(idle.then_some(Message::ChangePassword)),
                ]
                .spacing(8),
                field_row(
                    "Password length (-r)",
                    "e.g. 9 or 6..10",
                    &self.password_length,
                    Message::PasswordLengthChanged,
                ),
                row![
                    button(text("Recover password").size(13))
                        .on_press_maybe(idle.then_some(Message::RecoverPassword)),
                ]
                .spacing(8),
            ]
            .spacing(8),
        )
    }

    fn compress_panel(&self) -> Element<'_, Message> {
        let selected = if self.files_to_compress.is_empty() {
            "no files selected".to_string()
        } else {
            format!("{} file(s) selected", self.files_to_compress.len())
        };
        let created = self
            .compress_output
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "nothing created yet".to_string());

        panel(
            "Create plaintext archive (-P)",
            column![
                row![
                    button(text("Select files...").size(13)).on_press(Message::PickCompressInputs),
                    text(selected).size(13),
                ]
                .spacing(8)
                .align_y(iced::Alignment::Center),
                field_row(
                    "Password",
                    "optional ZipCrypto password",
                    &self.compress_password,
                    Message::CompressPasswordChanged,
                ),
                row![
                    button(text("Compress (store)").size(13))
                        .on_press(Message::Compress(CompressionChoice::Store)),
                    button(text("Compress (deflate)").size(13))
                        .on_press(Message::Compress(CompressionChoice::Deflate)),
                    button(text("Use as plaintext").size(13))
                        .on_press(Message::UseCompressedAsPlaintext),
                ]
                .spacing(8),
                text(created).size(12),
            ]
            .spacing(8),
        )
    }

    fn tools_panel(&self) -> Element<'_, Message> {
        panel(
            "Tools",
            column![
                row![
                    text_input("text to convert to hex", &self.hex_convert_input)
                        .on_input(Message::HexConvertChanged)
                        .size(13),
                    button(text("To hex").size(13)).on_press(Message::ConvertToHex),
                ]
                .spacing(8)
                .align_y(iced::Alignment::Center),
                checkbox(
                    "Dropped zips go to the plaintext side",
                    self.route_zip_drops_to_plaintext,
                )
                .on_toggle(Message::RouteZipDropsToggled)
                .size(16)
                .text_size(13),
                row![button(text("Clear all").size(13)).on_press(Message::ClearAll)].spacing(8),
            ]
            .spacing(8),
        )
    }

    // --- log helpers -----------------------------------------------------

    pub fn log(&mut self, kind: LogKind, text: impl Into<String>) {
        self.log.push(LogLine::new(kind, text));
    }

    /// Log a multi-line block one line at a time.
    pub fn log_block(&mut self, kind: LogKind, block: &str) {
        for line in block.lines() {
            if !line.trim().is_empty() {
                self.log.push(LogLine::new(kind, line.to_string()));
            }
        }
    }

    /// Echo a command before it runs.
    pub fn echo_command(&mut self, cmd: &BkcrackCommand) {
        tracing::info!("running {cmd}");
        let line = cmd.to_string();
        self.echo_command_line(&line);
    }

    /// Echo an already-rendered command line.
    pub fn echo_command_line(&mut self, line: &str) {
        if self.config.settings().logging.echo_commands {
            self.log.push(LogLine::new(LogKind::Notice, format!("$ {line}")));
        }
    }

    pub fn bkcrack_program(&self) -> String {
        self.config.settings().tools.bkcrack_path.clone()
    }
}

fn filter_event(
    event: iced::Event,
    _status: iced::event::Status,
    _window: iced::window::Id,
) -> Option<Message> {
    match event {
        iced::Event::Window(iced::window::Event::FileDropped(path)) => {
            Some(Message::FileDropped(path))
        }
        _ => None,
    }
}
