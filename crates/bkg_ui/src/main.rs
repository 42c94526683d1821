//! GUI front-end for bkcrack's known-plaintext attack on ZipCrypto archives.

mod app;
mod handlers;
mod theme;
mod types;
mod widgets;

use bkg_core::config::ConfigManager;
use bkg_core::logging::{init_tracing, init_tracing_with_file, LogLevel};

use app::App;

const CONFIG_FILE: &str = "bkcrack-gui.toml";

fn main() -> iced::Result {
    let mut config = ConfigManager::new(CONFIG_FILE);
    let config_error = config.load_or_create().err();

    let log_guard = if config.settings().logging.log_to_file {
        Some(init_tracing_with_file(LogLevel::Info, &config.logs_folder()))
    } else {
        init_tracing(LogLevel::Info);
        None
    };

    if let Some(err) = config_error {
        tracing::warn!("config could not be loaded, using defaults: {err}");
    }
    if let Err(err) = config.ensure_dirs_exist() {
        tracing::warn!("could not create configured directories: {err}");
    }
    tracing::info!(
        "starting bkcrack GUI v{} (bkcrack: {})",
        bkg_core::version(),
        config.settings().tools.bkcrack_path
    );

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .window_size((1280.0, 860.0))
        .run_with(move || App::new(config, log_guard))
}
