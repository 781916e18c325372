mod app;
mod config;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use dioxus::logger::tracing::Level;

use crate::app::App;
use crate::config::AppConfig;

fn main() {
    // Configuration errors are rendered by `App`; logging still starts.
    let log_level = AppConfig::from_env()
        .map(|config| config.log_level)
        .unwrap_or(Level::INFO);
    dioxus::logger::init(log_level).expect("logger should initialize once");

    launch();
}

#[cfg(feature = "desktop")]
fn launch() {
    let webview_data_dir = platform::desktop::paths::default_webview_data_dir()
        .expect("should resolve and create webview data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Sheet Viewer"))
                .with_data_directory(webview_data_dir),
        )
        .launch(App);
}

#[cfg(not(feature = "desktop"))]
fn launch() {
    dioxus::launch(App);
}
