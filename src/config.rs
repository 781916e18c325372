use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use dioxus::logger::tracing::Level;

use crate::domain::entities::pagination::DEFAULT_PAGE_SIZE;
use crate::infra::http::routes::DEFAULT_API_URL;

pub const ENV_API_URL: &str = "SHEETVIEW_API_URL";
pub const ENV_BACKEND: &str = "SHEETVIEW_BACKEND";
pub const ENV_PAGE_SIZE: &str = "SHEETVIEW_PAGE_SIZE";
pub const ENV_LOG: &str = "SHEETVIEW_LOG";
pub const ENV_DB_PATH: &str = "SHEETVIEW_DB_PATH";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    /// REST service at `api_base_url`.
    Remote,
    /// In-process SQLite backend (desktop builds only).
    Local,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub backend: BackendMode,
    pub page_size: u64,
    pub log_level: Level,
    pub db_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            backend: BackendMode::Remote,
            page_size: DEFAULT_PAGE_SIZE,
            log_level: Level::INFO,
            db_path: None,
        }
    }
}

impl AppConfig {
    /// Reads the process environment, falling back to values baked in at
    /// compile time (the browser build has no environment).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| compiled_default(key)))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(url) = non_empty(lookup(ENV_API_URL)) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(mode) = non_empty(lookup(ENV_BACKEND)) {
            config.backend = match mode.to_ascii_lowercase().as_str() {
                "remote" => BackendMode::Remote,
                "local" => BackendMode::Local,
                other => bail!("{ENV_BACKEND} must be `remote` or `local`, got `{other}`"),
            };
        }

        if let Some(size) = non_empty(lookup(ENV_PAGE_SIZE)) {
            let size: u64 = size
                .parse()
                .with_context(|| format!("{ENV_PAGE_SIZE} is not a number: `{size}`"))?;
            if size == 0 {
                bail!("{ENV_PAGE_SIZE} must be greater than zero")
            }
            config.page_size = size;
        }

        if let Some(level) = non_empty(lookup(ENV_LOG)) {
            config.log_level = level
                .parse::<Level>()
                .map_err(|_| anyhow!("{ENV_LOG} is not a log level: `{level}`"))?;
        }

        config.db_path = non_empty(lookup(ENV_DB_PATH)).map(PathBuf::from);

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn compiled_default(key: &str) -> Option<String> {
    let value = match key {
        ENV_API_URL => option_env!("SHEETVIEW_API_URL"),
        ENV_BACKEND => option_env!("SHEETVIEW_BACKEND"),
        ENV_PAGE_SIZE => option_env!("SHEETVIEW_PAGE_SIZE"),
        ENV_LOG => option_env!("SHEETVIEW_LOG"),
        _ => None,
    };
    value.map(str::to_string)
}
