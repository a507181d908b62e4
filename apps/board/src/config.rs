use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_SETTINGS_FILE: &str = "board.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub status_hide_after: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            status_hide_after: Duration::from_millis(5000),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    status_hide_after_ms: Option<u64>,
}

/// Defaults, then `board.toml` (or `path`), then environment overrides.
///
/// A missing default file is fine; an explicitly named file must exist and
/// parse.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let raw = match path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_SETTINGS_FILE).ok(),
    };
    settings_from_sources(raw.as_deref(), |key| std::env::var(key).ok())
}

fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        let file_cfg: FileSettings = toml::from_str(raw).context("invalid settings file")?;
        if let Some(v) = file_cfg.server_url {
            settings.server_url = v;
        }
        if let Some(v) = file_cfg.status_hide_after_ms {
            settings.status_hide_after = Duration::from_millis(v);
        }
    }

    if let Some(v) = env("BOARD_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("APP__STATUS_HIDE_AFTER_MS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.status_hide_after = Duration::from_millis(parsed);
        }
    }

    settings.server_url = normalize_server_url(&settings.server_url);
    Ok(settings)
}

pub fn normalize_server_url(raw_server_url: &str) -> String {
    let server_url = raw_server_url.trim();
    if server_url.is_empty() {
        return Settings::default().server_url;
    }

    let server_url = server_url.trim_end_matches('/');
    if server_url.contains("://") {
        server_url.to_string()
    } else {
        format!("http://{server_url}")
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
