use std::{fs, io::ErrorKind, path::Path};

use anyhow::Context;
use shared::domain::known_states;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub initial_state: String,
    pub log_filter: String,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            initial_state: known_states::SETUP.into(),
            log_filter: "info".into(),
            max_body_bytes: 16 * 1024,
        }
    }
}

/// Defaults, then `server.toml` (or `APP__CONFIG_FILE`), then environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    let config_file =
        std::env::var("APP__CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    match read_config_file(Path::new(&config_file)) {
        Ok(Some(raw)) => {
            if let Err(error) = apply_file_overrides(&mut settings, &raw) {
                warn!(%config_file, %error, "ignoring unreadable config file");
            }
        }
        Ok(None) => {}
        Err(error) => warn!(%config_file, %error, "ignoring config file"),
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn read_config_file(path: &Path) -> anyhow::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error)
            .with_context(|| format!("failed to read config file '{}'", path.display())),
    }
}

pub(crate) fn apply_file_overrides(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let table: toml::Table = toml::from_str(raw).context("config file is not valid TOML")?;

    if let Some(v) = table.get("bind_addr").and_then(toml::Value::as_str) {
        settings.server_bind = v.to_string();
    }
    if let Some(v) = table.get("initial_state").and_then(toml::Value::as_str) {
        settings.initial_state = v.to_string();
    }
    if let Some(v) = table.get("log_filter").and_then(toml::Value::as_str) {
        settings.log_filter = v.to_string();
    }
    match table.get("max_body_bytes") {
        Some(toml::Value::Integer(v)) => {
            if let Ok(parsed) = usize::try_from(*v) {
                settings.max_body_bytes = parsed;
            }
        }
        Some(toml::Value::String(v)) => {
            if let Ok(parsed) = v.parse::<usize>() {
                settings.max_body_bytes = parsed;
            }
        }
        _ => {}
    }

    Ok(())
}

pub(crate) fn apply_env_overrides<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = lookup("APP__INITIAL_STATE") {
        settings.initial_state = v;
    }

    if let Some(v) = lookup("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = lookup("APP__MAX_BODY_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_body_bytes = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
