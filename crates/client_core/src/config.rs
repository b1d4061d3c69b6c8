//! Settings resolution: defaults, then `popular.toml`, then environment, then
//! whatever flags the binary applies through [`SettingsOverrides`].

use std::{
    collections::HashMap,
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::anyhow;
use tracing::warn;

use crate::catalog::DEFAULT_API_BASE_URL;

pub const CONFIG_FILE: &str = "popular.toml";
pub const DEFAULT_PAGE: u32 = 1;

const APP_DIR_NAME: &str = "popular_tmdb";
const DB_FILE_NAME: &str = "profile.sqlite3";

#[derive(Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub database_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub page: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.into(),
            database_url: None,
            data_dir: None,
            page: DEFAULT_PAGE,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("database_url", &self.database_url)
            .field("data_dir", &self.data_dir)
            .field("page", &self.page)
            .finish()
    }
}

/// Command-line values; `Some` wins over everything loaded from file or env.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub database_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub page: Option<u32>,
}

impl Settings {
    pub fn apply(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(v) = non_empty(overrides.api_key) {
            self.api_key = Some(v);
        }
        if let Some(v) = non_empty(overrides.api_base_url) {
            self.api_base_url = v;
        }
        if let Some(v) = non_empty(overrides.database_url) {
            self.database_url = Some(v);
        }
        if let Some(v) = overrides.data_dir {
            self.data_dir = Some(v);
        }
        if let Some(v) = overrides.page {
            self.page = v;
        }
        self
    }

    /// Explicit database url if one was configured, else the per-user default file.
    pub fn resolved_database_url(&self) -> anyhow::Result<String> {
        if let Some(url) = self.database_url.as_deref() {
            return Ok(normalize_database_url(url));
        }
        Ok(AppPaths::resolve(self.data_dir.as_deref())?.database_url())
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(CONFIG_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(config_path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    match fs::read_to_string(config_path) {
        Ok(raw) => match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => apply_file_values(&mut settings, &file_cfg),
            Err(err) => warn!(
                path = %config_path.display(),
                "ignoring unreadable settings file: {err}"
            ),
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => warn!(path = %config_path.display(), "failed to read settings file: {err}"),
    }

    if let Some(v) = read_env(&env, &["TMDB_API_KEY", "APP__API_KEY"]) {
        settings.api_key = Some(v);
    }
    if let Some(v) = read_env(&env, &["APP__API_BASE_URL"]) {
        settings.api_base_url = v;
    }
    if let Some(v) = read_env(&env, &["DATABASE_URL", "APP__DATABASE_URL"]) {
        settings.database_url = Some(v);
    }
    if let Some(v) = read_env(&env, &["APP__DATA_DIR"]) {
        settings.data_dir = Some(PathBuf::from(v));
    }
    if let Some(v) = read_env(&env, &["APP__PAGE"]) {
        set_page(&mut settings, "APP__PAGE", &v);
    }

    settings
}

fn apply_file_values(settings: &mut Settings, file_cfg: &HashMap<String, toml::Value>) {
    for (key, value) in file_cfg {
        let Some(value) = toml_scalar(value) else {
            warn!(key = %key, "ignoring non-scalar settings value");
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }
        match key.as_str() {
            "api_key" => settings.api_key = Some(value),
            "api_base_url" => settings.api_base_url = value,
            "database_url" => settings.database_url = Some(value),
            "data_dir" => settings.data_dir = Some(PathBuf::from(value)),
            "page" => set_page(settings, "page", &value),
            other => warn!(key = other, "ignoring unknown settings key"),
        }
    }
}

fn toml_scalar(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        _ => None,
    }
}

fn set_page(settings: &mut Settings, source: &str, raw: &str) {
    match raw.trim().parse::<u32>() {
        Ok(page) if page > 0 => settings.page = page,
        _ => warn!(source, value = raw, "ignoring invalid page setting"),
    }
}

/// Later names win, empty values are skipped.
fn read_env(env: &impl Fn(&str) -> Option<String>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| non_empty(env(name)))
        .last()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.starts_with("sqlite:") || raw_database_url.contains("://") {
        return raw_database_url.to_string();
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_root: PathBuf,
    pub db_path: PathBuf,
}

impl AppPaths {
    pub fn resolve(data_dir: Option<&Path>) -> anyhow::Result<Self> {
        let root = match data_dir {
            Some(p) => p.to_path_buf(),
            None => dirs::data_local_dir()
                .ok_or_else(|| anyhow!("unable to resolve local app data dir"))?
                .join(APP_DIR_NAME),
        };

        Ok(Self {
            db_path: root.join(DB_FILE_NAME),
            data_root: root,
        })
    }

    pub fn database_url(&self) -> String {
        format!(
            "sqlite://{}",
            self.db_path.to_string_lossy().replace('\\', "/")
        )
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
