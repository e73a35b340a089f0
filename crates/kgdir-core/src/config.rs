//! Configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! + `DATA_PATH`, extracted into typed [`Settings`]. Provides helpers to expand
//! `~` and `${VAR}` and to resolve relative paths against a known base directory.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::loader::InputFormat;

pub const DEFAULT_DATA_PATH: &str = "data/output_kg.jsonl";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub path: String,
    pub format: InputFormat,
}

impl Default for DataSettings {
    fn default() -> Self { Self { path: DEFAULT_DATA_PATH.to_string(), format: InputFormat::Auto } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub page_size: usize,
    pub max_keywords: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self { Self { page_size: 9, max_keywords: 4 } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self { Self { filter: "info".to_string() } }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub display: DisplaySettings,
    pub log: LogSettings,
}

pub struct Config {
    figment: Figment,
    env_name: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Merge `config.toml`, `config.<env>.toml`, `APP_*` variables (nested
    /// keys separated by `__`) and `DATA_PATH`, in increasing precedence.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment
            .merge(Env::prefixed("APP_").split("__"))
            .merge(Env::raw().only(&["DATA_PATH"]).map(|_| "data.path".into()));

        let config = Self { figment, env_name };
        config.validate()?;
        Ok(config)
    }

    pub fn env_name(&self) -> &str { &self.env_name }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    pub fn settings(&self) -> Result<Settings> {
        self.figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// The configured data path, expanded and resolved against the working directory.
    pub fn data_path(&self) -> Result<PathBuf> {
        let settings = self.settings()?;
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Ok(resolve_with_base(&cwd, &settings.data.path))
    }

    fn validate(&self) -> Result<()> {
        let settings = self.settings()?;
        if settings.display.page_size == 0 {
            return Err(Error::InvalidConfig("display.page_size must be at least 1".to_string()));
        }
        if settings.data.path.trim().is_empty() {
            return Err(Error::InvalidConfig("data.path must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
