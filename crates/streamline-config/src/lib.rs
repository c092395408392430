//! Shared configuration for the Streamline CLI.
//!
//! A TOML file at the platform config path, layered over built-in
//! defaults and overridden by `STREAMLINE_` environment variables. Holds
//! output preferences, the client data file location, and the business
//! defaults used when creating clients and building the dashboard.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use streamline_core::stats::DEFAULT_EXPIRING_WINDOWS;
use streamline_core::{DEFAULT_DURATION_MONTHS, DEFAULT_PRICE, DURATION_CHOICES, PRICE_PRESETS};

/// Environment prefix; nested keys use a double underscore
/// (`STREAMLINE_STORE__DATA_FILE`).
pub const ENV_PREFIX: &str = "STREAMLINE_";

const DATA_FILE_NAME: &str = "clients.json";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Output preferences.
    #[serde(default)]
    pub defaults: Defaults,

    /// Where client data lives.
    #[serde(default)]
    pub store: StoreConfig,

    /// Pricing and dashboard settings.
    #[serde(default)]
    pub business: Business,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Client data file. Defaults to `clients.json` in the platform data
    /// directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Business {
    /// Symbol printed in front of amounts.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Price preselected for new clients.
    #[serde(default = "default_price")]
    pub default_price: Decimal,

    /// Subscription length preselected for new clients, in months.
    #[serde(default = "default_duration")]
    pub default_duration: u32,

    /// Quick-pick prices, chosen with `--preset N` (1-based).
    #[serde(default = "default_price_presets")]
    pub price_presets: Vec<Decimal>,

    /// Day windows for the dashboard's "expiring within" counters.
    #[serde(default = "default_expiring_windows")]
    pub expiring_windows: Vec<u32>,
}

impl Business {
    /// The `n`th price preset, counting from 1.
    pub fn preset(&self, n: usize) -> Option<Decimal> {
        n.checked_sub(1)
            .and_then(|i| self.price_presets.get(i))
            .copied()
    }
}

impl Default for Business {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            default_price: default_price(),
            default_duration: default_duration(),
            price_presets: default_price_presets(),
            expiring_windows: default_expiring_windows(),
        }
    }
}

fn default_currency() -> String {
    "€".into()
}
fn default_price() -> Decimal {
    DEFAULT_PRICE
}
fn default_duration() -> u32 {
    DEFAULT_DURATION_MONTHS
}
fn default_price_presets() -> Vec<Decimal> {
    PRICE_PRESETS.to_vec()
}
fn default_expiring_windows() -> Vec<u32> {
    DEFAULT_EXPIRING_WINDOWS.to_vec()
}

impl Config {
    /// Client data file, falling back to the platform default.
    pub fn data_file(&self) -> PathBuf {
        self.store.data_file.clone().unwrap_or_else(default_data_file)
    }

    /// Reject values the rest of the tool cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.business.default_price.is_sign_negative() {
            return Err(ConfigError::Validation {
                field: "business.default_price".into(),
                reason: "must not be negative".into(),
            });
        }
        if !DURATION_CHOICES.contains(&self.business.default_duration) {
            return Err(ConfigError::Validation {
                field: "business.default_duration".into(),
                reason: format!(
                    "expected one of {DURATION_CHOICES:?}, got {}",
                    self.business.default_duration
                ),
            });
        }
        if self.business.price_presets.iter().any(Decimal::is_sign_negative) {
            return Err(ConfigError::Validation {
                field: "business.price_presets".into(),
                reason: "presets must not be negative".into(),
            });
        }
        if self.business.expiring_windows.is_empty() {
            return Err(ConfigError::Validation {
                field: "business.expiring_windows".into(),
                reason: "at least one window is required".into(),
            });
        }
        Ok(())
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "streamline", "streamline")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default client data file in the platform data directory.
pub fn default_data_file() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".local/share").join(DATA_FILE_NAME),
        |dirs| dirs.data_dir().join(DATA_FILE_NAME),
    )
}

fn dirs_fallback(base: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(base);
    p.push("streamline");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from an explicit file path, layered the same way.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Write `cfg` as TOML, creating parent directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
