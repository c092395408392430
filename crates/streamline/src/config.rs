//! CLI configuration: thin wrapper around `streamline_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--config, --data-file, --output).

use std::path::PathBuf;

use clap::ValueEnum;
use tracing::debug;

use crate::cli::{ColorMode, GlobalOpts};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use streamline_config::{Config, load_config_from, save_config_to};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Config file in effect: `--config` / `STREAMLINE_CONFIG`, else the
/// platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(streamline_config::config_path)
}

/// Load the config and fill unset output flags from its `[defaults]`.
pub fn load(global: &mut GlobalOpts) -> Result<Config, CliError> {
    let path = config_path(global);
    let cfg = load_config_from(&path)?;
    debug!(path = %path.display(), "configuration loaded");

    if global.output.is_none() {
        global.output = Some(parse_enum("defaults.output", &cfg.defaults.output)?);
    }
    if global.color.is_none() {
        global.color = Some(parse_enum::<ColorMode>("defaults.color", &cfg.defaults.color)?);
    }
    Ok(cfg)
}

/// Client data file: flag > env > config > platform default.
pub fn data_file(global: &GlobalOpts, cfg: &Config) -> PathBuf {
    global.data_file.clone().unwrap_or_else(|| cfg.data_file())
}

fn parse_enum<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!(
            "unknown value '{raw}', expected one of: {}",
            T::value_variants()
                .iter()
                .filter_map(|v| v.to_possible_value())
                .map(|v| v.get_name().to_owned())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    #[test]
    fn parses_config_output_names() {
        let fmt: OutputFormat = parse_enum("defaults.output", "json-compact").unwrap();
        assert_eq!(fmt, OutputFormat::JsonCompact);
        let err = parse_enum::<OutputFormat>("defaults.output", "xml").unwrap_err();
        assert!(err.to_string().contains("defaults.output"));
    }
}
