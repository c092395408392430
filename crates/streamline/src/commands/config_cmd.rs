//! Config subcommand handlers.

use dialoguer::{Input, Select};
use rust_decimal::Decimal;

use streamline_config::default_data_file;
use streamline_core::DURATION_CHOICES;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Helpers ─────────────────────────────────────────────────────────

/// Resolved config as TOML, with the effective data file spelled out.
fn format_config(cfg: &Config) -> String {
    let mut shown = cfg.clone();
    shown.store.data_file = Some(cfg.data_file());
    toml::to_string_pretty(&shown).unwrap_or_else(|e| format!("# unable to render: {e}"))
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Ask for the business defaults, prefilled with the current values.
fn prompt_business(cfg: &mut Config) -> Result<(), CliError> {
    cfg.business.currency = Input::new()
        .with_prompt("Currency symbol")
        .default(cfg.business.currency.clone())
        .interact_text()
        .map_err(prompt_err)?;

    // Presets first, then a free-form amount.
    let presets = &cfg.business.price_presets;
    let mut price_labels: Vec<String> = presets
        .iter()
        .map(|p| output::money(&cfg.business.currency, *p))
        .collect();
    price_labels.push("Other amount…".into());
    let current = presets
        .iter()
        .position(|p| *p == cfg.business.default_price)
        .unwrap_or(presets.len());
    let picked = Select::new()
        .with_prompt("Default price")
        .items(&price_labels)
        .default(current)
        .interact()
        .map_err(prompt_err)?;
    cfg.business.default_price = match presets.get(picked) {
        Some(preset) => *preset,
        None => {
            let price: String = Input::new()
                .with_prompt("Default price")
                .default(cfg.business.default_price.to_string())
                .validate_with(|raw: &String| {
                    raw.trim()
                        .parse::<Decimal>()
                        .map(|_| ())
                        .map_err(|_| "enter a number such as 39.99")
                })
                .interact_text()
                .map_err(prompt_err)?;
            util::parse_price(&price)?
        }
    };

    let labels: Vec<String> = DURATION_CHOICES
        .iter()
        .map(|m| format!("{m} months"))
        .collect();
    let current = DURATION_CHOICES
        .iter()
        .position(|m| *m == cfg.business.default_duration)
        .unwrap_or(labels.len() - 1);
    let selection = Select::new()
        .with_prompt("Default subscription length")
        .items(&labels)
        .default(current)
        .interact()
        .map_err(prompt_err)?;
    cfg.business.default_duration = DURATION_CHOICES
        .get(selection)
        .copied()
        .unwrap_or(cfg.business.default_duration);

    let data_file: String = Input::new()
        .with_prompt("Client data file")
        .default(cfg.data_file().display().to_string())
        .interact_text()
        .map_err(prompt_err)?;
    cfg.store.data_file = Some(data_file.trim().into());
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path(global);

    match args.command {
        // ── Init: guided setup ──────────────────────────────────────
        ConfigCommand::Init => {
            if path.exists()
                && !util::confirm(
                    &format!("Overwrite existing config at {}?", path.display()),
                    global.yes,
                )?
            {
                return Ok(());
            }

            let mut cfg = Config::default();
            if global.yes {
                cfg.store.data_file = Some(default_data_file());
            } else {
                eprintln!("✨ Streamline configuration wizard");
                eprintln!("   Config path: {}\n", path.display());
                prompt_business(&mut cfg)?;
            }

            config::save_config_to(&cfg, &path)?;
            output::print_notice(
                &format!("✓ Configuration written to {}", path.display()),
                global.quiet,
            );
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_from(&path)?;
            let out = output::render_single(global.output_format(), &cfg, format_config, |c| {
                c.data_file().display().to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }
    }
}
