//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use streamline_core::{
    DURATION_CHOICES, DataStore, IptvApp, PackageType, Session, SubscriptionStatus,
};

use streamline_config::Business;

use crate::cli::{PackageArg, StatusArg};
use crate::error::CliError;

// ── Store access ────────────────────────────────────────────────────

/// Open a session over the client data at `path`.
pub fn open_session(path: &Path) -> Result<Session, CliError> {
    Ok(Session::new(DataStore::load(path)?))
}

/// Persist the session's store back to `path`.
pub fn save_session(session: &Session, path: &Path) -> Result<(), CliError> {
    session.store().save(path)?;
    Ok(())
}

// ── Argument conversion ─────────────────────────────────────────────

pub fn package_type(arg: PackageArg) -> PackageType {
    match arg {
        PackageArg::Diamond => PackageType::Diamond,
        PackageArg::Lion => PackageType::Lion,
        PackageArg::Vip => PackageType::Vip,
    }
}

pub fn status(arg: StatusArg) -> SubscriptionStatus {
    match arg {
        StatusArg::Active => SubscriptionStatus::Active,
        StatusArg::ExpiringSoon => SubscriptionStatus::ExpiringSoon,
        StatusArg::Expired => SubscriptionStatus::Expired,
        StatusArg::Suspended => SubscriptionStatus::Suspended,
    }
}

pub fn iptv_app(raw: &str) -> Result<IptvApp, CliError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CliError::Validation {
            field: "app".into(),
            reason: "App name required".into(),
        });
    }
    Ok(IptvApp::from_name(name))
}

/// Parse a `YYYY-MM-DD` flag, defaulting to today (UTC).
pub fn parse_date(field: &str, raw: Option<&str>) -> Result<NaiveDate, CliError> {
    match raw {
        None => Ok(Utc::now().date_naive()),
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
            CliError::Validation {
                field: field.into(),
                reason: format!("expected YYYY-MM-DD, got '{raw}' ({e})"),
            }
        }),
    }
}

pub fn parse_price(raw: &str) -> Result<Decimal, CliError> {
    let price: Decimal = raw.trim().parse().map_err(|_| CliError::Validation {
        field: "price".into(),
        reason: format!("'{raw}' is not a number"),
    })?;
    if price.is_sign_negative() {
        return Err(CliError::Validation {
            field: "price".into(),
            reason: "must not be negative".into(),
        });
    }
    Ok(price)
}

/// Resolve `--preset N` against the configured quick-pick prices.
pub fn preset_price(business: &Business, n: usize) -> Result<Decimal, CliError> {
    business.preset(n).ok_or_else(|| CliError::Validation {
        field: "preset".into(),
        reason: format!(
            "expected 1..={} ({}), got {n}",
            business.price_presets.len(),
            business
                .price_presets
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    })
}

pub fn check_duration(months: u32) -> Result<u32, CliError> {
    if DURATION_CHOICES.contains(&months) {
        Ok(months)
    } else {
        Err(CliError::Validation {
            field: "duration".into(),
            reason: format!("expected one of {DURATION_CHOICES:?} months, got {months}"),
        })
    }
}

// ── Prompts ─────────────────────────────────────────────────────────

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
