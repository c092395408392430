//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use streamline_config::ConfigError;
use streamline_core::{CoreError, FieldErrors};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Clients ──────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(streamline::not_found),
        help("Run: streamline {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{resource_type} '{identifier}' already exists")]
    #[diagnostic(code(streamline::conflict))]
    Conflict {
        resource_type: String,
        identifier: String,
    },

    #[error("Client was not saved")]
    #[diagnostic(code(streamline::invalid_client), help("{details}"))]
    InvalidClient { details: String },

    // ── Data file ────────────────────────────────────────────────────

    #[error("Client data already exists at {path}")]
    #[diagnostic(
        code(streamline::data_exists),
        help("Use --force to replace it with the demo clients.")
    )]
    DataExists { path: String },

    #[error("Could not use client data file {path}")]
    #[diagnostic(
        code(streamline::data_file),
        help(
            "Check the file and its permissions, or point at another one with\n\
             --data-file or [store] data_file in the config."
        )
    )]
    DataFile {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(streamline::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(streamline::config),
        help("Run: streamline config show to inspect the resolved configuration")
    )]
    Config(Box<figment::Error>),

    #[error("Failed to write config: {0}")]
    #[diagnostic(code(streamline::config_write))]
    ConfigWrite(#[from] toml::ser::Error),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(streamline::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } | Self::DataExists { .. } => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::InvalidClient { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

/// One indented `field: message` line per failed check.
fn describe_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {field}: {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ClientNotFound { identifier } => CliError::NotFound {
                resource_type: "client".into(),
                identifier,
                list_command: "clients list".into(),
            },

            CoreError::DuplicateClient { identifier } => CliError::Conflict {
                resource_type: "client".into(),
                identifier,
            },

            CoreError::ValidationFailed { errors } => CliError::InvalidClient {
                details: describe_field_errors(&errors),
            },

            CoreError::InvalidInput { field, reason } => CliError::Validation { field, reason },

            CoreError::Persistence { path, source } => CliError::DataFile {
                path: path.display().to_string(),
                source: source.into(),
            },

            CoreError::Serialization { path, source } => CliError::DataFile {
                path: path.display().to_string(),
                source: source.into(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Serialization(e) => CliError::ConfigWrite(e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
