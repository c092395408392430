// ── Core error types ──
//
// User-facing errors from streamline-core. Validation failures carry
// the per-field messages so front ends can show them next to inputs.

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::FieldErrors;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Data errors ──────────────────────────────────────────────────
    #[error("Client not found: {identifier}")]
    ClientNotFound { identifier: String },

    #[error("Client already exists: {identifier}")]
    DuplicateClient { identifier: String },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed: {errors}")]
    ValidationFailed { errors: FieldErrors },

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    // ── Persistence errors ───────────────────────────────────────────
    #[error("Cannot access client data at {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Client data at {} is malformed: {source}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<FieldErrors> for CoreError {
    fn from(errors: FieldErrors) -> Self {
        Self::ValidationFailed { errors }
    }
}
