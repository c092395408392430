// ── Command types for store mutations ──
//
// Every write to the client store goes through a `Command` so front
// ends share one validation and apply path (see `Session::execute`).
// Reads bypass commands and use `DataStore` snapshots directly.

pub mod requests;

use std::sync::Arc;

pub use requests::{
    ClientDraft, DEFAULT_DURATION_MONTHS, DEFAULT_PRICE, DURATION_CHOICES, PRICE_PRESETS,
    UpdateClientRequest,
};

use crate::model::{Client, ClientId};

/// A mutation request against the client store.
#[derive(Debug, Clone)]
pub enum Command {
    /// Create a client with a fresh id, prepended to the list.
    AddClient(ClientDraft),

    /// Overlay changes on an existing client. The id is preserved and
    /// expiry and status are recomputed.
    UpdateClient {
        id: ClientId,
        update: UpdateClientRequest,
    },

    RemoveClient {
        id: ClientId,
    },

    /// Recompute stored statuses from expiry dates.
    RefreshStatuses,
}

impl Command {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddClient(_) => "add_client",
            Self::UpdateClient { .. } => "update_client",
            Self::RemoveClient { .. } => "remove_client",
            Self::RefreshStatuses => "refresh_statuses",
        }
    }
}

/// Outcome of a successfully applied [`Command`].
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// The client as stored after an add or update.
    Client(Arc<Client>),
    /// The record that was removed.
    Removed(Arc<Client>),
    /// Number of records whose stored status changed.
    Refreshed { updated: usize },
}
