// ── Session: the single write path ──
//
// A `Session` pairs a `DataStore` with a `Clock`. Every mutation arrives
// as a `Command`; drafts are validated against the current snapshot,
// turned into records, and only then applied to the store.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::command::{Command, CommandResult};
use crate::error::CoreError;
use crate::model::ClientId;
use crate::store::DataStore;
use crate::validation::validate_draft;

/// Source of "now" for status resolution and aggregation.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for tests and reproducible reports.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub struct Session<C: Clock = SystemClock> {
    store: DataStore,
    clock: C,
}

impl Session<SystemClock> {
    pub fn new(store: DataStore) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    pub fn with_clock(store: DataStore, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn into_store(self) -> DataStore {
        self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Validate and apply a command.
    ///
    /// On any error the store is left exactly as it was.
    pub fn execute(&mut self, cmd: Command) -> Result<CommandResult, CoreError> {
        let now = self.clock.now();
        debug!(command = cmd.name(), "executing command");

        match cmd {
            Command::AddClient(draft) => {
                let existing = self.store.clients_snapshot();
                validate_draft(&draft, &existing, None)?;
                let client = draft.into_client(ClientId::generate(), now)?;
                let stored = self.store.add(client)?;
                info!(id = %stored.id, name = %stored.full_name, "client created");
                Ok(CommandResult::Client(stored))
            }

            Command::UpdateClient { id, update } => {
                let current =
                    self.store
                        .client_by_id(&id)
                        .ok_or_else(|| CoreError::ClientNotFound {
                            identifier: id.to_string(),
                        })?;
                let draft = update.apply_to(&current);
                let existing = self.store.clients_snapshot();
                validate_draft(&draft, &existing, Some(&id))?;
                let client = draft.into_client(id, now)?;
                self.store.replace(client.clone())?;
                let stored = self.store.client_by_id(&client.id).ok_or_else(|| {
                    CoreError::ClientNotFound {
                        identifier: client.id.to_string(),
                    }
                })?;
                info!(id = %stored.id, "client updated");
                Ok(CommandResult::Client(stored))
            }

            Command::RemoveClient { id } => {
                let removed = self.store.remove(&id)?;
                info!(id = %removed.id, name = %removed.full_name, "client removed");
                Ok(CommandResult::Removed(removed))
            }

            Command::RefreshStatuses => {
                let updated = self.store.refresh_statuses(now);
                info!(updated, "statuses refreshed");
                Ok(CommandResult::Refreshed { updated })
            }
        }
    }
}
