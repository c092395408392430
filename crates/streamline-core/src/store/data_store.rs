// ── Central client store ──
//
// Owns the client collection. Mutations take `&mut self` and publish a
// new snapshot; readers hold `Arc` snapshots that never change under
// them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::collection::EntityCollection;
use crate::error::CoreError;
use crate::model::{Client, ClientId};
use crate::stream::{EntityStream, Snapshot};

/// Ordered client collection, newest first.
pub struct DataStore {
    clients: EntityCollection<Client>,
}

impl DataStore {
    pub fn new() -> Self {
        Self {
            clients: EntityCollection::new(),
        }
    }

    /// Build a store from records in display order. A repeated id
    /// replaces the earlier record in place.
    pub fn with_clients(clients: impl IntoIterator<Item = Client>) -> Self {
        let mut store = Self::new();
        for client in clients {
            if store.clients.get_by_id(&client.id).is_some() {
                warn!(id = %client.id, "duplicate client id in stored data; keeping the later record");
            }
            store.clients.push_back(client);
        }
        store
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Prepend a new client. Fails if the id is already taken.
    pub fn add(&mut self, client: Client) -> Result<Arc<Client>, CoreError> {
        let id = client.id.clone();
        if !self.clients.insert_front(client) {
            return Err(CoreError::DuplicateClient {
                identifier: id.to_string(),
            });
        }
        debug!(%id, total = self.clients.len(), "client added");
        self.client_by_id(&id)
            .ok_or_else(|| CoreError::ClientNotFound {
                identifier: id.to_string(),
            })
    }

    /// Replace the client with the same id, keeping its list position.
    /// Returns the previous record.
    pub fn replace(&mut self, client: Client) -> Result<Arc<Client>, CoreError> {
        let id = client.id.clone();
        let previous = self
            .clients
            .replace(client)
            .ok_or_else(|| CoreError::ClientNotFound {
                identifier: id.to_string(),
            })?;
        debug!(%id, "client replaced");
        Ok(previous)
    }

    /// Remove a client by id, returning the removed record.
    pub fn remove(&mut self, id: &ClientId) -> Result<Arc<Client>, CoreError> {
        let removed = self
            .clients
            .remove(id)
            .ok_or_else(|| CoreError::ClientNotFound {
                identifier: id.to_string(),
            })?;
        debug!(%id, total = self.clients.len(), "client removed");
        Ok(removed)
    }

    /// Recompute stored statuses from expiry dates. Suspended records
    /// are left alone. Returns how many records changed.
    pub fn refresh_statuses(&mut self, now: DateTime<Utc>) -> usize {
        let updated = self.clients.update_where(|client| {
            client.is_status_stale(now).then(|| Client {
                status: client.live_status(now),
                ..client.clone()
            })
        });
        debug!(updated, "statuses refreshed");
        updated
    }

    // ── Queries ──────────────────────────────────────────────────

    pub fn client_by_id(&self, id: &ClientId) -> Option<Arc<Client>> {
        self.clients.get_by_id(id)
    }

    /// Find a client by id, email (case-insensitive) or exact phone.
    pub fn resolve(&self, identifier: &str) -> Result<Arc<Client>, CoreError> {
        let needle = identifier.trim();
        if let Some(client) = self.client_by_id(&ClientId::from(needle)) {
            return Ok(client);
        }
        self.clients
            .snapshot()
            .iter()
            .find(|c| c.email.eq_ignore_ascii_case(needle) || c.phone == needle)
            .cloned()
            .ok_or_else(|| CoreError::ClientNotFound {
                identifier: identifier.to_owned(),
            })
    }

    pub fn clients_snapshot(&self) -> Snapshot<Client> {
        self.clients.snapshot()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Monotonic counter bumped on every published change.
    pub fn version(&self) -> u64 {
        self.clients.version()
    }

    // ── Subscriptions ────────────────────────────────────────────

    pub fn subscribe_clients(&self) -> EntityStream<Client> {
        EntityStream::new(self.clients.subscribe())
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
