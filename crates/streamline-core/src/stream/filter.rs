// ── Filter predicates for client snapshots ──
//
// Used by list views to narrow a snapshot without touching the store.

use std::sync::Arc;

use crate::model::{Client, PackageType, SubscriptionStatus};

/// Search and filter criteria for the client list. Empty criteria
/// match everything; all given criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    /// Case-insensitive substring of name or email, or a substring of
    /// the phone number as typed.
    pub search: Option<String>,
    pub status: Option<SubscriptionStatus>,
    pub package: Option<PackageType>,
}

impl ClientFilter {
    pub fn is_active(&self) -> bool {
        self.search.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self.status.is_some()
            || self.package.is_some()
    }

    pub fn matches(&self, client: &Client) -> bool {
        self.matches_search(client)
            && self.status.is_none_or(|s| client.status == s)
            && self.package.is_none_or(|p| client.package_type == p)
    }

    /// Filter a snapshot, preserving its order.
    pub fn apply(&self, clients: &[Arc<Client>]) -> Vec<Arc<Client>> {
        clients
            .iter()
            .filter(|c| self.matches(c))
            .map(Arc::clone)
            .collect()
    }

    fn matches_search(&self, client: &Client) -> bool {
        let Some(term) = self.search.as_deref() else {
            return true;
        };
        let lowered = term.to_lowercase();
        client.full_name.to_lowercase().contains(&lowered)
            || client.email.to_lowercase().contains(&lowered)
            || client.phone.contains(term)
    }
}
