// ── Client store ──
//
// Owned, single-writer storage for client records with immutable
// snapshots for readers and watch-based subscriptions.

mod collection;
mod data_store;
mod persist;

pub use collection::Identified;
pub use data_store::DataStore;
pub use persist::{load_clients, save_clients};
