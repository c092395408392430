// ── Domain model ──
//
// Canonical representation of a reseller's client records. Consumers
// (CLI, persistence, aggregation) depend only on these types.

pub mod client;
pub mod entity_id;

// ── Re-exports ──────────────────────────────────────────────────────

pub use client::{Client, IptvApp, PackageType, SubscriptionStatus, add_months};
pub use entity_id::{ClientId, MacAddress};
