//! Domain core for Streamline, a subscription manager for IPTV resellers.
//!
//! This crate owns the client model, the business rules, and the reactive
//! store the front ends read from:
//!
//! - **[`DataStore`]**: Ordered client collection built on
//!   `EntityCollection<T>` (`IndexMap` + `tokio::sync::watch` channels).
//!   Mutations publish immutable snapshots; [`load`](DataStore::load) and
//!   [`save`](DataStore::save) persist it as a JSON array.
//!
//! - **[`Session`]**: The single write path. Executes [`Command`]s:
//!   drafts are validated against the current snapshot, expiry and status
//!   are derived, then the record is applied to the store. A [`Clock`]
//!   supplies "now".
//!
//! - **[`EntityStream<T>`]**: Subscription handle vended by the store,
//!   exposing `current()` and `changed()`.
//!
//! - **Status and aggregation** ([`status`], [`stats`]): Pure functions
//!   of a snapshot and an instant: status resolution, expiring counts,
//!   revenue, package mix, and the dashboard series.
//!
//! - **Domain model** ([`model`]): [`Client`] with closed enums for
//!   [`SubscriptionStatus`], [`PackageType`] and [`IptvApp`].

pub mod command;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod session;
pub mod stats;
pub mod status;
pub mod store;
pub mod stream;
pub mod tools;
pub mod validation;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::requests::*;
pub use command::{Command, CommandResult};
pub use error::CoreError;
pub use session::{Clock, FixedClock, Session, SystemClock};
pub use stats::{DashboardSummary, RevenueSummary};
pub use store::DataStore;
pub use stream::{ClientFilter, EntityStream};
pub use tools::{XtreamCredentials, parse_xtream, welcome_message};
pub use validation::{ClientField, FieldErrors, validate_draft};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Client, ClientId, IptvApp, MacAddress, PackageType, SubscriptionStatus, add_months,
};
