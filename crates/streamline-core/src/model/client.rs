// ── Client domain types ──

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::entity_id::{ClientId, MacAddress};
use crate::status;

/// Lifecycle state of a subscription.
///
/// `Suspended` is never produced by [`status::resolve_status`]; it only
/// enters the collection through persisted data.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Suspended,
    #[serde(rename = "Expiring Soon")]
    #[strum(to_string = "Expiring Soon", serialize = "expiring-soon", serialize = "ExpiringSoon")]
    ExpiringSoon,
}

impl SubscriptionStatus {
    /// Whether a client in this state still counts toward revenue.
    pub fn is_billable(self) -> bool {
        matches!(self, Self::Active | Self::ExpiringSoon)
    }
}

/// Package tier sold to a client.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum PackageType {
    Diamond,
    Lion,
    #[serde(rename = "VIP")]
    #[strum(to_string = "VIP")]
    Vip,
}

/// Player application the subscription is hosted on.
///
/// The suggested apps are closed variants; anything else the operator
/// types is kept verbatim in `Custom`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IptvApp {
    #[default]
    SmartIptv,
    IboPlayer,
    IboProPlayer,
    TiviMate,
    IptvSmarters,
    GseSmartIptv,
    Custom(String),
}

impl IptvApp {
    /// Apps offered by default when creating a client, in display order.
    pub const SUGGESTED: [Self; 6] = [
        Self::SmartIptv,
        Self::IboPlayer,
        Self::IboProPlayer,
        Self::TiviMate,
        Self::IptvSmarters,
        Self::GseSmartIptv,
    ];

    /// Resolve a display name to a suggested app, falling back to `Custom`.
    ///
    /// Suggested names match exactly; a near miss such as `"tivimate"` is
    /// treated as a custom app name.
    pub fn from_name(name: &str) -> Self {
        Self::SUGGESTED
            .into_iter()
            .find(|app| app.name() == name)
            .unwrap_or_else(|| Self::Custom(name.to_owned()))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::SmartIptv => "Smart IPTV",
            Self::IboPlayer => "IBO Player",
            Self::IboProPlayer => "IBO Pro Player",
            Self::TiviMate => "TiviMate",
            Self::IptvSmarters => "IPTV Smarters",
            Self::GseSmartIptv => "GSE Smart IPTV",
            Self::Custom(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// IBO-family players are activated per device, so the client record
    /// must carry the MAC address and device key.
    pub fn requires_device_binding(&self) -> bool {
        match self {
            Self::IboPlayer | Self::IboProPlayer => true,
            Self::Custom(name) => name.to_uppercase().contains("IBO"),
            Self::SmartIptv | Self::TiviMate | Self::IptvSmarters | Self::GseSmartIptv => false,
        }
    }
}

impl fmt::Display for IptvApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for IptvApp {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<&str> for IptvApp {
    fn from(s: &str) -> Self {
        Self::from_name(s)
    }
}

impl From<IptvApp> for String {
    fn from(app: IptvApp) -> Self {
        match app {
            IptvApp::Custom(name) => name,
            known => known.name().to_owned(),
        }
    }
}

/// The canonical client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub full_name: String,
    pub email: String,
    pub phone: String,

    // Subscription
    pub start_date: NaiveDate,
    pub expiry_date: NaiveDate,
    #[serde(rename = "duration")]
    pub duration_months: u32,
    pub package_type: PackageType,
    pub iptv_app: IptvApp,
    pub status: SubscriptionStatus,
    pub price: Decimal,

    // Device binding (IBO-family apps only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<MacAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_key: Option<String>,
}

impl Client {
    /// Expiry as an instant: midnight UTC at the start of the expiry date.
    pub fn expires_at(&self) -> DateTime<Utc> {
        status::date_to_instant(self.expiry_date)
    }

    /// Whole days until expiry, rounded up. Zero or negative once expired.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        status::days_until(self.expires_at(), now)
    }

    /// Status as it would be computed right now, ignoring the stored value.
    pub fn live_status(&self, now: DateTime<Utc>) -> SubscriptionStatus {
        status::resolve_status(self.expires_at(), now)
    }

    /// Whether the stored status disagrees with the live one.
    ///
    /// Suspended records are never considered stale.
    pub fn is_status_stale(&self, now: DateTime<Utc>) -> bool {
        self.status != SubscriptionStatus::Suspended && self.status != self.live_status(now)
    }
}

/// Add calendar months to a start date.
///
/// Day overflow rolls into the following month instead of clamping:
/// January 31 plus one month is March 3 (or March 2 in a leap year).
/// Returns `None` only when the result leaves chrono's supported range.
pub fn add_months(start: NaiveDate, months: u32) -> Option<NaiveDate> {
    let month0 = i64::from(start.month0()) + i64::from(months);
    let year = i64::from(start.year()) + month0.div_euclid(12);
    let month = u32::try_from(month0.rem_euclid(12)).ok()? + 1;
    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
    first.checked_add_days(Days::new(u64::from(start.day0())))
}
