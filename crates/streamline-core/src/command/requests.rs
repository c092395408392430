// ── Typed request structs for Command payloads ──
//
// A `ClientDraft` is the full set of operator inputs needed to save a
// client; `UpdateClientRequest` carries only the fields an edit changes.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{
    Client, ClientId, IptvApp, MacAddress, PackageType, add_months,
};
use crate::status;

/// Subscription length preselected for new clients.
pub const DEFAULT_DURATION_MONTHS: u32 = 12;

/// Durations offered by the client form.
pub const DURATION_CHOICES: [u32; 4] = [1, 3, 6, 12];

/// Price preselected for new clients (39.99).
pub const DEFAULT_PRICE: Decimal = Decimal::from_parts(3999, 0, 0, false, 2);

/// One-click price presets (29.99, 39.99, 49.99).
pub const PRICE_PRESETS: [Decimal; 3] = [
    Decimal::from_parts(2999, 0, 0, false, 2),
    DEFAULT_PRICE,
    Decimal::from_parts(4999, 0, 0, false, 2),
];

// ── Client draft ───────────────────────────────────────────────────

/// Operator input for creating or replacing a client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub package_type: PackageType,
    pub iptv_app: IptvApp,
    pub start_date: NaiveDate,
    #[serde(rename = "duration")]
    pub duration_months: u32,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_key: Option<String>,
}

impl ClientDraft {
    /// A blank draft with the form's defaults: Diamond, the first
    /// suggested app, a twelve month term at 39.99.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            package_type: PackageType::Diamond,
            iptv_app: IptvApp::default(),
            start_date,
            duration_months: DEFAULT_DURATION_MONTHS,
            price: DEFAULT_PRICE,
            mac_address: None,
            device_key: None,
        }
    }

    /// Expiry date the draft would be saved with.
    pub fn expiry_date(&self) -> Result<NaiveDate, CoreError> {
        add_months(self.start_date, self.duration_months).ok_or_else(|| {
            CoreError::InvalidInput {
                field: "duration".into(),
                reason: format!(
                    "{} months from {} is out of range",
                    self.duration_months, self.start_date
                ),
            }
        })
    }

    /// Build the stored record: expiry from start + duration, status
    /// resolved against `now`, device binding kept only for apps that
    /// need it.
    ///
    /// Does not validate; callers run [`crate::validation::validate_draft`]
    /// first.
    pub fn into_client(self, id: ClientId, now: DateTime<Utc>) -> Result<Client, CoreError> {
        let expiry_date = self.expiry_date()?;
        let bound = self.iptv_app.requires_device_binding();

        Ok(Client {
            id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            start_date: self.start_date,
            expiry_date,
            duration_months: self.duration_months,
            package_type: self.package_type,
            iptv_app: self.iptv_app,
            status: status::resolve_for_date(expiry_date, now),
            price: self.price,
            mac_address: self.mac_address.filter(|_| bound).map(MacAddress::new),
            device_key: self.device_key.filter(|_| bound),
        })
    }
}

impl From<&Client> for ClientDraft {
    fn from(c: &Client) -> Self {
        Self {
            full_name: c.full_name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            package_type: c.package_type,
            iptv_app: c.iptv_app.clone(),
            start_date: c.start_date,
            duration_months: c.duration_months,
            price: c.price,
            mac_address: c.mac_address.as_ref().map(ToString::to_string),
            device_key: c.device_key.clone(),
        }
    }
}

// ── Partial update ─────────────────────────────────────────────────

/// Fields to change on an existing client. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<PackageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iptv_app: Option<IptvApp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_key: Option<String>,
}

impl UpdateClientRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay this update on an existing record's values.
    pub fn apply_to(self, current: &Client) -> ClientDraft {
        let mut draft = ClientDraft::from(current);
        if let Some(v) = self.full_name {
            draft.full_name = v;
        }
        if let Some(v) = self.email {
            draft.email = v;
        }
        if let Some(v) = self.phone {
            draft.phone = v;
        }
        if let Some(v) = self.package_type {
            draft.package_type = v;
        }
        if let Some(v) = self.iptv_app {
            draft.iptv_app = v;
        }
        if let Some(v) = self.start_date {
            draft.start_date = v;
        }
        if let Some(v) = self.duration_months {
            draft.duration_months = v;
        }
        if let Some(v) = self.price {
            draft.price = v;
        }
        if let Some(v) = self.mac_address {
            draft.mac_address = Some(v);
        }
        if let Some(v) = self.device_key {
            draft.device_key = Some(v);
        }
        draft
    }
}
