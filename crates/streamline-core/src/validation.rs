// ── Client form validation ──
//
// Field-level checks run before a draft is saved. Nothing here is
// fatal: a failing draft is refused and the messages are shown to the
// operator next to the offending inputs.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::command::ClientDraft;
use crate::model::{Client, ClientId, IptvApp};

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Display, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ClientField {
    FullName,
    Email,
    Phone,
    IptvApp,
    MacAddress,
    DeviceKey,
}

/// Validation messages keyed by field, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<ClientField, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: ClientField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClientField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Record a message, replacing any earlier one for the same field.
    fn set(&mut self, field: ClientField, message: &str) {
        self.0.insert(field, message.to_owned());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_blank_opt(value: Option<&String>) -> bool {
    value.is_none_or(|v| is_blank(v))
}

/// Check a draft against the form rules and the existing collection.
///
/// `editing` names the record being replaced so that its own email and
/// phone do not count as duplicates. Later checks overwrite earlier
/// messages for the same field (a duplicate email reports "Email already
/// exists" even when the shape check also failed).
pub fn validate_draft(
    draft: &ClientDraft,
    existing: &[Arc<Client>],
    editing: Option<&ClientId>,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if is_blank(&draft.full_name) {
        errors.set(ClientField::FullName, "Full Name is required");
    }

    if is_blank(&draft.email) {
        errors.set(ClientField::Email, "Email is required");
    } else if !EMAIL_SHAPE.is_match(&draft.email) {
        errors.set(ClientField::Email, "Invalid email format");
    }

    if is_blank(&draft.phone) {
        errors.set(ClientField::Phone, "WhatsApp number is required");
    }

    if let IptvApp::Custom(name) = &draft.iptv_app {
        if is_blank(name) {
            errors.set(ClientField::IptvApp, "App name required");
        }
    }

    if draft.iptv_app.requires_device_binding() {
        if is_blank_opt(draft.mac_address.as_ref()) {
            errors.set(ClientField::MacAddress, "MAC required");
        }
        if is_blank_opt(draft.device_key.as_ref()) {
            errors.set(ClientField::DeviceKey, "Key required");
        }
    }

    let others = || existing.iter().filter(move |c| Some(&c.id) != editing);

    let email = draft.email.to_lowercase();
    if others().any(|c| c.email.to_lowercase() == email) {
        errors.set(ClientField::Email, "Email already exists");
    }
    if others().any(|c| c.phone == draft.phone) {
        errors.set(ClientField::Phone, "Phone already exists");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
