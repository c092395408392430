// ── Core identity types ──
//
// ClientId and MacAddress are the identifiers every client record
// carries. Ids are opaque strings; MACs are normalized on construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ── ClientId ────────────────────────────────────────────────────────

/// Opaque identifier of a client record.
///
/// Freshly created records receive a UUID v4 string; records loaded from
/// disk or seeded demo data may carry any non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Generate a new random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ClientId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<String> for ClientId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── MacAddress ──────────────────────────────────────────────────────

/// MAC address of a bound playback device, normalized to uppercase
/// colon-separated format (AA:BB:CC:DD:EE:FF).
///
/// No structural validation happens here: IBO-style players print the
/// address in whatever form the operator copies, and the form only
/// requires it to be present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct MacAddress(String);

impl MacAddress {
    /// Create a normalized MAC address from any common format.
    /// Dashes become colons; whitespace is trimmed.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw.as_ref().trim().to_uppercase().replace('-', ":");
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for MacAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = ClientId::generate();
        let b = ClientId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn client_id_display_is_raw_string() {
        let id = ClientId::from("1");
        assert_eq!(id.to_string(), "1");
    }

    #[test]
    fn client_id_from_str() {
        let id: ClientId = "k3j9x0a1b".parse().unwrap();
        assert_eq!(id.as_str(), "k3j9x0a1b");
    }

    #[test]
    fn client_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ClientId::from("42")).unwrap();
        assert_eq!(json, "\"42\"");
    }

    #[test]
    fn mac_address_normalizes_dashes() {
        let mac = MacAddress::new("aa-bb-cc-dd-ee-ff");
        assert_eq!(mac.as_str(), "AA:BB:CC:DD:EE:FF");
    }

    #[test]
    fn mac_address_trims_and_uppercases() {
        let mac = MacAddress::new("  00:1a:2b:3c:4d:5e ");
        assert_eq!(mac.as_str(), "00:1A:2B:3C:4D:5E");
    }

    #[test]
    fn mac_address_blank_is_empty() {
        assert!(MacAddress::new("   ").is_empty());
    }

    #[test]
    fn mac_address_deserialize_normalizes() {
        let mac: MacAddress = serde_json::from_str("\"aa-bb-cc-dd-ee-ff\"").unwrap();
        assert_eq!(mac.to_string(), "AA:BB:CC:DD:EE:FF");
    }
}
