// ── Reseller utilities ──
//
// Helpers for day-to-day IPTV support: splitting an M3U playlist link
// into Xtream Codes login fields and drafting the customer message that
// delivers a link.

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::CoreError;

/// Shown in the welcome message until a link is supplied.
pub const LINK_PLACEHOLDER: &str = "[Link hier einfügen]";

/// Xtream Codes login fields extracted from an M3U link.
#[derive(Debug)]
pub struct XtreamCredentials {
    /// `scheme://hostname[:port]`, without path or query.
    pub host: String,
    pub username: String,
    pub password: SecretString,
}

impl XtreamCredentials {
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

/// Split an M3U link (`http://host:port/get.php?username=..&password=..`)
/// into its Xtream login fields. Missing query parameters become empty
/// strings.
pub fn parse_xtream(m3u_link: &str) -> Result<XtreamCredentials, CoreError> {
    let invalid = |reason: &str| CoreError::InvalidInput {
        field: "M3U Link format".into(),
        reason: reason.to_owned(),
    };

    let url = Url::parse(m3u_link.trim()).map_err(|e| invalid(&e.to_string()))?;
    let hostname = url.host_str().ok_or_else(|| invalid("no host"))?;

    let host = match url.port() {
        Some(port) => format!("{}://{hostname}:{port}", url.scheme()),
        None => format!("{}://{hostname}", url.scheme()),
    };

    let param = |key: &str| {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default()
    };

    Ok(XtreamCredentials {
        host,
        username: param("username"),
        password: SecretString::from(param("password")),
    })
}

/// Customer-facing message delivering an IPTV link.
pub fn welcome_message(link: Option<&str>) -> String {
    let link = link
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(LINK_PLACEHOLDER);

    format!(
        "Hallo! Hier ist dein IPTV-Link: \n\n{link}\n\nGib mir bitte Bescheid, ob alles bei dir funktioniert. Viel Spaß!"
    )
}
