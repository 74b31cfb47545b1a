// Authenticated session state.
//
// A Session is produced by the login handshake and replaced wholesale on
// re-authentication -- it is never mutated in place. Dropping it drops the
// underlying client, which releases its pooled connections.

use std::fmt;

use reqwest::cookie::{CookieStore, Jar};
use url::Url;

/// The cookie/token state that authorizes unlock requests.
///
/// Holds the HTTP client whose jar accumulated cookies across all three
/// legs of the handshake, plus the lock-portal URL discovered in leg two.
/// Opaque to callers; not serializable, not persisted.
pub struct Session {
    http: reqwest::Client,
    aptus_url: Url,
}

impl Session {
    pub(crate) fn new(http: reqwest::Client, aptus_url: Url) -> Self {
        Self { http, aptus_url }
    }

    /// The HTTP client carrying this session's cookie jar.
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The lock-portal URL discovered during widget discovery.
    pub fn aptus_url(&self) -> &Url {
        &self.aptus_url
    }
}

/// Check a jar for a cookie by name without exposing its value.
pub(crate) fn jar_has_cookie(jar: &Jar, url: &Url, name: &str) -> bool {
    let Some(header) = jar.cookies(url) else {
        return false;
    };
    let Ok(cookies) = header.to_str() else {
        return false;
    };
    cookies
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .any(|(key, _)| key.trim() == name)
}

// Cookie values are credentials; keep them out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("aptus_url", &self.aptus_url.as_str())
            .field("cookies", &"[redacted]")
            .finish()
    }
}
