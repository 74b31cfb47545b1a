// Transport configuration for building reqwest::Client instances.
//
// Every authentication attempt gets a fresh cookie jar; the builder logic
// lives here so the client construction is identical across attempts.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;

use crate::error::Error;

/// Transport tuning for the portal HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` backed by the given cookie jar.
    ///
    /// The default redirect policy (limit 10) is kept on purpose: a stale
    /// session makes the lock portal redirect every request to its login
    /// page, and exhausting the limit is how that condition surfaces.
    pub fn build_client(&self, jar: Arc<Jar>) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("aptus-open/", env!("CARGO_PKG_VERSION")))
            .cookie_provider(jar)
            .build()
            .map_err(|e| Error::ClientSetup(e.to_string()))
    }
}
