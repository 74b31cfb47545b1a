use thiserror::Error;

/// Top-level error type for the `aptus-api` crate.
///
/// Covers every failure mode of the login handshake and the unlock request.
/// `aptus-core` maps these into domain errors and drives its retry policy
/// off [`is_auth_expired`](Error::is_auth_expired).
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// A step of the login handshake failed: the portal withheld its
    /// session cookie, the widget payload was malformed, or the lock
    /// portal rejected the handoff.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The lock portal no longer honors the session's cookies.
    ///
    /// Raised on a non-200 unlock response, or when the portal bounces
    /// the request to its login page until the redirect limit is hit.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failed to construct the HTTP client.
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

impl Error {
    /// Returns `true` if this error indicates the session is stale or
    /// invalid and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::SessionExpired)
    }
}
