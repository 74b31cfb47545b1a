// ── Core error types ──
//
// Domain-facing errors from aptus-core. Consumers never see raw HTTP
// status codes or JSON parse failures -- the `From<aptus_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// Re-authentication failed mid-recovery; the controller refuses
    /// further work rather than looping on a dead portal.
    #[error("Controller unusable after failed re-authentication")]
    ControllerUnusable,

    #[error("Controller not connected")]
    NotConnected,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Door not found: {id}")]
    DoorNotFound { id: String },

    // ── Transport errors ─────────────────────────────────────────────
    #[error("Cannot reach portal: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Portal error: {message}")]
    Portal { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<aptus_api::Error> for CoreError {
    fn from(err: aptus_api::Error) -> Self {
        match err {
            aptus_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            aptus_api::Error::SessionExpired => CoreError::AuthenticationFailed {
                message: "session expired".into(),
            },
            aptus_api::Error::Transport(ref e) if e.is_connect() || e.is_timeout() => {
                CoreError::ConnectionFailed {
                    reason: e.to_string(),
                }
            }
            aptus_api::Error::Transport(e) => CoreError::Portal {
                message: e.to_string(),
            },
            aptus_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            aptus_api::Error::ClientSetup(message) => CoreError::Config { message },
        }
    }
}
