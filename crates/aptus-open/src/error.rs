//! Binary error types with miette diagnostics.
//!
//! Maps `ConfigError` and `CoreError` variants into user-facing errors
//! with actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use aptus_core::CoreError;

/// Exit codes for the bridge process.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONFIG: i32 = 4;
    pub const CONNECTION: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("Could not load secrets file")]
    #[diagnostic(
        code(aptus::config),
        help(
            "Check the path given via --secrets-file (or APTUS_SECRETS_FILE).\n\
             The file is TOML with [csb-login], [mqtt] and [[doors]] sections."
        )
    )]
    Config(#[from] aptus_config::ConfigError),

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication against the portal failed")]
    #[diagnostic(
        code(aptus::auth),
        help("Verify the [csb-login] username and password in the secrets file.")
    )]
    Auth {
        #[source]
        source: CoreError,
    },

    // ── Connectivity ─────────────────────────────────────────────────
    #[error("Cannot reach the portal")]
    #[diagnostic(
        code(aptus::connection),
        help("Check network connectivity to the portal hosts.")
    )]
    Connection {
        #[source]
        source: CoreError,
    },

    #[error("Message bus error")]
    #[diagnostic(
        code(aptus::bus),
        help("Check the [mqtt] broker host, port and credentials in the secrets file.")
    )]
    Bus(#[from] rumqttc::ClientError),

    // ── Everything else ──────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(aptus::core))]
    Core(CoreError),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(aptus::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => exit_code::CONFIG,
            Self::Auth { .. } => exit_code::AUTH,
            Self::Connection { .. } | Self::Bus(_) => exit_code::CONNECTION,
            Self::Core(_) | Self::Json(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { .. } | CoreError::ControllerUnusable => {
                CliError::Auth { source: err }
            }
            CoreError::ConnectionFailed { .. } => CliError::Connection { source: err },
            other => CliError::Core(other),
        }
    }
}
