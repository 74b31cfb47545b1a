//! Clap derive structure for the `aptus-open` bridge.

use std::path::PathBuf;

use clap::Parser;

/// aptus-open -- bridge Aptus-managed doors onto an MQTT bus
#[derive(Debug, Parser)]
#[command(
    name = "aptus-open",
    version,
    about = "Expose Aptus entry doors as remotely unlockable MQTT devices",
    long_about = "Bridges the CSB/Aptus lock portal to an MQTT broker.\n\n\
        Publishes Home Assistant discovery metadata for every configured\n\
        door and unlocks doors in response to bus commands, transparently\n\
        re-authenticating when the portal session expires."
)]
pub struct Cli {
    /// Path to the secrets TOML file
    #[arg(long, short = 's', env = "APTUS_SECRETS_FILE", value_name = "PATH")]
    pub secrets_file: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}
