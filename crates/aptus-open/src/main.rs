mod bridge;
mod cli;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use aptus_api::{AptusClient, Endpoints, TransportConfig};
use aptus_core::DoorController;

use crate::bridge::CommandBridge;
use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = aptus_config::load_config(&cli.secrets_file)?;
    tracing::info!(
        doors = config.doors.len(),
        broker = %config.mqtt.host,
        "configuration loaded"
    );

    let client = AptusClient::new(Endpoints::default(), TransportConfig::default());
    let mut controller = DoorController::new(client, config.portal.clone());
    controller.connect().await?;

    CommandBridge::new(controller, config)?.run().await
}
