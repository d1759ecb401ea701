// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use tracing::error;

use kiosk_cli::client;
use kiosk_cli::commands::{self, Command};
use kiosk_cli::config::ConnectionArgs;

#[derive(Parser)]
#[command(name = "k", version, about = "Command-line client for the kiosk display orchestration service.")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut client = match client::connect(&cli.connection).await {
        Ok(client) => client,
        Err(e) => {
            error!("could not connect: {e:#}");
            std::process::exit(1);
        }
    };

    if let Err(e) = commands::run(&mut client, cli.command).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}
