//! BrowserHands - hosted browser automation service
//!
//! Main entry point for the BrowserHands CLI and server.

mod cli;
mod server;

use clap::Parser;

use browserhands_config::ConfigLoader;

use crate::cli::{Cli, Commands};
use crate::server::{check_config, init_tracing, run_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ConfigLoader::load_with_env(&cli.config)?;

    match cli.command {
        Some(Commands::CheckConfig) => check_config(&cli.config, &config),
        None => {
            init_tracing(&config.logging)?;
            run_server(config).await
        }
        Some(Commands::Run { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            init_tracing(&config.logging)?;
            run_server(config).await
        }
    }
}
