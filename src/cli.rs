//! CLI definitions for BrowserHands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// BrowserHands CLI.
#[derive(Parser)]
#[command(name = "browserhands")]
#[command(about = "Hosted browser automation task service")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/browserhands.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the server in foreground (default)
    Run {
        /// Server host, overrides the configured value
        #[arg(long)]
        host: Option<String>,

        /// Server port, overrides the configured value
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load and validate the configuration, then exit
    CheckConfig,
}
