//! CLI argument definitions using clap
//!
//! Commands:
//! - fleetdb serve [--config <path>] [--vehicles <path>] [--host <host>] [--port <port>]
//! - fleetdb check --vehicles <path>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// fleetdb - An in-memory vehicle catalog served over a REST API
#[derive(Parser, Debug)]
#[command(name = "fleetdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the seed dataset and start the HTTP server
    Serve(ServeArgs),

    /// Validate a seed dataset and exit
    Check {
        /// Path to the vehicles JSON file
        #[arg(long, env = "FILE_PATH_VEHICLES_JSON")]
        vehicles: PathBuf,
    },
}

/// Flags for `serve`; each overrides the matching config file value
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the vehicles JSON file
    #[arg(long, env = "FILE_PATH_VEHICLES_JSON")]
    pub vehicles: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "SERVER_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "SERVER_PORT")]
    pub port: Option<u16>,

    /// Minimum log severity (trace, info, warn, error, fatal)
    #[arg(long, env = "FLEETDB_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
