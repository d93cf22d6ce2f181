//! CLI module for fleetdb
//!
//! Provides command-line interface for:
//! - serve: Load the seed dataset and run the HTTP server
//! - check: Validate a seed dataset and exit

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{boot_service, check, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
