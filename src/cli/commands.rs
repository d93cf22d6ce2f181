//! CLI command implementations
//!
//! Boot sequence for `serve`:
//! 1. Resolve configuration (file, then env/flags)
//! 2. Load the seed dataset; any failure aborts before the store exists
//! 3. Build the store and service
//! 4. Start the HTTP server

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::catalog::{InMemoryVehicleRepository, JsonVehicleLoader, VehicleLoader, VehicleService};
use crate::http_server::config::{default_host, default_port};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event, log_event_with_fields, Event, Logger, Severity};

use super::args::{Command, ServeArgs};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Seed dataset (required, from file or flag)
    #[serde(default)]
    pub vehicles_path: Option<PathBuf>,

    /// Bind host (default "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port (default 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (default: any)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vehicles_path: None,
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Build the effective configuration: file values, then flag/env overrides
    pub fn resolve(args: &ServeArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(vehicles) = &args.vehicles {
            config.vehicles_path = Some(vehicles.clone());
        }
        if let Some(host) = &args.host {
            config.host = host.clone();
        }
        if let Some(port) = args.port {
            config.port = port;
        }
        if let Some(level) = &args.log_level {
            config.log_level = level.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.vehicles_path.is_none() {
            return Err(CliError::config_error(
                "vehicles_path is required (--vehicles or FILE_PATH_VEHICLES_JSON)",
            ));
        }

        if self.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        if self.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        self.severity()?;
        Ok(())
    }

    /// Parsed log level
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(CliError::config_error)
    }

    /// Seed dataset path
    pub fn vehicles_path(&self) -> CliResult<&Path> {
        self.vehicles_path
            .as_deref()
            .ok_or_else(|| CliError::config_error("vehicles_path is required"))
    }

    /// HTTP settings derived from this config
    pub fn to_http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(&args),
        Command::Check { vehicles } => check(&vehicles),
    }
}

/// Load the seed dataset and build the service over it
///
/// Nothing is returned unless the whole dataset loaded.
pub fn boot_service(vehicles_path: &Path) -> CliResult<VehicleService> {
    let loader = JsonVehicleLoader::new(vehicles_path);
    let seed = loader.load().map_err(|e| {
        log_event_with_fields(Event::SeedFailed, &[("error", &e.to_string())]);
        CliError::seed_failed(&e)
    })?;

    let count = seed.len();
    let repository = InMemoryVehicleRepository::with_seed(seed);
    log_event_with_fields(
        Event::SeedLoaded,
        &[
            ("path", &vehicles_path.display().to_string()),
            ("vehicles", &count.to_string()),
        ],
    );

    Ok(VehicleService::new(Arc::new(repository)))
}

/// Start the HTTP server
pub fn serve(args: &ServeArgs) -> CliResult<()> {
    log_event(Event::BootStart);

    let config = Config::resolve(args)?;
    Logger::set_min_severity(config.severity()?);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("addr", &config.to_http_config().socket_addr())],
    );

    let service = boot_service(config.vehicles_path()?)?;
    let server = HttpServer::with_config(config.to_http_config(), service);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Validate a seed dataset and report its size
pub fn check(vehicles_path: &Path) -> CliResult<()> {
    let loader = JsonVehicleLoader::new(vehicles_path);
    match loader.load() {
        Ok(seed) => write_response(json!({
            "path": vehicles_path.display().to_string(),
            "vehicles": seed.len(),
        })),
        Err(e) => {
            let err = CliError::seed_failed(&e);
            write_error(err.code().code(), err.message())?;
            Err(err)
        }
    }
}
