//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the mock server using clap.

pub mod commands;

use crate::config::{load_config, LoggingConfig};
use clap::{Parser, Subcommand};

/// RWS Mock - Rave Web Services stand-in for integration tests
#[derive(Parser, Debug)]
#[command(name = "rws-mock")]
#[command(version, about, long_about = None)]
#[command(author = "RWS Mock Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "rws-mock.toml", env = "RWS_MOCK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RWS_MOCK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the mock Rave Web Services API
    Serve(commands::serve::ServeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Log level and logging settings to initialize with
    ///
    /// Only `serve` reads them from the configuration file; the other commands log
    /// to the console. `--log-level` always wins.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        let from_file = match self.command {
            Commands::Serve(_) => load_config(&self.config).ok(),
            _ => None,
        };

        let (file_level, logging) = match from_file {
            Some(config) => (config.application.log_level, config.logging),
            None => ("info".to_string(), LoggingConfig::default()),
        };

        (self.log_level.clone().unwrap_or(file_level), logging)
    }
}
