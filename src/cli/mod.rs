//! CLI module for the API key dashboard
//!
//! Provides subcommands for:
//! - `serve`: the HTTP dashboard, validation endpoint and playground
//! - `generate`: print a fresh key without storing it
//! - `validate`, `protected`, `logout`: the file-backed session gate

pub mod key;
pub mod serve;
pub mod session;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// API Key Dashboard - issue, manage and validate API keys
#[derive(Parser)]
#[command(name = "api-key-dashboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Print a freshly generated key
    Generate,

    /// Validate a key against active keys and remember it on success
    Validate {
        /// Full key value, e.g. tvly-...
        key: String,
    },

    /// Check whether a validated key has been remembered
    Protected,

    /// Forget the remembered key
    Logout,
}

/// Load `.env`, configuration and the log subscriber
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
