//! Command-line interface parsing for SWAPI Console
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the immutable `Config` the core runs with.

use clap::Parser;
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;

/// Default API origin every endpoint is appended to
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api/";

/// Default per-fetch deadline in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default port for the trigger server
pub const DEFAULT_PORT: u16 = 3000;

/// Default upper bound for the rotating character/vehicle id
pub const DEFAULT_MAX_ID: u32 = 4;

/// Default first rotating id. swapi.dev numbers vehicles from 4, so a lower
/// start would 404 at the vehicle step and never advance.
pub const DEFAULT_START_ID: u32 = 4;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The timeout must be a positive number of milliseconds
    #[error("Invalid timeout: {0} ms. The timeout must be greater than zero")]
    InvalidTimeout(u64),

    /// The base URL is not an http(s) URL
    #[error("Invalid base URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidBaseUrl(String),

    /// An id bound was zero
    #[error("Invalid {name}: {value}. Ids start at 1")]
    InvalidId { name: &'static str, value: u32 },
}

/// SWAPI Console - fetch Star Wars API data on demand and print it
#[derive(Parser, Debug)]
#[command(name = "swapi-console")]
#[command(about = "Fetches Star Wars API resources when triggered over HTTP and prints them")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging and print a status summary after every cycle
    #[arg(short, long)]
    pub debug: bool,

    /// Per-request timeout in milliseconds
    #[arg(short, long, value_name = "MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Port for the trigger server
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address the trigger server binds to
    #[arg(long, value_name = "ADDR", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub bind: IpAddr,

    /// API origin that endpoints are appended to
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Highest character/vehicle id to fetch before the vehicle step stops
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_ID)]
    pub max_id: u32,

    /// First character/vehicle id to fetch
    #[arg(long, value_name = "N", default_value_t = DEFAULT_START_ID)]
    pub start_id: u32,

    /// Skip TLS certificate verification (unsafe, for broken mirrors only)
    #[arg(long)]
    pub insecure: bool,
}

/// Configuration derived from CLI arguments, fixed once the core starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Verbose logging plus a status summary after each cycle
    pub verbose: bool,
    /// Deadline for each outbound fetch
    pub timeout_ms: u64,
    /// API origin, always ending in `/`
    pub base_url: String,
    /// Where the trigger server listens
    pub listen: SocketAddr,
    /// Upper bound for the rotating id
    pub max_id: u32,
    /// Initial rotating id
    pub start_id: u32,
    /// Whether certificate verification is disabled
    pub insecure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            base_url: DEFAULT_BASE_URL.to_string(),
            listen: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
            max_id: DEFAULT_MAX_ID,
            start_id: DEFAULT_START_ID,
            insecure: false,
        }
    }
}

/// Validates a base URL and makes sure it ends with a slash.
///
/// # Returns
/// * `Ok(String)` with a trailing `/`
/// * `Err(CliError::InvalidBaseUrl)` if the scheme is not http or https
pub fn normalize_base_url(url: &str) -> Result<String, CliError> {
    let trimmed = url.trim();
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let has_host = trimmed
        .split_once("://")
        .map(|(_, rest)| !rest.is_empty() && !rest.starts_with('/'))
        .unwrap_or(false);
    if !has_scheme || !has_host {
        return Err(CliError::InvalidBaseUrl(url.to_string()));
    }

    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{}/", trimmed))
    }
}

impl Config {
    /// Creates a Config from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Config)` with validated settings
    /// * `Err(CliError)` if any value is out of range
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.timeout == 0 {
            return Err(CliError::InvalidTimeout(cli.timeout));
        }
        if cli.max_id == 0 {
            return Err(CliError::InvalidId {
                name: "max id",
                value: cli.max_id,
            });
        }
        if cli.start_id == 0 {
            return Err(CliError::InvalidId {
                name: "start id",
                value: cli.start_id,
            });
        }

        Ok(Config {
            verbose: cli.debug,
            timeout_ms: cli.timeout,
            base_url: normalize_base_url(&cli.base_url)?,
            listen: SocketAddr::new(cli.bind, cli.port),
            max_id: cli.max_id,
            start_id: cli.start_id,
            insecure: cli.insecure,
        })
    }
}
