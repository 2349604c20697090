//! Command-line and environment configuration.
//!
//! [`Args`] is what `clap` parses; [`Config`] is the validated form the rest
//! of the program consumes.  Every flag can also be supplied through an
//! environment variable so the API key never has to appear in shell
//! history.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;

use crate::coordinator::SEARCH_DEBOUNCE;

/// Raised when the parsed arguments don't form a usable configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing NewsAPI key (pass --api-key or set NEWSAPI_API_KEY)")]
    MissingApiKey,
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

/// A terminal news reader for NewsAPI.org.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// NewsAPI.org API key.
    #[arg(long, env = "NEWSAPI_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,

    /// API base URL.
    #[arg(long, env = "NEWSAPI_BASE_URL", default_value = "https://newsapi.org")]
    pub base_url: String,

    /// Two-letter country code for top headlines.
    #[arg(long, default_value = "us")]
    pub country: String,

    /// Articles requested per page.
    #[arg(long, default_value_t = 20)]
    pub page_size: u32,

    /// Quiet period before a typed search is sent, in milliseconds.
    #[arg(long, default_value_t = SEARCH_DEBOUNCE.as_millis() as u64)]
    pub debounce_ms: u64,

    /// Whole-request HTTP timeout, in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Write logs to this file (logging is off otherwise).
    #[arg(long, env = "LIVESCROLL_NEWS_LOG")]
    pub log_file: Option<PathBuf>,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: Url,
    pub country: String,
    pub page_size: u32,
    pub debounce: Duration,
    pub timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let api_key = args.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let base_url = Url::parse(&args.base_url)
            .map_err(|e| ConfigError::InvalidValue("--base-url", e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue(
                "--base-url",
                format!("'{}' is not an http(s) base URL", args.base_url),
            ));
        }

        let country = args.country.trim().to_ascii_lowercase();
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidValue(
                "--country",
                format!("'{}' is not a two-letter country code", args.country),
            ));
        }

        // NewsAPI caps pageSize at 100.
        if !(1..=100).contains(&args.page_size) {
            return Err(ConfigError::InvalidValue(
                "--page-size",
                format!("{} is outside 1..=100", args.page_size),
            ));
        }

        Ok(Config {
            api_key,
            base_url,
            country,
            page_size: args.page_size,
            debounce: Duration::from_millis(args.debounce_ms),
            timeout: Duration::from_secs(args.timeout_secs),
            log_file: args.log_file,
        })
    }
}
