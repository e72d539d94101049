//! Runtime configuration
//!
//! Built from command-line arguments (with environment fallbacks) and checked
//! once at start-up.

use anyhow::{Context, Result, bail};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/wordle";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Validated settings shared by every mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: Url,
    pub timeout: Duration,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
}

impl Config {
    /// Validate raw settings
    ///
    /// # Errors
    /// Returns an error if the endpoint is not an http(s) URL or the timeout
    /// is zero.
    pub fn new(
        endpoint: &str,
        timeout_secs: u64,
        log_file: Option<PathBuf>,
        verbosity: u8,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid solver endpoint '{endpoint}'"))?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            bail!(
                "Solver endpoint must use http or https, got '{}'",
                endpoint.scheme()
            );
        }

        if timeout_secs == 0 {
            bail!("Timeout must be at least one second");
        }

        Ok(Self {
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
            log_file,
            log_level: level_for(verbosity),
        })
    }
}

/// Map `-v` occurrences to a log level
#[must_use]
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_is_valid() {
        let config = Config::new(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, None, 0).unwrap();
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.log_level, Level::WARN);
    }

    #[test]
    fn rejects_bad_endpoints() {
        assert!(Config::new("not a url", 10, None, 0).is_err());
        assert!(Config::new("ftp://solver.example/wordle", 10, None, 0).is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(Config::new(DEFAULT_ENDPOINT, 0, None, 0).is_err());
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(1), Level::INFO);
        assert_eq!(level_for(2), Level::DEBUG);
        assert_eq!(level_for(9), Level::TRACE);
    }
}
