//! Configuration management and validation.
//!
//! Provides the configuration structures for one summarizer run. Values are
//! layered: explicit CLI arguments win over environment variables, which win
//! over the defaults in [`crate::constants`]. Environment access goes through
//! a caller-supplied lookup so runs are reproducible in tests.

use crate::app::models::{ApiKey, BoundingBox};
use crate::cli::args::{OutputFormat, SearchArgs, SummarizeArgs};
use crate::constants::{
    API_KEY_ENV_VAR, DEFAULT_ADDRESS, DEFAULT_FETCHER_PROGRAM, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_NOMINATIM_URL, DEFAULT_OVERPASS_URL, DEFAULT_RADIUS_METERS, SERVER_ENV_VAR,
};
use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Where to search for charging stations
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Human-readable address to geocode
    pub address: String,

    /// Search radius around the address in meters
    pub radius_m: f64,

    /// Explicit bounding box; when set, geocoding is skipped
    pub bbox: Option<BoundingBox>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            radius_m: DEFAULT_RADIUS_METERS,
            bbox: None,
        }
    }
}

impl SearchConfig {
    pub fn from_args(args: &SearchArgs) -> Self {
        Self {
            address: args.address.clone(),
            radius_m: args.radius,
            bbox: args.bbox,
        }
    }

    /// Validate search parameters
    pub fn validate(&self) -> Result<()> {
        if self.bbox.is_some() {
            return Ok(());
        }

        if !self.radius_m.is_finite() || self.radius_m <= 0.0 {
            return Err(Error::configuration(format!(
                "Search radius must be a positive number of meters, got {}",
                self.radius_m
            )));
        }

        if self.address.trim().is_empty() {
            return Err(Error::configuration(
                "Address cannot be empty (or pass --bbox)".to_string(),
            ));
        }

        Ok(())
    }
}

/// Settings for the external charging-data executable
#[derive(Debug, Clone, PartialEq)]
pub struct FetcherConfig {
    /// Program to run (looked up on PATH when not absolute)
    pub program: PathBuf,

    /// OpenChargeMap server override passed as `-s`
    pub server: Option<String>,

    /// Kill the process after this long; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_FETCHER_PROGRAM),
            server: None,
            timeout: None,
        }
    }
}

impl FetcherConfig {
    /// Validate the program and timeout
    pub fn validate(&self) -> Result<()> {
        if self.program.as_os_str().is_empty() {
            return Err(Error::configuration(
                "Fetcher program cannot be empty".to_string(),
            ));
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(Error::configuration(
                "Fetcher timeout must be greater than 0 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Settings for the OpenStreetMap geocoding services
#[derive(Debug, Clone, PartialEq)]
pub struct GeocoderConfig {
    pub nominatim_url: String,
    pub overpass_url: String,
    pub http_timeout: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl GeocoderConfig {
    pub fn from_args(args: &SearchArgs) -> Self {
        let defaults = Self::default();
        Self {
            nominatim_url: args
                .nominatim_url
                .clone()
                .unwrap_or(defaults.nominatim_url),
            overpass_url: args.overpass_url.clone().unwrap_or(defaults.overpass_url),
            http_timeout: defaults.http_timeout,
        }
    }
}

/// Complete configuration for one summarizer run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Raw API key as found in args or environment; validated by [`Config::api_key`]
    pub api_key: Option<String>,
    pub search: SearchConfig,
    pub fetcher: FetcherConfig,
    pub geocoder: GeocoderConfig,
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            search: SearchConfig::default(),
            fetcher: FetcherConfig::default(),
            geocoder: GeocoderConfig::default(),
            output_format: OutputFormat::Human,
        }
    }
}

impl Config {
    /// Assemble configuration from CLI arguments and an environment lookup
    ///
    /// `env` is typically `|name| std::env::var(name).ok()`; tests pass a
    /// closure over a fixed map instead.
    pub fn from_args<F>(args: &SummarizeArgs, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = args.key.clone().or_else(|| env(API_KEY_ENV_VAR));
        let server = args
            .server
            .clone()
            .or_else(|| env(SERVER_ENV_VAR))
            .filter(|s| !s.trim().is_empty());

        let config = Self {
            api_key,
            search: SearchConfig::from_args(&args.search),
            fetcher: FetcherConfig {
                program: args.fetcher.clone(),
                server,
                timeout: args.timeout.map(Duration::from_secs),
            },
            geocoder: GeocoderConfig::from_args(&args.search),
            output_format: args.output_format.clone(),
        };

        debug!("Configuration assembled: {:?}", config.redacted());
        config
    }

    /// Assemble configuration using the process environment
    pub fn from_process_env(args: &SummarizeArgs) -> Self {
        Self::from_args(args, |name| std::env::var(name).ok())
    }

    /// Validated API key; absent and empty values are the same error
    pub fn api_key(&self) -> Result<ApiKey> {
        ApiKey::from_optional(self.api_key.as_deref())
    }

    /// Validate everything that can be checked without external calls
    pub fn validate(&self) -> Result<()> {
        self.api_key()?;
        self.search.validate()?;
        self.fetcher.validate()
    }

    /// Copy safe to log: the API key is masked
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|_| "***".to_string()),
            ..self.clone()
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the address and radius to search
    pub fn with_address(mut self, address: impl Into<String>, radius_m: f64) -> Self {
        self.search.address = address.into();
        self.search.radius_m = radius_m;
        self
    }

    /// Use an explicit bounding box instead of geocoding
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.search.bbox = Some(bbox);
        self
    }

    /// Set the fetcher program
    pub fn with_fetcher(mut self, program: impl Into<PathBuf>) -> Self {
        self.fetcher.program = program.into();
        self
    }

    /// Set the fetcher timeout
    pub fn with_fetcher_timeout(mut self, timeout: Duration) -> Self {
        self.fetcher.timeout = Some(timeout);
        self
    }

    /// Set the output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Args;
    use crate::cli::args::Commands;
    use clap::Parser;
    use std::collections::HashMap;

    fn summarize_args(argv: &[&str]) -> SummarizeArgs {
        let mut full = vec!["chargers-near", "summarize"];
        full.extend_from_slice(argv);
        match Args::parse_from(full).command {
            Some(Commands::Summarize(args)) => args,
            other => panic!("expected summarize command, got {:?}", other),
        }
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.search.address, DEFAULT_ADDRESS);
        assert_eq!(config.search.radius_m, DEFAULT_RADIUS_METERS);
        assert_eq!(config.fetcher.program, PathBuf::from("chargemeup"));
        assert!(config.fetcher.timeout.is_none());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_api_key_from_environment() {
        let args = summarize_args(&[]);
        let config = Config::from_args(&args, env_from(&[("OCM_KEY", "env-key")]));

        assert_eq!(config.api_key().unwrap().expose(), "env-key");
    }

    #[test]
    fn test_api_key_argument_overrides_environment() {
        let args = summarize_args(&["--key", "arg-key"]);
        let config = Config::from_args(&args, env_from(&[("OCM_KEY", "env-key")]));

        assert_eq!(config.api_key().unwrap().expose(), "arg-key");
    }

    #[test]
    fn test_missing_and_empty_api_key_are_configuration_errors() {
        let args = summarize_args(&[]);

        let missing = Config::from_args(&args, env_from(&[]));
        assert!(missing.api_key().unwrap_err().is_configuration());
        assert!(missing.validate().unwrap_err().is_configuration());

        let empty = Config::from_args(&args, env_from(&[("OCM_KEY", "")]));
        assert!(empty.api_key().unwrap_err().is_configuration());
    }

    #[test]
    fn test_server_layering() {
        let args = summarize_args(&[]);
        let config = Config::from_args(&args, env_from(&[("OCM_SERVER", "https://ocm.test")]));
        assert_eq!(config.fetcher.server.as_deref(), Some("https://ocm.test"));

        let args = summarize_args(&["--server", "https://arg.test"]);
        let config = Config::from_args(&args, env_from(&[("OCM_SERVER", "https://ocm.test")]));
        assert_eq!(config.fetcher.server.as_deref(), Some("https://arg.test"));

        let args = summarize_args(&[]);
        let config = Config::from_args(&args, env_from(&[("OCM_SERVER", "  ")]));
        assert!(config.fetcher.server.is_none());
    }

    #[test]
    fn test_timeout_and_fetcher_from_args() {
        let args = summarize_args(&["--fetcher", "/opt/bin/chargemeup", "--timeout", "30"]);
        let config = Config::from_args(&args, env_from(&[]));

        assert_eq!(config.fetcher.program, PathBuf::from("/opt/bin/chargemeup"));
        assert_eq!(config.fetcher.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_validate_radius() {
        let config = Config::default().with_api_key("k");
        assert!(config.validate().is_ok());

        let zero = config.clone().with_address("Somewhere", 0.0);
        assert!(zero.validate().unwrap_err().is_configuration());

        let negative = config.clone().with_address("Somewhere", -5.0);
        assert!(negative.validate().is_err());

        let nan = config.clone().with_address("Somewhere", f64::NAN);
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_validate_bbox_skips_radius_check() {
        let bbox: BoundingBox = "(42.3,-71.2),(42.4,-71.0)".parse().unwrap();
        let config = Config::default()
            .with_api_key("k")
            .with_address("", 0.0)
            .with_bbox(bbox);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = Config::default()
            .with_api_key("k")
            .with_fetcher_timeout(Duration::ZERO);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_redacted_hides_key() {
        let config = Config::default().with_api_key("secret-value");
        let logged = format!("{:?}", config.redacted());

        assert!(!logged.contains("secret-value"));
        assert_eq!(config.api_key.as_deref(), Some("secret-value"));
    }
}
