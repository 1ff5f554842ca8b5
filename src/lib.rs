//! chargers_near Library
//!
//! A Rust library for summarizing electric-vehicle charging stations around
//! an address.
//!
//! This library provides tools for:
//! - Resolving an address and radius into a bounding box of the surrounding
//!   drivable street network
//! - Fetching charging station records for that box from the external
//!   `chargemeup` tool
//! - Parsing station records and aggregating connector counts
//! - Reporting per-station lines and a summary in a fixed text format

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod bounds_resolver;
        pub mod charging_data;
        pub mod pipeline;
        pub mod station_report;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ApiKey, BoundingBox, ChargerReport, ChargingStation, GeoPoint};
pub use config::Config;

/// Result type alias for chargers_near
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the charger summarizer pipeline
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration (API key, radius, bounding box syntax)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Address could not be resolved into a bounding box
    #[error("Address resolution error: {message}")]
    Resolution {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// External charging-data process failed or produced unreadable output
    #[error("External process error: {message}")]
    Execution {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Station payload was not valid JSON or lacked required fields
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Report output could not be written
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a resolution error without an underlying HTTP error
    pub fn resolution(message: impl Into<String>) -> Self {
        Self::Resolution {
            message: message.into(),
            source: None,
        }
    }

    /// Create a resolution error caused by an HTTP failure
    pub fn resolution_http(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Resolution {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create an execution error without an underlying I/O error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
            source: None,
        }
    }

    /// Create an execution error caused by an I/O failure
    pub fn execution_io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Execution {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, source: Option<serde_json::Error>) -> Self {
        Self::Parse {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether this error was raised before any external work was attempted
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse {
            message: "JSON decoding failed".to_string(),
            source: Some(error),
        }
    }
}
