//! Command-line argument definitions for chargers_near
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::app::models::BoundingBox;
use crate::constants::{DEFAULT_ADDRESS, DEFAULT_FETCHER_PROGRAM, DEFAULT_RADIUS_METERS};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the EV charger summarizer
///
/// Finds the street network around an address, fetches the OpenChargeMap
/// charging stations inside it with `chargemeup`, and prints a summary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "chargers-near",
    version,
    about = "Summarize EV charging stations around an address",
    long_about = "Geocodes an address, derives a bounding box from the surrounding drivable street \
                  network, asks the chargemeup tool for OpenChargeMap stations inside that box, and \
                  prints one line per station followed by charger and connection totals."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Fetch and summarize charging stations around an address (main command)
    Summarize(SummarizeArgs),
    /// Resolve an address into the bounding box string accepted by chargemeup
    Bounds(BoundsArgs),
}

/// Search area options shared by all commands
#[derive(Debug, Clone, ClapArgs)]
pub struct SearchArgs {
    /// Address to search around
    #[arg(
        short = 'a',
        long = "address",
        value_name = "ADDRESS",
        default_value = DEFAULT_ADDRESS,
        help = "Address to search around"
    )]
    pub address: String,

    /// Search radius in meters
    ///
    /// The street network within this distance of the address determines the
    /// bounding box sent to chargemeup.
    #[arg(
        short = 'r',
        long = "radius",
        value_name = "METERS",
        default_value_t = DEFAULT_RADIUS_METERS,
        help = "Search radius around the address in meters"
    )]
    pub radius: f64,

    /// Explicit bounding box, skipping geocoding
    ///
    /// Format: "(lat1,lon1),(lat2,lon2)". Corners may be given in any order.
    #[arg(
        short = 'b',
        long = "bbox",
        value_name = "BBOX",
        help = "Bounding box \"(lat1,lon1),(lat2,lon2)\"; skips geocoding"
    )]
    pub bbox: Option<BoundingBox>,

    /// Nominatim base URL
    #[arg(long = "nominatim-url", value_name = "URL", help = "Nominatim base URL")]
    pub nominatim_url: Option<String>,

    /// Overpass interpreter URL
    #[arg(
        long = "overpass-url",
        value_name = "URL",
        help = "Overpass API interpreter URL"
    )]
    pub overpass_url: Option<String>,
}

/// Logging options shared by all commands
#[derive(Debug, Clone, ClapArgs)]
pub struct LoggingArgs {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides progress spinners.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl LoggingArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress spinners (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Arguments for the summarize command
#[derive(Debug, Clone, Parser)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// OpenChargeMap API key
    ///
    /// Falls back to the OCM_KEY environment variable.
    #[arg(
        short = 'k',
        long = "key",
        value_name = "KEY",
        help = "OpenChargeMap API key (default: $OCM_KEY)"
    )]
    pub key: Option<String>,

    /// OpenChargeMap server forwarded to chargemeup
    ///
    /// Falls back to the OCM_SERVER environment variable, then to chargemeup's own default.
    #[arg(
        short = 's',
        long = "server",
        value_name = "URL",
        help = "OpenChargeMap API server (default: $OCM_SERVER)"
    )]
    pub server: Option<String>,

    /// Charging-data executable
    #[arg(
        long = "fetcher",
        value_name = "PROGRAM",
        default_value = DEFAULT_FETCHER_PROGRAM,
        help = "Program used to fetch charging stations"
    )]
    pub fetcher: PathBuf,

    /// Kill the fetcher after this many seconds
    ///
    /// By default the fetcher may run indefinitely.
    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        help = "Timeout for the fetcher in seconds"
    )]
    pub timeout: Option<u64>,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Arguments for the bounds command
#[derive(Debug, Clone, Parser)]
pub struct BoundsArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Output format options
#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable fixed line format
    Human,
    /// JSON format for scripting
    Json,
}
