//! Station record parsing, aggregation and reporting
//!
//! # Architecture
//!
//! - [`parser`] - decodes the raw payload into [`ChargingStation`] records
//! - [`aggregator`] - per-station connector counts and running totals
//! - [`reporter`] - fixed-format text or JSON output
//!
//! The whole payload is decoded before anything is reported, so a malformed
//! record never leaves a partial report behind.
//!
//! # Example Usage
//!
//! ```rust
//! use chargers_near::app::services::station_report::{parse_stations, summarize, Reporter};
//! use chargers_near::cli::args::OutputFormat;
//!
//! # fn example() -> chargers_near::Result<()> {
//! let payload = br#"[{"ID":1,"AddressInfo":{"Latitude":42.0,"Longitude":-71.0},
//!                    "Connections":[{"Quantity":2},{"Quantity":3}]}]"#;
//!
//! let stations = parse_stations(payload)?;
//! let report = summarize(&stations);
//!
//! let mut out = Vec::new();
//! Reporter::new(&mut out, OutputFormat::Human).write_report(&report)?;
//! assert_eq!(report.totals.total_connections, 5);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! [`ChargingStation`]: crate::app::models::ChargingStation

pub mod aggregator;
pub mod parser;
pub mod reporter;

#[cfg(test)]
pub mod tests;

pub use aggregator::summarize;
pub use parser::parse_stations;
pub use reporter::{Reporter, format_station_line, format_totals_line};
