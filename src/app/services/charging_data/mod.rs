//! Charging station data sources
//!
//! The pipeline only needs raw station JSON for a bounding box. Where those
//! bytes come from is behind [`ChargingDataProvider`]:
//!
//! - [`command`] - runs the external `chargemeup` executable as a child process
//! - tests substitute canned payloads without spawning anything

pub mod command;

#[cfg(test)]
pub mod tests;

pub use command::CommandProvider;

use crate::Result;
use crate::app::models::{ApiKey, BoundingBox};
use async_trait::async_trait;

/// Source of raw charging station records
#[async_trait]
pub trait ChargingDataProvider: Send + Sync {
    /// Fetch the station records inside `bbox` as raw (expected JSON) bytes
    async fn fetch(&self, bbox: &BoundingBox, api_key: &ApiKey) -> Result<Vec<u8>>;
}
