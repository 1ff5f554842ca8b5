//! Address to bounding box resolution
//!
//! Turns a human-readable address plus a search radius into the
//! [`BoundingBox`] used to query charging stations.
//!
//! # Architecture
//!
//! - [`BoundsResolver`] - the capability the pipeline depends on
//! - [`osm`] - OpenStreetMap implementation (Nominatim geocoding followed by
//!   an Overpass query for the surrounding drivable street network)
//! - [`FixedBoundsResolver`] - returns a preconfigured box; used for the
//!   `--bbox` option and as a test stub

pub mod osm;

#[cfg(test)]
pub mod tests;

pub use osm::OsmBoundsResolver;

use crate::Result;
use crate::app::models::BoundingBox;
use async_trait::async_trait;
use tracing::debug;

/// Resolves an address and radius into a bounding box
#[async_trait]
pub trait BoundsResolver: Send + Sync {
    /// Resolve `address` into the box covering everything within `radius_m` meters
    ///
    /// Fails with a resolution error when the address is unknown or the
    /// underlying service cannot be reached. No retries are attempted.
    async fn resolve(&self, address: &str, radius_m: f64) -> Result<BoundingBox>;
}

/// Resolver that ignores its input and returns a fixed box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedBoundsResolver {
    bbox: BoundingBox,
}

impl FixedBoundsResolver {
    pub fn new(bbox: BoundingBox) -> Self {
        Self { bbox }
    }
}

#[async_trait]
impl BoundsResolver for FixedBoundsResolver {
    async fn resolve(&self, address: &str, radius_m: f64) -> Result<BoundingBox> {
        debug!(
            "Using fixed bounding box {} (ignoring address '{}', radius {}m)",
            self.bbox, address, radius_m
        );
        Ok(self.bbox)
    }
}
