//! Bounds command implementation
//!
//! Resolves the search area and prints the bounding box in the
//! `(lat1,lon1),(lat2,lon2)` form accepted by `chargemeup -b`.

use super::shared::{SearchResolver, setup_logging};
use crate::app::models::BoundingBox;
use crate::app::services::pipeline::resolve_search;
use crate::cli::args::BoundsArgs;
use crate::config::{GeocoderConfig, SearchConfig};
use crate::{Error, Result};
use std::io::Write;
use tracing::info;

/// Bounds command runner
pub async fn run_bounds(args: BoundsArgs) -> Result<BoundingBox> {
    setup_logging(&args.logging)?;

    let search = SearchConfig::from_args(&args.search);
    let geocoder = GeocoderConfig::from_args(&args.search);
    let resolver = SearchResolver::for_search(&search, &geocoder)?;

    let bbox = resolve_search(&resolver, &search, args.logging.show_progress()).await?;

    info!("Resolved bounding box: {}", bbox);
    write_bounds(std::io::stdout(), &bbox)?;
    Ok(bbox)
}

/// Print the box as a fetcher query string
pub fn write_bounds<W: Write>(mut out: W, bbox: &BoundingBox) -> Result<()> {
    writeln!(out, "{}", bbox.to_query_string())
        .and_then(|_| out.flush())
        .map_err(|e| Error::io("Failed to write bounding box", e))
}
