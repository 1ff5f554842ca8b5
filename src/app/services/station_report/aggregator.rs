//! Connector aggregation

use crate::app::models::{ChargerReport, ChargerTotals, ChargingStation, StationSummary};
use tracing::debug;

/// Summarize stations in input order
///
/// Each station's connector count is the sum of its connections' quantities
/// (missing quantities count as zero). Only stations with a positive count
/// contribute to the totals; no sorting or deduplication is applied.
pub fn summarize(stations: &[ChargingStation]) -> ChargerReport {
    let mut totals = ChargerTotals::new();
    let mut summaries = Vec::with_capacity(stations.len());

    for station in stations {
        let summary = StationSummary::from(station);
        totals.record(summary.num_chargers);
        summaries.push(summary);
    }

    debug!(
        "Aggregated {} stations: {} with chargers, {} connections",
        summaries.len(),
        totals.total_chargers,
        totals.total_connections
    );

    ChargerReport {
        bounding_box: None,
        stations: summaries,
        totals,
    }
}
