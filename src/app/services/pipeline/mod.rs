//! End-to-end charger summary pipeline
//!
//! Runs the stages in order, stopping at the first failure:
//!
//! 1. **Resolve** the search area into a bounding box ([`BoundsResolver`])
//! 2. **Fetch** raw station records for the box ([`ChargingDataProvider`])
//! 3. **Parse** the payload into station records
//! 4. **Aggregate** connector counts
//! 5. **Report** to the supplied writer
//!
//! Nothing is cached between runs: two runs against collaborators returning
//! the same data produce the same output.

#[cfg(test)]
pub mod tests;

use crate::Result;
use crate::app::models::{ApiKey, BoundingBox, ChargerReport};
use crate::app::services::bounds_resolver::BoundsResolver;
use crate::app::services::charging_data::ChargingDataProvider;
use crate::app::services::station_report::{Reporter, parse_stations, summarize};
use crate::cli::args::OutputFormat;
use crate::config::SearchConfig;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Pipeline over pluggable bounds and data collaborators
pub struct ChargerPipeline<R, P> {
    resolver: R,
    provider: P,
    show_progress: bool,
}

impl<R, P> ChargerPipeline<R, P>
where
    R: BoundsResolver,
    P: ChargingDataProvider,
{
    pub fn new(resolver: R, provider: P) -> Self {
        Self {
            resolver,
            provider,
            show_progress: false,
        }
    }

    /// Show a spinner on stderr while waiting on external services
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Resolve the search area into a bounding box
    pub async fn resolve_bounds(&self, search: &SearchConfig) -> Result<BoundingBox> {
        resolve_search(&self.resolver, search, self.show_progress).await
    }

    /// Resolve, fetch, parse and aggregate without writing anything
    pub async fn collect(&self, api_key: &ApiKey, search: &SearchConfig) -> Result<ChargerReport> {
        let start_time = Instant::now();

        let bbox = self.resolve_bounds(search).await?;
        info!("Searching for charging stations in {}", bbox);

        let spinner = create_spinner(self.show_progress, "Fetching charging stations...");
        let payload = self.provider.fetch(&bbox, api_key).await;
        spinner.finish_and_clear();
        let payload = payload?;
        debug!("Received {} bytes of station data", payload.len());

        let stations = parse_stations(&payload)?;
        match search.bbox {
            Some(_) => info!("Found {} charging stations", stations.len()),
            None => info!(
                "Found {} charging stations within {:.0} meters of '{}'",
                stations.len(),
                search.radius_m,
                search.address
            ),
        }

        let report = summarize(&stations).with_bounding_box(bbox);
        debug!(
            "Pipeline finished in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );

        Ok(report)
    }

    /// Run the full pipeline and write the report to `out`
    pub async fn run<W: Write>(
        &self,
        api_key: &ApiKey,
        search: &SearchConfig,
        format: OutputFormat,
        out: W,
    ) -> Result<ChargerReport> {
        let report = self.collect(api_key, search).await?;
        Reporter::new(out, format).write_report(&report)?;
        Ok(report)
    }
}

/// Validate the search and resolve it into a bounding box
///
/// Shared by the full pipeline and the `bounds` command.
pub async fn resolve_search<R: BoundsResolver>(
    resolver: &R,
    search: &SearchConfig,
    show_progress: bool,
) -> Result<BoundingBox> {
    search.validate()?;

    let spinner = create_spinner(show_progress, "Resolving street network bounds...");
    let bbox = resolver.resolve(&search.address, search.radius_m).await;
    spinner.finish_and_clear();

    bbox
}

/// Spinner for an indeterminate wait; hidden when progress is disabled
pub fn create_spinner(show_progress: bool, message: &str) -> ProgressBar {
    if !show_progress {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
