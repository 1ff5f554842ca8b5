//! Summarize command implementation
//!
//! Assembles configuration from arguments and environment, then runs the
//! charger pipeline with the OpenStreetMap resolver (or the fixed `--bbox`)
//! and the external `chargemeup` fetcher.

use super::shared::{SearchResolver, setup_logging};
use crate::Result;
use crate::app::models::ChargerReport;
use crate::app::services::bounds_resolver::BoundsResolver;
use crate::app::services::charging_data::{ChargingDataProvider, CommandProvider};
use crate::app::services::pipeline::ChargerPipeline;
use crate::cli::args::SummarizeArgs;
use crate::config::Config;
use std::io::Write;
use tracing::{debug, info};

/// Summarize command runner
pub async fn run_summarize(args: SummarizeArgs) -> Result<ChargerReport> {
    setup_logging(&args.logging)?;

    info!("Starting charging station summary");
    debug!("Summarize arguments: {:?}", SummarizeArgs { key: None, ..args.clone() });

    let config = Config::from_process_env(&args);
    execute(&config, args.logging.show_progress(), std::io::stdout()).await
}

/// Run the pipeline for an explicit configuration with the production collaborators
///
/// Validation happens in [`execute_with`], before either collaborator is used.
pub async fn execute<W: Write>(
    config: &Config,
    show_progress: bool,
    out: W,
) -> Result<ChargerReport> {
    let resolver = SearchResolver::for_search(&config.search, &config.geocoder)?;
    let provider = CommandProvider::from_config(&config.fetcher);

    execute_with(config, resolver, provider, show_progress, out).await
}

/// Run the pipeline for an explicit configuration with the given collaborators
///
/// Configuration errors (missing API key, bad fetcher settings, bad radius)
/// are raised before either collaborator is called; the search itself is
/// validated by the pipeline's resolve step.
pub async fn execute_with<R, P, W>(
    config: &Config,
    resolver: R,
    provider: P,
    show_progress: bool,
    out: W,
) -> Result<ChargerReport>
where
    R: BoundsResolver,
    P: ChargingDataProvider,
    W: Write,
{
    let api_key = config.api_key()?;
    config.fetcher.validate()?;

    ChargerPipeline::new(resolver, provider)
        .with_progress(show_progress)
        .run(&api_key, &config.search, config.output_format.clone(), out)
        .await
}
