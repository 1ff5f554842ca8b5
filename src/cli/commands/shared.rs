//! Shared components for CLI commands
//!
//! This module contains logging setup and helpers used by more than one
//! command implementation.

use crate::Result;
use crate::app::models::BoundingBox;
use crate::app::services::bounds_resolver::{BoundsResolver, FixedBoundsResolver, OsmBoundsResolver};
use crate::cli::args::LoggingArgs;
use crate::config::{GeocoderConfig, SearchConfig};
use crate::constants::LOG_TARGET;
use tracing::debug;

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags. Calling this more
/// than once keeps the first subscriber.
pub fn setup_logging(args: &LoggingArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    let result = if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if result.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
    Ok(())
}

/// Resolver for a search: fixed when a box was given, OpenStreetMap otherwise
pub enum SearchResolver {
    Fixed(FixedBoundsResolver),
    Osm(OsmBoundsResolver),
}

impl SearchResolver {
    pub fn for_search(search: &SearchConfig, geocoder: &GeocoderConfig) -> Result<Self> {
        Ok(match search.bbox {
            Some(bbox) => Self::Fixed(FixedBoundsResolver::new(bbox)),
            None => Self::Osm(OsmBoundsResolver::new(geocoder)?),
        })
    }
}

#[async_trait::async_trait]
impl BoundsResolver for SearchResolver {
    async fn resolve(&self, address: &str, radius_m: f64) -> Result<BoundingBox> {
        match self {
            Self::Fixed(resolver) => resolver.resolve(address, radius_m).await,
            Self::Osm(resolver) => resolver.resolve(address, radius_m).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_twice_is_ok() {
        let args = LoggingArgs {
            verbose: 1,
            quiet: false,
        };

        assert!(setup_logging(&args).is_ok());
        assert!(setup_logging(&args).is_ok());
    }

    #[tokio::test]
    async fn test_search_resolver_uses_fixed_box() {
        let bbox: BoundingBox = "(42.3,-71.2),(42.4,-71.0)".parse().unwrap();
        let search = SearchConfig {
            bbox: Some(bbox),
            ..SearchConfig::default()
        };

        let resolver = SearchResolver::for_search(&search, &GeocoderConfig::default()).unwrap();
        assert!(matches!(resolver, SearchResolver::Fixed(_)));
        assert_eq!(resolver.resolve("ignored", 1.0).await.unwrap(), bbox);
    }

    #[test]
    fn test_search_resolver_uses_osm_without_box() {
        let resolver =
            SearchResolver::for_search(&SearchConfig::default(), &GeocoderConfig::default())
                .unwrap();
        assert!(matches!(resolver, SearchResolver::Osm(_)));
    }
}
