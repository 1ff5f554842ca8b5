//! Command implementations for the chargers_near CLI
//!
//! Each command is implemented in its own module:
//! - `summarize`: full pipeline from address to charger summary
//! - `bounds`: address resolution only, printing the fetcher bbox string

pub mod bounds;
pub mod shared;
pub mod summarize;

use crate::Result;
use crate::cli::args::Commands;

/// Main command runner
///
/// Dispatches to the appropriate subcommand handler.
pub async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Summarize(summarize_args) => {
            summarize::run_summarize(summarize_args).await.map(|_| ())
        }
        Commands::Bounds(bounds_args) => bounds::run_bounds(bounds_args).await.map(|_| ()),
    }
}
