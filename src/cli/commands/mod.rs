//! Command implementations for the contact ETL CLI
//!
//! Each subcommand lives in its own module; `shared` holds logging,
//! configuration loading and output path handling used across them.

pub mod preview;
pub mod process;
pub mod shared;
pub mod stages;

use crate::Result;
use crate::cli::args::Commands;
use tracing::info;

/// Dispatch a parsed subcommand to its handler
pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Process(process_args) => {
            let result = process::run_process(process_args)?;
            info!(
                "Finished: {} rows written of {} read",
                result.row_count(),
                result.stats.total_input
            );
            Ok(())
        }
        Commands::Preview(preview_args) => preview::run_preview(preview_args),
        Commands::Stages => stages::run_stages(),
    }
}
