//! Process command implementation
//!
//! Reads the input file, runs the configured pipeline, writes the cleaned CSV
//! plus the optional dropped-row file and summary report, then prints the run
//! summary.

use super::shared::{OutputPaths, load_configuration, setup_logging};
use crate::app::services::dataset_io::{ReportSummary, read_dataset, write_csv, write_dropped};
use crate::app::services::record_processor::{ProcessingResult, RecordProcessor};
use crate::cli::args::{OutputFormat, ProcessArgs};
use crate::{Config, Error, Result};
use colored::*;
use indicatif::HumanDuration;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Files actually written by a run, with their row counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WrittenFiles {
    pub cleaned: Option<(PathBuf, usize)>,
    pub dropped: Option<(PathBuf, usize)>,
    pub report: Option<PathBuf>,
}

/// Process command runner
///
/// 1. Load configuration and set up logging
/// 2. Read the input file
/// 3. Run the pipeline stages
/// 4. Write outputs (skipped for a dry run)
/// 5. Print the run summary
pub fn run_process(args: ProcessArgs) -> Result<ProcessingResult> {
    args.validate()?;
    let config = load_configuration(&args)?;
    process_with_config(&args, &config)
}

/// Run the pipeline for already validated arguments and a resolved config
pub fn process_with_config(args: &ProcessArgs, config: &Config) -> Result<ProcessingResult> {
    let start_time = Instant::now();
    setup_logging(&config.logging.level, args.quiet)?;

    info!("Starting contact ETL");
    debug!("Command line arguments: {:?}", args);
    debug!("Loaded configuration: {:?}", config);

    let stages = config.stages()?;
    let dataset = read_dataset(&args.input)?;
    let source = dataset.source.clone();

    let result = RecordProcessor::process(dataset, &stages, config.pipeline.show_progress)?;
    info!("{}", result.summary());
    if !result.is_successful() {
        warn!(
            "Only {:.1}% of input rows from {} survived the pipeline",
            result.success_rate(),
            source
        );
    }

    let paths = OutputPaths::resolve(&args.input, args.output.as_deref(), config);
    let written = if args.dry_run {
        info!("Dry run - no files will be written");
        WrittenFiles::default()
    } else {
        write_outputs(&result, &paths, &source)?
    };

    generate_final_report(
        args.output_format,
        &result,
        &source,
        &written,
        start_time.elapsed(),
    )?;

    Ok(result)
}

/// Write the cleaned CSV and whichever extras are enabled
fn write_outputs(
    result: &ProcessingResult,
    paths: &OutputPaths,
    source: &str,
) -> Result<WrittenFiles> {
    paths.prepare_directories()?;
    let mut written = WrittenFiles::default();

    match write_csv(&result.dataset, &paths.cleaned) {
        Ok(rows) => written.cleaned = Some((paths.cleaned.clone(), rows)),
        Err(Error::NothingToWrite { .. }) => {
            warn!("No rows survived the pipeline; cleaned file not written")
        }
        Err(e) => return Err(e),
    }

    if let Some(path) = &paths.dropped {
        if result.dropped.is_empty() {
            info!("No rows were dropped; skipping {}", path.display());
        } else {
            let rows = write_dropped(&result.dropped, &result.dataset.headers, path)?;
            written.dropped = Some((path.clone(), rows));
        }
    }

    if let Some(path) = &paths.report {
        ReportSummary::from_stats(&result.stats, source).write_report(path)?;
        written.report = Some(path.clone());
    }

    Ok(written)
}

/// Print the run summary in the requested format
fn generate_final_report(
    format: OutputFormat,
    result: &ProcessingResult,
    source: &str,
    written: &WrittenFiles,
    elapsed: Duration,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for line in human_report_lines(result, source, written, elapsed) {
                println!("{}", line);
            }
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", json_report(result, source, written, elapsed)?);
            Ok(())
        }
    }
}

fn human_report_lines(
    result: &ProcessingResult,
    source: &str,
    written: &WrittenFiles,
    elapsed: Duration,
) -> Vec<String> {
    let stats = &result.stats;
    let mut lines = vec![
        String::new(),
        format!("{}", "Contact ETL Complete".bright_green().bold()),
        format!("  {} {}", "Source:".bright_cyan(), source.bright_white()),
        format!(
            "  {} {}",
            "Rows read:".bright_cyan(),
            stats.total_input.to_string().bright_white()
        ),
        format!(
            "  {} {} ({:.1}%)",
            "Rows kept:".bright_cyan(),
            stats.final_output.to_string().bright_white().bold(),
            stats.success_rate()
        ),
    ];

    if stats.total_removed() > 0 {
        lines.push(format!(
            "  {} {}",
            "Rows removed:".bright_red(),
            stats.total_removed().to_string().bright_red().bold()
        ));
    }

    lines.push(String::new());
    lines.push(format!("{}", "Stages".bright_green().bold()));
    for outcome in &result.outcomes {
        lines.push(format!(
            "  {:<16} {:>7} -> {:<7} {}",
            outcome.stage.name().bright_cyan(),
            outcome.rows_before,
            outcome.rows_after,
            outcome.message
        ));
    }

    lines.push(String::new());
    let files: Vec<String> = [
        written
            .cleaned
            .as_ref()
            .map(|(path, rows)| format!("{} ({} rows)", path.display(), rows)),
        written
            .dropped
            .as_ref()
            .map(|(path, rows)| format!("{} ({} dropped rows)", path.display(), rows)),
        written
            .report
            .as_ref()
            .map(|path| path.display().to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    if files.is_empty() {
        lines.push(format!("{}", "No files written".bright_yellow()));
    } else {
        lines.push(format!("{}", "Output Files".bright_green().bold()));
        lines.extend(files.into_iter().map(|file| format!("  {}", file)));
    }

    lines.push(format!(
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(elapsed)
    ));
    lines
}

/// JSON summary for machine consumption
fn json_report(
    result: &ProcessingResult,
    source: &str,
    written: &WrittenFiles,
    elapsed: Duration,
) -> Result<String> {
    let report = serde_json::json!({
        "source": source,
        "stats": result.stats,
        "success_rate": result.success_rate(),
        "stages": result.outcomes,
        "outputs": written,
        "processing_time_seconds": elapsed.as_secs_f64(),
    });

    serde_json::to_string_pretty(&report).map_err(|e| Error::serialization(e.to_string()))
}
