//! Command-line argument definitions for contact ETL
//!
//! This module defines the complete CLI interface using clap derive API.

use crate::app::services::record_processor::{Stage, StageList};
use crate::constants::DEFAULT_PREVIEW_ROWS;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the contact list ETL tool
///
/// Cleans tabular contact exports (CSV or single-sheet XLSX) into a
/// reconciled, deduplicated CSV ready to load into a dialer or CRM.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "contact-etl",
    version,
    about = "Clean, geo-reconcile, deduplicate and validate contact lists",
    long_about = "A command-line ETL tool for contact lists exported as CSV or XLSX. \
                  Normalizes names, addresses, emails, phones and states, reconciles \
                  state / ZIP / area code, removes duplicate phone numbers and drops \
                  rows that cannot be loaded, then writes a cleaned CSV and an optional \
                  summary report."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the cleaning pipeline over a contact file (main command)
    Process(ProcessArgs),
    /// Show indexed headers and the first rows of a file
    Preview(PreviewArgs),
    /// List the available pipeline stages
    Stages,
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Input contact file (.csv or .xlsx)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output path for the cleaned CSV
    ///
    /// Defaults to `<input stem>_cleaned.csv` next to the input, or in the
    /// configured output directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output path for the cleaned CSV"
    )]
    pub output: Option<PathBuf>,

    /// Pipeline stages to run, in order (comma-separated list)
    #[arg(
        short = 's',
        long = "steps",
        value_name = "LIST",
        help = "Comma-separated list of stages to run",
        long_help = "Pipeline stages to run, in order, as a comma-separated list.\n\
                     Column indices for drop-columns follow it directly:\n  \
                     drop-columns:9,10,12,clean-names,final-validate\n\n\
                     Run `contact-etl stages` to list every stage."
    )]
    pub steps: Option<StageList>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/contact-etl/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Directory for derived output files
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        help = "Directory for the cleaned CSV, report and dropped rows"
    )]
    pub output_dir: Option<PathBuf>,

    /// Write the text summary report next to the cleaned CSV
    #[arg(long = "report", help = "Write a summary report file")]
    pub report: bool,

    /// Write removed rows with their drop reason
    #[arg(long = "dropped", help = "Write removed rows to a separate CSV")]
    pub dropped: bool,

    /// Run the pipeline and report, but write nothing
    #[arg(
        long = "dry-run",
        help = "Run the pipeline without writing any output files"
    )]
    pub dry_run: bool,

    /// Disable progress bars
    #[arg(long = "no-progress", help = "Disable progress bars")]
    pub no_progress: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the run summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the preview command
#[derive(Debug, Clone, Parser)]
pub struct PreviewArgs {
    /// Input contact file (.csv or .xlsx)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Number of rows to show
    #[arg(
        short = 'n',
        long = "rows",
        value_name = "ROWS",
        default_value_t = DEFAULT_PREVIEW_ROWS,
        help = "Number of rows to show"
    )]
    pub rows: usize,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }
        if !self.input.is_file() {
            return Err(Error::configuration(format!(
                "Input path is not a file: {}",
                self.input.display()
            )));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(output) = &self.output {
            if output == &self.input {
                return Err(Error::configuration(
                    "Output path must differ from the input path",
                ));
            }
        }

        Ok(())
    }

    /// Stages given on the command line, if any
    pub fn get_steps(&self) -> Option<Vec<Stage>> {
        self.steps.as_ref().map(|list| list.stages.clone())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            log_level_for(self.verbose)
        }
    }

    /// Check if we should show progress bars
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.no_progress
    }
}

impl PreviewArgs {
    pub fn validate(&self) -> Result<()> {
        if !self.input.is_file() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }
        if self.rows == 0 {
            return Err(Error::configuration("Preview row count must be at least 1"));
        }
        Ok(())
    }

    pub fn get_log_level(&self) -> &'static str {
        log_level_for(self.verbose)
    }
}

fn log_level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

impl Default for ProcessArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: None,
            steps: None,
            config_file: None,
            output_dir: None,
            report: false,
            dropped: false,
            dry_run: false,
            no_progress: false,
            verbose: 0,
            quiet: false,
            output_format: OutputFormat::Human,
        }
    }
}
