//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading and output path resolution
//! used by more than one command.

use crate::app::services::dataset_io::{default_output_path, derived_path};
use crate::cli::args::ProcessArgs;
use crate::config::Config;
use crate::constants::{DROPPED_OUTPUT_SUFFIX, LOG_TARGET, REPORT_OUTPUT_SUFFIX};
use crate::{Error, Result, Stage};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over `level`. Quiet mode uses the compact
/// formatter without timestamps.
pub fn setup_logging(level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, level)));

    let initialized = if quiet {
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

    match initialized {
        Ok(()) => debug!("Logging initialized at level: {}", level),
        Err(_) => debug!("Logging already initialized; keeping existing subscriber"),
    }
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &ProcessArgs) -> Result<Config> {
    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    match config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file found, using defaults and environment variables"),
    }

    let mut config = Config::load_layered(config_file)?;
    apply_cli_overrides(&mut config, args)?;
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
///
/// Flags only ever switch features on; an absent flag keeps the file or
/// environment setting.
pub fn apply_cli_overrides(config: &mut Config, args: &ProcessArgs) -> Result<()> {
    if let Some(stages) = args.get_steps() {
        config.pipeline.steps = stages.iter().map(Stage::to_string).collect();
    }
    if let Some(output_dir) = &args.output_dir {
        config.output.output_dir = Some(output_dir.clone());
    }

    config.pipeline.show_progress = config.pipeline.show_progress && args.show_progress();
    config.output.write_report |= args.report;
    config.output.write_dropped |= args.dropped;

    if args.quiet || args.verbose > 0 {
        config.logging.level = args.get_log_level().to_string();
    }

    Ok(())
}

/// Every file a process run may write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub cleaned: PathBuf,
    pub dropped: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

impl OutputPaths {
    /// Resolve output locations from the input path and configuration
    ///
    /// An explicit `output` wins for the cleaned CSV; the dropped-row file and
    /// report are derived from the input name in the output directory.
    pub fn resolve(input: &Path, output: Option<&Path>, config: &Config) -> Self {
        let output_dir = config.output.output_dir.as_deref();

        let cleaned = match output {
            Some(path) => path.to_path_buf(),
            None => default_output_path(input, output_dir, &config.output.file_suffix),
        };
        let dropped = config
            .output
            .write_dropped
            .then(|| derived_path(input, output_dir, DROPPED_OUTPUT_SUFFIX, "csv"));
        let report = config
            .output
            .write_report
            .then(|| derived_path(input, output_dir, REPORT_OUTPUT_SUFFIX, "txt"));

        Self {
            cleaned,
            dropped,
            report,
        }
    }

    /// Create the parent directories of every output file
    pub fn prepare_directories(&self) -> Result<()> {
        let files = std::iter::once(&self.cleaned)
            .chain(self.dropped.iter())
            .chain(self.report.iter());

        for file in files {
            if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
                if !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        Error::io(
                            format!("Failed to create output directory {}", parent.display()),
                            e,
                        )
                    })?;
                    debug!("Created output directory {}", parent.display());
                }
            }
        }
        Ok(())
    }
}
