//! Configuration management for the contact ETL pipeline
//!
//! Provides the layered configuration used by the CLI: built-in defaults, then
//! an optional TOML file, then `CONTACT_ETL_*` environment variables, then
//! command-line overrides applied by the command layer.

use crate::app::services::record_processor::{Stage, StageList};
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_OUTPUT_SUFFIX, DEFAULT_STEPS, ENV_PREFIX,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Which stages run, and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Stage names in execution order (`drop-columns:9,10` style allowed)
    pub steps: Vec<String>,
    /// Show a progress bar per stage
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS.iter().map(|step| step.to_string()).collect(),
            show_progress: true,
        }
    }
}

/// Where and what to write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for output files; next to the input when unset
    pub output_dir: Option<PathBuf>,
    /// Appended to the input file stem for the cleaned CSV
    pub file_suffix: String,
    /// Also write the text summary report
    pub write_report: bool,
    /// Also write the dropped rows with their reasons
    pub write_dropped: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            file_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            write_report: false,
            write_dropped: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of error, warn, info, debug, trace
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Default config file location: `~/.config/contact-etl/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::configuration("Could not determine home directory"))?;
        Ok(home
            .join(".config")
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }

    /// Parse a TOML config file; missing sections and keys take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file '{}': {}", path.display(), e))
        })
    }

    /// Parse TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::configuration(e.to_string()))
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::serialization(e.to_string()))
    }

    /// Defaults, then the config file (if any), then environment variables
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading config file {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `CONTACT_ETL_*` variables from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_env_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` to fetch variables by full name
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{ENV_PREFIX}{name}")).filter(|value| !value.trim().is_empty())
        };

        if let Some(steps) = var("STEPS") {
            let list: StageList = steps.parse()?;
            debug!("Steps overridden from environment: {}", list);
            self.pipeline.steps = list.stages.iter().map(Stage::to_string).collect();
        }
        if let Some(dir) = var("OUTPUT_DIR") {
            self.output.output_dir = Some(PathBuf::from(dir.trim()));
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.logging.level = level.trim().to_ascii_lowercase();
        }
        Ok(())
    }

    /// Parse the configured steps into stages
    pub fn stages(&self) -> Result<Vec<Stage>> {
        self.pipeline
            .steps
            .iter()
            .map(|step| step.parse::<Stage>())
            .collect()
    }

    /// Check every setting for consistency
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.steps.is_empty() {
            return Err(Error::configuration("At least one pipeline step is required"));
        }
        self.stages()?;

        let suffix = &self.output.file_suffix;
        if suffix.trim().is_empty() {
            return Err(Error::configuration("Output file suffix cannot be empty"));
        }
        if suffix.contains('/') || suffix.contains('\\') {
            return Err(Error::configuration(format!(
                "Output file suffix '{}' must not contain path separators",
                suffix
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(Error::configuration(format!(
                "Unknown log level '{}'. Expected one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.stages().unwrap(), Stage::default_pipeline());
        assert_eq!(config.output.file_suffix, "_cleaned");
        assert!(config.pipeline.show_progress);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [pipeline]
            steps = ["drop-columns:9,10", "clean-names", "final-validate"]

            [output]
            write_report = true
            "#,
        )
        .unwrap();

        assert_eq!(
            config.stages().unwrap(),
            vec![
                Stage::DropColumns(vec![9, 10]),
                Stage::CleanNames,
                Stage::FinalValidate
            ]
        );
        assert!(config.output.write_report);
        assert!(!config.output.write_dropped);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        assert!(matches!(
            Config::from_toml("[pipeline\nsteps = 3"),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_load_layered_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = Config::load_layered(Some(&path)).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let result = Config::from_file(Path::new("/no/such/contact-etl.toml"));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("CONTACT_ETL_STEPS", "drop-columns:12,clean-states,validate-states"),
            ("CONTACT_ETL_OUTPUT_DIR", "/tmp/out"),
            ("CONTACT_ETL_LOG_LEVEL", "INFO"),
        ]);
        let mut config = Config::default();

        config
            .apply_env_overrides_from(|key| vars.get(key).cloned())
            .unwrap();

        assert_eq!(
            config.pipeline.steps,
            vec!["drop-columns:12", "clean-states", "validate-states"]
        );
        assert_eq!(config.output.output_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(config.logging.level, "info");
        config.validate().unwrap();
    }

    #[test]
    fn test_blank_env_values_ignored_and_bad_steps_rejected() {
        let blank = env(&[("CONTACT_ETL_STEPS", "  ")]);
        let mut config = Config::default();
        config
            .apply_env_overrides_from(|key| blank.get(key).cloned())
            .unwrap();
        assert_eq!(config, Config::default());

        let bad = env(&[("CONTACT_ETL_STEPS", "wash-everything")]);
        assert!(config
            .apply_env_overrides_from(|key| bad.get(key).cloned())
            .is_err());
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = Config::default();
        config.pipeline.steps = vec!["clean-names".into(), "bogus".into()];
        assert!(matches!(config.validate(), Err(Error::UnknownStage { .. })));

        let mut config = Config::default();
        config.pipeline.steps.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.file_suffix = "../escape".into();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "loud".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let text = Config::default().to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), Config::default());
    }

    #[test]
    fn test_default_config_path_shape() {
        if let Ok(path) = Config::default_config_path() {
            assert!(path.ends_with("contact-etl/config.toml"));
        }
    }
}
