//! Contact ETL Library
//!
//! A Rust library for cleaning tabular contact lists (CSV/XLSX exports) into a
//! reconciled, deduplicated dataset ready to load into a dialer or CRM.
//!
//! This library provides tools for:
//! - Reading CSV and single-sheet XLSX files into a uniform [`Dataset`]
//! - Field normalizers for names, addresses, emails, phones and states
//! - State / ZIP / area-code geographic reconciliation with mismatch correction
//! - Phone-number deduplication preserving first occurrence
//! - State and required-field validation with kept/dropped partitioning
//! - A stage orchestrator that threads the dataset and accumulates statistics
//! - CSV and summary report writers

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod dataset_io;
        pub mod field_normalizers;
        pub mod geo_reconciliation;
        pub mod record_processor;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ColumnSchema, Dataset, DropReason, DroppedRow, Field, Row};
pub use app::services::geo_reconciliation::GeoStats;
pub use app::services::record_processor::{ProcessingResult, RecordProcessor, Stage};
pub use config::Config;

/// Result type alias for contact ETL operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for contact ETL operations
///
/// Only structural failures are represented here. Malformed cell values are
/// never errors; they are blanked or dropped by the stage that owns them.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading or writing error
    #[error("CSV error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Spreadsheet (XLSX) reading error
    #[error("Spreadsheet error in file '{file}': {message}")]
    Spreadsheet { file: String, message: String },

    /// Input file type is not supported
    #[error("Unsupported file type '{extension}' (expected .csv or .xlsx)")]
    UnsupportedFormat { extension: String },

    /// Input file contained no header row
    #[error("Input file is empty: {path}")]
    EmptyInput { path: String },

    /// A stage was requested before any dataset was loaded
    #[error("No dataset loaded")]
    NoDatasetLoaded,

    /// Dataset has no columns to work with
    #[error("Dataset '{source_name}' has no header row")]
    EmptyDataset { source_name: String },

    /// A stage needs a column the dataset does not have
    #[error("Dataset '{source_name}' has no {field} column")]
    MissingColumn { field: String, source_name: String },

    /// Unknown pipeline stage name
    #[error("Unknown stage '{name}'. Available stages: {available}")]
    UnknownStage { name: String, available: String },

    /// Writer was handed a dataset without rows
    #[error("No data to write to {path}")]
    NothingToWrite { path: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Serialization of statistics or reports failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a spreadsheet error
    pub fn spreadsheet(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Spreadsheet {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    /// Create an empty input error
    pub fn empty_input(path: impl Into<String>) -> Self {
        Self::EmptyInput { path: path.into() }
    }

    /// Create an empty dataset error
    pub fn empty_dataset(source_name: impl Into<String>) -> Self {
        Self::EmptyDataset {
            source_name: source_name.into(),
        }
    }

    /// Create a missing column error
    pub fn missing_column(field: Field, source_name: impl Into<String>) -> Self {
        Self::MissingColumn {
            field: field.to_string(),
            source_name: source_name.into(),
        }
    }

    /// Create an unknown stage error listing the valid names
    pub fn unknown_stage(name: impl Into<String>) -> Self {
        Self::UnknownStage {
            name: name.into(),
            available: constants::STAGE_NAMES.join(", "),
        }
    }

    /// Create a nothing-to-write error
    pub fn nothing_to_write(path: impl Into<String>) -> Self {
        Self::NothingToWrite { path: path.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// True for errors caused by the shape of the dataset rather than the environment
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::NoDatasetLoaded | Self::EmptyDataset { .. } | Self::MissingColumn { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV processing failed".to_string(),
            source: Some(error),
        }
    }
}
