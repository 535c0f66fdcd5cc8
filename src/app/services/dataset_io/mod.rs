//! Dataset input and output
//!
//! Thin adapters around the pipeline: readers that turn CSV or single-sheet
//! XLSX files into a [`crate::Dataset`], CSV writers for the cleaned and dropped
//! rows, and the plain-text summary report.

pub mod reader;
pub mod report;
pub mod writer;

pub use reader::{read_csv, read_dataset, read_xlsx};
pub use report::ReportSummary;
pub use writer::{default_output_path, derived_path, write_csv, write_dropped};
