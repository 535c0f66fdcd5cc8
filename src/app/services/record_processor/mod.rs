//! Record processing module for contact datasets
//!
//! This module provides the pipeline that takes a loaded contact dataset
//! through a caller-chosen sequence of cleaning, reconciliation, deduplication
//! and validation stages, threading the dataset from one stage to the next.
//!
//! # Architecture
//!
//! - [`processor`] - Main RecordProcessor struct and pipeline orchestration
//! - [`stage`] - Stage names, parsing and descriptions
//! - [`deduplication`] - Phone-number deduplication
//! - [`validation`] - State and required-field validators
//! - [`stats`] - Processing statistics and result structures
//!
//! # Processing Pipeline
//!
//! The default order is:
//!
//! 1. **Field cleaning**: addresses, names, emails, phones, states
//! 2. **Geo reconciliation**: fill and correct state / ZIP pairs
//! 3. **Deduplication**: keep the first row for each phone number
//! 4. **Validation**: drop rows with invalid states or missing required fields
//!
//! Every stage returns a new dataset. Per-cell problems are never errors; the
//! only failures are structural (no dataset, no headers, a required column the
//! dataset does not have).

pub mod deduplication;
pub mod processor;
pub mod stage;
pub mod stats;
pub mod validation;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use deduplication::{DedupResult, dedup_phones};
pub use processor::RecordProcessor;
pub use stage::{Stage, StageList};
pub use stats::{ProcessingResult, ProcessingStats, StageOutcome};
pub use validation::{
    RequiredColumns, ValidationResult, final_validate, is_allowed_state, validate_states,
};
