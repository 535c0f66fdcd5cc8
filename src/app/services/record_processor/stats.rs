//! Processing statistics and result structures for the cleaning pipeline
//!
//! This module provides types for tracking what each stage changed, how many
//! rows were removed and why, and for handing the final dataset to writers.

use crate::app::models::{Dataset, DropReason, DroppedRow};
use crate::app::services::field_normalizers::NormalizerStats;
use crate::app::services::geo_reconciliation::GeoStats;
use serde::Serialize;

use super::stage::Stage;

/// Statistics accumulated across every stage of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingStats {
    /// Rows in the dataset when it was loaded
    pub total_input: usize,
    /// Rows in the dataset after the last stage
    pub final_output: usize,
    /// Number of stages applied
    pub stages_applied: usize,
    /// Columns removed by drop-columns
    pub columns_dropped: usize,
    /// Address cleaning counters
    pub addresses: NormalizerStats,
    /// Name cleaning counters (all name columns together)
    pub names: NormalizerStats,
    /// Email cleaning counters
    pub emails: NormalizerStats,
    /// Phone normalization counters
    pub phones: NormalizerStats,
    /// State cleaning counters
    pub states: NormalizerStats,
    /// Geographic reconciliation counters
    pub geo: GeoStats,
    /// Rows removed as duplicate phones
    pub duplicates_removed: usize,
    /// Rows removed for a state outside the 50 states and DC
    pub dropped_invalid_state: usize,
    /// Rows removed for an empty phone
    pub dropped_missing_phone: usize,
    /// Rows removed for empty first and last names
    pub dropped_missing_name: usize,
    /// Rows removed for being too short to validate
    pub dropped_malformed: usize,
}

impl ProcessingStats {
    /// Create new empty processing statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count dropped rows under their reasons
    pub fn record_drops(&mut self, dropped: &[DroppedRow]) {
        for row in dropped {
            match row.reason {
                DropReason::InvalidState => self.dropped_invalid_state += 1,
                DropReason::MissingPhone => self.dropped_missing_phone += 1,
                DropReason::MissingName => self.dropped_missing_name += 1,
                DropReason::Malformed => self.dropped_malformed += 1,
            }
        }
    }

    /// Rows removed by validators (duplicates excluded)
    pub fn validation_drops(&self) -> usize {
        self.dropped_invalid_state
            + self.dropped_missing_phone
            + self.dropped_missing_name
            + self.dropped_malformed
    }

    /// Every row removed for any reason
    pub fn total_removed(&self) -> usize {
        self.validation_drops() + self.duplicates_removed
    }

    /// Calculate the share of input rows that survived as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_input == 0 {
            100.0
        } else {
            (self.final_output as f64 / self.total_input as f64) * 100.0
        }
    }

    /// Check if most rows survived (>50% kept)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > 50.0
    }

    /// Get summary of processing pipeline statistics
    pub fn summary(&self) -> String {
        format!(
            "Processing Summary: {} -> {} rows ({:.1}% kept) | Duplicates: {} | \
             Invalid state: {} | Missing phone: {} | Missing name: {} | Malformed: {} | \
             Geo changes: {}",
            self.total_input,
            self.final_output,
            self.success_rate(),
            self.duplicates_removed,
            self.dropped_invalid_state,
            self.dropped_missing_phone,
            self.dropped_missing_name,
            self.dropped_malformed,
            self.geo.total_changes()
        )
    }
}

/// What one applied stage did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageOutcome {
    pub stage: Stage,
    pub rows_before: usize,
    pub rows_after: usize,
    /// Human-readable one-line result
    pub message: String,
}

impl StageOutcome {
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}

/// Result of a complete pipeline run
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// Final dataset
    pub dataset: Dataset,
    /// Accumulated statistics
    pub stats: ProcessingStats,
    /// Rows removed by validators, in the order they were removed
    pub dropped: Vec<DroppedRow>,
    /// One entry per applied stage
    pub outcomes: Vec<StageOutcome>,
}

impl ProcessingResult {
    /// Get the number of rows in the final dataset
    pub fn row_count(&self) -> usize {
        self.dataset.row_count()
    }

    /// Check if processing was successful based on statistics
    pub fn is_successful(&self) -> bool {
        self.stats.is_successful()
    }

    /// Get processing success rate
    pub fn success_rate(&self) -> f64 {
        self.stats.success_rate()
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        self.stats.summary()
    }
}
