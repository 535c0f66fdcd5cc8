//! Row validation stages
//!
//! Validators partition the input into kept and dropped rows. Kept rows pass
//! through unchanged and in order; every input row ends up in exactly one of
//! the two lists.

use crate::app::models::{ColumnSchema, Dataset, DropReason, DroppedRow, Field, Row};
use crate::constants::ALLOWED_STATES;
use crate::Result;
use indicatif::ProgressBar;
use tracing::{debug, info};

/// Output of a validation stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Rows that passed
    pub dataset: Dataset,
    /// Rows that failed, with the reason
    pub dropped: Vec<DroppedRow>,
    /// Same as `dropped.len()`
    pub drop_count: usize,
}

impl ValidationResult {
    fn new(dataset: Dataset, dropped: Vec<DroppedRow>) -> Self {
        let drop_count = dropped.len();
        Self {
            dataset,
            dropped,
            drop_count,
        }
    }

    pub fn kept_count(&self) -> usize {
        self.dataset.row_count()
    }

    /// Number of rows dropped for `reason`
    pub fn count_for(&self, reason: DropReason) -> usize {
        self.dropped.iter().filter(|row| row.reason == reason).count()
    }
}

/// Columns the final validator checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredColumns {
    pub first_name: usize,
    pub last_name: usize,
    pub phone: usize,
}

impl RequiredColumns {
    pub fn from_schema(schema: &ColumnSchema, source_name: &str) -> Result<Self> {
        Ok(Self {
            first_name: schema.require(Field::FirstName, source_name)?,
            last_name: schema.require(Field::LastName, source_name)?,
            phone: schema.require(Field::Phone, source_name)?,
        })
    }

    fn width(&self) -> usize {
        self.first_name.max(self.last_name).max(self.phone) + 1
    }
}

/// True when `state` (after trim/uppercase) is one of the 50 states or DC
pub fn is_allowed_state(state: &str) -> bool {
    let state = state.trim().to_uppercase();
    ALLOWED_STATES.contains(&state.as_str())
}

/// Drop rows whose state is not a US state or DC
pub fn validate_states(
    dataset: &Dataset,
    state_column: usize,
    progress_bar: Option<&ProgressBar>,
) -> ValidationResult {
    let result = partition(dataset, progress_bar, |row| match row.cell(state_column) {
        None => Some(DropReason::Malformed),
        Some(state) if !is_allowed_state(state) => Some(DropReason::InvalidState),
        Some(_) => None,
    });

    info!(
        "State validation complete: kept {}, dropped {} ({} invalid, {} malformed)",
        result.kept_count(),
        result.drop_count,
        result.count_for(DropReason::InvalidState),
        result.count_for(DropReason::Malformed)
    );
    result
}

/// Drop rows missing a phone number or both names
///
/// Checks run in order: too short, missing phone, missing names. A row failing
/// several checks is counted once under the first.
pub fn final_validate(
    dataset: &Dataset,
    columns: RequiredColumns,
    progress_bar: Option<&ProgressBar>,
) -> ValidationResult {
    let width = columns.width();
    let result = partition(dataset, progress_bar, |row| {
        if row.len() < width {
            return Some(DropReason::Malformed);
        }
        if row.cell_or_empty(columns.phone).trim().is_empty() {
            return Some(DropReason::MissingPhone);
        }
        let first = row.cell_or_empty(columns.first_name).trim();
        let last = row.cell_or_empty(columns.last_name).trim();
        if first.is_empty() && last.is_empty() {
            return Some(DropReason::MissingName);
        }
        None
    });

    info!(
        "Final validation complete: kept {}, dropped {} (missing phone {}, missing name {}, malformed {})",
        result.kept_count(),
        result.drop_count,
        result.count_for(DropReason::MissingPhone),
        result.count_for(DropReason::MissingName),
        result.count_for(DropReason::Malformed)
    );
    result
}

fn partition<F>(dataset: &Dataset, progress_bar: Option<&ProgressBar>, check: F) -> ValidationResult
where
    F: Fn(&Row) -> Option<DropReason>,
{
    let mut kept = Vec::with_capacity(dataset.row_count());
    let mut dropped = Vec::new();

    for (index, row) in dataset.rows.iter().enumerate() {
        if let Some(pb) = progress_bar {
            pb.inc(1);
        }
        match check(row) {
            Some(reason) => {
                debug!("Row {} dropped: {}", index, reason);
                dropped.push(DroppedRow::new(reason, row.clone()));
            }
            None => kept.push(row.clone()),
        }
    }

    ValidationResult::new(dataset.with_rows(kept), dropped)
}
