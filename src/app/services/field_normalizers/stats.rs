//! Per-normalizer counters

use serde::{Deserialize, Serialize};

/// What a rule did to one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellChange {
    Unchanged,
    Altered,
    Blanked,
}

impl CellChange {
    /// Classify by comparing the value before and after cleaning
    ///
    /// A non-empty value cleaned to nothing counts as blanked. Rules with more
    /// than one way to empty a cell classify for themselves instead.
    pub fn between(original: &str, cleaned: &str) -> Self {
        let trimmed = original.trim();
        if cleaned.is_empty() && !trimmed.is_empty() {
            CellChange::Blanked
        } else if cleaned != trimmed {
            CellChange::Altered
        } else {
            CellChange::Unchanged
        }
    }
}

/// What a field normalizer did to the cells it looked at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerStats {
    /// Cells present in the rows (short rows contribute nothing)
    pub examined: usize,
    /// Cells rewritten by the rule
    pub altered: usize,
    /// Non-empty cells cleared as invalid
    pub blanked: usize,
}

impl NormalizerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one cell given its value before and after cleaning
    pub fn record(&mut self, original: &str, cleaned: &str) {
        self.record_change(CellChange::between(original, cleaned));
    }

    /// Count one cell whose change is already classified
    pub fn record_change(&mut self, change: CellChange) {
        self.examined += 1;
        match change {
            CellChange::Unchanged => {}
            CellChange::Altered => self.altered += 1,
            CellChange::Blanked => self.blanked += 1,
        }
    }

    /// Cells whose value changed meaningfully
    pub fn changed(&self) -> usize {
        self.altered + self.blanked
    }

    /// Accumulate another run's counters into this one
    pub fn merge(&mut self, other: &NormalizerStats) {
        self.examined += other.examined;
        self.altered += other.altered;
        self.blanked += other.blanked;
    }
}
