//! Geographic reconciliation counters

use serde::{Deserialize, Serialize};

/// Counters produced by one reconciliation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoStats {
    /// ZIPs cleared because they contained letters
    pub zip_cleaned_letters: usize,
    /// ZIPs cleared because fewer than five digits remained
    pub zip_cleaned_too_short: usize,
    /// Missing ZIPs filled from the state's representative ZIP
    pub zip_populated: usize,
    /// Missing states filled from the ZIP's owning state
    pub state_populated: usize,
    /// States replaced because the ZIP belongs elsewhere
    pub mismatches_corrected: usize,
    /// Rows with neither state nor ZIP filled from the phone's area code
    pub fixed_from_area_code: usize,
}

impl GeoStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate another run's counters into this one
    pub fn merge(&mut self, other: &GeoStats) {
        self.zip_cleaned_letters += other.zip_cleaned_letters;
        self.zip_cleaned_too_short += other.zip_cleaned_too_short;
        self.zip_populated += other.zip_populated;
        self.state_populated += other.state_populated;
        self.mismatches_corrected += other.mismatches_corrected;
        self.fixed_from_area_code += other.fixed_from_area_code;
    }

    /// ZIPs cleared for either reason
    pub fn zips_cleared(&self) -> usize {
        self.zip_cleaned_letters + self.zip_cleaned_too_short
    }

    /// Every counted change
    pub fn total_changes(&self) -> usize {
        self.zips_cleared()
            + self.zip_populated
            + self.state_populated
            + self.mismatches_corrected
            + self.fixed_from_area_code
    }

    pub fn summary(&self) -> String {
        format!(
            "ZIPs cleared: {} (letters {}, too short {}) | ZIPs populated: {} | \
             States populated: {} | Mismatches corrected: {} | From area code: {}",
            self.zips_cleared(),
            self.zip_cleaned_letters,
            self.zip_cleaned_too_short,
            self.zip_populated,
            self.state_populated,
            self.mismatches_corrected,
            self.fixed_from_area_code
        )
    }
}
