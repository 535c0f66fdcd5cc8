//! State code shaping

use crate::app::models::Dataset;
use tracing::info;

use super::{NormalizerStats, normalize_columns};

/// Uppercase and trim; keep only values that are exactly two ASCII letters
///
/// This checks shape, not membership: `"ZZ"` survives. Membership is the
/// state validator's job.
pub fn clean_state(value: &str) -> String {
    let upper = value.trim().to_ascii_uppercase();
    if upper.len() == 2 && upper.chars().all(|c| c.is_ascii_alphabetic()) {
        upper
    } else {
        String::new()
    }
}

/// Clean the state column of every row
pub fn clean_states(dataset: &Dataset, column: usize) -> (Dataset, NormalizerStats) {
    let (cleaned, stats) = normalize_columns(dataset, &[column], clean_state);
    info!(
        "State cleaning complete: {} uppercased, {} invalid states cleared",
        stats.altered, stats.blanked
    );
    (cleaned, stats)
}
