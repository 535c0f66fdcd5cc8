//! Address line cleaning

use crate::app::models::Dataset;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use super::{NormalizerStats, normalize_columns};

static ADDRESS_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9\s#/\-.]").expect("valid address pattern"));

/// Remove every character that is not alphanumeric, whitespace or `# / - .`
pub fn clean_address(value: &str) -> String {
    ADDRESS_DISALLOWED.replace_all(value, "").into_owned()
}

/// Clean the address column of every row
pub fn clean_addresses(dataset: &Dataset, column: usize) -> (Dataset, NormalizerStats) {
    let (cleaned, stats) = normalize_columns(dataset, &[column], clean_address);
    info!(
        "Address cleaning complete: {} of {} addresses altered",
        stats.changed(),
        stats.examined
    );
    (cleaned, stats)
}
