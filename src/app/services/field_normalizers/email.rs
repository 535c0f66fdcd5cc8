//! Email cleaning

use crate::app::models::Dataset;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use super::{NormalizerStats, normalize_columns};

static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid pattern"));

/// Clear emails that are nothing but digits; leave everything else alone
pub fn clean_email(value: &str) -> String {
    if DIGITS_ONLY.is_match(value.trim()) {
        String::new()
    } else {
        value.to_string()
    }
}

/// Clean the email column of every row
pub fn clean_emails(dataset: &Dataset, column: usize) -> (Dataset, NormalizerStats) {
    let (cleaned, stats) = normalize_columns(dataset, &[column], clean_email);
    info!(
        "Email cleaning complete: {} numeric-only emails removed",
        stats.blanked
    );
    (cleaned, stats)
}
