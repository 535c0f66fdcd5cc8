//! Phone number normalization
//!
//! Two variants share the digit extraction. The strict form used by the
//! `normalize-phones` stage only accepts 10-digit results; the lenient form
//! used for duplicate detection keeps whatever digits remain.

use crate::app::models::Dataset;
use crate::constants::{PHONE_DIGITS, PHONE_DIGITS_WITH_COUNTRY_CODE};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use super::{NormalizerStats, normalize_columns};

/// Anything but an ASCII digit
static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").expect("valid pattern"));

/// Strip non-digits and drop a leading US country code
pub fn normalize_phone_for_dedup(value: &str) -> String {
    let digits = NON_DIGIT.replace_all(value, "");
    match digits.strip_prefix('1') {
        Some(rest) if digits.len() == PHONE_DIGITS_WITH_COUNTRY_CODE => rest.to_string(),
        _ => digits.into_owned(),
    }
}

/// Normalize to exactly ten digits, or return an empty string
pub fn normalize_phone(value: &str) -> String {
    let digits = normalize_phone_for_dedup(value);
    if digits.len() == PHONE_DIGITS {
        digits
    } else {
        String::new()
    }
}

/// Strictly normalize the phone column of every row
pub fn normalize_phones(dataset: &Dataset, column: usize) -> (Dataset, NormalizerStats) {
    let (cleaned, stats) = normalize_columns(dataset, &[column], normalize_phone);
    info!(
        "Phone normalization complete: {} reformatted, {} invalid numbers cleared",
        stats.altered, stats.blanked
    );
    (cleaned, stats)
}
