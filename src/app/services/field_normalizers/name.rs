//! Person name cleaning

use crate::app::models::Dataset;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use super::{CellChange, NormalizerStats, classify_columns};

static NAME_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z\s\-']").expect("valid name pattern"));

/// Clean a single name value
///
/// A name containing any ASCII digit is treated as garbage and cleared
/// entirely. Otherwise everything except ASCII letters, whitespace, hyphens
/// and apostrophes is removed.
pub fn clean_name(value: &str) -> String {
    classify_name(value).0
}

/// Clean a name and say why it changed
///
/// Only a digit blanks a name. A value made entirely of symbols also ends up
/// empty but counts as altered.
pub fn classify_name(value: &str) -> (String, CellChange) {
    let trimmed = value.trim();
    if trimmed.chars().any(|c| c.is_ascii_digit()) {
        return (String::new(), CellChange::Blanked);
    }

    let cleaned = NAME_DISALLOWED.replace_all(trimmed, "").trim().to_string();
    let change = if cleaned == trimmed {
        CellChange::Unchanged
    } else {
        CellChange::Altered
    };
    (cleaned, change)
}

/// Clean the given name columns (first, middle, last) of every row
pub fn clean_names(dataset: &Dataset, columns: &[usize]) -> (Dataset, NormalizerStats) {
    let (cleaned, stats) = classify_columns(dataset, columns, classify_name);
    info!(
        "Name cleaning complete: {} cells examined, {} altered for symbols, {} blanked for digits",
        stats.examined, stats.altered, stats.blanked
    );
    (cleaned, stats)
}
