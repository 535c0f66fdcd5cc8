//! Field normalizers for contact records
//!
//! Pure cleaning rules applied one field at a time. Each rule exists in two
//! forms: a cell-level function (`&str -> String`) and a dataset-level stage
//! that applies it to the columns chosen by the caller and reports
//! [`NormalizerStats`].
//!
//! - [`name`] - first/middle/last name cleaning
//! - [`address`] - address line character filtering
//! - [`email`] - numeric-only email removal
//! - [`phone`] - strict and dedup-lenient phone normalization
//! - [`state`] - two-letter state code shaping
//!
//! Normalizers never fail on malformed cells and are idempotent: running one
//! twice gives the same dataset as running it once.

pub mod address;
pub mod email;
pub mod name;
pub mod phone;
pub mod state;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use address::{clean_address, clean_addresses};
pub use email::{clean_email, clean_emails};
pub use name::{classify_name, clean_name, clean_names};
pub use phone::{normalize_phone, normalize_phone_for_dedup, normalize_phones};
pub use state::{clean_state, clean_states};
pub use stats::{CellChange, NormalizerStats};

use crate::app::models::Dataset;

/// Apply a cell-level rule to the given columns of every row
///
/// Cells that a short row does not have are skipped; the row is kept as is.
pub(crate) fn normalize_columns<F>(
    dataset: &Dataset,
    columns: &[usize],
    rule: F,
) -> (Dataset, NormalizerStats)
where
    F: Fn(&str) -> String,
{
    classify_columns(dataset, columns, |original| {
        let value = rule(original);
        let change = CellChange::between(original, &value);
        (value, change)
    })
}

/// Like [`normalize_columns`] for rules that report their own [`CellChange`]
pub(crate) fn classify_columns<F>(
    dataset: &Dataset,
    columns: &[usize],
    rule: F,
) -> (Dataset, NormalizerStats)
where
    F: Fn(&str) -> (String, CellChange),
{
    let mut stats = NormalizerStats::new();

    let cleaned = dataset.map_rows(|row| {
        let mut row = row.clone();
        for &column in columns {
            let Some(original) = row.cell(column) else {
                continue;
            };
            let (value, change) = rule(original);
            stats.record_change(change);
            row.set_cell(column, value);
        }
        row
    });

    (cleaned, stats)
}
