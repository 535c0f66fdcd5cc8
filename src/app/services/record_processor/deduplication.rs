//! Phone-number deduplication
//!
//! Rows are compared on their dedup-normalized phone number (digits only, US
//! country code removed, no length check). The first row carrying a number is
//! kept with its phone cell rewritten to the normalized form; later rows with
//! the same number are dropped. Comparison is exact string equality.

use crate::app::models::Dataset;
use crate::app::services::field_normalizers::normalize_phone_for_dedup;
use indicatif::ProgressBar;
use std::collections::HashSet;
use tracing::{debug, info};

/// Output of the dedup stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupResult {
    /// Rows that survived, in input order
    pub dataset: Dataset,
    /// Number of rows dropped as repeats
    pub duplicates: usize,
}

/// Drop rows whose phone number repeats an earlier row's
///
/// Rows too short to hold the phone column and rows without a usable phone are
/// always kept unchanged.
///
/// # Arguments
///
/// * `dataset` - Input dataset (not modified)
/// * `phone_column` - Column holding the phone number
/// * `progress_bar` - Optional progress bar advanced once per row
pub fn dedup_phones(
    dataset: &Dataset,
    phone_column: usize,
    progress_bar: Option<&ProgressBar>,
) -> DedupResult {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(dataset.row_count());
    let mut duplicates = 0;

    for (index, row) in dataset.rows.iter().enumerate() {
        if let Some(pb) = progress_bar {
            pb.inc(1);
        }

        let Some(raw_phone) = row.cell(phone_column) else {
            kept.push(row.clone());
            continue;
        };

        let phone = normalize_phone_for_dedup(raw_phone);
        if phone.is_empty() {
            kept.push(row.clone());
            continue;
        }

        if seen.contains(&phone) {
            debug!("Row {}: duplicate phone {} dropped", index, phone);
            duplicates += 1;
            continue;
        }

        kept.push(row.clone().with_cell(phone_column, phone.as_str()));
        seen.insert(phone);
    }

    info!(
        "Deduplication complete: removed {} duplicate phones, {} rows remaining",
        duplicates,
        kept.len()
    );

    DedupResult {
        dataset: dataset.with_rows(kept),
        duplicates,
    }
}
