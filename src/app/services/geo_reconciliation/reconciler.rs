//! Row-by-row state / ZIP / area-code reconciliation

use crate::app::models::{ColumnSchema, Dataset, Field, Row};
use crate::constants::{AREA_CODE_DIGITS, ZIP_DIGITS};
use crate::Result;
use tracing::{debug, info};

use super::lookup::{GeoTables, geo_tables};
use super::stats::GeoStats;

/// Columns the reconciler reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoColumns {
    pub state: usize,
    pub zip: usize,
    pub phone: usize,
}

impl GeoColumns {
    /// Locate the state, postal code and phone columns
    pub fn from_schema(schema: &ColumnSchema, source_name: &str) -> Result<Self> {
        Ok(Self {
            state: schema.require(Field::State, source_name)?,
            zip: schema.require(Field::PostalCode, source_name)?,
            phone: schema.require(Field::Phone, source_name)?,
        })
    }

    /// Minimum row length holding all three columns
    pub fn width(&self) -> usize {
        self.state.max(self.zip).max(self.phone) + 1
    }
}

/// Result of cleaning one ZIP cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZipCleaning {
    /// Five digits kept (extra digits truncated)
    Kept(String),
    /// Nothing there to begin with
    Empty,
    /// Cleared because the value contained letters
    HadLetters,
    /// Cleared because fewer than five digits remained
    TooShort,
}

impl ZipCleaning {
    /// The value to write back into the cell
    pub fn value(&self) -> &str {
        match self {
            ZipCleaning::Kept(zip) => zip,
            _ => "",
        }
    }
}

/// Clean a raw ZIP cell: reject letters, keep digits, require at least five
pub fn clean_zip(value: &str) -> ZipCleaning {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return ZipCleaning::Empty;
    }
    if trimmed.chars().any(char::is_alphabetic) {
        return ZipCleaning::HadLetters;
    }

    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < ZIP_DIGITS {
        return ZipCleaning::TooShort;
    }
    ZipCleaning::Kept(digits[..ZIP_DIGITS].to_string())
}

/// Cross-check and fill in state and ZIP for every row
///
/// Rows shorter than the three geo columns are padded first. Returns a new
/// dataset; the input is left untouched.
pub fn reconcile_geo(dataset: &Dataset, columns: GeoColumns) -> (Dataset, GeoStats) {
    let tables = geo_tables();
    let mut stats = GeoStats::new();

    let rows = dataset
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| reconcile_row(index, row, columns, tables, &mut stats))
        .collect();

    info!(
        "Geo reconciliation complete for {} rows: {}",
        dataset.row_count(),
        stats.summary()
    );

    (dataset.with_rows(rows), stats)
}

fn reconcile_row(
    index: usize,
    row: &Row,
    columns: GeoColumns,
    tables: &GeoTables,
    stats: &mut GeoStats,
) -> Row {
    let mut row = row.clone().padded_to(columns.width());

    let mut state = row.cell_or_empty(columns.state).trim().to_uppercase();
    let mut zip = match clean_zip(row.cell_or_empty(columns.zip)) {
        ZipCleaning::Kept(zip) => zip,
        ZipCleaning::Empty => String::new(),
        ZipCleaning::HadLetters => {
            stats.zip_cleaned_letters += 1;
            String::new()
        }
        ZipCleaning::TooShort => {
            stats.zip_cleaned_too_short += 1;
            String::new()
        }
    };

    let corrected = correct_mismatch(index, &mut state, &zip, tables);
    if corrected {
        stats.mismatches_corrected += 1;
    } else {
        fill_gaps(&mut state, &mut zip, row.cell_or_empty(columns.phone), tables, stats);
    }

    row.set_cell(columns.state, state);
    row.set_cell(columns.zip, zip);
    row
}

/// Replace the state when a valid ZIP belongs to a different one
fn correct_mismatch(index: usize, state: &mut String, zip: &str, tables: &GeoTables) -> bool {
    if state.is_empty() {
        return false;
    }
    let Some(zip_number) = parse_zip(zip) else {
        return false;
    };
    if tables.zip_in_state(zip_number, state) {
        return false;
    }

    match tables.state_for_zip(zip_number) {
        Some(owner) => {
            debug!("Row {}: ZIP {} belongs to {}, not {}", index, zip, owner, state);
            *state = owner.to_string();
            true
        }
        None => false,
    }
}

fn fill_gaps(
    state: &mut String,
    zip: &mut String,
    phone: &str,
    tables: &GeoTables,
    stats: &mut GeoStats,
) {
    if zip.is_empty() && !state.is_empty() {
        if let Some(representative) = tables.representative_zip(state) {
            *zip = representative.to_string();
            stats.zip_populated += 1;
        }
    }

    if state.is_empty() && !zip.is_empty() {
        if let Some(owner) = parse_zip(zip).and_then(|number| tables.state_for_zip(number)) {
            *state = owner.to_string();
            stats.state_populated += 1;
        }
    }

    if (state.is_empty() || state.len() != 2) && zip.is_empty() {
        let owner = phone
            .get(..AREA_CODE_DIGITS)
            .and_then(|area_code| tables.state_for_area_code(area_code));
        if let Some(owner) = owner {
            if let Some(representative) = tables.representative_zip(owner) {
                *state = owner.to_string();
                *zip = representative.to_string();
                stats.fixed_from_area_code += 1;
            }
        }
    }
}

/// A ZIP usable for range lookups: exactly five ASCII digits
fn parse_zip(zip: &str) -> Option<u32> {
    if zip.len() != ZIP_DIGITS || !zip.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    zip.parse().ok()
}
