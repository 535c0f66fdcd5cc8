//! Data models for contact list processing
//!
//! This module contains the tabular record model shared by every pipeline
//! stage: a [`Dataset`] of header names plus ordered [`Row`] values, and the
//! [`DroppedRow`] records that validation stages set aside.

pub mod schema;

#[cfg(test)]
pub mod fixtures;

pub use schema::{ColumnSchema, Field};

use crate::constants::PREVIEW_MAX_COLUMN_WIDTH;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// =============================================================================
// Row
// =============================================================================

/// One record's ordered cell values
///
/// Rows are plain values. A stage that changes a cell works on its own copy
/// and hands back a new row; nothing holds a mutable reference into a row that
/// belongs to another stage's dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row(Vec<String>);

impl Row {
    /// Create a row from owned cells
    pub fn new(cells: Vec<String>) -> Self {
        Self(cells)
    }

    /// Number of cells in the row
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the row has no cells at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every cell is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|cell| cell.trim().is_empty())
    }

    /// Cell at `index`, or `None` when the row is too short
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Cell at `index`, treating a missing cell as empty
    pub fn cell_or_empty(&self, index: usize) -> &str {
        self.cell(index).unwrap_or("")
    }

    /// True when the row is long enough to hold column `index`
    pub fn has_column(&self, index: usize) -> bool {
        index < self.0.len()
    }

    /// All cells in order
    pub fn cells(&self) -> &[String] {
        &self.0
    }

    /// Consume the row and return its cells
    pub fn into_cells(self) -> Vec<String> {
        self.0
    }

    /// Replace the cell at `index`; returns false (and changes nothing) when out of range
    pub fn set_cell(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.0.get_mut(index) {
            Some(cell) => {
                *cell = value.into();
                true
            }
            None => false,
        }
    }

    /// Builder form of [`Row::set_cell`]
    pub fn with_cell(mut self, index: usize, value: impl Into<String>) -> Self {
        self.set_cell(index, value);
        self
    }

    /// Extend the row with empty cells until it is at least `width` long
    pub fn padded_to(mut self, width: usize) -> Self {
        if self.0.len() < width {
            self.0.resize(width, String::new());
        }
        self
    }

    /// Copy of the row without the cells at the given positions
    pub fn without_columns(&self, drop: &HashSet<usize>) -> Self {
        Self(
            self.0
                .iter()
                .enumerate()
                .filter(|(index, _)| !drop.contains(index))
                .map(|(_, cell)| cell.clone())
                .collect(),
        )
    }
}

impl<S: Into<String>> From<Vec<S>> for Row {
    fn from(cells: Vec<S>) -> Self {
        Self(cells.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// Tabular dataset threaded through the pipeline
///
/// Headers are kept separately from the data rows. `source` is a provenance
/// label (usually the input file name) carried unchanged from stage to stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Column names, in column order
    pub headers: Vec<String>,
    /// Data rows, in input order
    pub rows: Vec<Row>,
    /// Provenance label
    pub source: String,
}

impl Dataset {
    /// Create a dataset from headers, rows and a provenance label
    pub fn new(headers: Vec<String>, rows: Vec<Row>, source: impl Into<String>) -> Self {
        Self {
            headers,
            rows,
            source: source.into(),
        }
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of header columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// True when the dataset has a header row
    pub fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }

    /// New dataset with the same headers and source but different rows
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            headers: self.headers.clone(),
            rows,
            source: self.source.clone(),
        }
    }

    /// New dataset built by transforming every row
    pub fn map_rows<F>(&self, f: F) -> Self
    where
        F: FnMut(&Row) -> Row,
    {
        self.with_rows(self.rows.iter().map(f).collect())
    }

    /// Count of rows shorter than the header row
    pub fn short_row_count(&self) -> usize {
        let width = self.headers.len();
        self.rows.iter().filter(|row| row.len() < width).count()
    }

    /// New dataset without the given column positions
    ///
    /// Indices outside the header range are ignored. Rows lose the same
    /// positions; short rows simply lose whatever they have at those positions.
    pub fn drop_columns(&self, indices: &[usize]) -> Self {
        let drop: HashSet<usize> = indices.iter().copied().collect();

        let headers = self
            .headers
            .iter()
            .enumerate()
            .filter(|(index, _)| !drop.contains(index))
            .map(|(_, header)| header.clone())
            .collect();

        Self {
            headers,
            rows: self.rows.iter().map(|row| row.without_columns(&drop)).collect(),
            source: self.source.clone(),
        }
    }

    /// Render the header list and the first `limit` rows as aligned text lines
    ///
    /// The first line carries zero-based column indices so users can pick
    /// columns for `drop-columns`.
    pub fn preview_lines(&self, limit: usize) -> Vec<String> {
        if !self.has_headers() {
            return vec!["Dataset has no header row.".to_string()];
        }
        if self.rows.is_empty() {
            return vec![format!("No data rows in {}.", self.source)];
        }

        let shown = &self.rows[..limit.min(self.rows.len())];
        let widths = preview_column_widths(&self.headers, shown);
        let mut lines = Vec::with_capacity(shown.len() + 4);

        let mut index_line = String::from("|");
        let mut header_line = String::from("|");
        let mut separator = String::from("+");
        for (column, header) in self.headers.iter().enumerate() {
            let width = widths[column];
            index_line.push_str(&format!(" {:<width$} |", column));
            header_line.push_str(&format!(" {:<width$} |", truncate_cell(header, width)));
            separator.push_str(&"-".repeat(width + 2));
            separator.push('+');
        }
        lines.push(index_line);
        lines.push(header_line);
        lines.push(separator);

        for row in shown {
            let mut line = String::from("|");
            for (column, width) in widths.iter().enumerate() {
                let value = row.cell_or_empty(column).replace('\n', " ");
                line.push_str(&format!(" {:<width$} |", truncate_cell(&value, *width)));
            }
            lines.push(line);
        }

        lines.push(format!(
            "Showing {} of {} rows from {}",
            shown.len(),
            self.rows.len(),
            self.source
        ));
        lines
    }
}

fn preview_column_widths(headers: &[String], rows: &[Row]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(column, header)| {
            let widest_cell = rows
                .iter()
                .map(|row| row.cell_or_empty(column).chars().count())
                .max()
                .unwrap_or(0);
            let index_width = column.to_string().len();
            header
                .chars()
                .count()
                .max(widest_cell)
                .max(index_width)
                .min(PREVIEW_MAX_COLUMN_WIDTH)
        })
        .collect()
}

fn truncate_cell(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width > 3 {
        let kept: String = value.chars().take(width - 3).collect();
        format!("{kept}...")
    } else {
        value.chars().take(width).collect()
    }
}

// =============================================================================
// Dropped Rows
// =============================================================================

/// Why a validation stage removed a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Row too short to hold the columns the stage inspects
    Malformed,
    /// State is not one of the 50 states or DC
    InvalidState,
    /// Phone number empty
    MissingPhone,
    /// Both first and last name empty
    MissingName,
}

impl DropReason {
    /// Stable label used in reports and the dropped-rows CSV
    pub fn label(&self) -> &'static str {
        match self {
            DropReason::Malformed => "malformed",
            DropReason::InvalidState => "invalid_state",
            DropReason::MissingPhone => "missing_phone",
            DropReason::MissingName => "missing_name",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A row removed by a validation stage, with the reason it was removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedRow {
    pub reason: DropReason,
    pub row: Row,
}

impl DroppedRow {
    pub fn new(reason: DropReason, row: Row) -> Self {
        Self { reason, row }
    }
}
