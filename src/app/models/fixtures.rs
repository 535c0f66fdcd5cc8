//! Shared test fixtures for contact datasets

use super::{Dataset, Row};
use crate::constants::{STANDARD_HEADERS, columns};

/// A well-formed 13-column contact row
pub fn base_row() -> Row {
    Row::from(vec![
        "1001",
        "Alice",
        "M",
        "Smith",
        "123 Main St",
        "Austin",
        "TX",
        "73301",
        "5125551234",
        "",
        "",
        "alice@example.com",
        "",
    ])
}

/// A standard contact row with some cells replaced
pub fn contact_row(overrides: &[(usize, &str)]) -> Row {
    overrides
        .iter()
        .fold(base_row(), |row, (index, value)| row.with_cell(*index, *value))
}

/// A row carrying only state, ZIP and phone (everything else blank)
pub fn geo_row(state: &str, zip: &str, phone: &str) -> Row {
    Row::from(vec![""; columns::COUNT])
        .with_cell(columns::STATE, state)
        .with_cell(columns::POSTAL_CODE, zip)
        .with_cell(columns::PHONE, phone)
}

/// A dataset with the standard headers
pub fn contact_dataset(rows: Vec<Row>) -> Dataset {
    Dataset::new(
        STANDARD_HEADERS.iter().map(|header| header.to_string()).collect(),
        rows,
        "contacts.csv",
    )
}

/// Values of one column across all rows (missing cells appear as `None`)
pub fn column_values(dataset: &Dataset, index: usize) -> Vec<Option<String>> {
    dataset
        .rows
        .iter()
        .map(|row| row.cell(index).map(str::to_string))
        .collect()
}
