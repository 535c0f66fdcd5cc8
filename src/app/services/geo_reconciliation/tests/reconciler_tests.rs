//! Tests for row reconciliation

use super::*;
use crate::app::models::{ColumnSchema, Row};
use crate::app::services::geo_reconciliation::{
    GeoStats, ZipCleaning, clean_zip, reconcile_geo,
};
use crate::constants::columns;
use crate::Error;

fn reconcile_one(state: &str, zip: &str, phone: &str) -> (Row, GeoStats) {
    let dataset = contact_dataset(vec![geo_row(state, zip, phone)]);
    let (reconciled, stats) = reconcile_geo(&dataset, standard_geo_columns());
    (reconciled.rows[0].clone(), stats)
}

fn state_and_zip(row: &Row) -> (&str, &str) {
    (
        row.cell_or_empty(columns::STATE),
        row.cell_or_empty(columns::POSTAL_CODE),
    )
}

#[test]
fn test_clean_zip_outcomes() {
    assert_eq!(clean_zip(""), ZipCleaning::Empty);
    assert_eq!(clean_zip("   "), ZipCleaning::Empty);
    assert_eq!(clean_zip("9O210"), ZipCleaning::HadLetters);
    assert_eq!(clean_zip("123"), ZipCleaning::TooShort);
    assert_eq!(clean_zip("60614"), ZipCleaning::Kept("60614".into()));
    assert_eq!(clean_zip(" 60614-1234 "), ZipCleaning::Kept("60614".into()));
    assert_eq!(clean_zip("TooShort").value(), "");
}

#[test]
fn test_zip_populated_from_state() {
    let (row, stats) = reconcile_one("CA", "", "");
    assert_eq!(state_and_zip(&row), ("CA", "90005"));
    assert_eq!(stats.zip_populated, 1);
    assert_eq!(stats.total_changes(), 1);
}

#[test]
fn test_state_populated_from_zip() {
    let (row, stats) = reconcile_one("", "60614", "");
    assert_eq!(state_and_zip(&row), ("IL", "60614"));
    assert_eq!(stats.state_populated, 1);
}

#[test]
fn test_mismatch_corrected_without_gap_filling() {
    let (row, stats) = reconcile_one("CA", "60614", "");
    assert_eq!(state_and_zip(&row), ("IL", "60614"));
    assert_eq!(stats.mismatches_corrected, 1);
    assert_eq!(stats.zip_populated, 0);
    assert_eq!(stats.state_populated, 0);
}

#[test]
fn test_unknown_state_with_valid_zip_is_corrected() {
    let (row, stats) = reconcile_one("ZZ", "60614", "");
    assert_eq!(state_and_zip(&row), ("IL", "60614"));
    assert_eq!(stats.mismatches_corrected, 1);
}

#[test]
fn test_unowned_zip_leaves_state_alone() {
    let (row, stats) = reconcile_one("CA", "00100", "");
    assert_eq!(state_and_zip(&row), ("CA", "00100"));
    assert_eq!(stats, GeoStats::default());
}

#[test]
fn test_state_and_zip_from_area_code() {
    let (row, stats) = reconcile_one("", "", "5125559999");
    assert_eq!(state_and_zip(&row), ("TX", "73344"));
    assert_eq!(stats.fixed_from_area_code, 1);
}

#[test]
fn test_long_state_replaced_from_area_code() {
    let (row, stats) = reconcile_one("new york", "", "9175550000");
    assert_eq!(state_and_zip(&row), ("NY", "10028"));
    assert_eq!(stats.fixed_from_area_code, 1);
    assert_eq!(stats.zip_populated, 0);
}

#[test]
fn test_unknown_two_letter_state_without_zip_untouched() {
    let (row, stats) = reconcile_one("ZZ", "", "5125559999");
    assert_eq!(state_and_zip(&row), ("ZZ", ""));
    assert_eq!(stats, GeoStats::default());
}

#[test]
fn test_zip_with_letters_cleared_then_refilled() {
    let (row, stats) = reconcile_one("tx", "7330A", "");
    assert_eq!(state_and_zip(&row), ("TX", "73344"));
    assert_eq!(stats.zip_cleaned_letters, 1);
    assert_eq!(stats.zip_populated, 1);
}

#[test]
fn test_short_zip_cleared_and_unknown_area_code_ignored() {
    let (row, stats) = reconcile_one("", "123", "99");
    assert_eq!(state_and_zip(&row), ("", ""));
    assert_eq!(stats.zip_cleaned_too_short, 1);
    assert_eq!(stats.fixed_from_area_code, 0);
}

#[test]
fn test_long_zip_truncated() {
    let (row, _) = reconcile_one("IL", "606141234", "");
    assert_eq!(state_and_zip(&row), ("IL", "60614"));
}

#[test]
fn test_short_rows_are_padded() {
    let dataset = contact_dataset(vec![Row::from(vec!["1", "Ann"])]);
    let (reconciled, stats) = reconcile_geo(&dataset, standard_geo_columns());

    assert_eq!(reconciled.rows[0].len(), columns::PHONE + 1);
    assert_eq!(reconciled.rows[0].cell(columns::STATE), Some(""));
    assert_eq!(stats, GeoStats::default());
}

#[test]
fn test_input_dataset_unchanged_and_other_cells_preserved() {
    let dataset = contact_dataset(vec![geo_row("CA", "60614", "").with_cell(1, "Ann")]);
    let (reconciled, _) = reconcile_geo(&dataset, standard_geo_columns());

    assert_eq!(dataset.rows[0].cell(columns::STATE), Some("CA"));
    assert_eq!(reconciled.rows[0].cell(1), Some("Ann"));
    assert_eq!(reconciled.headers, dataset.headers);
}

#[test]
fn test_stats_accumulate_across_rows() {
    let dataset = contact_dataset(vec![
        geo_row("CA", "", ""),
        geo_row("", "60614", ""),
        geo_row("CA", "60614", ""),
        geo_row("", "", "5125559999"),
        geo_row("FL", "ABCDE", ""),
    ]);
    let (_, stats) = reconcile_geo(&dataset, standard_geo_columns());

    assert_eq!(
        stats,
        GeoStats {
            zip_cleaned_letters: 1,
            zip_cleaned_too_short: 0,
            zip_populated: 2,
            state_populated: 1,
            mismatches_corrected: 1,
            fixed_from_area_code: 1,
        }
    );
}

#[test]
fn test_geo_columns_require_schema_fields() {
    let schema = ColumnSchema::resolve(&["id".to_string(), "state".to_string()]);
    let error = GeoColumns::from_schema(&schema, "partial.csv").unwrap_err();
    assert!(matches!(error, Error::MissingColumn { .. }));
}

#[test]
fn test_geo_stats_merge() {
    let mut total = GeoStats {
        zip_populated: 2,
        ..GeoStats::default()
    };
    total.merge(&GeoStats {
        zip_populated: 1,
        fixed_from_area_code: 4,
        ..GeoStats::default()
    });
    assert_eq!(total.zip_populated, 3);
    assert_eq!(total.fixed_from_area_code, 4);
    assert_eq!(total.total_changes(), 7);
}
