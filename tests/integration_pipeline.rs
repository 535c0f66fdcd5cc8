//! Integration tests for the full contact cleaning pipeline
//!
//! These tests write a realistic messy export to a temporary directory, run it
//! through the reader, the record processor and the writers, then read the
//! cleaned file back.

use contact_etl::app::services::dataset_io::{
    ReportSummary, read_dataset, write_csv, write_dropped,
};
use contact_etl::app::services::record_processor::StageList;
use contact_etl::constants::{STANDARD_HEADERS, columns};
use contact_etl::{DropReason, Error, RecordProcessor, Stage};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Contact export with an extra trailing `notes` column (index 13)
const EXPORT: &str = "\
source_id,first_name,middle,last_name,address1,city,state,postal_code,phone_number,address3,province,email,trusted_url,notes
1,Ann,,Smith,\"100 Main St, Apt 2\",Beverly Hills,ca,90210,(310) 555-0100,,,ann@example.com,,vip
2,Bob,,Jones,5 Elm St,Dallas,NY,75201,2125550111,,,bob@example.com,,
3,Carl,,Dunn,77 Bay Rd,San Francisco,,,415-555-0122,,,carl@example.com,,
4,Dana,,Poe,9 Oak Ave,Austin,TX,7870A,512.555.0133,,,dana@example.com,,
5,Eve,,Ray,3 Palm Way,Miami,FL,331,305-555-0144,,,eve@example.com,,

6,Fay,,Ito,8 Peach St,Atlanta,GA,,310-555-0100,,,fay@example.com,,duplicate phone
7,,,,1 Nameless Ln,Austin,TX,73301,5125550155,,,,,
8,Hal,,Orr,2 Maple Dr,Toronto,ON,,4165550166,,,hal@example.com,,
9,Ida,,Kim,4 Pine St,Seattle,WA,98101,,,,ida@example.com,,
10,Jon2,,Lee,6 Cedar Ct,Houston,TX,77001,713-555-0188,,,jon@example.com,,
11,Kim,,Fox,12 Lake Shore Dr,Chicago,,60601,312-555-0177,,,kim@example.com,,
";

fn write_export(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("export.csv");
    fs::write(&path, EXPORT).unwrap();
    path
}

fn full_pipeline() -> Vec<Stage> {
    let mut stages = vec![Stage::DropColumns(vec![13])];
    stages.extend(Stage::default_pipeline());
    stages
}

fn cell<'a>(
    dataset: &'a contact_etl::Dataset,
    source_id: &str,
    column: usize,
) -> &'a str {
    dataset
        .rows
        .iter()
        .find(|row| row.cell(columns::SOURCE_ID) == Some(source_id))
        .and_then(|row| row.cell(column))
        .unwrap_or_else(|| panic!("row {} not found", source_id))
}

/// Full pipeline over the export: statistics, kept rows and corrected values
#[test]
fn test_full_pipeline_on_messy_export() {
    let dir = TempDir::new().unwrap();
    let dataset = read_dataset(&write_export(&dir)).unwrap();
    assert_eq!(dataset.row_count(), 11, "blank line should be skipped");

    let result = RecordProcessor::process(dataset, &full_pipeline(), false).unwrap();
    let stats = &result.stats;

    assert_eq!(stats.total_input, 11);
    assert_eq!(stats.final_output, 7);
    assert_eq!(stats.columns_dropped, 1);
    assert_eq!(stats.duplicates_removed, 1);
    assert_eq!(stats.dropped_invalid_state, 1);
    assert_eq!(stats.dropped_missing_phone, 1);
    assert_eq!(stats.dropped_missing_name, 1);
    assert_eq!(stats.dropped_malformed, 0);
    assert_eq!(stats.total_removed(), 4);

    assert_eq!(stats.names.examined, 33);
    assert_eq!(stats.names.blanked, 1);
    assert_eq!(stats.phones.altered, 7);
    assert_eq!(stats.phones.blanked, 0);

    assert_eq!(stats.geo.zip_cleaned_letters, 1);
    assert_eq!(stats.geo.zip_cleaned_too_short, 1);
    assert_eq!(stats.geo.zip_populated, 3);
    assert_eq!(stats.geo.state_populated, 1);
    assert_eq!(stats.geo.mismatches_corrected, 1);
    assert_eq!(stats.geo.fixed_from_area_code, 1);

    let data = &result.dataset;
    assert_eq!(data.headers, STANDARD_HEADERS);

    let kept: Vec<&str> = data
        .rows
        .iter()
        .map(|row| row.cell_or_empty(columns::SOURCE_ID))
        .collect();
    assert_eq!(kept, vec!["1", "2", "3", "4", "5", "10", "11"]);

    assert_eq!(cell(data, "1", columns::ADDRESS1), "100 Main St Apt 2");
    assert_eq!(cell(data, "1", columns::STATE), "CA");
    assert_eq!(cell(data, "1", columns::PHONE), "3105550100");
    // ZIP 75201 belongs to Texas
    assert_eq!(cell(data, "2", columns::STATE), "TX");
    // Filled from the 415 area code
    assert_eq!(cell(data, "3", columns::STATE), "CA");
    assert_eq!(cell(data, "3", columns::POSTAL_CODE), "90005");
    assert_eq!(cell(data, "4", columns::POSTAL_CODE), "73344");
    assert_eq!(cell(data, "5", columns::POSTAL_CODE), "32003");
    assert_eq!(cell(data, "10", columns::FIRST_NAME), "");
    assert_eq!(cell(data, "10", columns::LAST_NAME), "Lee");
    assert_eq!(cell(data, "11", columns::STATE), "IL");

    let reasons: Vec<(DropReason, &str)> = result
        .dropped
        .iter()
        .map(|dropped| (dropped.reason, dropped.row.cell_or_empty(columns::SOURCE_ID)))
        .collect();
    assert_eq!(
        reasons,
        vec![
            (DropReason::InvalidState, "8"),
            (DropReason::MissingName, "7"),
            (DropReason::MissingPhone, "9"),
        ]
    );
}

/// Writers and report: cleaned file reads back identically
#[test]
fn test_outputs_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = write_export(&dir);
    let result =
        RecordProcessor::process(read_dataset(&input).unwrap(), &full_pipeline(), false).unwrap();

    let cleaned_path = dir.path().join("export_cleaned.csv");
    let dropped_path = dir.path().join("export_dropped.csv");
    let report_path = dir.path().join("export_report.txt");

    assert_eq!(write_csv(&result.dataset, &cleaned_path).unwrap(), 7);
    assert_eq!(
        write_dropped(&result.dropped, &result.dataset.headers, &dropped_path).unwrap(),
        3
    );
    ReportSummary::from_stats(&result.stats, &result.dataset.source)
        .write_report(&report_path)
        .unwrap();

    let reread = read_dataset(&cleaned_path).unwrap();
    assert_eq!(reread.headers, result.dataset.headers);
    assert_eq!(reread.rows, result.dataset.rows);

    let dropped = fs::read_to_string(&dropped_path).unwrap();
    let first_columns: Vec<&str> = dropped
        .lines()
        .map(|line| line.split(',').next().unwrap_or(""))
        .collect();
    assert_eq!(
        first_columns,
        vec!["reason", "invalid_state", "missing_name", "missing_phone"]
    );

    let report = fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("Total rows processed: 11"));
    assert!(report.contains("Total rows removed:   4"));
    assert!(report.contains("    - 1 removed for duplicate phone numbers"));
    assert!(report.contains("    - 3 missing ZIP codes populated"));
    assert!(report.contains("Total rows in final, ready-to-load file: 7"));
}

/// Running the pipeline again over its own output changes nothing further
#[test]
fn test_second_pass_is_stable() {
    let dir = TempDir::new().unwrap();
    let first = RecordProcessor::process(
        read_dataset(&write_export(&dir)).unwrap(),
        &full_pipeline(),
        false,
    )
    .unwrap();

    let second =
        RecordProcessor::process(first.dataset.clone(), &Stage::default_pipeline(), false).unwrap();

    assert_eq!(second.dataset.rows, first.dataset.rows);
    assert_eq!(second.stats.total_removed(), 0);
    assert_eq!(second.stats.geo.total_changes(), 0);
}

/// Stage-by-stage driving with a command-line style stage list
#[test]
fn test_incremental_stage_application() {
    let dir = TempDir::new().unwrap();
    let stages: StageList = "drop-columns:13,normalize-phones,dedup-phones".parse().unwrap();

    let mut processor = RecordProcessor::new();
    assert!(matches!(
        processor.apply(&Stage::CleanNames),
        Err(Error::NoDatasetLoaded)
    ));

    processor
        .load(read_dataset(&write_export(&dir)).unwrap())
        .unwrap();
    let outcomes = processor.run(&stages.stages).unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(processor.schema().get(contact_etl::Field::Phone), Some(columns::PHONE));
    assert_eq!(outcomes[2].rows_removed(), 1);
    assert_eq!(processor.dataset().map(|d| d.column_count()), Some(13));

    let result = processor.finish().unwrap();
    assert_eq!(result.row_count(), 10);
    assert_eq!(result.stats.stages_applied, 3);
}

/// A required column that cannot be resolved stops the pipeline
#[test]
fn test_missing_required_column_is_structural_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no_phone.csv");
    fs::write(&path, "first_name,last_name,state\nAnn,Lee,TX\n").unwrap();

    let result = RecordProcessor::process(
        read_dataset(&path).unwrap(),
        &[Stage::CleanStates, Stage::FinalValidate],
        false,
    );

    match result {
        Err(error @ Error::MissingColumn { .. }) => assert!(error.is_structural()),
        other => panic!("expected missing column error, got {:?}", other.map(|r| r.stats)),
    }
}
