//! CSV and XLSX readers
//!
//! Both readers produce the same [`Dataset`] shape: the first record becomes
//! the header row, completely blank records are skipped, and every cell is
//! trimmed with stray carriage returns removed. Rows may be ragged; nothing
//! here pads or truncates them.

use crate::app::models::{Dataset, Row};
use crate::{Error, Result};
use calamine::{Reader, Xlsx, open_workbook};
use std::path::Path;
use tracing::{debug, info};

/// Read a dataset, choosing the reader from the file extension
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => read_csv(path),
        "xlsx" => read_xlsx(path),
        "" => Err(Error::unsupported_format("(none)")),
        other => Err(Error::unsupported_format(other)),
    }
}

/// Read a CSV file
///
/// Record lengths may vary. Invalid UTF-8 is replaced rather than rejected.
pub fn read_csv(path: &Path) -> Result<Dataset> {
    let file_name = file_name(path);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::csv_parsing(&file_name, "Failed to open CSV file", Some(e)))?;

    let mut records = reader.byte_records();

    let headers = match records.next() {
        Some(record) => {
            let record = record
                .map_err(|e| Error::csv_parsing(&file_name, "Failed to read header row", Some(e)))?;
            clean_cells(record.iter().map(|cell| String::from_utf8_lossy(cell)))
        }
        None => return Err(Error::empty_input(path.display().to_string())),
    };

    let mut rows = Vec::new();
    let mut skipped = 0;
    for (index, record) in records.enumerate() {
        let record = record.map_err(|e| {
            Error::csv_parsing(
                &file_name,
                format!("Failed to read record {}", index + 2),
                Some(e),
            )
        })?;
        let row = Row::new(clean_cells(
            record.iter().map(|cell| String::from_utf8_lossy(cell)),
        ));
        if row.is_blank() {
            skipped += 1;
            continue;
        }
        rows.push(row);
    }

    debug!("Skipped {} blank records in {}", skipped, file_name);
    info!(
        "Read {} rows x {} columns from {}",
        rows.len(),
        headers.len(),
        file_name
    );

    Ok(Dataset::new(strip_bom(headers), rows, file_name))
}

/// Read the only worksheet of an XLSX workbook
///
/// Workbooks with no sheets or more than one sheet are rejected, as is an
/// empty sheet.
pub fn read_xlsx(path: &Path) -> Result<Dataset> {
    let file_name = file_name(path);

    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| Error::spreadsheet(&file_name, format!("Failed to open workbook: {}", e)))?;

    let sheets = workbook.sheet_names();
    let sheet = match sheets.as_slice() {
        [] => return Err(Error::spreadsheet(&file_name, "No worksheets found")),
        [only] => only.clone(),
        many => {
            return Err(Error::spreadsheet(
                &file_name,
                format!(
                    "Multiple worksheets detected ({}). Please ensure only one worksheet",
                    many.len()
                ),
            ));
        }
    };

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::spreadsheet(&file_name, "No worksheets found"))?
        .map_err(|e| Error::spreadsheet(&file_name, format!("Failed to read '{}': {}", sheet, e)))?;

    let mut sheet_rows = range.rows();
    let headers = match sheet_rows.next() {
        Some(cells) => clean_cells(cells.iter().map(|cell| cell.to_string())),
        None => {
            return Err(Error::spreadsheet(
                &file_name,
                format!("Worksheet '{}' is empty", sheet),
            ));
        }
    };

    let rows: Vec<Row> = sheet_rows
        .map(|cells| Row::new(clean_cells(cells.iter().map(|cell| cell.to_string()))))
        .filter(|row| !row.is_blank())
        .collect();

    info!(
        "Read {} rows x {} columns from {} (sheet: {})",
        rows.len(),
        headers.len(),
        file_name,
        sheet
    );

    Ok(Dataset::new(
        headers,
        rows,
        format!("{} (sheet: {})", file_name, sheet),
    ))
}

fn clean_cells<I, S>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .map(|cell| cell.as_ref().trim().replace('\r', ""))
        .collect()
}

fn strip_bom(mut headers: Vec<String>) -> Vec<String> {
    if let Some(first) = headers.first_mut() {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.trim().to_string();
        }
    }
    headers
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
