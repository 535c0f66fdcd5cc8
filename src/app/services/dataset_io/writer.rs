//! CSV writers for cleaned and dropped rows

use crate::app::models::{Dataset, DroppedRow};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Output path derived from the input file name
///
/// `<stem><suffix>.<extension>` placed in `output_dir` when given, otherwise
/// next to the input file.
pub fn derived_path(
    input: &Path,
    output_dir: Option<&Path>,
    suffix: &str,
    extension: &str,
) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "output".to_string());
    let file_name = format!("{stem}{suffix}.{extension}");

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input
            .parent()
            .map(|parent| parent.join(&file_name))
            .unwrap_or_else(|| PathBuf::from(&file_name)),
    }
}

/// Default location for the cleaned CSV: `<stem><suffix>.csv`
pub fn default_output_path(input: &Path, output_dir: Option<&Path>, suffix: &str) -> PathBuf {
    derived_path(input, output_dir, suffix, "csv")
}

/// Write headers and rows as flat CSV; returns the number of data rows written
///
/// Refuses a dataset with no rows.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<usize> {
    if dataset.rows.is_empty() {
        return Err(Error::nothing_to_write(path.display().to_string()));
    }

    let mut writer = open_writer(path)?;
    write_record(&mut writer, path, &dataset.headers)?;
    for row in &dataset.rows {
        write_record(&mut writer, path, row.cells())?;
    }
    writer
        .flush()
        .map_err(|e| Error::io(format!("Failed to flush {}", path.display()), e))?;

    info!("{} rows written to {}", dataset.row_count(), path.display());
    Ok(dataset.row_count())
}

/// Write dropped rows with a leading `reason` column
pub fn write_dropped(dropped: &[DroppedRow], headers: &[String], path: &Path) -> Result<usize> {
    if dropped.is_empty() {
        return Err(Error::nothing_to_write(path.display().to_string()));
    }

    let mut writer = open_writer(path)?;

    let header_row: Vec<&str> = std::iter::once("reason")
        .chain(headers.iter().map(String::as_str))
        .collect();
    write_record(&mut writer, path, &header_row)?;

    for dropped_row in dropped {
        let record: Vec<&str> = std::iter::once(dropped_row.reason.label())
            .chain(dropped_row.row.cells().iter().map(String::as_str))
            .collect();
        write_record(&mut writer, path, &record)?;
    }
    writer
        .flush()
        .map_err(|e| Error::io(format!("Failed to flush {}", path.display()), e))?;

    info!("{} dropped rows written to {}", dropped.len(), path.display());
    Ok(dropped.len())
}

fn open_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| {
            Error::csv_parsing(
                path.display().to_string(),
                "Failed to create output file",
                Some(e),
            )
        })
}

fn write_record<I, T>(writer: &mut csv::Writer<std::fs::File>, path: &Path, record: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    writer.write_record(record).map_err(|e| {
        Error::csv_parsing(path.display().to_string(), "Failed to write record", Some(e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{DropReason, Row};
    use std::fs;
    use tempfile::TempDir;

    fn small_dataset() -> Dataset {
        Dataset::new(
            vec!["id".into(), "name".into()],
            vec![Row::from(vec!["1", "Ann, Jr"]), Row::from(vec!["2"])],
            "small.csv",
        )
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/data/list.xlsx"), None, "_cleaned"),
            PathBuf::from("/data/list_cleaned.csv")
        );
        assert_eq!(
            default_output_path(Path::new("list.csv"), Some(Path::new("/out")), "_cleaned"),
            PathBuf::from("/out/list_cleaned.csv")
        );
        assert_eq!(
            derived_path(Path::new("list.csv"), None, "_report", "txt"),
            PathBuf::from("list_report.txt")
        );
    }

    #[test]
    fn test_write_csv_quotes_and_ragged_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let written = write_csv(&small_dataset(), &path).unwrap();

        assert_eq!(written, 2);
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "id,name\n1,\"Ann, Jr\"\n2\n");
    }

    #[test]
    fn test_write_csv_refuses_empty_dataset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let empty = small_dataset().with_rows(Vec::new());

        assert!(matches!(
            write_csv(&empty, &path),
            Err(Error::NothingToWrite { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_dropped_prefixes_reason() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dropped.csv");
        let dropped = vec![
            DroppedRow::new(DropReason::MissingPhone, Row::from(vec!["1", "Ann"])),
            DroppedRow::new(DropReason::InvalidState, Row::from(vec!["2", "Ben"])),
        ];

        write_dropped(&dropped, &small_dataset().headers, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "reason,id,name\nmissing_phone,1,Ann\ninvalid_state,2,Ben\n"
        );
    }
}
