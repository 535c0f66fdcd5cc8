//! Preview command implementation
//!
//! Prints the indexed header row and the first rows of a file, plus which
//! columns each contact field resolves to. Used to pick `drop-columns`
//! indices before running the pipeline.

use super::shared::setup_logging;
use crate::app::models::{ColumnSchema, Dataset, Field};
use crate::app::services::dataset_io::read_dataset;
use crate::cli::args::PreviewArgs;
use crate::Result;
use colored::*;
use tracing::info;

/// Preview command runner
pub fn run_preview(args: PreviewArgs) -> Result<()> {
    setup_logging(args.get_log_level(), false)?;
    args.validate()?;

    let dataset = read_dataset(&args.input)?;
    info!(
        "Previewing {} of {} rows from {}",
        args.rows.min(dataset.row_count()),
        dataset.row_count(),
        dataset.source
    );

    for line in preview_report(&dataset, args.rows) {
        println!("{}", line);
    }
    Ok(())
}

/// Table preview followed by the field-to-column mapping
pub fn preview_report(dataset: &Dataset, rows: usize) -> Vec<String> {
    let mut lines = dataset.preview_lines(rows);
    if !dataset.has_headers() {
        return lines;
    }

    let schema = ColumnSchema::resolve(&dataset.headers);
    lines.push(String::new());
    lines.push(format!("{}", "Field columns".bright_green().bold()));

    for field in Field::ALL {
        let line = match schema.get(field) {
            Some(index) => {
                let header = dataset.headers.get(index).map(String::as_str).unwrap_or("");
                let moved = if index != field.documented_index() {
                    format!(" (expected at {})", field.documented_index())
                } else {
                    String::new()
                };
                format!(
                    "  {:<12} {:>3}  {}{}",
                    field.label(),
                    index,
                    header,
                    moved.bright_yellow()
                )
            }
            None => format!("  {:<12} {}", field.label(), "not found".bright_red()),
        };
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Row;

    #[test]
    fn test_preview_report_lists_fields() {
        let dataset = Dataset::new(
            vec!["First Name".into(), "Last Name".into(), "Phone".into()],
            vec![Row::from(vec!["Ann", "Lee", "5125550101"])],
            "short.csv",
        );

        let lines = preview_report(&dataset, 5);

        assert!(lines[0].starts_with("| 0"));
        assert!(lines.iter().any(|l| l.contains("Showing 1 of 1 rows from short.csv")));
        let phone = lines
            .iter()
            .find(|l| l.trim_start().starts_with("phone"))
            .unwrap();
        assert!(phone.contains("Phone"));
        assert!(phone.contains("expected at 8"));
        let email = lines
            .iter()
            .find(|l| l.trim_start().starts_with("email"))
            .unwrap();
        assert!(email.contains("not found"));
    }

    #[test]
    fn test_preview_report_without_headers() {
        let dataset = Dataset::new(Vec::new(), Vec::new(), "empty.csv");
        assert_eq!(
            preview_report(&dataset, 5),
            vec!["Dataset has no header row.".to_string()]
        );
    }
}
