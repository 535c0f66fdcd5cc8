//! Plain-text run summary report

use crate::app::services::geo_reconciliation::GeoStats;
use crate::app::services::record_processor::ProcessingStats;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

const RULE: &str = "====================================================";

/// Figures shown in the summary report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub total_processed: usize,
    pub total_removed: usize,
    pub removed_missing_phone: usize,
    pub removed_missing_name: usize,
    pub removed_invalid_state: usize,
    pub removed_duplicates: usize,
    pub removed_malformed: usize,
    pub geo: GeoStats,
    pub final_row_count: usize,
}

impl ReportSummary {
    /// Build the report figures from a run's statistics
    pub fn from_stats(stats: &ProcessingStats, source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            generated_at: Utc::now(),
            total_processed: stats.total_input,
            total_removed: stats.total_removed(),
            removed_missing_phone: stats.dropped_missing_phone,
            removed_missing_name: stats.dropped_missing_name,
            removed_invalid_state: stats.dropped_invalid_state,
            removed_duplicates: stats.duplicates_removed,
            removed_malformed: stats.dropped_malformed,
            geo: stats.geo,
            final_row_count: stats.final_output,
        }
    }

    /// Report as text lines
    pub fn render(&self) -> Vec<String> {
        vec![
            "================ ETL SUMMARY REPORT ================".to_string(),
            format!("Source:    {}", self.source),
            format!(
                "Generated: {}",
                self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            String::new(),
            format!("Total rows processed: {}", self.total_processed),
            format!("Total rows removed:   {}", self.total_removed),
            String::new(),
            "  Breakdown:".to_string(),
            format!(
                "    - {} removed for missing phone number",
                self.removed_missing_phone
            ),
            format!(
                "    - {} removed for missing first AND last name",
                self.removed_missing_name
            ),
            format!(
                "    - {} removed for invalid state",
                self.removed_invalid_state
            ),
            format!(
                "    - {} removed for duplicate phone numbers",
                self.removed_duplicates
            ),
            format!(
                "    - {} removed as malformed (too few columns)",
                self.removed_malformed
            ),
            String::new(),
            "  Geographic Data Cleaning:".to_string(),
            format!(
                "    - {} ZIP codes cleaned (contained letters)",
                self.geo.zip_cleaned_letters
            ),
            format!(
                "    - {} ZIP codes cleaned (too short)",
                self.geo.zip_cleaned_too_short
            ),
            format!(
                "    - {} missing ZIP codes populated",
                self.geo.zip_populated
            ),
            format!("    - {} missing states populated", self.geo.state_populated),
            format!(
                "    - {} ZIP-State mismatches corrected",
                self.geo.mismatches_corrected
            ),
            format!(
                "    - {} state/ZIP pairs fixed from area codes",
                self.geo.fixed_from_area_code
            ),
            String::new(),
            format!(
                "Total rows in final, ready-to-load file: {}",
                self.final_row_count
            ),
            String::new(),
            RULE.to_string(),
        ]
    }

    /// Write the rendered report to `path`
    pub fn write_report(&self, path: &Path) -> Result<()> {
        let mut content = self.render().join("\n");
        content.push('\n');
        fs::write(path, content).map_err(|e| {
            Error::io(format!("Failed to write report to {}", path.display()), e)
        })?;
        info!("Summary report written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_stats() -> ProcessingStats {
        ProcessingStats {
            total_input: 10,
            final_output: 5,
            duplicates_removed: 2,
            dropped_missing_phone: 1,
            dropped_missing_name: 1,
            dropped_invalid_state: 1,
            geo: GeoStats {
                zip_populated: 3,
                mismatches_corrected: 1,
                ..GeoStats::default()
            },
            ..ProcessingStats::default()
        }
    }

    #[test]
    fn test_from_stats() {
        let summary = ReportSummary::from_stats(&sample_stats(), "list.csv");

        assert_eq!(summary.total_processed, 10);
        assert_eq!(summary.total_removed, 5);
        assert_eq!(summary.removed_duplicates, 2);
        assert_eq!(summary.final_row_count, 5);
        assert_eq!(summary.geo.zip_populated, 3);
    }

    #[test]
    fn test_render_lines() {
        let lines = ReportSummary::from_stats(&sample_stats(), "list.csv").render();

        assert!(lines[0].contains("ETL SUMMARY REPORT"));
        assert!(lines.contains(&"Total rows processed: 10".to_string()));
        assert!(lines.contains(&"Total rows removed:   5".to_string()));
        assert!(lines.contains(&"    - 2 removed for duplicate phone numbers".to_string()));
        assert!(lines.contains(&"    - 3 missing ZIP codes populated".to_string()));
        assert!(lines.contains(&"    - 1 ZIP-State mismatches corrected".to_string()));
        assert!(lines.contains(&"Total rows in final, ready-to-load file: 5".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some(RULE));
    }

    #[test]
    fn test_write_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");

        ReportSummary::from_stats(&sample_stats(), "list.csv")
            .write_report(&path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("================ ETL SUMMARY REPORT"));
        assert!(content.contains("Source:    list.csv"));
        assert!(content.ends_with(&format!("{RULE}\n")));
    }
}
