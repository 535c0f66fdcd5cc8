//! Main record processor implementation and pipeline orchestration
//!
//! The RecordProcessor owns the current dataset and its resolved column
//! schema, applies stages one at a time, and accumulates statistics, dropped
//! rows and per-stage outcomes until the run is finished.

use crate::app::models::{ColumnSchema, Dataset, DroppedRow, Field};
use crate::app::services::field_normalizers::{
    clean_addresses, clean_emails, clean_names, clean_states, normalize_phones,
};
use crate::app::services::geo_reconciliation::{GeoColumns, reconcile_geo};
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use super::{
    deduplication::dedup_phones,
    stage::Stage,
    stats::{ProcessingResult, ProcessingStats, StageOutcome},
    validation::{RequiredColumns, final_validate, validate_states},
};

/// Record processor for contact datasets
///
/// # Example
///
/// ```rust
/// use contact_etl::{Dataset, RecordProcessor, Row, Stage};
///
/// # fn example() -> contact_etl::Result<()> {
/// let headers = contact_etl::constants::STANDARD_HEADERS
///     .iter()
///     .map(|h| h.to_string())
///     .collect();
/// let dataset = Dataset::new(headers, vec![Row::from(vec![""; 13])], "contacts.csv");
///
/// let mut processor = RecordProcessor::new();
/// processor.load(dataset)?;
/// processor.apply(&Stage::CleanStates)?;
/// let result = processor.finish()?;
/// println!("{}", result.summary());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RecordProcessor {
    dataset: Option<Dataset>,
    schema: ColumnSchema,
    stats: ProcessingStats,
    dropped: Vec<DroppedRow>,
    outcomes: Vec<StageOutcome>,
    show_progress: bool,
}

/// What a single stage produced before it is folded into the processor
struct StageOutput {
    dataset: Dataset,
    dropped: Vec<DroppedRow>,
    message: String,
}

impl RecordProcessor {
    /// Create a processor with no dataset loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an indicatif progress bar for each stage
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Run `stages` over `dataset` and return the finished result
    pub fn process(
        dataset: Dataset,
        stages: &[Stage],
        show_progress: bool,
    ) -> Result<ProcessingResult> {
        let mut processor = Self::new().with_progress(show_progress);
        processor.load(dataset)?;
        processor.run(stages)?;
        processor.finish()
    }

    /// Load a dataset, replacing any previous one and resetting statistics
    ///
    /// Fails with [`Error::EmptyDataset`] when there is no header row.
    pub fn load(&mut self, dataset: Dataset) -> Result<()> {
        if !dataset.has_headers() {
            return Err(Error::empty_dataset(&dataset.source));
        }

        self.schema = ColumnSchema::resolve(&dataset.headers);
        log_schema(&self.schema, &dataset);

        let short_rows = dataset.short_row_count();
        if short_rows > 0 {
            warn!(
                "{} of {} rows in {} are shorter than the header row",
                short_rows,
                dataset.row_count(),
                dataset.source
            );
        }

        info!(
            "Loaded {} rows x {} columns from {}",
            dataset.row_count(),
            dataset.column_count(),
            dataset.source
        );

        self.stats = ProcessingStats::new();
        self.stats.total_input = dataset.row_count();
        self.stats.final_output = dataset.row_count();
        self.dropped.clear();
        self.outcomes.clear();
        self.dataset = Some(dataset);
        Ok(())
    }

    /// Current dataset, if one is loaded
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Column schema resolved for the current dataset
    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Statistics accumulated so far
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    /// Outcomes of the stages applied so far
    pub fn outcomes(&self) -> &[StageOutcome] {
        &self.outcomes
    }

    /// Apply one stage to the current dataset
    ///
    /// On error the current dataset is left as it was.
    pub fn apply(&mut self, stage: &Stage) -> Result<StageOutcome> {
        let dataset = self.dataset.as_ref().ok_or(Error::NoDatasetLoaded)?;
        let rows_before = dataset.row_count();

        let progress_bar = self
            .show_progress
            .then(|| Self::create_stage_progress_bar(rows_before as u64, stage));

        let output = execute_stage(
            stage,
            dataset,
            &self.schema,
            &mut self.stats,
            progress_bar.as_ref(),
        )?;

        if let Some(pb) = progress_bar {
            pb.finish_with_message(format!("{}: {}", stage.name(), output.message));
        }

        if stage.changes_headers() {
            self.schema = ColumnSchema::resolve(&output.dataset.headers);
            log_schema(&self.schema, &output.dataset);
        }

        let rows_after = output.dataset.row_count();
        self.stats.record_drops(&output.dropped);
        self.stats.final_output = rows_after;
        self.stats.stages_applied += 1;
        self.dropped.extend(output.dropped);
        self.dataset = Some(output.dataset);

        let outcome = StageOutcome {
            stage: stage.clone(),
            rows_before,
            rows_after,
            message: output.message,
        };
        info!("Stage {} complete: {}", stage, outcome.message);
        self.outcomes.push(outcome.clone());
        Ok(outcome)
    }

    /// Apply stages in order, stopping at the first error
    pub fn run(&mut self, stages: &[Stage]) -> Result<Vec<StageOutcome>> {
        let rows_before = self.dataset.as_ref().map(Dataset::row_count).unwrap_or(0);
        info!(
            "Starting pipeline with {} stages for {} rows",
            stages.len(),
            rows_before
        );

        let mut outcomes = Vec::with_capacity(stages.len());
        for stage in stages {
            outcomes.push(self.apply(stage)?);
        }

        info!(
            "Pipeline complete: {} -> {} rows ({:.1}% kept)",
            self.stats.total_input,
            self.stats.final_output,
            self.stats.success_rate()
        );
        if !self.stats.is_successful() {
            debug!(
                "Low survival rate: {:.1}% ({} rows removed)",
                self.stats.success_rate(),
                self.stats.total_removed()
            );
        }
        Ok(outcomes)
    }

    /// Hand back the final dataset with statistics, dropped rows and outcomes
    pub fn finish(self) -> Result<ProcessingResult> {
        let dataset = self.dataset.ok_or(Error::NoDatasetLoaded)?;
        Ok(ProcessingResult {
            dataset,
            stats: self.stats,
            dropped: self.dropped,
            outcomes: self.outcomes,
        })
    }

    /// Create a progress bar for one stage
    fn create_stage_progress_bar(total: u64, stage: &Stage) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb.set_message(stage.name().to_string());
        pb
    }
}

fn execute_stage(
    stage: &Stage,
    dataset: &Dataset,
    schema: &ColumnSchema,
    stats: &mut ProcessingStats,
    progress_bar: Option<&ProgressBar>,
) -> Result<StageOutput> {
    let source = dataset.source.as_str();

    let output = match stage {
        Stage::DropColumns(indices) => {
            let next = dataset.drop_columns(indices);
            let removed = dataset.column_count() - next.column_count();
            stats.columns_dropped += removed;
            StageOutput {
                message: format!("dropped {} columns, {} remain", removed, next.column_count()),
                dataset: next,
                dropped: Vec::new(),
            }
        }
        Stage::CleanAddress => {
            let column = schema.require(Field::Address1, source)?;
            let (next, counts) = clean_addresses(dataset, column);
            stats.addresses.merge(&counts);
            normalized(next, "addresses", counts.changed(), counts.examined)
        }
        Stage::CleanNames => {
            let mut columns = vec![
                schema.require(Field::FirstName, source)?,
                schema.require(Field::LastName, source)?,
            ];
            if let Some(middle) = schema.get(Field::MiddleName) {
                columns.insert(1, middle);
            }
            let (next, counts) = clean_names(dataset, &columns);
            stats.names.merge(&counts);
            normalized(next, "names", counts.changed(), counts.examined)
        }
        Stage::CleanEmails => {
            let column = schema.require(Field::Email, source)?;
            let (next, counts) = clean_emails(dataset, column);
            stats.emails.merge(&counts);
            normalized(next, "emails", counts.changed(), counts.examined)
        }
        Stage::NormalizePhones => {
            let column = schema.require(Field::Phone, source)?;
            let (next, counts) = normalize_phones(dataset, column);
            stats.phones.merge(&counts);
            normalized(next, "phones", counts.changed(), counts.examined)
        }
        Stage::CleanStates => {
            let column = schema.require(Field::State, source)?;
            let (next, counts) = clean_states(dataset, column);
            stats.states.merge(&counts);
            normalized(next, "states", counts.changed(), counts.examined)
        }
        Stage::PopulateGeo => {
            let columns = GeoColumns::from_schema(schema, source)?;
            let (next, geo) = reconcile_geo(dataset, columns);
            stats.geo.merge(&geo);
            StageOutput {
                dataset: next,
                dropped: Vec::new(),
                message: geo.summary(),
            }
        }
        Stage::DedupPhones => {
            let column = schema.require(Field::Phone, source)?;
            let result = dedup_phones(dataset, column, progress_bar);
            stats.duplicates_removed += result.duplicates;
            StageOutput {
                message: format!("removed {} duplicate phones", result.duplicates),
                dataset: result.dataset,
                dropped: Vec::new(),
            }
        }
        Stage::ValidateStates => {
            let column = schema.require(Field::State, source)?;
            let result = validate_states(dataset, column, progress_bar);
            StageOutput {
                message: format!("dropped {} rows with invalid states", result.drop_count),
                dataset: result.dataset,
                dropped: result.dropped,
            }
        }
        Stage::FinalValidate => {
            let columns = RequiredColumns::from_schema(schema, source)?;
            let result = final_validate(dataset, columns, progress_bar);
            StageOutput {
                message: format!(
                    "dropped {} rows missing required fields",
                    result.drop_count
                ),
                dataset: result.dataset,
                dropped: result.dropped,
            }
        }
    };

    if !stage.filters_rows() {
        if let Some(pb) = progress_bar {
            pb.set_position(output.dataset.row_count() as u64);
        }
    }

    Ok(output)
}

fn normalized(dataset: Dataset, what: &str, changed: usize, examined: usize) -> StageOutput {
    StageOutput {
        dataset,
        dropped: Vec::new(),
        message: format!("changed {} of {} {}", changed, examined, what),
    }
}

fn log_schema(schema: &ColumnSchema, dataset: &Dataset) {
    for (field, index) in schema.relocated() {
        debug!(
            "{}: {} found at column {} ({})",
            dataset.source,
            field,
            index,
            dataset.headers.get(index).map(String::as_str).unwrap_or("")
        );
    }
    let unresolved = schema.unresolved();
    if !unresolved.is_empty() {
        let names: Vec<&str> = unresolved.iter().map(|field| field.label()).collect();
        debug!("{}: no column for {}", dataset.source, names.join(", "));
    }
}
