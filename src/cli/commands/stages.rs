//! Stages command implementation

use crate::Result;
use crate::app::services::record_processor::{Stage, StageList};
use colored::*;

/// Print every stage with its description and the default order
pub fn run_stages() -> Result<()> {
    for line in stage_listing() {
        println!("{}", line);
    }
    Ok(())
}

pub fn stage_listing() -> Vec<String> {
    let mut lines = vec![format!("{}", "Available stages:".bright_green().bold())];

    for stage in Stage::catalog() {
        let marker = if stage.filters_rows() { "*" } else { " " };
        lines.push(format!(
            "  {}{:<17} {}",
            marker.bright_red(),
            stage.name().bright_cyan(),
            stage.description()
        ));
    }

    let default_pipeline = StageList {
        stages: Stage::default_pipeline(),
    };
    lines.push(String::new());
    lines.push(format!("  {} removes rows", "*".bright_red()));
    lines.push(format!(
        "{} {}",
        "Default pipeline:".bright_green(),
        default_pipeline
    ));
    lines
}
