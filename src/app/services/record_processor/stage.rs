//! Pipeline stage names and parsing
//!
//! Stages are addressed by stable kebab-case names. `drop-columns` carries the
//! zero-based column positions to remove, written `drop-columns:9,10,12`.

use crate::constants::{DEFAULT_STEPS, STAGE_NAMES};
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One step of the cleaning pipeline
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Remove columns by position
    DropColumns(Vec<usize>),
    CleanAddress,
    CleanNames,
    CleanEmails,
    NormalizePhones,
    CleanStates,
    PopulateGeo,
    DedupPhones,
    ValidateStates,
    FinalValidate,
}

impl Stage {
    /// Stable name used on the command line and in config files
    pub fn name(&self) -> &'static str {
        match self {
            Stage::DropColumns(_) => "drop-columns",
            Stage::CleanAddress => "clean-address",
            Stage::CleanNames => "clean-names",
            Stage::CleanEmails => "clean-emails",
            Stage::NormalizePhones => "normalize-phones",
            Stage::CleanStates => "clean-states",
            Stage::PopulateGeo => "populate-geo",
            Stage::DedupPhones => "dedup-phones",
            Stage::ValidateStates => "validate-states",
            Stage::FinalValidate => "final-validate",
        }
    }

    /// One-line description for the `stages` listing
    pub fn description(&self) -> &'static str {
        match self {
            Stage::DropColumns(_) => "Remove columns by zero-based position (drop-columns:9,10,12)",
            Stage::CleanAddress => "Strip characters other than letters, digits, spaces and # / - .",
            Stage::CleanNames => "Clean first/middle/last names; names containing digits are cleared",
            Stage::CleanEmails => "Clear emails that are only digits",
            Stage::NormalizePhones => "Reduce phones to 10 digits; anything else is cleared",
            Stage::CleanStates => "Uppercase states and clear values that are not two letters",
            Stage::PopulateGeo => "Reconcile state, ZIP and area code; fill gaps and fix mismatches",
            Stage::DedupPhones => "Drop later rows that repeat an earlier phone number",
            Stage::ValidateStates => "Drop rows whose state is not one of the 50 states or DC",
            Stage::FinalValidate => "Drop rows missing a phone or both first and last name",
        }
    }

    /// True for stages that can remove rows
    pub fn filters_rows(&self) -> bool {
        matches!(
            self,
            Stage::DedupPhones | Stage::ValidateStates | Stage::FinalValidate
        )
    }

    /// True for stages that change the header set
    pub fn changes_headers(&self) -> bool {
        matches!(self, Stage::DropColumns(_))
    }

    /// One example of every stage, in listing order
    pub fn catalog() -> Vec<Stage> {
        vec![
            Stage::DropColumns(Vec::new()),
            Stage::CleanAddress,
            Stage::CleanNames,
            Stage::CleanEmails,
            Stage::NormalizePhones,
            Stage::CleanStates,
            Stage::PopulateGeo,
            Stage::DedupPhones,
            Stage::ValidateStates,
            Stage::FinalValidate,
        ]
    }

    /// Stage order used when nothing else is configured
    pub fn default_pipeline() -> Vec<Stage> {
        DEFAULT_STEPS
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::DropColumns(indices) if !indices.is_empty() => {
                let list: Vec<String> = indices.iter().map(usize::to_string).collect();
                write!(f, "{}:{}", self.name(), list.join(","))
            }
            _ => f.write_str(self.name()),
        }
    }
}

impl FromStr for Stage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let (name, arguments) = match normalized.split_once(':') {
            Some((name, arguments)) => (name.trim(), Some(arguments)),
            None => (normalized.as_str(), None),
        };

        let stage = match name {
            "drop-columns" => {
                let indices = parse_indices(arguments.unwrap_or(""))?;
                return Ok(Stage::DropColumns(indices));
            }
            "clean-address" => Stage::CleanAddress,
            "clean-names" => Stage::CleanNames,
            "clean-emails" => Stage::CleanEmails,
            "normalize-phones" => Stage::NormalizePhones,
            "clean-states" => Stage::CleanStates,
            "populate-geo" => Stage::PopulateGeo,
            "dedup-phones" => Stage::DedupPhones,
            "validate-states" => Stage::ValidateStates,
            "final-validate" => Stage::FinalValidate,
            _ => return Err(Error::unknown_stage(s.trim())),
        };

        if arguments.is_some() {
            return Err(Error::configuration(format!(
                "Stage '{}' does not take arguments",
                stage.name()
            )));
        }
        Ok(stage)
    }
}

fn parse_indices(arguments: &str) -> Result<Vec<usize>> {
    let indices: Vec<usize> = arguments
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>().map_err(|_| {
                Error::configuration(format!("Invalid column index '{}' for drop-columns", part))
            })
        })
        .collect::<Result<_>>()?;

    if indices.is_empty() {
        return Err(Error::configuration(
            "drop-columns needs at least one column index, e.g. drop-columns:9,10",
        ));
    }
    Ok(indices)
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Stage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Wrapper for parsing comma-separated stage lists
///
/// Bare numbers following a `drop-columns` entry belong to it, so
/// `drop-columns:9,10,clean-names` is two stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageList {
    pub stages: Vec<Stage>,
}

impl FromStr for StageList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut stages: Vec<Stage> = Vec::new();

        for token in s.split(',').map(str::trim).filter(|token| !token.is_empty()) {
            if let Ok(index) = token.parse::<usize>() {
                match stages.last_mut() {
                    Some(Stage::DropColumns(indices)) => {
                        indices.push(index);
                        continue;
                    }
                    _ => {
                        return Err(Error::configuration(format!(
                            "Column index {} must follow drop-columns",
                            index
                        )));
                    }
                }
            }
            stages.push(token.parse()?);
        }

        if stages.is_empty() {
            return Err(Error::configuration(format!(
                "Stage list cannot be empty. Available stages: {}",
                STAGE_NAMES.join(", ")
            )));
        }

        Ok(StageList { stages })
    }
}

impl fmt::Display for StageList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.stages.iter().map(Stage::to_string).collect();
        f.write_str(&names.join(","))
    }
}
