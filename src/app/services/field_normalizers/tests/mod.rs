//! Tests for the field normalizers
//!
//! Cell-level rules are checked directly; dataset-level stages are checked
//! against the shared contact fixtures.


pub use crate::app::models::fixtures::{column_values, contact_dataset, contact_row};
