//! Tests for the geographic reconciliation engine

pub mod reconciler_tests;

use crate::app::services::geo_reconciliation::GeoColumns;
use crate::constants::columns;

pub use crate::app::models::fixtures::{contact_dataset, geo_row};

/// Geo columns at their documented positions
pub fn standard_geo_columns() -> GeoColumns {
    GeoColumns {
        state: columns::STATE,
        zip: columns::POSTAL_CODE,
        phone: columns::PHONE,
    }
}
