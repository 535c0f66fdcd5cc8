//! Geographic reconciliation engine
//!
//! Cross-validates the state, ZIP and phone columns of each row and fills in
//! whatever can be inferred:
//!
//! 1. State is uppercased and trimmed
//! 2. ZIP is cleaned (letters or fewer than five digits clear it)
//! 3. A valid ZIP outside the state's ranges replaces the state with the ZIP's owner
//! 4. Otherwise gaps are filled: ZIP from state, state from ZIP, and both from
//!    the phone's area code when neither is known
//!
//! - [`lookup`] - static tables (representative ZIPs, ZIP ranges, area codes)
//! - [`reconciler`] - the per-row algorithm
//! - [`stats`] - [`GeoStats`] counters

pub mod lookup;
pub mod reconciler;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use lookup::{GeoTables, ZipRange, geo_tables};
pub use reconciler::{GeoColumns, ZipCleaning, clean_zip, reconcile_geo};
pub use stats::GeoStats;
