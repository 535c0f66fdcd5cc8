//! Application constants for the contact ETL pipeline
//!
//! This module contains the documented column layout, stage names, default
//! values and the allowed-state list used throughout the crate. The geographic
//! lookup tables live with the reconciliation engine that owns them.

// =============================================================================
// Column Layout
// =============================================================================

/// Documented column positions of the 13-column contact schema
///
/// These are the positions a well-formed export uses. They are only the
/// starting point for [`crate::ColumnSchema::resolve`], which checks them
/// against the actual header row.
pub mod columns {
    pub const SOURCE_ID: usize = 0;
    pub const FIRST_NAME: usize = 1;
    pub const MIDDLE_NAME: usize = 2;
    pub const LAST_NAME: usize = 3;
    pub const ADDRESS1: usize = 4;
    pub const CITY: usize = 5;
    pub const STATE: usize = 6;
    pub const POSTAL_CODE: usize = 7;
    pub const PHONE: usize = 8;
    pub const ADDRESS3: usize = 9;
    pub const PROVINCE: usize = 10;
    pub const EMAIL: usize = 11;
    pub const TRUSTED_URL: usize = 12;

    /// Number of columns in the documented schema
    pub const COUNT: usize = 13;
}

/// Canonical header names for the documented schema
pub const STANDARD_HEADERS: &[&str] = &[
    "source_id",
    "first_name",
    "middle",
    "last_name",
    "address1",
    "city",
    "state",
    "postal_code",
    "phone_number",
    "address3",
    "province",
    "email",
    "trusted_url",
];

// =============================================================================
// Pipeline Stages
// =============================================================================

/// Names accepted when parsing a [`crate::Stage`]
pub const STAGE_NAMES: &[&str] = &[
    "drop-columns",
    "clean-address",
    "clean-names",
    "clean-emails",
    "normalize-phones",
    "clean-states",
    "populate-geo",
    "dedup-phones",
    "validate-states",
    "final-validate",
];

/// Stage order used when neither the config file nor the CLI chooses one
pub const DEFAULT_STEPS: &[&str] = &[
    "clean-address",
    "clean-names",
    "clean-emails",
    "normalize-phones",
    "clean-states",
    "populate-geo",
    "dedup-phones",
    "validate-states",
    "final-validate",
];

// =============================================================================
// Field Rules
// =============================================================================

/// Phone numbers are accepted only at this length after normalization
pub const PHONE_DIGITS: usize = 10;

/// Length of a North American number carrying the leading country code
pub const PHONE_DIGITS_WITH_COUNTRY_CODE: usize = 11;

/// Number of digits kept from a postal code
pub const ZIP_DIGITS: usize = 5;

/// Number of leading phone digits that form the area code
pub const AREA_CODE_DIGITS: usize = 3;

/// The 50 US states plus DC, accepted by the state validator
pub const ALLOWED_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

// =============================================================================
// Output Defaults
// =============================================================================

/// Suffix appended to the input file stem for the cleaned CSV
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_cleaned";

/// Suffix for the dropped-rows CSV
pub const DROPPED_OUTPUT_SUFFIX: &str = "_dropped";

/// Suffix for the text summary report
pub const REPORT_OUTPUT_SUFFIX: &str = "_report";

/// Rows shown by the preview command when no count is given
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Widest a preview column is allowed to grow before values are truncated
pub const PREVIEW_MAX_COLUMN_WIDTH: usize = 24;

/// Log filter target for this crate
pub const LOG_TARGET: &str = "contact_etl";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "CONTACT_ETL_";

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "contact-etl";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";
