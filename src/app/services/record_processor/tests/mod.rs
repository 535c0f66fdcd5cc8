//! Comprehensive tests for record processor module
//!
//! This module provides unit and integration tests for all record processing components.


// Test helper functions and fixtures
use crate::app::models::{Dataset, Row};
use crate::constants::columns;

pub use crate::app::models::fixtures::{column_values, contact_dataset, contact_row, geo_row};

/// Create a contact row with the given names, state and phone
pub fn create_contact(first: &str, last: &str, state: &str, phone: &str) -> Row {
    contact_row(&[
        (columns::FIRST_NAME, first),
        (columns::LAST_NAME, last),
        (columns::STATE, state),
        (columns::PHONE, phone),
    ])
}

/// A messy export exercising every stage of the default pipeline
pub fn create_messy_dataset() -> Dataset {
    contact_dataset(vec![
        // Clean row, kept
        contact_row(&[]),
        // Needs address, name, email, phone and state cleaning; ZIP empty
        contact_row(&[
            (columns::FIRST_NAME, "Bob!"),
            (columns::ADDRESS1, "9 Oak Ave, Apt 2"),
            (columns::STATE, "ca"),
            (columns::POSTAL_CODE, ""),
            (columns::PHONE, "(310) 555-0001"),
            (columns::EMAIL, "12345"),
        ]),
        // Duplicate of the first row's phone
        contact_row(&[(columns::FIRST_NAME, "Alicia"), (columns::PHONE, "1-512-555-1234")]),
        // Invalid phone, dropped by final validation
        contact_row(&[(columns::FIRST_NAME, "Carl"), (columns::PHONE, "555")]),
        // Territory, dropped by state validation
        contact_row(&[
            (columns::FIRST_NAME, "Dana"),
            (columns::STATE, "PR"),
            (columns::POSTAL_CODE, "00999"),
            (columns::PHONE, "7875550000"),
        ]),
        // No names, dropped by final validation
        contact_row(&[
            (columns::FIRST_NAME, "R2D2"),
            (columns::MIDDLE_NAME, ""),
            (columns::LAST_NAME, ""),
            (columns::PHONE, "2125550100"),
            (columns::STATE, "NY"),
            (columns::POSTAL_CODE, "10028"),
        ]),
    ])
}
