//! Column schema resolution
//!
//! Maps each known contact [`Field`] to the column that holds it in a concrete
//! dataset. Exports from different systems keep the documented 13-column order
//! most of the time but not always, so the documented position is checked
//! against the header row before it is trusted.

use crate::constants::columns;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A contact field the pipeline knows how to find
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    SourceId,
    FirstName,
    MiddleName,
    LastName,
    Address1,
    City,
    State,
    PostalCode,
    Phone,
    Address3,
    Province,
    Email,
    TrustedUrl,
}

impl Field {
    /// Every field, in documented column order
    pub const ALL: [Field; columns::COUNT] = [
        Field::SourceId,
        Field::FirstName,
        Field::MiddleName,
        Field::LastName,
        Field::Address1,
        Field::City,
        Field::State,
        Field::PostalCode,
        Field::Phone,
        Field::Address3,
        Field::Province,
        Field::Email,
        Field::TrustedUrl,
    ];

    /// Position of this field in the documented schema
    pub fn documented_index(&self) -> usize {
        match self {
            Field::SourceId => columns::SOURCE_ID,
            Field::FirstName => columns::FIRST_NAME,
            Field::MiddleName => columns::MIDDLE_NAME,
            Field::LastName => columns::LAST_NAME,
            Field::Address1 => columns::ADDRESS1,
            Field::City => columns::CITY,
            Field::State => columns::STATE,
            Field::PostalCode => columns::POSTAL_CODE,
            Field::Phone => columns::PHONE,
            Field::Address3 => columns::ADDRESS3,
            Field::Province => columns::PROVINCE,
            Field::Email => columns::EMAIL,
            Field::TrustedUrl => columns::TRUSTED_URL,
        }
    }

    /// Lowercase fragments that identify this field in a header name
    fn header_keywords(&self) -> &'static [&'static str] {
        match self {
            Field::SourceId => &["source_id", "source id", "sourceid"],
            Field::FirstName => &["first"],
            Field::MiddleName => &["middle"],
            Field::LastName => &["last"],
            Field::Address1 => &["address1", "address 1", "address_1", "addr1", "street"],
            Field::City => &["city"],
            Field::State => &["state"],
            Field::PostalCode => &["zip", "postal"],
            Field::Phone => &["phone"],
            Field::Address3 => &["address3", "address 3", "address_3", "addr3"],
            Field::Province => &["province"],
            Field::Email => &["email", "e-mail"],
            Field::TrustedUrl => &["trusted", "url"],
        }
    }

    /// Header names that identify this field only as the whole header
    fn exact_headers(&self) -> &'static [&'static str] {
        match self {
            Field::Address1 => &["address", "addr"],
            Field::State => &["st"],
            Field::PostalCode => &["postcode"],
            _ => &[],
        }
    }

    /// True when `header` names this field
    pub fn matches_header(&self, header: &str) -> bool {
        let header = header.trim().to_ascii_lowercase();
        self.exact_headers().contains(&header.as_str())
            || self
                .header_keywords()
                .iter()
                .any(|keyword| header.contains(keyword))
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Field::SourceId => "source id",
            Field::FirstName => "first name",
            Field::MiddleName => "middle name",
            Field::LastName => "last name",
            Field::Address1 => "address1",
            Field::City => "city",
            Field::State => "state",
            Field::PostalCode => "postal code",
            Field::Phone => "phone",
            Field::Address3 => "address3",
            Field::Province => "province",
            Field::Email => "email",
            Field::TrustedUrl => "trusted url",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolved field → column index mapping for one dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    indices: BTreeMap<Field, usize>,
}

impl ColumnSchema {
    /// Schema that assumes the documented layout without looking at headers
    pub fn standard() -> Self {
        Self {
            indices: Field::ALL
                .iter()
                .map(|field| (*field, field.documented_index()))
                .collect(),
        }
    }

    /// Resolve every field against a header row
    ///
    /// Per field: the documented position when its header names the field,
    /// else the first header naming the field, else the documented position
    /// if the row is that wide and its header names no other field, else
    /// unresolved.
    pub fn resolve(headers: &[String]) -> Self {
        let mut indices = BTreeMap::new();

        for field in Field::ALL {
            if let Some(index) = resolve_field(field, headers) {
                indices.insert(field, index);
            }
        }

        Self { indices }
    }

    /// Column holding `field`, if resolved
    pub fn get(&self, field: Field) -> Option<usize> {
        self.indices.get(&field).copied()
    }

    /// Column holding `field`, or a structural error naming the dataset
    pub fn require(&self, field: Field, source_name: &str) -> Result<usize> {
        self.get(field)
            .ok_or_else(|| Error::missing_column(field, source_name))
    }

    /// Fields that could not be located
    pub fn unresolved(&self) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|field| !self.indices.contains_key(field))
            .collect()
    }

    /// Fields resolved to a column other than their documented one
    pub fn relocated(&self) -> Vec<(Field, usize)> {
        self.indices
            .iter()
            .filter(|(field, index)| field.documented_index() != **index)
            .map(|(field, index)| (*field, *index))
            .collect()
    }
}

fn resolve_field(field: Field, headers: &[String]) -> Option<usize> {
    let documented = field.documented_index();

    if headers
        .get(documented)
        .is_some_and(|header| field.matches_header(header))
    {
        return Some(documented);
    }

    if let Some(found) = headers.iter().position(|header| field.matches_header(header)) {
        return Some(found);
    }

    let header = headers.get(documented)?;
    let claimed = Field::ALL
        .iter()
        .any(|other| *other != field && other.matches_header(header));
    (!claimed).then_some(documented)
}
