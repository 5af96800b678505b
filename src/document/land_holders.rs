//! Land-holder identification entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Legal personality of a land holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalPersonality {
    NaturalPerson,
    LegalEntity,
}

/// How the entry's data entered the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionMethod {
    /// Typed in by the user
    Fill,
    /// Pulled from an external registry
    Import,
}

/// One land holder on the transaction.
///
/// Every field is optional so entries can be assembled incrementally by
/// patches; completeness is a validator concern, not a shape concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LandHolder {
    pub legal_personality: Option<LegalPersonality>,
    pub acquisition_method: Option<AcquisitionMethod>,
    pub identifier: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub name: Option<String>,
    pub mother_name: Option<String>,
}

impl LandHolder {
    /// True when a natural person, false for legal entities or when the
    /// personality has not been chosen yet
    pub fn is_natural_person(&self) -> bool {
        self.legal_personality == Some(LegalPersonality::NaturalPerson)
    }
}
