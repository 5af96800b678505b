//! Property-right entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of right held over the land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RightKind {
    Property,
    Landholding,
}

/// Metadata of the supporting document for a right entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RightDocument {
    pub number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub issuing_office: Option<String>,
}

/// One registered right on the transaction.
///
/// Fields are optional for the same reason `LandHolder` fields are: entries
/// grow by patches and are judged complete by validators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyRight {
    pub kind: Option<RightKind>,
    pub registered_name: Option<String>,
    /// Area in hectares
    pub area: Option<f64>,
    pub document: Option<RightDocument>,
    pub notary_state: Option<String>,
    pub notary_city: Option<String>,
    pub certification_code: Option<String>,
    pub registry_code: Option<String>,
}
