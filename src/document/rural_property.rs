//! Rural-property location and mailing details

use serde::{Deserialize, Serialize};

/// Zone the property sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Urban,
    Rural,
}

/// Where correspondence about the transaction should go
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MailingAddress {
    pub recipient: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub zip: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Location details of the property under registration.
///
/// `location_zone` is the one field the shape itself requires; a value
/// without it is rejected at the store boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuralProperty {
    pub name: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub location_zone: Zone,
    pub access_description: Option<String>,
    pub mailing_address: Option<MailingAddress>,
}
