//! Registrar and representative identity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identity of the person registering on the registrar's behalf.
///
/// Same identity fields as the registrar; the relationship is composition,
/// not inheritance, and nesting is bounded at one level: a representative
/// has no representative of their own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepresentativeDetails {
    pub identifier: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub name: Option<String>,
    pub mother_name: Option<String>,
}

/// Identity of the registrar filing the transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrarDetails {
    pub identifier: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub name: Option<String>,
    pub mother_name: Option<String>,
    pub representative: Option<RepresentativeDetails>,
}

impl RegistrarDetails {
    /// True when a representative block is present
    pub fn has_representative(&self) -> bool {
        self.representative.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_representative_is_optional() {
        let value = serde_json::json!({ "identifier": "123", "name": "Ana" });
        let registrar: RegistrarDetails = serde_json::from_value(value).unwrap();
        assert!(!registrar.has_representative());
        assert_eq!(registrar.identifier.as_deref(), Some("123"));
    }

    #[test]
    fn test_nested_representative_parses() {
        let value = serde_json::json!({
            "identifier": "123",
            "representative": { "identifier": "456", "name": "Rui" }
        });
        let registrar: RegistrarDetails = serde_json::from_value(value).unwrap();
        let rep = registrar.representative.unwrap();
        assert_eq!(rep.identifier.as_deref(), Some("456"));
    }

    #[test]
    fn test_representative_of_representative_is_rejected() {
        let value = serde_json::json!({
            "representative": { "representative": { "identifier": "789" } }
        });
        let parsed: Result<RegistrarDetails, _> = serde_json::from_value(value);
        assert!(parsed.is_err());
    }
}
