//! Built-in consistency rules for the registration wizard
//!
//! All rules are pure functions over the document and go through the same
//! `register` contract external rule modules use. Presence rules treat an
//! empty sequence as "started but incomplete".

use crate::document::{Document, SectionName};
use crate::validation::{RuleDecision, ValidationRegistry};

/// Register the default rule set for a fresh session
pub fn register_default_rules(registry: &mut ValidationRegistry) {
    registry.register(
        "land-holders-present",
        vec![SectionName::LandHoldersInformation],
        land_holders_present,
    );
    registry.register(
        "land-holder-identity",
        vec![SectionName::LandHoldersInformation],
        land_holder_identity,
    );
    registry.register(
        "property-right-substance",
        vec![SectionName::PropertyRights],
        property_right_substance,
    );
    registry.register(
        "registrar-identity",
        vec![SectionName::RegistrarDetails],
        registrar_identity,
    );
    registry.register(
        "mailing-address-reachable",
        vec![SectionName::RuralProperties],
        mailing_address_reachable,
    );
    registry.register(
        "rights-match-holders",
        vec![
            SectionName::LandHoldersInformation,
            SectionName::PropertyRights,
        ],
        rights_match_holders,
    );
    registry.register(
        "submission-complete",
        SectionName::ALL.to_vec(),
        submission_complete,
    );
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|s| s.trim().is_empty())
}

/// At least one land holder must be on the transaction
pub fn land_holders_present(doc: &Document) -> RuleDecision {
    match doc.land_holders.as_deref() {
        Some([]) | None => RuleDecision::fail("at least one land holder is required"),
        Some(_) => RuleDecision::pass(),
    }
}

/// Each land holder needs an identifier; natural persons additionally need
/// a birth date and mother's name
pub fn land_holder_identity(doc: &Document) -> RuleDecision {
    let mut messages = Vec::new();
    for (i, holder) in doc.land_holders.as_deref().unwrap_or_default().iter().enumerate() {
        if blank(&holder.identifier) {
            messages.push(format!("land holder {} is missing an identifier", i + 1));
        }
        if holder.is_natural_person() {
            if holder.birth_date.is_none() {
                messages.push(format!("land holder {} is missing a birth date", i + 1));
            }
            if blank(&holder.mother_name) {
                messages.push(format!("land holder {} is missing the mother's name", i + 1));
            }
        }
    }
    RuleDecision::from_messages(messages)
}

/// Each right needs a registered name and a positive area
pub fn property_right_substance(doc: &Document) -> RuleDecision {
    let mut messages = Vec::new();
    for (i, right) in doc.property_rights.as_deref().unwrap_or_default().iter().enumerate() {
        if blank(&right.registered_name) {
            messages.push(format!("right {} is missing a registered name", i + 1));
        }
        match right.area {
            Some(area) if area > 0.0 => {}
            _ => messages.push(format!("right {} needs a positive area", i + 1)),
        }
    }
    RuleDecision::from_messages(messages)
}

/// The registrar needs an identifier; a representative, when present, must
/// carry an identifier of their own, distinct from the registrar's
pub fn registrar_identity(doc: &Document) -> RuleDecision {
    let Some(registrar) = doc.registrar.as_ref() else {
        return RuleDecision::fail("registrar details have not been filled in");
    };

    let mut messages = Vec::new();
    if blank(&registrar.identifier) {
        messages.push("registrar is missing an identifier".to_string());
    }
    if let Some(representative) = registrar.representative.as_ref() {
        if blank(&representative.identifier) {
            messages.push("representative is missing an identifier".to_string());
        } else if representative.identifier == registrar.identifier {
            messages.push("representative must be a different person than the registrar".to_string());
        }
    }
    RuleDecision::from_messages(messages)
}

/// Correspondence must be deliverable: recipient, zip, and an email that at
/// least looks like one
pub fn mailing_address_reachable(doc: &Document) -> RuleDecision {
    let Some(property) = doc.rural_property.as_ref() else {
        return RuleDecision::fail("rural property details have not been filled in");
    };
    let Some(mail) = property.mailing_address.as_ref() else {
        return RuleDecision::fail("mailing address has not been filled in");
    };

    let mut messages = Vec::new();
    if blank(&mail.recipient) {
        messages.push("mailing address needs a recipient".to_string());
    }
    if blank(&mail.zip) {
        messages.push("mailing address needs a zip code".to_string());
    }
    match mail.email.as_deref() {
        None => messages.push("mailing address needs an email address".to_string()),
        Some(email) if !email.contains('@') => {
            messages.push(format!("'{email}' is not a valid email address"));
        }
        Some(_) => {}
    }
    RuleDecision::from_messages(messages)
}

/// Cross-section: every right's registered name must match some land
/// holder's name
pub fn rights_match_holders(doc: &Document) -> RuleDecision {
    let holders = doc.land_holders.as_deref().unwrap_or_default();
    let mut messages = Vec::new();
    for right in doc.property_rights.as_deref().unwrap_or_default() {
        let Some(registered) = right.registered_name.as_deref() else {
            continue; // substance rule reports the missing name
        };
        let known = holders.iter().any(|h| h.name.as_deref() == Some(registered));
        if !known {
            messages.push(format!(
                "right registered to '{registered}' matches no land holder"
            ));
        }
    }
    RuleDecision::from_messages(messages)
}

/// Every section must be started before submission
pub fn submission_complete(doc: &Document) -> RuleDecision {
    let missing: Vec<String> = SectionName::ALL
        .into_iter()
        .filter(|name| !doc.is_started(*name))
        .map(|name| format!("section '{name}' has not been started"))
        .collect();
    RuleDecision::from_messages(missing)
}
