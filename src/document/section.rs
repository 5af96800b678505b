//! Section names, section values, and the document they compose

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{LandHolder, PropertyRight, RegistrarDetails, RuralProperty};

/// Names of the wizard's form sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionName {
    LandHoldersInformation,
    PropertyRights,
    RegistrarDetails,
    RuralProperties,
}

impl SectionName {
    /// All sections, in wizard order
    pub const ALL: [SectionName; 4] = [
        SectionName::LandHoldersInformation,
        SectionName::PropertyRights,
        SectionName::RegistrarDetails,
        SectionName::RuralProperties,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::LandHoldersInformation => "Land Holders",
            Self::PropertyRights => "Property Rights",
            Self::RegistrarDetails => "Registrar",
            Self::RuralProperties => "Rural Property",
        }
    }

    /// True for sections whose value is an ordered sequence of entries
    pub fn is_sequence(&self) -> bool {
        matches!(
            self,
            Self::LandHoldersInformation | Self::PropertyRights
        )
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fully-shaped value for one section
#[derive(Debug, Clone, PartialEq)]
pub enum SectionValue {
    LandHolders(Vec<LandHolder>),
    PropertyRights(Vec<PropertyRight>),
    Registrar(RegistrarDetails),
    RuralProperty(RuralProperty),
}

impl SectionValue {
    /// The section this value belongs to
    pub fn name(&self) -> SectionName {
        match self {
            Self::LandHolders(_) => SectionName::LandHoldersInformation,
            Self::PropertyRights(_) => SectionName::PropertyRights,
            Self::Registrar(_) => SectionName::RegistrarDetails,
            Self::RuralProperty(_) => SectionName::RuralProperties,
        }
    }
}

/// The complete in-progress record for one wizard session.
///
/// One field per section; `None` means "not started". Owned exclusively by
/// the store and dropped when the session closes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub land_holders: Option<Vec<LandHolder>>,
    pub property_rights: Option<Vec<PropertyRight>>,
    pub registrar: Option<RegistrarDetails>,
    pub rural_property: Option<RuralProperty>,
}

impl Document {
    /// True when the named section has been written at least once
    pub fn is_started(&self, name: SectionName) -> bool {
        match name {
            SectionName::LandHoldersInformation => self.land_holders.is_some(),
            SectionName::PropertyRights => self.property_rights.is_some(),
            SectionName::RegistrarDetails => self.registrar.is_some(),
            SectionName::RuralProperties => self.rural_property.is_some(),
        }
    }

    /// Snapshot of one section, `None` when not started
    pub fn section(&self, name: SectionName) -> Option<SectionValue> {
        match name {
            SectionName::LandHoldersInformation => {
                self.land_holders.clone().map(SectionValue::LandHolders)
            }
            SectionName::PropertyRights => {
                self.property_rights.clone().map(SectionValue::PropertyRights)
            }
            SectionName::RegistrarDetails => {
                self.registrar.clone().map(SectionValue::Registrar)
            }
            SectionName::RuralProperties => {
                self.rural_property.clone().map(SectionValue::RuralProperty)
            }
        }
    }
}
