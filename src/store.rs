//! The canonical form document and its read/write mediator

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::document::{
    Document, LandHolder, PropertyRight, RegistrarDetails, RuralProperty, SectionName,
    SectionValue,
};
use crate::error::{FormError, Result};

/// Owns the single [`Document`] for a wizard session and mediates all reads
/// and writes to it.
///
/// Writes arrive as JSON values (the wire contract with the presentation
/// layer) and are shape-checked before anything is stored; a rejected write
/// leaves the document exactly as it was. The store performs no validation
/// beyond shape and no I/O; cross-field rules live in the registry.
#[derive(Debug, Default)]
pub struct FormStateStore {
    doc: Document,
}

impl FormStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the whole document, as handed to validators
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Snapshot of one section; `None` when the section is not started.
    /// Never fails.
    pub fn section(&self, name: SectionName) -> Option<SectionValue> {
        self.doc.section(name)
    }

    pub fn land_holders(&self) -> Option<&[LandHolder]> {
        self.doc.land_holders.as_deref()
    }

    pub fn property_rights(&self) -> Option<&[PropertyRight]> {
        self.doc.property_rights.as_deref()
    }

    pub fn registrar(&self) -> Option<&RegistrarDetails> {
        self.doc.registrar.as_ref()
    }

    pub fn rural_property(&self) -> Option<&RuralProperty> {
        self.doc.rural_property.as_ref()
    }

    /// Replace a section wholesale from a JSON value.
    ///
    /// Fails with [`FormError::ShapeMismatch`] when the value does not
    /// conform to the section's declared shape; the document is unchanged on
    /// failure.
    pub fn set_section(&mut self, name: SectionName, value: Value) -> Result<()> {
        match name {
            SectionName::LandHoldersInformation => {
                self.doc.land_holders = Some(parse_shape(name, value)?);
            }
            SectionName::PropertyRights => {
                self.doc.property_rights = Some(parse_shape(name, value)?);
            }
            SectionName::RegistrarDetails => {
                self.doc.registrar = Some(parse_shape(name, value)?);
            }
            SectionName::RuralProperties => {
                self.doc.rural_property = Some(parse_shape(name, value)?);
            }
        }
        debug!(section = %name, "section replaced");
        Ok(())
    }

    /// Replace a section with an already-typed value. Cannot fail: a
    /// [`SectionValue`] conforms to its shape by construction.
    pub fn replace(&mut self, value: SectionValue) {
        let name = value.name();
        match value {
            SectionValue::LandHolders(v) => self.doc.land_holders = Some(v),
            SectionValue::PropertyRights(v) => self.doc.property_rights = Some(v),
            SectionValue::Registrar(v) => self.doc.registrar = Some(v),
            SectionValue::RuralProperty(v) => self.doc.rural_property = Some(v),
        }
        debug!(section = %name, "section replaced");
    }

    /// Merge a partial JSON object into the entry at `index` of a
    /// sequence-valued section, appending when `index` is one past the end.
    /// An absent section counts as an empty sequence.
    pub fn patch_entry(&mut self, name: SectionName, index: usize, partial: Value) -> Result<()> {
        let partial = partial.as_object().ok_or_else(|| FormError::ShapeMismatch {
            section: name,
            reason: "entry patch must be a JSON object".to_string(),
        })?;

        match name {
            SectionName::LandHoldersInformation => {
                let entry = merged_entry(name, self.doc.land_holders.as_deref(), index, partial)?;
                apply_entry(self.doc.land_holders.get_or_insert_with(Vec::new), index, entry);
            }
            SectionName::PropertyRights => {
                let entry =
                    merged_entry(name, self.doc.property_rights.as_deref(), index, partial)?;
                apply_entry(self.doc.property_rights.get_or_insert_with(Vec::new), index, entry);
            }
            _ => {
                return Err(FormError::ShapeMismatch {
                    section: name,
                    reason: "section is not sequence-valued".to_string(),
                })
            }
        }
        debug!(section = %name, index, "entry patched");
        Ok(())
    }

    /// Remove the entry at `index`, shifting later entries down
    pub fn remove_entry(&mut self, name: SectionName, index: usize) -> Result<()> {
        match name {
            SectionName::LandHoldersInformation => {
                remove_at(name, self.doc.land_holders.as_mut(), index)?;
            }
            SectionName::PropertyRights => {
                remove_at(name, self.doc.property_rights.as_mut(), index)?;
            }
            _ => {
                return Err(FormError::ShapeMismatch {
                    section: name,
                    reason: "section is not sequence-valued".to_string(),
                })
            }
        }
        debug!(section = %name, index, "entry removed");
        Ok(())
    }

    /// Clear one section back to "not started", or the whole document when
    /// no section is named
    pub fn reset(&mut self, name: Option<SectionName>) {
        match name {
            Some(SectionName::LandHoldersInformation) => self.doc.land_holders = None,
            Some(SectionName::PropertyRights) => self.doc.property_rights = None,
            Some(SectionName::RegistrarDetails) => self.doc.registrar = None,
            Some(SectionName::RuralProperties) => self.doc.rural_property = None,
            None => self.doc = Document::default(),
        }
        debug!(section = ?name, "reset");
    }
}

fn parse_shape<T: DeserializeOwned>(name: SectionName, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|err| FormError::ShapeMismatch {
        section: name,
        reason: err.to_string(),
    })
}

/// Build the post-patch entry without touching the stored sequence, so a
/// failed patch leaves the document untouched (including an absent section
/// staying absent).
fn merged_entry<T>(
    name: SectionName,
    entries: Option<&[T]>,
    index: usize,
    partial: &Map<String, Value>,
) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let len = entries.map_or(0, <[T]>::len);
    if index > len {
        return Err(FormError::IndexOutOfRange {
            section: name,
            index,
            len,
        });
    }

    let base = if index == len {
        Value::Object(Map::new())
    } else {
        serde_json::to_value(&entries.unwrap_or_default()[index]).map_err(|err| {
            FormError::ShapeMismatch {
                section: name,
                reason: err.to_string(),
            }
        })?
    };

    let mut merged = match base {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in partial {
        merged.insert(key.clone(), value.clone());
    }
    parse_shape(name, Value::Object(merged))
}

fn apply_entry<T>(entries: &mut Vec<T>, index: usize, entry: T) {
    if index == entries.len() {
        entries.push(entry);
    } else {
        entries[index] = entry;
    }
}

fn remove_at<T>(name: SectionName, entries: Option<&mut Vec<T>>, index: usize) -> Result<()> {
    let len = entries.as_ref().map_or(0, |v| v.len());
    if index >= len {
        return Err(FormError::IndexOutOfRange {
            section: name,
            index,
            len,
        });
    }
    if let Some(entries) = entries {
        entries.remove(index);
    }
    Ok(())
}
