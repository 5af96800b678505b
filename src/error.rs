//! Error types shared across the form core

use crate::document::SectionName;

/// Errors surfaced by the store and the session scope
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Store or registry requested outside an open session. Indicates a
    /// wiring bug in the caller, not bad user input.
    #[error("no active form session")]
    ContextMissing,

    /// A written value does not conform to the section's declared shape.
    #[error("value does not match the {section} shape: {reason}")]
    ShapeMismatch {
        section: SectionName,
        reason: String,
    },

    /// An entry index past the end of a sequence section.
    #[error("index {index} out of range for {section} (len {len})")]
    IndexOutOfRange {
        section: SectionName,
        index: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, FormError>;
