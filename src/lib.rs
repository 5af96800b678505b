//! rural-form-core - Shared form state and validation for rural-property
//! registration wizards
//!
//! A headless core: the presentation layer mounts the form sections, writes
//! values into the [`FormStateStore`], and asks the [`ValidationRegistry`]
//! for outcomes to render. Both live inside a [`FormSession`] acquired
//! through a [`SessionSlot`].

pub mod document;
pub mod error;
pub mod session;
pub mod store;
pub mod validation;

pub use document::{Document, SectionName, SectionValue};
pub use error::{FormError, Result};
pub use session::{FormSession, SessionSlot};
pub use store::FormStateStore;
pub use validation::{EntryOutcome, Outcome, RuleDecision, RuleReport, ValidationRegistry};
