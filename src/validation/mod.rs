//! Validator registration, execution, and outcome reporting

mod registry;
pub mod rules;

pub use registry::*;
