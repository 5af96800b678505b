//! Section shapes and the form document

mod land_holders;
mod property_rights;
mod registrar;
mod rural_property;
mod section;

pub use land_holders::*;
pub use property_rights::*;
pub use registrar::*;
pub use rural_property::*;
pub use section::*;
