//! Shared data model for text MOBA content.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, validate_game};
