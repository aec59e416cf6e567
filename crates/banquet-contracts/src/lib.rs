// Public contracts for the Banquet API
// This crate defines DTOs, payload schemas, and the field validation layer

pub mod event;
pub mod income;
pub mod outcome;
pub mod validate;

pub use event::*;
pub use income::*;
pub use outcome::*;
pub use validate::{FieldErrors, Fields};
