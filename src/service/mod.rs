//! Validation and cursor logic shared by the handlers.

pub mod cursor;
pub mod validation;

pub use validation::RequestValidator;
