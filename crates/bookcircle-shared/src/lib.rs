//! # bookcircle-shared
//!
//! Types and constants shared between the BookCircle store and the
//! client command layer: UUID-backed entity ids, domain enums, the
//! form-validation error type, and application-wide constants.

pub mod constants;
pub mod error;
pub mod types;

pub use error::ValidationError;
pub use types::*;
