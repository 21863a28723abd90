//! Invoice text extraction.

mod parser;
pub mod rules;

pub use parser::*;

use crate::error::ExtractionError;

/// Result type for invoice extraction.
pub type Result<T> = std::result::Result<T, ExtractionError>;
