//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while loading or validating the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Data file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A data file is not a valid JSON array of records
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// Two records of the same kind share an id
    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: String, id: String },

    /// A record field holds a value outside its allowed domain
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
