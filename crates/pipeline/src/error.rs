//! Error types for the search pipeline.
//!
//! The pipeline itself is pure and infallible over in-memory data; the only
//! thing it rejects is a malformed page request, at the boundary.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Pages are 1-indexed and must hold at least one record
    #[error("Invalid page request: page {page}, page size {page_size} (both must be at least 1)")]
    InvalidPage { page: usize, page_size: usize },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
