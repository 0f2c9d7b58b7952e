//! Generic Filter-Sort-Paginate pipeline for AspireBridge search.
//!
//! This crate provides:
//! - Filter trait and generic filter implementations
//! - SearchPipeline for composing filters, sorting and paginating
//! - Per-domain filters and sort options (mentors, resources, stories)
//!
//! ## Architecture
//! A search runs in three stages, always in this order:
//! 1. Filters remove records that fail any active constraint (logical AND)
//! 2. The survivors are stable-sorted by the requested sort key
//! 3. One 1-indexed page is cut out, with `total_count` and `has_more`
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{MentorFilter, MentorSort, PageRequest};
//!
//! let filter = MentorFilter {
//!     exam_categories: vec!["UPSC".to_string()],
//!     min_rating: Some(4.5),
//!     sort_by: MentorSort::Price,
//!     ..Default::default()
//! };
//!
//! let page = filter
//!     .pipeline()
//!     .run(catalog.mentors(), &filter.sort_by, PageRequest::new(1, 20)?);
//! ```

pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod page;
pub mod sort;
pub mod domains;
pub mod traits;

// Re-export main types
pub use catalog::Record;
pub use error::{PipelineError, Result};
pub use filter_pipeline::SearchPipeline;
pub use page::{paginate, Page, PageRequest, DEFAULT_PAGE_SIZE};
pub use sort::{sort_records, SortField};
pub use domains::{MentorFilter, MentorSort, ResourceFilter, ResourceSort, StoryFilter, StorySort};
pub use traits::{Filter, SortKey};
