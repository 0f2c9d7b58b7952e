//! Per-domain filters and sort options.
//!
//! Each domain filter is a plain serde struct of optional constraints. Calling
//! `pipeline()` turns the constraints that are actually set into a
//! `SearchPipeline`, so an all-default filter yields an empty pipeline.

pub mod mentor;
pub mod resource;
pub mod story;

pub use mentor::{MentorFilter, MentorSort};
pub use resource::{ResourceFilter, ResourceSort};
pub use story::{StoryFilter, StorySort};

/// The query with surrounding whitespace removed, or `None` when blank
pub(crate) fn non_blank(query: Option<&str>) -> Option<&str> {
    query.map(str::trim).filter(|q| !q.is_empty())
}

/// Canonical form of a sort name: lowercase, words joined by `_`
pub(crate) fn sort_name(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}
