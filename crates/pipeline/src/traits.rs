//! Core traits for the search pipeline.
//!
//! `Filter` is a single predicate over records; `SortKey` resolves a
//! domain's sort option to a comparator. Both are generic over the record
//! type so one pipeline serves mentors, resources and success stories.

use crate::sort::SortField;

/// Core trait for filtering records.
///
/// All filters must implement this trait to be used in the SearchPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be evaluated from rayon worker threads
/// - Filters only look at a record; they never own or mutate it
pub trait Filter<T>: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `record` satisfies this predicate.
    fn matches(&self, record: &T) -> bool;
}

/// Resolves a sort option to the field and direction records are ordered by.
pub trait SortKey<T> {
    fn field(&self) -> SortField<T>;
}
