//! The SearchPipeline chains filters, then sorts, then paginates.
//!
//! This module provides the main SearchPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::page::{paginate, Page, PageRequest};
use crate::sort::sort_records;
use crate::traits::{Filter, SortKey};
use catalog::Record;
use rayon::prelude::*;

/// Stages smaller than this are filtered on the calling thread
const PARALLEL_FILTER_THRESHOLD: usize = 1024;

/// Chains filters into one search over a record collection.
///
/// ## Usage
/// ```ignore
/// let pipeline = SearchPipeline::new()
///     .add_filter(CategoryFilter::new("exam_category", mentor_category, ["UPSC"]))
///     .add_filter(RangeFilter::new("hourly_rate", mentor_rate, Some(400.0), Some(500.0)));
///
/// let page = pipeline.run(catalog.mentors(), &MentorSort::Rating, PageRequest::default());
/// ```
pub struct SearchPipeline<T> {
    filters: Vec<Box<dyn Filter<T>>>,
}

impl<T: Record> SearchPipeline<T> {
    /// Create a new empty SearchPipeline (every record passes).
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter<T> + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Add a filter in place, for pipelines assembled conditionally.
    pub fn push_filter(&mut self, filter: impl Filter<T> + 'static) {
        self.filters.push(Box::new(filter));
    }

    /// Names of the active filters, in evaluation order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence (logical AND).
    ///
    /// ## Algorithm
    /// 1. Start from references to every record, in source order
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Keep only the records it matches
    ///    c. Log output count
    /// 3. Return the survivors, still in source order
    ///
    /// The source slice is only borrowed: nothing is cloned or mutated.
    pub fn filter<'a>(&self, records: &'a [T]) -> Vec<&'a T> {
        let mut current: Vec<&'a T> = records.iter().collect();
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = if current.len() >= PARALLEL_FILTER_THRESHOLD {
                // rayon's collect keeps the original order
                current
                    .into_par_iter()
                    .filter(|record| filter.matches(record))
                    .collect()
            } else {
                current
                    .into_iter()
                    .filter(|record| filter.matches(record))
                    .collect()
            };
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }

    /// Filter, then sort, then cut out one page.
    ///
    /// Never fails: empty input or a page past the end both yield an
    /// empty page with `has_more = false`.
    pub fn run<S: SortKey<T>>(&self, records: &[T], sort: &S, request: PageRequest) -> Page<T> {
        let mut survivors = self.filter(records);
        sort_records(&mut survivors, sort);
        let page = paginate(&survivors, request);
        tracing::debug!(
            "Search complete: {} of {} records matched, page {} holds {}",
            page.total_count,
            records.len(),
            request.page(),
            page.items.len()
        );
        page
    }
}

impl<T: Record> Default for SearchPipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}
