//! Sort-key resolution.
//!
//! Every domain sort option boils down to one of three comparators: a
//! numeric key descending, a numeric key ascending, or a text key compared
//! case-insensitively. Sorting is always stable, so records that tie keep
//! the relative order they had in the source collection.

use crate::traits::SortKey;
use catalog::Record;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Above this many records the sort runs on the rayon pool
const PARALLEL_SORT_THRESHOLD: usize = 4096;

/// The field a sort option orders by, and in which direction.
pub enum SortField<T> {
    /// Highest value first (recency, popularity, rating, experience)
    Descending(fn(&T) -> f64),
    /// Lowest value first (price, rank)
    Ascending(fn(&T) -> f64),
    /// A-Z on the lowercased text
    Alphabetical(fn(&T) -> &str),
}

impl<T> SortField<T> {
    /// Compare two records under this field.
    ///
    /// Floats are compared with `total_cmp`, so a NaN key orders
    /// deterministically instead of panicking.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        match self {
            SortField::Descending(key) => key(b).total_cmp(&key(a)),
            SortField::Ascending(key) => key(a).total_cmp(&key(b)),
            SortField::Alphabetical(key) => key(a).to_lowercase().cmp(&key(b).to_lowercase()),
        }
    }
}

fn created_at_of<T: Record>(record: &T) -> f64 {
    record.created_at() as f64
}

impl<T: Record> SortField<T> {
    /// Newest record first
    pub fn recency() -> Self {
        SortField::Descending(created_at_of::<T>)
    }
}

/// Stable-sort borrowed records by the given sort key.
pub fn sort_records<T, S>(records: &mut [&T], sort: &S)
where
    T: Sync,
    S: SortKey<T>,
{
    let field = sort.field();
    let parallel = records.len() >= PARALLEL_SORT_THRESHOLD;
    match field {
        // Lowercase each key once instead of on every comparison
        SortField::Alphabetical(key) if parallel => {
            records.par_sort_by_cached_key(|record| key(record).to_lowercase())
        }
        SortField::Alphabetical(key) => records.sort_by_cached_key(|record| key(record).to_lowercase()),
        // par_sort_by is a stable merge sort
        field if parallel => records.par_sort_by(|a, b| field.compare(a, b)),
        field => records.sort_by(|a, b| field.compare(a, b)),
    }
}
