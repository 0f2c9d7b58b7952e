//! # Repositories Crate
//!
//! Per-domain search entry points over the shared, read-only `Catalog`.
//!
//! ## Components
//!
//! ### MentorRepository
//! Browse-screen search over mentors plus the profile lookups:
//! - Free-text query, category, rating, price and experience constraints
//! - Top-rated mentors for the home screen
//!
//! ### ResourceRepository
//! Resource hub search plus category, subcategory and type listings,
//! and the recent / popular / top-rated shelves.
//!
//! ### StoryRepository
//! Success story search plus category listings and recent / popular shelves.
//!
//! Every search runs through the same Filter-Sort-Paginate pipeline; the
//! repositories only pick the filter, the sort and the page.
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use repositories::MentorRepository;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::load_from_dir(Path::new("data"))?);
//! let mentors = MentorRepository::new(catalog.clone());
//!
//! let page = mentors.search_mentors(Some("aptitude"), None, 1, None)?;
//! let top = mentors.get_top_rated_mentors(3);
//! ```

pub mod mentor;
pub mod resource;
pub mod story;

// Re-export commonly used types
pub use mentor::MentorRepository;
pub use resource::ResourceRepository;
pub use story::StoryRepository;

use pipeline::{PageRequest, Record, SearchPipeline, SortKey};

/// The first `limit` records of a pipeline run, cloned out of the catalog.
///
/// A limit of 0 yields an empty list.
pub(crate) fn take_top<T, S>(
    pipeline: &SearchPipeline<T>,
    records: &[T],
    sort: &S,
    limit: usize,
) -> Vec<T>
where
    T: Record,
    S: SortKey<T>,
{
    if limit == 0 {
        return Vec::new();
    }
    pipeline.run(records, sort, PageRequest::first(limit)).items
}

#[cfg(test)]
pub(crate) mod test_support {
    use catalog::Catalog;
    use std::path::PathBuf;
    use std::sync::Arc;

    /// The sample catalog shipped in `data/`
    pub fn sample_catalog() -> Arc<Catalog> {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
        Arc::new(Catalog::load_from_dir(&dir).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline::MentorSort;

    #[test]
    fn test_take_top_zero_limit() {
        let catalog = test_support::sample_catalog();
        let top = take_top(&SearchPipeline::new(), catalog.mentors(), &MentorSort::Rating, 0);
        assert!(top.is_empty());
    }

    #[test]
    fn test_take_top_truncates() {
        let catalog = test_support::sample_catalog();
        let top = take_top(&SearchPipeline::new(), catalog.mentors(), &MentorSort::Price, 2);
        let rates: Vec<u32> = top.iter().map(|m| m.hourly_rate).collect();
        assert_eq!(rates, vec![350, 400]);
    }
}
