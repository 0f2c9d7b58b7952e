//! Mentor repository.
//!
//! Backs the browse-mentors screen (search with filters and sort) and the
//! mentor profile lookups.

use crate::take_top;
use catalog::{Catalog, Mentor};
use pipeline::{MentorFilter, MentorSort, Page, PageRequest, Result, SearchPipeline, DEFAULT_PAGE_SIZE};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Search and lookup over the catalog's mentors
#[derive(Clone)]
pub struct MentorRepository {
    /// Shared reference to the catalog (read-only, so no Mutex needed)
    catalog: Arc<Catalog>,

    /// Page size used when a search does not name one
    default_page_size: usize,
}

impl MentorRepository {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Configure the default page size (default: 20)
    pub fn with_default_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Search mentors.
    ///
    /// ## Parameters
    /// - `query`: free text; when non-blank it replaces `filter.query`
    /// - `filter`: constraints and sort, `None` for everything by recency
    /// - `page`: 1-indexed page number
    /// - `page_size`: `None` for the repository default
    ///
    /// ## Errors
    /// `PipelineError::InvalidPage` when `page` or the page size is 0.
    #[instrument(skip(self, filter))]
    pub fn search_mentors(
        &self,
        query: Option<&str>,
        filter: Option<MentorFilter>,
        page: usize,
        page_size: Option<usize>,
    ) -> Result<Page<Mentor>> {
        let request = PageRequest::new(page, page_size.unwrap_or(self.default_page_size))?;

        let mut filter = filter.unwrap_or_default();
        if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
            filter = filter.with_query(query);
        }

        let pipeline = filter.pipeline();
        debug!("Mentor search with filters {:?}", pipeline.filter_names());

        let result = pipeline.run(self.catalog.mentors(), &filter.sort_by, request);
        debug!(
            "Found {} mentors, returning {}",
            result.total_count,
            result.items.len()
        );
        Ok(result)
    }

    /// Every mentor, in catalog order
    pub fn get_all_mentors(&self) -> Vec<Mentor> {
        self.catalog.mentors().to_vec()
    }

    pub fn get_mentor_by_id(&self, id: &str) -> Option<Mentor> {
        self.catalog.get_mentor(id).cloned()
    }

    /// Mentors of one exam category (case-insensitive), in catalog order
    #[instrument(skip(self))]
    pub fn get_mentors_by_category(&self, category: &str) -> Vec<Mentor> {
        self.catalog
            .mentors_by_category(category)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The `limit` highest-rated mentors; ties keep catalog order
    #[instrument(skip(self))]
    pub fn get_top_rated_mentors(&self, limit: usize) -> Vec<Mentor> {
        take_top(
            &SearchPipeline::new(),
            self.catalog.mentors(),
            &MentorSort::Rating,
            limit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_catalog;
    use pipeline::PipelineError;

    fn ids(mentors: &[Mentor]) -> Vec<&str> {
        mentors.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_search_without_filter_returns_everything_by_recency() {
        let repo = MentorRepository::new(sample_catalog());
        let page = repo.search_mentors(None, None, 1, None).unwrap();

        assert_eq!(page.total_count, 5);
        // created_at: 4 is the newest profile, 5 the oldest
        assert_eq!(ids(&page.items), vec!["4", "3", "2", "1", "5"]);
        assert!(!page.has_more);
    }

    #[test]
    fn test_query_argument_overrides_filter_query() {
        let repo = MentorRepository::new(sample_catalog());
        let filter = MentorFilter::default().with_query("railway");

        let page = repo
            .search_mentors(Some("Quantitative"), Some(filter), 1, None)
            .unwrap();
        assert_eq!(ids(&page.items), vec!["4", "2"]);

        let blank = repo
            .search_mentors(Some("   "), Some(MentorFilter::default().with_query("vikram")), 1, None)
            .unwrap();
        assert_eq!(ids(&blank.items), vec!["5"]);
    }

    #[test]
    fn test_filter_and_sort() {
        let repo = MentorRepository::new(sample_catalog());
        let filter = MentorFilter {
            min_price: Some(400),
            max_price: Some(500),
            sort_by: MentorSort::Price,
            ..Default::default()
        };

        let page = repo.search_mentors(None, Some(filter), 1, Some(2)).unwrap();
        assert_eq!(ids(&page.items), vec!["2", "4"]);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.next_page, Some(2));
    }

    #[test]
    fn test_invalid_page_is_rejected() {
        let repo = MentorRepository::new(sample_catalog());
        assert_eq!(
            repo.search_mentors(None, None, 0, None),
            Err(PipelineError::InvalidPage { page: 0, page_size: 20 })
        );

        let zero_default = MentorRepository::new(sample_catalog()).with_default_page_size(0);
        assert!(zero_default.search_mentors(None, None, 1, None).is_err());
    }

    #[test]
    fn test_lookups() {
        let repo = MentorRepository::new(sample_catalog());

        assert_eq!(repo.get_all_mentors().len(), 5);
        assert_eq!(
            repo.get_mentor_by_id("2").map(|m| m.name),
            Some("Priya Sharma".to_string())
        );
        assert!(repo.get_mentor_by_id("missing").is_none());
        assert_eq!(ids(&repo.get_mentors_by_category("banking")), vec!["2"]);
    }

    #[test]
    fn test_top_rated_mentors() {
        let repo = MentorRepository::new(sample_catalog());
        let top = repo.get_top_rated_mentors(3);
        assert_eq!(ids(&top), vec!["2", "5", "1"]);
        assert!(repo.get_top_rated_mentors(0).is_empty());
    }
}
