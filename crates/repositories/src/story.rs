//! Success story repository.

use crate::take_top;
use catalog::{Catalog, SuccessStory};
use pipeline::{
    Page, PageRequest, Result, SearchPipeline, StoryFilter, StorySort, DEFAULT_PAGE_SIZE,
};
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct StoryRepository {
    catalog: Arc<Catalog>,
    default_page_size: usize,
}

impl StoryRepository {
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

    #[instrument(skip(self, filter))]
    pub fn search_stories(
        &self,
        filter: Option<StoryFilter>,
        page: usize,
        page_size: Option<usize>,
    ) -> Result<Page<SuccessStory>> {
        let request = PageRequest::new(page, page_size.unwrap_or(self.default_page_size))?;
        let filter = filter.unwrap_or_default();

        let pipeline = filter.pipeline();
        debug!("Story search with filters {:?}", pipeline.filter_names());

        let result = pipeline.run(self.catalog.stories(), &filter.sort_by, request);
        debug!(
            "Found {} stories, returning {}",
            result.total_count,
            result.items.len()
        );
        Ok(result)
    }

    pub fn get_story_by_id(&self, id: &str) -> Option<SuccessStory> {
        self.catalog.get_story(id).cloned()
    }

    pub fn get_stories_by_category(&self, category_id: &str) -> Vec<SuccessStory> {
        self.catalog
            .stories_by_category(category_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn get_stories_by_subcategory(&self, subcategory_id: &str) -> Vec<SuccessStory> {
        self.catalog
            .stories_by_subcategory(subcategory_id)
            .into_iter()
            .cloned()
            .collect()
    }

    #[instrument(skip(self))]
    pub fn get_recent_stories(&self, limit: usize) -> Vec<SuccessStory> {
        take_top(
            &SearchPipeline::new(),
            self.catalog.stories(),
            &StorySort::Recent,
            limit,
        )
    }

    /// Most liked plus viewed first
    #[instrument(skip(self))]
    pub fn get_popular_stories(&self, limit: usize) -> Vec<SuccessStory> {
        take_top(
            &SearchPipeline::new(),
            self.catalog.stories(),
            &StorySort::Popular,
            limit,
        )
    }
}
