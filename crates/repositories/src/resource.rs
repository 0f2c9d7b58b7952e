//! Resource repository: the resource hub search and its shelves.

use crate::take_top;
use catalog::{Catalog, Resource, ResourceType};
use pipeline::filters::{FieldFilter, RangeFilter};
use pipeline::{
    Page, PageRequest, ResourceFilter, ResourceSort, Result, SearchPipeline, DEFAULT_PAGE_SIZE,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Resources rated at least this high qualify as top rated
const TOP_RATED_THRESHOLD: f64 = 4.0;

fn resource_kind(r: &Resource) -> ResourceType {
    r.resource_type
}

#[derive(Clone)]
pub struct ResourceRepository {
    catalog: Arc<Catalog>,
    default_page_size: usize,
}

impl ResourceRepository {
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

    /// Search resources with an optional filter; `None` lists everything
    /// newest first.
    #[instrument(skip(self, filter))]
    pub fn search_resources(
        &self,
        filter: Option<ResourceFilter>,
        page: usize,
        page_size: Option<usize>,
    ) -> Result<Page<Resource>> {
        let request = PageRequest::new(page, page_size.unwrap_or(self.default_page_size))?;
        let filter = filter.unwrap_or_default();

        let pipeline = filter.pipeline();
        debug!("Resource search with filters {:?}", pipeline.filter_names());

        let result = pipeline.run(self.catalog.resources(), &filter.sort_by, request);
        debug!(
            "Found {} resources, returning {}",
            result.total_count,
            result.items.len()
        );
        Ok(result)
    }

    pub fn get_resource_by_id(&self, id: &str) -> Option<Resource> {
        self.catalog.get_resource(id).cloned()
    }

    /// Resources of one category id, e.g. "upsc"
    pub fn get_resources_by_category(&self, category_id: &str) -> Vec<Resource> {
        self.catalog
            .resources_by_category(category_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn get_resources_by_subcategory(&self, subcategory_id: &str) -> Vec<Resource> {
        self.catalog
            .resources_by_subcategory(subcategory_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Resources of one type, in catalog order
    #[instrument(skip(self))]
    pub fn get_resources_by_type(&self, resource_type: ResourceType) -> Vec<Resource> {
        SearchPipeline::new()
            .add_filter(FieldFilter::new("resource_type", resource_kind, resource_type))
            .filter(self.catalog.resources())
            .into_iter()
            .cloned()
            .collect()
    }

    #[instrument(skip(self))]
    pub fn get_recent_resources(&self, limit: usize) -> Vec<Resource> {
        take_top(
            &SearchPipeline::new(),
            self.catalog.resources(),
            &ResourceSort::Recent,
            limit,
        )
    }

    /// Most downloaded plus viewed first
    #[instrument(skip(self))]
    pub fn get_popular_resources(&self, limit: usize) -> Vec<Resource> {
        take_top(
            &SearchPipeline::new(),
            self.catalog.resources(),
            &ResourceSort::Popular,
            limit,
        )
    }

    /// Resources rated 4.0 or higher, highest first
    #[instrument(skip(self))]
    pub fn get_top_rated_resources(&self, limit: usize) -> Vec<Resource> {
        let pipeline = SearchPipeline::new().add_filter(RangeFilter::new(
            "rating",
            |r: &Resource| Some(f64::from(r.rating)),
            Some(TOP_RATED_THRESHOLD),
            None,
        ));
        take_top(
            &pipeline,
            self.catalog.resources(),
            &ResourceSort::HighestRated,
            limit,
        )
    }
}
