//! # Search Service
//!
//! Async front door to the three repositories:
//! 1. Wait out the configured latency (if any)
//! 2. Run the repository search on the blocking pool
//! 3. Log the timing and hand back the page
//!
//! Every call is independent: queries share the catalog through an `Arc`
//! and never mutate it, so any number may run at once.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ServiceConfig;
use crate::feed::PageFeed;
use catalog::{Catalog, Mentor, Resource, SuccessStory};
use pipeline::{MentorFilter, Page, ResourceFilter, StoryFilter};
use repositories::{MentorRepository, ResourceRepository, StoryRepository};

/// The three shelves shown on the home screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeFeed {
    pub top_mentors: Vec<Mentor>,
    pub recent_stories: Vec<SuccessStory>,
    pub popular_resources: Vec<Resource>,
}

#[derive(Clone)]
pub struct SearchService {
    mentors: MentorRepository,
    resources: ResourceRepository,
    stories: StoryRepository,
    config: ServiceConfig,
}

impl SearchService {
    pub fn new(catalog: Arc<Catalog>, config: ServiceConfig) -> Self {
        let page_size = config.default_page_size;
        Self {
            mentors: MentorRepository::new(catalog.clone()).with_default_page_size(page_size),
            resources: ResourceRepository::new(catalog.clone()).with_default_page_size(page_size),
            stories: StoryRepository::new(catalog).with_default_page_size(page_size),
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    async fn simulate_latency(&self) {
        if !self.config.simulated_latency.is_zero() {
            debug!("Simulating {:?} of latency", self.config.simulated_latency);
            tokio::time::sleep(self.config.simulated_latency).await;
        }
    }

    /// Search mentors; see `MentorRepository::search_mentors`.
    pub async fn search_mentors(
        &self,
        query: Option<String>,
        filter: Option<MentorFilter>,
        page: usize,
        page_size: Option<usize>,
    ) -> Result<Page<Mentor>> {
        self.simulate_latency().await;
        let start_time = Instant::now();

        let repo = self.mentors.clone();
        let result = tokio::task::spawn_blocking(move || {
            repo.search_mentors(query.as_deref(), filter, page, page_size)
        })
        .await
        .context("Mentor search task panicked")?;
        let page = result?;

        info!(
            "Mentor search matched {} (page of {}) in {:.2?}",
            page.total_count,
            page.items.len(),
            start_time.elapsed()
        );
        Ok(page)
    }

    pub async fn search_resources(
        &self,
        filter: Option<ResourceFilter>,
        page: usize,
        page_size: Option<usize>,
    ) -> Result<Page<Resource>> {
        self.simulate_latency().await;
        let start_time = Instant::now();

        let repo = self.resources.clone();
        let result =
            tokio::task::spawn_blocking(move || repo.search_resources(filter, page, page_size))
                .await
                .context("Resource search task panicked")?;
        let page = result?;

        info!(
            "Resource search matched {} (page of {}) in {:.2?}",
            page.total_count,
            page.items.len(),
            start_time.elapsed()
        );
        Ok(page)
    }

    pub async fn search_stories(
        &self,
        filter: Option<StoryFilter>,
        page: usize,
        page_size: Option<usize>,
    ) -> Result<Page<SuccessStory>> {
        self.simulate_latency().await;
        let start_time = Instant::now();

        let repo = self.stories.clone();
        let result =
            tokio::task::spawn_blocking(move || repo.search_stories(filter, page, page_size))
                .await
                .context("Story search task panicked")?;
        let page = result?;

        info!(
            "Story search matched {} (page of {}) in {:.2?}",
            page.total_count,
            page.items.len(),
            start_time.elapsed()
        );
        Ok(page)
    }

    /// One mentor profile, `None` when the id is unknown
    pub async fn get_mentor(&self, id: &str) -> Option<Mentor> {
        self.simulate_latency().await;
        self.mentors.get_mentor_by_id(id)
    }

    /// Fetch the three home shelves concurrently.
    pub async fn home_feed(&self) -> Result<HomeFeed> {
        self.simulate_latency().await;
        let start_time = Instant::now();
        let limit = self.config.home_feed_limit;

        // Use tokio::join! so the three shelves load in parallel
        let (mentors_result, stories_result, resources_result) = tokio::join!(
            tokio::task::spawn_blocking({
                let mentors = self.mentors.clone();
                move || mentors.get_top_rated_mentors(limit)
            }),
            tokio::task::spawn_blocking({
                let stories = self.stories.clone();
                move || stories.get_recent_stories(limit)
            }),
            tokio::task::spawn_blocking({
                let resources = self.resources.clone();
                move || resources.get_popular_resources(limit)
            })
        );

        let feed = HomeFeed {
            top_mentors: mentors_result.context("Top mentors task panicked")?,
            recent_stories: stories_result.context("Recent stories task panicked")?,
            popular_resources: resources_result.context("Popular resources task panicked")?,
        };

        info!(
            "Home feed loaded ({} mentors, {} stories, {} resources) in {:.2?}",
            feed.top_mentors.len(),
            feed.recent_stories.len(),
            feed.popular_resources.len(),
            start_time.elapsed()
        );
        Ok(feed)
    }

    /// Run a mentor search and publish the page to `feed`.
    pub async fn refresh_mentors(
        &self,
        feed: &PageFeed<Mentor>,
        query: Option<String>,
        filter: Option<MentorFilter>,
        page: usize,
        page_size: Option<usize>,
    ) -> Result<()> {
        let page = self.search_mentors(query, filter, page, page_size).await?;
        feed.publish(page);
        debug!("Published mentor page to {} subscribers", feed.subscriber_count());
        Ok(())
    }

    pub async fn refresh_resources(
        &self,
        feed: &PageFeed<Resource>,
        filter: Option<ResourceFilter>,
        page: usize,
        page_size: Option<usize>,
    ) -> Result<()> {
        let page = self.search_resources(filter, page, page_size).await?;
        feed.publish(page);
        debug!("Published resource page to {} subscribers", feed.subscriber_count());
        Ok(())
    }

    pub async fn refresh_stories(
        &self,
        feed: &PageFeed<SuccessStory>,
        filter: Option<StoryFilter>,
        page: usize,
        page_size: Option<usize>,
    ) -> Result<()> {
        let page = self.search_stories(filter, page, page_size).await?;
        feed.publish(page);
        debug!("Published story page to {} subscribers", feed.subscriber_count());
        Ok(())
    }
}
