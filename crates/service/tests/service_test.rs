//! End-to-end tests of the async search service over the sample catalog.

use catalog::Catalog;
use pipeline::{MentorFilter, MentorSort, PipelineError, ResourceFilter, StoryFilter, StorySort};
use service::{PageFeed, SearchService, ServiceConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn sample_catalog() -> Arc<Catalog> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
    Arc::new(Catalog::load_from_dir(&dir).unwrap())
}

fn service() -> SearchService {
    SearchService::new(sample_catalog(), ServiceConfig::default())
}

#[tokio::test]
async fn test_search_mentors() {
    let filter = MentorFilter {
        sort_by: MentorSort::Rating,
        ..Default::default()
    };
    let page = service()
        .search_mentors(None, Some(filter), 1, Some(2))
        .await
        .unwrap();

    let ids: Vec<_> = page.items.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "5"]);
    assert!(page.has_more);
    assert_eq!(page.next_page, Some(2));
}

#[tokio::test]
async fn test_invalid_page_surfaces_pipeline_error() {
    let err = service()
        .search_resources(None, 0, None)
        .await
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<PipelineError>(),
        Some(&PipelineError::InvalidPage { page: 0, page_size: 20 })
    );
}

#[tokio::test]
async fn test_configured_page_size_is_default() {
    let config = ServiceConfig::default().with_default_page_size(2);
    let service = SearchService::new(sample_catalog(), config);

    let page = service.search_stories(None, 1, None).await.unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_count, 3);
}

#[tokio::test]
async fn test_concurrent_searches_are_independent() {
    let service = service();
    let mut handles = Vec::new();
    for i in 0..16 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let filter = ResourceFilter {
                exam_category: Some(if i % 2 == 0 { "upsc" } else { "ssc" }.to_string()),
                ..Default::default()
            };
            service.search_resources(Some(filter), 1, None).await
        }));
    }

    for handle in handles {
        let page = handle.await.unwrap().unwrap();
        assert_eq!(page.total_count, 2);
    }
}

#[tokio::test]
async fn test_simulated_latency_is_applied() {
    let latency = Duration::from_millis(30);
    let config = ServiceConfig::default().with_simulated_latency(latency);
    let service = SearchService::new(sample_catalog(), config);

    let start = Instant::now();
    service.search_stories(None, 1, None).await.unwrap();
    assert!(start.elapsed() >= latency);
}

#[tokio::test]
async fn test_home_feed() {
    let config = ServiceConfig::default().with_home_feed_limit(2);
    let feed = SearchService::new(sample_catalog(), config)
        .home_feed()
        .await
        .unwrap();

    let mentors: Vec<_> = feed.top_mentors.iter().map(|m| m.id.as_str()).collect();
    let stories: Vec<_> = feed.recent_stories.iter().map(|s| s.id.as_str()).collect();
    let resources: Vec<_> = feed.popular_resources.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(mentors, vec!["2", "5"]);
    assert_eq!(stories, vec!["story_1", "story_2"]);
    assert_eq!(resources, vec!["resource_4", "resource_1"]);
}

#[tokio::test]
async fn test_get_mentor() {
    let service = service();
    assert_eq!(
        service.get_mentor("5").await.map(|m| m.name),
        Some("Captain Vikram".to_string())
    );
    assert!(service.get_mentor("42").await.is_none());
}

#[tokio::test]
async fn test_refresh_publishes_to_subscribers() {
    let service = service();
    let feed = PageFeed::new();
    let mut rx = feed.subscribe();

    let filter = StoryFilter {
        sort_by: StorySort::RankAscending,
        ..Default::default()
    };
    service
        .refresh_stories(&feed, Some(filter), 1, Some(1))
        .await
        .unwrap();

    rx.changed().await.unwrap();
    let page = rx.borrow_and_update().clone();
    assert_eq!(page.items[0].id, "story_1");
    assert_eq!(feed.current(), page);
}

#[tokio::test]
async fn test_failed_refresh_leaves_feed_untouched() {
    let service = service();
    let feed = PageFeed::new();

    service
        .refresh_mentors(&feed, Some("essay".to_string()), None, 1, None)
        .await
        .unwrap();
    assert_eq!(feed.current().total_count, 1);

    assert!(service
        .refresh_mentors(&feed, None, None, 0, None)
        .await
        .is_err());
    assert_eq!(feed.current().total_count, 1);
}
