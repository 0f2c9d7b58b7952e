//! Repositories share one catalog across threads without locks.

use catalog::Catalog;
use pipeline::{MentorFilter, MentorSort, ResourceFilter, StoryFilter, StorySort};
use repositories::{MentorRepository, ResourceRepository, StoryRepository};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

fn sample_catalog() -> Arc<Catalog> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
    Arc::new(Catalog::load_from_dir(&dir).unwrap())
}

#[test]
fn test_parallel_searches_agree_with_sequential() {
    let catalog = sample_catalog();
    let mentors = MentorRepository::new(catalog.clone());
    let filter = MentorFilter {
        min_rating: Some(4.7),
        sort_by: MentorSort::Experience,
        ..Default::default()
    };
    let expected = mentors.search_mentors(None, Some(filter.clone()), 1, None).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = mentors.clone();
            let filter = filter.clone();
            thread::spawn(move || repo.search_mentors(None, Some(filter), 1, None).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
    // The catalog itself is untouched
    assert_eq!(catalog.counts(), (5, 5, 3));
}

#[test]
fn test_three_domains_from_one_catalog() {
    let catalog = sample_catalog();
    let mentors = MentorRepository::new(catalog.clone());
    let resources = ResourceRepository::new(catalog.clone());
    let stories = StoryRepository::new(catalog);

    let upsc_mentors = mentors.get_mentors_by_category("UPSC");
    let upsc_resources = resources
        .search_resources(
            Some(ResourceFilter {
                exam_category: Some("upsc".to_string()),
                ..Default::default()
            }),
            1,
            None,
        )
        .unwrap();
    let upsc_stories = stories
        .search_stories(
            Some(StoryFilter {
                exam_category: Some("UPSC".to_string()),
                sort_by: StorySort::RankAscending,
                ..Default::default()
            }),
            1,
            None,
        )
        .unwrap();

    assert_eq!(upsc_mentors.len(), 1);
    assert_eq!(upsc_resources.total_count, 2);
    assert_eq!(upsc_stories.items[0].id, "story_1");
}
