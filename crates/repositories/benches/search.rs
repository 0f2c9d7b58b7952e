//! Benchmarks for repository searches
//!
//! Run with: cargo bench --package repositories
//!
//! Searches a synthetic catalog of 50k mentors and 50k resources, large
//! enough for the parallel filter and sort stages to kick in.

use catalog::{Catalog, DifficultyLevel, Mentor, Resource, ResourceType};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pipeline::{MentorFilter, MentorSort, ResourceFilter, ResourceSort};
use repositories::{MentorRepository, ResourceRepository};
use std::sync::Arc;

const CATEGORIES: [&str; 5] = ["UPSC", "Banking", "Railways", "SSC", "Defence"];
const SUBJECTS: [&str; 6] = [
    "General Studies",
    "Quantitative Aptitude",
    "Reasoning",
    "English",
    "Mathematics",
    "Current Affairs",
];

fn synthetic_catalog(size: usize) -> Arc<Catalog> {
    let mut catalog = Catalog::new();
    for i in 0..size {
        let category = CATEGORIES[i % CATEGORIES.len()];
        let subject = SUBJECTS[i % SUBJECTS.len()];
        catalog.insert_mentor(Mentor {
            id: format!("mentor_{i}"),
            name: format!("Mentor {i}"),
            email: format!("mentor{i}@example.com"),
            bio: format!("Cleared {category} and teaches {subject}."),
            exam_category: category.to_string(),
            exam_sub_category: String::new(),
            exam_cleared: category.to_string(),
            rank: (i % 500).to_string(),
            exam_year: "2022".to_string(),
            hourly_rate: 200 + (i % 40) as u32 * 10,
            experience_years: (i % 12) as u32,
            rating: 3.0 + (i % 21) as f64 / 10.0,
            reviews_count: (i % 300) as u32,
            sessions_completed: (i % 400) as u32,
            students_helped: (i % 150) as u32,
            expertise: vec![subject.to_string()],
            is_verified: i % 3 != 0,
            is_approved: true,
            created_at: 1_670_000_000_000 + i as i64 * 60_000,
            updated_at: 1_670_000_000_000 + i as i64 * 60_000,
        });
        catalog.insert_resource(Resource {
            id: format!("resource_{i}"),
            title: format!("{subject} notes #{i}"),
            description: format!("{category} preparation material"),
            resource_type: if i % 4 == 0 { ResourceType::Video } else { ResourceType::Pdf },
            url: format!("https://example.com/{i}"),
            uploader_id: format!("user_{}", i % 100),
            uploader_name: format!("Uploader {}", i % 100),
            exam_category: category.to_lowercase(),
            exam_subcategory: String::new(),
            tags: vec![subject.to_string()],
            downloads: (i % 5000) as u32,
            views: (i % 9000) as u32,
            rating: 3.0 + (i % 21) as f32 / 10.0,
            rating_count: (i % 80) as u32,
            created_at: 1_700_000_000_000 + i as i64 * 60_000,
            updated_at: 1_700_000_000_000 + i as i64 * 60_000,
            is_verified: true,
            language: "English".to_string(),
            difficulty: DifficultyLevel::Intermediate,
        });
    }
    Arc::new(catalog)
}

fn bench_mentor_search(c: &mut Criterion) {
    let mentors = MentorRepository::new(synthetic_catalog(50_000));
    let filter = MentorFilter {
        exam_categories: vec!["UPSC".to_string(), "SSC".to_string()],
        min_rating: Some(4.0),
        max_price: Some(500),
        sort_by: MentorSort::Rating,
        ..Default::default()
    };

    c.bench_function("search_mentors_filtered", |b| {
        b.iter(|| {
            let page = mentors
                .search_mentors(None, Some(black_box(filter.clone())), 1, None)
                .unwrap();
            black_box(page)
        })
    });

    c.bench_function("search_mentors_text_query", |b| {
        b.iter(|| {
            let page = mentors
                .search_mentors(Some(black_box("aptitude")), None, 3, None)
                .unwrap();
            black_box(page)
        })
    });
}

fn bench_resource_search(c: &mut Criterion) {
    let resources = ResourceRepository::new(synthetic_catalog(50_000));
    let filter = ResourceFilter {
        tags: vec!["Mathematics".to_string()],
        sort_by: ResourceSort::Popular,
        ..Default::default()
    };

    c.bench_function("search_resources_by_tag", |b| {
        b.iter(|| {
            let page = resources
                .search_resources(Some(black_box(filter.clone())), 1, None)
                .unwrap();
            black_box(page)
        })
    });

    c.bench_function("top_rated_resources", |b| {
        b.iter(|| black_box(resources.get_top_rated_resources(black_box(10))))
    });
}

criterion_group!(benches, bench_mentor_search, bench_resource_search);
criterion_main!(benches);
