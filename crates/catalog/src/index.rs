//! The in-memory `Catalog` store and its loading logic.
//!
//! The catalog owns every record in source order and keeps a few indices
//! for direct lookups:
//! - id → position, per record kind
//! - exam category → positions, per record kind
//! - exam subcategory → positions (resources and stories)
//!
//! Once built it is read-only; searches borrow slices of it and never
//! mutate it, so one `Arc<Catalog>` can serve any number of concurrent
//! queries.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::{Mentor, Record, Resource, SuccessStory};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Read-only store holding all mentors, resources and success stories.
#[derive(Debug, Default)]
pub struct Catalog {
    mentors: Vec<Mentor>,
    resources: Vec<Resource>,
    stories: Vec<SuccessStory>,

    mentor_ids: HashMap<String, usize>,
    resource_ids: HashMap<String, usize>,
    story_ids: HashMap<String, usize>,

    /// Keyed by lowercased category so lookups ignore case
    mentor_categories: HashMap<String, Vec<usize>>,
    resource_categories: HashMap<String, Vec<usize>>,
    resource_subcategories: HashMap<String, Vec<usize>>,
    story_categories: HashMap<String, Vec<usize>>,
    story_subcategories: HashMap<String, Vec<usize>>,
}

fn index_key(value: &str) -> String {
    value.to_lowercase()
}

/// Resolve positions from an index back to records, keeping source order
fn collect_positions<'a, T>(records: &'a [T], positions: Option<&Vec<usize>>) -> Vec<&'a T> {
    positions
        .map(|positions| positions.iter().map(|&pos| &records[pos]).collect())
        .unwrap_or_default()
}

impl Catalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the whole catalog from a directory holding
    /// `mentors.json`, `resources.json` and `stories.json`.
    ///
    /// The three files are parsed in parallel, inserted in file order and
    /// then validated.
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", data_dir);

        let mentors_path = data_dir.join("mentors.json");
        let resources_path = data_dir.join("resources.json");
        let stories_path = data_dir.join("stories.json");

        let ((mentors, resources), stories) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_mentors(&mentors_path),
                    || parser::parse_resources(&resources_path),
                )
            },
            || parser::parse_stories(&stories_path),
        );

        let mentors = mentors?;
        let resources = resources?;
        let stories = stories?;

        info!(
            "Parsed {} mentors, {} resources, {} stories",
            mentors.len(),
            resources.len(),
            stories.len()
        );

        let catalog = Self::from_records(mentors, resources, stories);
        catalog.validate()?;

        debug!("Catalog built and validated");
        Ok(catalog)
    }

    /// Build a catalog from already-parsed records (no validation)
    pub fn from_records(
        mentors: Vec<Mentor>,
        resources: Vec<Resource>,
        stories: Vec<SuccessStory>,
    ) -> Self {
        let mut catalog = Self::new();
        for mentor in mentors {
            catalog.insert_mentor(mentor);
        }
        for resource in resources {
            catalog.insert_resource(resource);
        }
        for story in stories {
            catalog.insert_story(story);
        }
        catalog
    }

    // Mutators, used while building the catalog

    /// Append a mentor and update its indices
    pub fn insert_mentor(&mut self, mentor: Mentor) {
        let pos = self.mentors.len();
        self.mentor_ids.insert(mentor.id.clone(), pos);
        self.mentor_categories
            .entry(index_key(&mentor.exam_category))
            .or_default()
            .push(pos);
        self.mentors.push(mentor);
    }

    /// Append a resource and update its indices
    pub fn insert_resource(&mut self, resource: Resource) {
        let pos = self.resources.len();
        self.resource_ids.insert(resource.id.clone(), pos);
        self.resource_categories
            .entry(index_key(&resource.exam_category))
            .or_default()
            .push(pos);
        self.resource_subcategories
            .entry(index_key(&resource.exam_subcategory))
            .or_default()
            .push(pos);
        self.resources.push(resource);
    }

    /// Append a success story and update its indices
    pub fn insert_story(&mut self, story: SuccessStory) {
        let pos = self.stories.len();
        self.story_ids.insert(story.id.clone(), pos);
        self.story_categories
            .entry(index_key(&story.exam_category))
            .or_default()
            .push(pos);
        self.story_subcategories
            .entry(index_key(&story.exam_subcategory))
            .or_default()
            .push(pos);
        self.stories.push(story);
    }

    // Full collections, in source order

    pub fn mentors(&self) -> &[Mentor] {
        &self.mentors
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn stories(&self) -> &[SuccessStory] {
        &self.stories
    }

    // Lookups by id

    pub fn get_mentor(&self, id: &str) -> Option<&Mentor> {
        self.mentor_ids.get(id).map(|&pos| &self.mentors[pos])
    }

    pub fn get_resource(&self, id: &str) -> Option<&Resource> {
        self.resource_ids.get(id).map(|&pos| &self.resources[pos])
    }

    pub fn get_story(&self, id: &str) -> Option<&SuccessStory> {
        self.story_ids.get(id).map(|&pos| &self.stories[pos])
    }

    // Lookups by category, case-insensitive

    pub fn mentors_by_category(&self, category: &str) -> Vec<&Mentor> {
        collect_positions(&self.mentors, self.mentor_categories.get(&index_key(category)))
    }

    pub fn resources_by_category(&self, category_id: &str) -> Vec<&Resource> {
        collect_positions(
            &self.resources,
            self.resource_categories.get(&index_key(category_id)),
        )
    }

    pub fn resources_by_subcategory(&self, subcategory_id: &str) -> Vec<&Resource> {
        collect_positions(
            &self.resources,
            self.resource_subcategories.get(&index_key(subcategory_id)),
        )
    }

    pub fn stories_by_category(&self, category_id: &str) -> Vec<&SuccessStory> {
        collect_positions(
            &self.stories,
            self.story_categories.get(&index_key(category_id)),
        )
    }

    pub fn stories_by_subcategory(&self, subcategory_id: &str) -> Vec<&SuccessStory> {
        collect_positions(
            &self.stories,
            self.story_subcategories.get(&index_key(subcategory_id)),
        )
    }

    /// Get counts for debugging/validation: (mentors, resources, stories)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.mentors.len(), self.resources.len(), self.stories.len())
    }

    /// Validate data integrity.
    ///
    /// Checks:
    /// 1. Every record has a non-blank id
    /// 2. No two records of the same kind share an id
    /// 3. Every rating lies within [0, 5]
    pub fn validate(&self) -> Result<()> {
        check_unique_ids("mentor", &self.mentors)?;
        check_unique_ids("resource", &self.resources)?;
        check_unique_ids("story", &self.stories)?;

        for mentor in &self.mentors {
            if !(0.0..=5.0).contains(&mentor.rating) {
                return Err(CatalogError::InvalidValue {
                    field: format!("mentor {} rating", mentor.id),
                    value: mentor.rating.to_string(),
                });
            }
        }

        for resource in &self.resources {
            if !(0.0..=5.0).contains(&resource.rating) {
                return Err(CatalogError::InvalidValue {
                    field: format!("resource {} rating", resource.id),
                    value: resource.rating.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn check_unique_ids<T: Record>(entity: &str, records: &[T]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if record.id().trim().is_empty() {
            return Err(CatalogError::ValidationError(format!(
                "{entity} with a blank id"
            )));
        }
        if !seen.insert(record.id()) {
            return Err(CatalogError::DuplicateId {
                entity: entity.to_string(),
                id: record.id().to_string(),
            });
        }
    }
    Ok(())
}
