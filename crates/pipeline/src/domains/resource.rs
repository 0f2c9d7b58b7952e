//! Resource hub search.

use super::{non_blank, sort_name};
use crate::filter_pipeline::SearchPipeline;
use crate::filters::{CategoryFilter, FieldFilter, RangeFilter, TagFilter, TagMatch, TextQueryFilter};
use crate::sort::SortField;
use crate::traits::SortKey;
use catalog::{DifficultyLevel, Resource, ResourceType};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ResourceSort {
    #[default]
    Recent,
    /// Downloads plus views
    Popular,
    MostDownloaded,
    HighestRated,
    MostViewed,
    /// By title, A-Z
    Alphabetical,
}

impl ResourceSort {
    /// Parse a sort name; unknown names fall back to `Recent`
    pub fn from_name(name: &str) -> Self {
        match sort_name(name).as_str() {
            "popular" => ResourceSort::Popular,
            "most_downloaded" | "downloads" => ResourceSort::MostDownloaded,
            "highest_rated" | "rating" => ResourceSort::HighestRated,
            "most_viewed" | "views" => ResourceSort::MostViewed,
            "alphabetical" | "title" => ResourceSort::Alphabetical,
            _ => ResourceSort::Recent,
        }
    }
}

impl FromStr for ResourceSort {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<String> for ResourceSort {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

fn resource_title(r: &Resource) -> &str {
    &r.title
}

impl SortKey<Resource> for ResourceSort {
    fn field(&self) -> SortField<Resource> {
        match self {
            ResourceSort::Recent => SortField::recency(),
            ResourceSort::Popular => {
                SortField::Descending(|r: &Resource| f64::from(r.downloads) + f64::from(r.views))
            }
            ResourceSort::MostDownloaded => {
                SortField::Descending(|r: &Resource| f64::from(r.downloads))
            }
            ResourceSort::HighestRated => SortField::Descending(|r: &Resource| f64::from(r.rating)),
            ResourceSort::MostViewed => SortField::Descending(|r: &Resource| f64::from(r.views)),
            ResourceSort::Alphabetical => SortField::Alphabetical(resource_title),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceFilter {
    /// Category id, e.g. "upsc"
    pub exam_category: Option<String>,
    /// Subcategory id, e.g. "ssc_cgl"
    pub exam_subcategory: Option<String>,
    pub resource_type: Option<ResourceType>,
    pub difficulty: Option<DifficultyLevel>,
    /// Compared ignoring case
    pub language: Option<String>,
    pub min_rating: Option<f32>,
    /// Exact tags; a resource needs at least one of them
    pub tags: Vec<String>,
    pub search_query: Option<String>,
    pub sort_by: ResourceSort,
}

fn resource_category(r: &Resource) -> &str {
    &r.exam_category
}

fn resource_subcategory(r: &Resource) -> &str {
    &r.exam_subcategory
}

fn resource_language(r: &Resource) -> &str {
    &r.language
}

fn resource_kind(r: &Resource) -> ResourceType {
    r.resource_type
}

fn resource_difficulty(r: &Resource) -> DifficultyLevel {
    r.difficulty
}

fn resource_searchable(r: &Resource) -> Vec<&str> {
    let mut fields = vec![r.title.as_str(), r.description.as_str(), r.uploader_name.as_str()];
    fields.extend(r.tags.iter().map(String::as_str));
    fields
}

impl ResourceFilter {
    pub fn with_sort(mut self, sort_by: ResourceSort) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn pipeline(&self) -> SearchPipeline<Resource> {
        let mut pipeline = SearchPipeline::new();

        if let Some(category) = non_blank(self.exam_category.as_deref()) {
            pipeline.push_filter(CategoryFilter::new("exam_category", resource_category, [category]));
        }
        if let Some(subcategory) = non_blank(self.exam_subcategory.as_deref()) {
            pipeline.push_filter(CategoryFilter::new(
                "exam_subcategory",
                resource_subcategory,
                [subcategory],
            ));
        }
        if let Some(kind) = self.resource_type {
            pipeline.push_filter(FieldFilter::new("resource_type", resource_kind, kind));
        }
        if let Some(difficulty) = self.difficulty {
            pipeline.push_filter(FieldFilter::new("difficulty", resource_difficulty, difficulty));
        }
        if let Some(language) = non_blank(self.language.as_deref()) {
            pipeline.push_filter(CategoryFilter::new("language", resource_language, [language]));
        }
        if let Some(min_rating) = self.min_rating {
            pipeline.push_filter(RangeFilter::new(
                "rating",
                |r: &Resource| Some(f64::from(r.rating)),
                Some(f64::from(min_rating)),
                None,
            ));
        }
        if !self.tags.is_empty() {
            pipeline.push_filter(TagFilter::on_record_tags(
                "tags",
                self.tags.clone(),
                TagMatch::Exact,
            ));
        }
        if let Some(query) = non_blank(self.search_query.as_deref()) {
            pipeline.push_filter(TextQueryFilter::new(query, resource_searchable));
        }

        pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_names_follow_field_order() {
        let filter = ResourceFilter {
            exam_category: Some("ssc".to_string()),
            resource_type: Some(ResourceType::Pdf),
            tags: vec!["Mathematics".to_string()],
            search_query: Some("formula".to_string()),
            ..Default::default()
        };
        assert_eq!(
            filter.pipeline().filter_names(),
            vec!["exam_category", "resource_type", "tags", "search_query"]
        );
    }

    #[test]
    fn test_blank_strings_are_ignored() {
        let filter = ResourceFilter {
            exam_category: Some(String::new()),
            language: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(filter.pipeline().is_empty());
    }

    #[test]
    fn test_sort_from_str() {
        assert_eq!("most-downloaded".parse::<ResourceSort>(), Ok(ResourceSort::MostDownloaded));
        assert_eq!("HIGHEST_RATED".parse::<ResourceSort>(), Ok(ResourceSort::HighestRated));
        assert_eq!("".parse::<ResourceSort>(), Ok(ResourceSort::Recent));
    }

    #[test]
    fn test_filter_deserialises_wire_enums() {
        let filter: ResourceFilter =
            serde_json::from_str(r#"{"resource_type": "VIDEO", "difficulty": "BEGINNER"}"#).unwrap();
        assert_eq!(filter.resource_type, Some(ResourceType::Video));
        assert_eq!(filter.difficulty, Some(DifficultyLevel::Beginner));
        assert_eq!(filter.sort_by, ResourceSort::Recent);
    }
}
