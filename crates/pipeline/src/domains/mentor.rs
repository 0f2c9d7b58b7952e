//! Mentor search: the filter and the sort options of the browse screen.

use super::{non_blank, sort_name};
use crate::filter_pipeline::SearchPipeline;
use crate::filters::{CategoryFilter, FieldFilter, RangeFilter, TagFilter, TagMatch, TextQueryFilter};
use crate::sort::SortField;
use crate::traits::SortKey;
use catalog::Mentor;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// How mentor results are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum MentorSort {
    /// Newest profile first
    #[default]
    Recent,
    /// Most reviews plus sessions first
    Popular,
    /// Highest rating first
    Rating,
    /// Cheapest hourly rate first
    Price,
    /// Most years of experience first
    Experience,
    /// By name, A-Z
    Alphabetical,
}

impl MentorSort {
    /// Parse a sort name; unknown names fall back to `Recent`
    pub fn from_name(name: &str) -> Self {
        match sort_name(name).as_str() {
            "popular" | "popularity" => MentorSort::Popular,
            "rating" => MentorSort::Rating,
            "price" => MentorSort::Price,
            "experience" => MentorSort::Experience,
            "alphabetical" | "name" => MentorSort::Alphabetical,
            _ => MentorSort::Recent,
        }
    }
}

impl FromStr for MentorSort {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<String> for MentorSort {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

fn mentor_name(m: &Mentor) -> &str {
    &m.name
}

impl SortKey<Mentor> for MentorSort {
    fn field(&self) -> SortField<Mentor> {
        match self {
            MentorSort::Recent => SortField::recency(),
            MentorSort::Popular => SortField::Descending(|m: &Mentor| {
                f64::from(m.reviews_count) + f64::from(m.sessions_completed)
            }),
            MentorSort::Rating => SortField::Descending(|m: &Mentor| m.rating),
            MentorSort::Price => SortField::Ascending(|m: &Mentor| f64::from(m.hourly_rate)),
            MentorSort::Experience => {
                SortField::Descending(|m: &Mentor| f64::from(m.experience_years))
            }
            MentorSort::Alphabetical => SortField::Alphabetical(mentor_name),
        }
    }
}

/// Constraints a mentor must satisfy; every unset field is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MentorFilter {
    /// Free text matched against name, bio and expertise
    pub query: Option<String>,
    /// Accepted exam categories, e.g. `["UPSC", "SSC"]`
    pub exam_categories: Vec<String>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    /// Hourly rate bounds, in rupees
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub min_experience: Option<u32>,
    pub max_experience: Option<u32>,
    /// Subjects; a mentor matches if any expertise entry contains one of them
    pub expertise: Vec<String>,
    pub is_verified: Option<bool>,
    pub sort_by: MentorSort,
}

fn mentor_category(m: &Mentor) -> &str {
    &m.exam_category
}

fn mentor_verified(m: &Mentor) -> bool {
    m.is_verified
}

fn mentor_searchable(m: &Mentor) -> Vec<&str> {
    let mut fields = vec![m.name.as_str(), m.bio.as_str()];
    fields.extend(m.expertise.iter().map(String::as_str));
    fields
}

impl MentorFilter {
    /// Replace the free-text query
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_sort(mut self, sort_by: MentorSort) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Build the pipeline for the constraints that are set.
    pub fn pipeline(&self) -> SearchPipeline<Mentor> {
        let mut pipeline = SearchPipeline::new();

        if let Some(query) = non_blank(self.query.as_deref()) {
            pipeline.push_filter(TextQueryFilter::new(query, mentor_searchable));
        }

        if !self.exam_categories.is_empty() {
            pipeline.push_filter(CategoryFilter::new(
                "exam_category",
                mentor_category,
                &self.exam_categories,
            ));
        }

        let rating = RangeFilter::new(
            "rating",
            |m: &Mentor| Some(m.rating),
            self.min_rating,
            self.max_rating,
        );
        if rating.is_active() {
            pipeline.push_filter(rating);
        }

        let price = RangeFilter::new(
            "hourly_rate",
            |m: &Mentor| Some(f64::from(m.hourly_rate)),
            self.min_price.map(f64::from),
            self.max_price.map(f64::from),
        );
        if price.is_active() {
            pipeline.push_filter(price);
        }

        let experience = RangeFilter::new(
            "experience_years",
            |m: &Mentor| Some(f64::from(m.experience_years)),
            self.min_experience.map(f64::from),
            self.max_experience.map(f64::from),
        );
        if experience.is_active() {
            pipeline.push_filter(experience);
        }

        if !self.expertise.is_empty() {
            pipeline.push_filter(TagFilter::on_record_tags(
                "expertise",
                self.expertise.clone(),
                TagMatch::Contains,
            ));
        }

        if let Some(verified) = self.is_verified {
            pipeline.push_filter(FieldFilter::new("is_verified", mentor_verified, verified));
        }

        pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_builds_empty_pipeline() {
        assert!(MentorFilter::default().pipeline().is_empty());
    }

    #[test]
    fn test_only_set_constraints_become_filters() {
        let filter = MentorFilter {
            query: Some("  ".to_string()),
            exam_categories: vec!["UPSC".to_string()],
            min_price: Some(400),
            is_verified: Some(true),
            ..Default::default()
        };
        let pipeline = filter.pipeline();
        assert_eq!(
            pipeline.filter_names(),
            vec!["exam_category", "hourly_rate", "is_verified"]
        );
    }

    #[test]
    fn test_sort_from_str() {
        assert_eq!("rating".parse::<MentorSort>(), Ok(MentorSort::Rating));
        assert_eq!("Price".parse::<MentorSort>(), Ok(MentorSort::Price));
        assert_eq!("bogus".parse::<MentorSort>(), Ok(MentorSort::Recent));
    }

    #[test]
    fn test_filter_deserialises_partial_json() {
        let filter: MentorFilter =
            serde_json::from_str(r#"{"min_rating": 4.7, "sort_by": "experience"}"#).unwrap();
        assert_eq!(filter.min_rating, Some(4.7));
        assert_eq!(filter.sort_by, MentorSort::Experience);
        assert!(filter.exam_categories.is_empty());
    }

    #[test]
    fn test_unknown_sort_in_json_falls_back_to_recent() {
        let filter: MentorFilter = serde_json::from_str(r#"{"sort_by": "trending"}"#).unwrap();
        assert_eq!(filter.sort_by, MentorSort::Recent);

        let filter: MentorFilter = serde_json::from_str(r#"{"sort_by": "popularity"}"#).unwrap();
        assert_eq!(filter.sort_by, MentorSort::Popular);
    }
}
