//! Success story search.

use super::{non_blank, sort_name};
use crate::filter_pipeline::SearchPipeline;
use crate::filters::{CategoryFilter, FieldFilter, RangeFilter, TagFilter, TagMatch, TextQueryFilter};
use crate::sort::SortField;
use crate::traits::SortKey;
use catalog::SuccessStory;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum StorySort {
    #[default]
    Recent,
    /// Likes plus views
    Popular,
    MostLiked,
    MostViewed,
    /// Best rank first; stories without a rank go last
    RankAscending,
    /// Worst rank first; a missing rank counts as 0
    RankDescending,
    Alphabetical,
}

impl StorySort {
    /// Parse a sort name; unknown names fall back to `Recent`
    pub fn from_name(name: &str) -> Self {
        match sort_name(name).as_str() {
            "popular" => StorySort::Popular,
            "most_liked" | "likes" => StorySort::MostLiked,
            "most_viewed" | "views" => StorySort::MostViewed,
            "rank_ascending" | "rank" => StorySort::RankAscending,
            "rank_descending" => StorySort::RankDescending,
            "alphabetical" | "title" => StorySort::Alphabetical,
            _ => StorySort::Recent,
        }
    }
}

impl FromStr for StorySort {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<String> for StorySort {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

fn story_title(s: &SuccessStory) -> &str {
    &s.title
}

impl SortKey<SuccessStory> for StorySort {
    fn field(&self) -> SortField<SuccessStory> {
        match self {
            StorySort::Recent => SortField::recency(),
            StorySort::Popular => {
                SortField::Descending(|s: &SuccessStory| f64::from(s.likes) + f64::from(s.views))
            }
            StorySort::MostLiked => SortField::Descending(|s: &SuccessStory| f64::from(s.likes)),
            StorySort::MostViewed => SortField::Descending(|s: &SuccessStory| f64::from(s.views)),
            StorySort::RankAscending => SortField::Ascending(|s: &SuccessStory| {
                s.rank.map(f64::from).unwrap_or(f64::MAX)
            }),
            StorySort::RankDescending => {
                SortField::Descending(|s: &SuccessStory| s.rank.map(f64::from).unwrap_or(0.0))
            }
            StorySort::Alphabetical => SortField::Alphabetical(story_title),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryFilter {
    pub exam_category: Option<String>,
    pub exam_subcategory: Option<String>,
    /// Year the exam was cleared
    pub year: Option<u16>,
    /// Inclusive rank bounds; stories without a rank never match them
    pub min_rank: Option<u32>,
    pub max_rank: Option<u32>,
    pub attempts: Option<u32>,
    pub tags: Vec<String>,
    pub search_query: Option<String>,
    pub sort_by: StorySort,
}

fn story_category(s: &SuccessStory) -> &str {
    &s.exam_category
}

fn story_subcategory(s: &SuccessStory) -> &str {
    &s.exam_subcategory
}

fn story_year(s: &SuccessStory) -> u16 {
    s.year
}

fn story_attempts(s: &SuccessStory) -> u32 {
    s.attempts
}

fn story_searchable(s: &SuccessStory) -> Vec<&str> {
    let mut fields = vec![s.title.as_str(), s.content.as_str(), s.author_name.as_str()];
    fields.extend(s.key_tips.iter().map(String::as_str));
    fields.extend(s.tags.iter().map(String::as_str));
    fields
}

impl StoryFilter {
    pub fn with_sort(mut self, sort_by: StorySort) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn pipeline(&self) -> SearchPipeline<SuccessStory> {
        let mut pipeline = SearchPipeline::new();

        if let Some(category) = non_blank(self.exam_category.as_deref()) {
            pipeline.push_filter(CategoryFilter::new("exam_category", story_category, [category]));
        }
        if let Some(subcategory) = non_blank(self.exam_subcategory.as_deref()) {
            pipeline.push_filter(CategoryFilter::new(
                "exam_subcategory",
                story_subcategory,
                [subcategory],
            ));
        }
        if let Some(year) = self.year {
            pipeline.push_filter(FieldFilter::new("year", story_year, year));
        }

        let rank = RangeFilter::new(
            "rank",
            |s: &SuccessStory| s.rank.map(f64::from),
            self.min_rank.map(f64::from),
            self.max_rank.map(f64::from),
        );
        if rank.is_active() {
            pipeline.push_filter(rank);
        }

        if let Some(attempts) = self.attempts {
            pipeline.push_filter(FieldFilter::new("attempts", story_attempts, attempts));
        }
        if !self.tags.is_empty() {
            pipeline.push_filter(TagFilter::on_record_tags("tags", self.tags.clone(), TagMatch::Exact));
        }
        if let Some(query) = non_blank(self.search_query.as_deref()) {
            pipeline.push_filter(TextQueryFilter::new(query, story_searchable));
        }

        pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_bounds_become_one_filter() {
        let filter = StoryFilter {
            min_rank: Some(1),
            max_rank: Some(100),
            ..Default::default()
        };
        assert_eq!(filter.pipeline().filter_names(), vec!["rank"]);
    }

    #[test]
    fn test_sort_from_str() {
        assert_eq!("rank".parse::<StorySort>(), Ok(StorySort::RankAscending));
        assert_eq!("Rank Descending".parse::<StorySort>(), Ok(StorySort::RankDescending));
        assert_eq!("unknown".parse::<StorySort>(), Ok(StorySort::Recent));
    }

    #[test]
    fn test_default_filter_is_empty() {
        let filter = StoryFilter::default();
        assert!(filter.pipeline().is_empty());
        assert_eq!(filter.sort_by, StorySort::Recent);
    }

    #[test]
    fn test_sort_deserialises_through_aliases() {
        let filter: StoryFilter = serde_json::from_str(r#"{"sort_by": "rank"}"#).unwrap();
        assert_eq!(filter.sort_by, StorySort::RankAscending);

        let sort: StorySort = serde_json::from_str(r#""RANK_DESCENDING""#).unwrap();
        assert_eq!(sort, StorySort::RankDescending);
        assert_eq!(serde_json::to_string(&sort).unwrap(), r#""rank_descending""#);
    }
}
