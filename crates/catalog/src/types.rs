//! Core domain types for the AspireBridge catalog.
//!
//! This module defines the three record kinds the marketplace searches over
//! (mentors, learning resources and success stories), the enums they use,
//! and the `Record` trait shared by all of them.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Stable string identifier of any record ("1", "resource_3", "story_2", ...)
pub type RecordId = String;

/// Unix timestamp in milliseconds
pub type Timestamp = i64;

// =============================================================================
// Record Trait
// =============================================================================

/// Behaviour every searchable record shares.
///
/// The search pipeline is generic over this trait; everything else about a
/// record (which fields are categorical, numeric or free text) is wired up per
/// domain through extractor functions.
pub trait Record: Clone + Send + Sync + 'static {
    /// Stable identifier of the record
    fn id(&self) -> &str;

    /// Creation time in epoch milliseconds
    fn created_at(&self) -> Timestamp;

    /// Tag strings attached to the record (may be empty)
    fn tags(&self) -> &[String];
}

// =============================================================================
// Mentor
// =============================================================================

/// An achiever who offers paid mentorship sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mentor {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub bio: String,
    /// Exam family the mentor cleared, e.g. "UPSC", "Banking", "SSC"
    pub exam_category: String,
    #[serde(default)]
    pub exam_sub_category: String,
    pub exam_cleared: String,
    pub rank: String,
    pub exam_year: String,
    /// Price of one hour of mentorship, in rupees
    pub hourly_rate: u32,
    pub experience_years: u32,
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: u32,
    #[serde(default)]
    pub sessions_completed: u32,
    #[serde(default)]
    pub students_helped: u32,
    /// Subjects the mentor teaches; these act as the mentor's tags
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_approved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for Mentor {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn tags(&self) -> &[String] {
        &self.expertise
    }
}

// =============================================================================
// Resource
// =============================================================================

/// Kind of learning material a resource is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Pdf,
    Video,
    Notes,
    PracticeTest,
    Strategy,
    Timetable,
    Link,
    Audio,
    Image,
    Presentation,
}

/// How demanding a resource is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

/// A piece of study material shared by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub url: String,
    pub uploader_id: String,
    pub uploader_name: String,
    /// Exam category id, e.g. "upsc"
    pub exam_category: String,
    /// Exam subcategory id, e.g. "upsc_civil_services"
    pub exam_subcategory: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub downloads: u32,
    #[serde(default)]
    pub views: u32,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub rating_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub difficulty: DifficultyLevel,
}

fn default_language() -> String {
    "English".to_string()
}

impl Record for Resource {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

// =============================================================================
// Success Story
// =============================================================================

/// An achiever's write-up of how they cleared an exam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessStory {
    pub id: RecordId,
    pub author_id: String,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub exam_category: String,
    pub exam_subcategory: String,
    /// All-India rank, when the exam publishes one
    #[serde(default)]
    pub rank: Option<u32>,
    pub year: u16,
    pub attempts: u32,
    #[serde(default)]
    pub preparation_duration: String,
    #[serde(default)]
    pub key_tips: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: u32,
    #[serde(default)]
    pub shares: u32,
    #[serde(default)]
    pub views: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl Record for SuccessStory {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_wire_format() {
        let json = serde_json::to_string(&ResourceType::PracticeTest).unwrap();
        assert_eq!(json, "\"PRACTICE_TEST\"");

        let parsed: DifficultyLevel = serde_json::from_str("\"ADVANCED\"").unwrap();
        assert_eq!(parsed, DifficultyLevel::Advanced);
    }

    #[test]
    fn test_resource_defaults_when_fields_missing() {
        let json = r#"{
            "id": "resource_9",
            "title": "Polity Notes",
            "description": "Short notes",
            "type": "NOTES",
            "url": "https://example.com/polity",
            "uploader_id": "user_9",
            "uploader_name": "Kavya",
            "exam_category": "upsc",
            "exam_subcategory": "upsc_civil_services",
            "created_at": 1700000000000,
            "updated_at": 1700000000000
        }"#;

        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.language, "English");
        assert_eq!(resource.difficulty, DifficultyLevel::Intermediate);
        assert_eq!(resource.downloads, 0);
        assert!(resource.tags().is_empty());
    }

    #[test]
    fn test_story_without_rank() {
        let json = r#"{
            "id": "story_9",
            "author_id": "user_9",
            "author_name": "Kavya",
            "title": "Cleared on the second try",
            "content": "...",
            "exam_category": "ssc",
            "exam_subcategory": "ssc_cgl",
            "year": 2023,
            "attempts": 2,
            "created_at": 1700000000000,
            "updated_at": 1700000000000
        }"#;

        let story: SuccessStory = serde_json::from_str(json).unwrap();
        assert_eq!(story.rank, None);
        assert_eq!(story.id(), "story_9");
    }
}
