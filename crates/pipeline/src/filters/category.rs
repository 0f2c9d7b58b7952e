//! Filter on a categorical attribute.
//!
//! Keeps records whose category is one of an allowed set, compared
//! case-insensitively ("upsc" matches "UPSC").

use crate::traits::Filter;

/// Keeps records whose category is a member of `allowed`.
///
/// ## Algorithm
/// 1. Lowercase the allowed set once, at construction
/// 2. For each record, lowercase its category and test membership
pub struct CategoryFilter<T> {
    name: String,
    category: fn(&T) -> &str,
    allowed: Vec<String>,
}

impl<T> CategoryFilter<T> {
    /// Create a new CategoryFilter.
    ///
    /// # Arguments
    /// * `name` - Label used in logs, e.g. "exam_category"
    /// * `category` - Reads the record's category
    /// * `allowed` - Accepted categories; an empty set accepts everything
    pub fn new<I, S>(name: impl Into<String>, category: fn(&T) -> &str, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            category,
            allowed: allowed
                .into_iter()
                .map(|c| c.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// An empty allowed set lets everything through
    pub fn is_active(&self) -> bool {
        !self.allowed.is_empty()
    }
}

impl<T> Filter<T> for CategoryFilter<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, record: &T) -> bool {
        if !self.is_active() {
            return true;
        }
        let category = (self.category)(record).to_lowercase();
        self.allowed.iter().any(|allowed| *allowed == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Exam {
        category: &'static str,
    }

    fn exam_category(exam: &Exam) -> &str {
        exam.category
    }

    #[test]
    fn test_category_membership_ignores_case() {
        let filter = CategoryFilter::new("exam_category", exam_category, ["upsc", "Banking"]);

        assert!(filter.matches(&Exam { category: "UPSC" }));
        assert!(filter.matches(&Exam { category: "banking" }));
        assert!(!filter.matches(&Exam { category: "SSC" }));
    }

    #[test]
    fn test_no_substring_matches() {
        let filter = CategoryFilter::new("exam_category", exam_category, ["SSC"]);
        assert!(!filter.matches(&Exam { category: "SSC CGL" }));
    }

    #[test]
    fn test_empty_allowed_set_is_inactive() {
        let filter = CategoryFilter::new("exam_category", exam_category, Vec::<String>::new());
        assert!(!filter.is_active());
        assert!(filter.matches(&Exam { category: "UPSC" }));
    }
}
