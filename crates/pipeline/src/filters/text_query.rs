//! Free-text query filter.
//!
//! Case-insensitive substring search over a fixed list of text fields.
//! A record matches if *any* of its searchable fields contains the query.

use crate::traits::Filter;

pub struct TextQueryFilter<T> {
    query: String,
    fields: fn(&T) -> Vec<&str>,
}

impl<T> TextQueryFilter<T> {
    /// Create a new TextQueryFilter.
    ///
    /// # Arguments
    /// * `query` - Text to look for; trimmed and lowercased here
    /// * `fields` - Lists the record's searchable text (title, bio, tags, ...)
    pub fn new(query: &str, fields: fn(&T) -> Vec<&str>) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            fields,
        }
    }

    /// A blank query lets everything through
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }
}

impl<T> Filter<T> for TextQueryFilter<T> {
    fn name(&self) -> &str {
        "search_query"
    }

    fn matches(&self, record: &T) -> bool {
        if !self.is_active() {
            return true;
        }
        (self.fields)(record)
            .into_iter()
            .any(|field| field.to_lowercase().contains(&self.query))
    }
}
