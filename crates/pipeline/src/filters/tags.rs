//! Filter on tag intersection.

use crate::traits::Filter;
use catalog::Record;

/// How a wanted tag is compared against a record's tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMatch {
    /// Tags must be identical
    Exact,
    /// The record's tag must contain the wanted tag, ignoring case
    Contains,
}

/// Keeps records sharing at least one tag with the wanted set.
///
/// ## Algorithm
/// For each record, keep it if any wanted tag matches any record tag
/// under the configured `TagMatch`. An empty wanted set keeps everything.
pub struct TagFilter<T> {
    name: String,
    tags: fn(&T) -> &[String],
    wanted: Vec<String>,
    mode: TagMatch,
}

impl<T> TagFilter<T> {
    pub fn new(
        name: impl Into<String>,
        tags: fn(&T) -> &[String],
        wanted: Vec<String>,
        mode: TagMatch,
    ) -> Self {
        let wanted = match mode {
            TagMatch::Exact => wanted,
            TagMatch::Contains => wanted.iter().map(|tag| tag.to_lowercase()).collect(),
        };
        Self {
            name: name.into(),
            tags,
            wanted,
            mode,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.wanted.is_empty()
    }
}

fn tags_of<T: Record>(record: &T) -> &[String] {
    record.tags()
}

impl<T: Record> TagFilter<T> {
    /// A tag filter over the tags the record itself exposes
    pub fn on_record_tags(name: impl Into<String>, wanted: Vec<String>, mode: TagMatch) -> Self {
        Self::new(name, tags_of::<T>, wanted, mode)
    }
}

impl<T> Filter<T> for TagFilter<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, record: &T) -> bool {
        if !self.is_active() {
            return true;
        }
        let tags = (self.tags)(record);
        match self.mode {
            TagMatch::Exact => self.wanted.iter().any(|wanted| tags.contains(wanted)),
            TagMatch::Contains => tags.iter().any(|tag| {
                let tag = tag.to_lowercase();
                self.wanted.iter().any(|wanted| tag.contains(wanted.as_str()))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Note {
        tags: Vec<String>,
    }

    fn note_tags(note: &Note) -> &[String] {
        &note.tags
    }

    fn note(tags: &[&str]) -> Note {
        Note {
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_exact_overlap() {
        let filter = TagFilter::new("tags", note_tags, vec!["Mathematics".to_string()], TagMatch::Exact);

        assert!(filter.matches(&note(&["Mathematics", "Formulas"])));
        assert!(!filter.matches(&note(&["English"])));
        assert!(!filter.matches(&note(&["mathematics"])));
        assert!(!filter.matches(&note(&[])));
    }

    #[test]
    fn test_contains_ignores_case() {
        let filter = TagFilter::new(
            "expertise",
            note_tags,
            vec!["aptitude".to_string(), "essay".to_string()],
            TagMatch::Contains,
        );

        assert!(filter.matches(&note(&["Quantitative Aptitude", "Reasoning"])));
        assert!(filter.matches(&note(&["Essay Writing"])));
        assert!(!filter.matches(&note(&["Mathematics"])));
    }

    #[test]
    fn test_no_wanted_tags_keeps_everything() {
        let filter = TagFilter::new("tags", note_tags, Vec::new(), TagMatch::Exact);
        assert!(!filter.is_active());
        assert!(filter.matches(&note(&["English"])));
        assert!(filter.matches(&note(&[])));
    }
}
