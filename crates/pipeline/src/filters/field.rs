//! Equality filter on a discrete attribute (enum, flag, year, ...).

use crate::traits::Filter;

/// Keeps records whose field equals `expected`.
pub struct FieldFilter<T, V> {
    name: String,
    value: fn(&T) -> V,
    expected: V,
}

impl<T, V> FieldFilter<T, V> {
    pub fn new(name: impl Into<String>, value: fn(&T) -> V, expected: V) -> Self {
        Self {
            name: name.into(),
            value,
            expected,
        }
    }
}

impl<T, V> Filter<T> for FieldFilter<T, V>
where
    V: PartialEq + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, record: &T) -> bool {
        (self.value)(record) == self.expected
    }
}
