//! Filter on a numeric attribute within an inclusive range.

use crate::traits::Filter;

/// Keeps records whose numeric field lies within `[min, max]`.
///
/// Either bound may be absent, in which case only the other applies. A
/// record whose field is absent (e.g. a success story without a rank)
/// fails as soon as any bound is set.
pub struct RangeFilter<T> {
    name: String,
    value: fn(&T) -> Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

impl<T> RangeFilter<T> {
    /// Create a new RangeFilter.
    ///
    /// # Arguments
    /// * `name` - Label used in logs, e.g. "hourly_rate"
    /// * `value` - Reads the record's value, `None` when it has none
    /// * `min` / `max` - Inclusive bounds
    pub fn new(
        name: impl Into<String>,
        value: fn(&T) -> Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            min,
            max,
        }
    }

    /// Whether at least one bound is set
    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

impl<T> Filter<T> for RangeFilter<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, record: &T) -> bool {
        if !self.is_active() {
            return true;
        }
        match (self.value)(record) {
            Some(value) => {
                self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
            }
            None => false,
        }
    }
}
