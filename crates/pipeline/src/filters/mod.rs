//! Filter implementations for the search pipeline.
//!
//! Each filter is generic over the record type and reads the field it
//! cares about through a plain function pointer, so a domain wires one up
//! with e.g. `RangeFilter::new("hourly_rate", |m: &Mentor| Some(f64::from(m.hourly_rate)), Some(400.0), None)`.

pub mod category;
pub mod field;
pub mod range;
pub mod tags;
pub mod text_query;

// Re-export for convenience
pub use category::CategoryFilter;
pub use field::FieldFilter;
pub use range::RangeFilter;
pub use tags::{TagFilter, TagMatch};
pub use text_query::TextQueryFilter;
