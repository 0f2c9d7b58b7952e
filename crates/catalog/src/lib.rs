//! # Catalog Crate
//!
//! This crate owns the AspireBridge records and loads them into memory.
//!
//! ## Main Components
//!
//! - **types**: Domain records (Mentor, Resource, SuccessStory) and the `Record` trait
//! - **parser**: Parse JSON data files into Rust structs
//! - **index**: The read-only `Catalog` store with id and category lookups
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_dir(Path::new("data"))?;
//!
//! let mentor = catalog.get_mentor("2").unwrap();
//! let upsc = catalog.resources_by_category("upsc");
//!
//! println!("{} teaches {} and has {} UPSC resources around", mentor.name, mentor.expertise.join(", "), upsc.len());
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{CatalogError, Result};
pub use index::Catalog;
pub use types::{
    DifficultyLevel, Mentor, Record, RecordId, Resource, ResourceType, SuccessStory, Timestamp,
};
