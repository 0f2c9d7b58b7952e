//! Service crate for AspireBridge search.
//!
//! This crate wraps the repositories in an async `SearchService`, loads
//! the home feed concurrently and publishes result pages through
//! `PageFeed` for push-style consumers.

pub mod config;
pub mod feed;
pub mod search;

pub use config::ServiceConfig;
pub use feed::PageFeed;
pub use search::{HomeFeed, SearchService};
