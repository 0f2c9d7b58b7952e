//! Parser for catalog data files.
//!
//! Each record kind lives in its own file holding a JSON array, the same
//! shape the REST API returns:
//! - mentors.json: `[Mentor, ...]`
//! - resources.json: `[Resource, ...]`
//! - stories.json: `[SuccessStory, ...]`

use crate::error::{CatalogError, Result};
use crate::types::{Mentor, Resource, SuccessStory};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read a whole file, mapping a missing file to `FileNotFound`
fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// Parse a JSON array of records from a string.
///
/// `file` is only used to label errors.
pub fn parse_records<T: DeserializeOwned>(content: &str, file: &str) -> Result<Vec<T>> {
    serde_json::from_str(content).map_err(|e| CatalogError::ParseError {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = read_file(path)?;
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_records(&content, &file)
}

/// Parse the mentors.json file
pub fn parse_mentors(path: &Path) -> Result<Vec<Mentor>> {
    parse_file(path)
}

/// Parse the resources.json file
pub fn parse_resources(path: &Path) -> Result<Vec<Resource>> {
    parse_file(path)
}

/// Parse the stories.json file
pub fn parse_stories(path: &Path) -> Result<Vec<SuccessStory>> {
    parse_file(path)
}
