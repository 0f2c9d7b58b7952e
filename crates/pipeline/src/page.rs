//! Pagination: the page request and the page envelope.
//!
//! Pages are 1-indexed throughout. A request past the last page is not an
//! error; it yields an empty page with `has_more = false`.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// Page size used when the caller does not pick one
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// A validated (page, page size) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

/// Wire shape of a page request, checked by `PageRequest::new` on the way in
#[derive(Deserialize)]
struct RawPageRequest {
    page: usize,
    page_size: usize,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PipelineError;

    fn try_from(raw: RawPageRequest) -> Result<Self> {
        Self::new(raw.page, raw.page_size)
    }
}

impl PageRequest {
    /// Build a request, rejecting page 0 or an empty page size.
    pub fn new(page: usize, page_size: usize) -> Result<Self> {
        if page == 0 || page_size == 0 {
            return Err(PipelineError::InvalidPage { page, page_size });
        }
        Ok(Self { page, page_size })
    }

    /// The first page with the given size; a size of 0 is bumped to 1
    pub fn first(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Index of the first record on this page
    pub fn start_index(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// The request for the page after this one
    pub fn next(&self) -> Self {
        Self {
            page: self.page + 1,
            page_size: self.page_size,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// One page of search results plus continuation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records on this page, in sorted order
    pub items: Vec<T>,
    /// Number of records that survived filtering, across all pages
    pub total_count: usize,
    /// Whether another page follows this one
    pub has_more: bool,
    /// Page number to request next, if any
    pub next_page: Option<usize>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            has_more: false,
            next_page: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Slice an already filtered and sorted sequence into one page.
///
/// ## Algorithm
/// 1. start = (page - 1) * page_size
/// 2. If start >= total, return an empty slice (the total is still reported)
/// 3. end = min(start + page_size, total)
/// 4. has_more = end < total; next_page = page + 1 when has_more
pub fn paginate<T: Clone>(sorted: &[&T], request: PageRequest) -> Page<T> {
    let total_count = sorted.len();
    let start = request.start_index();

    if start >= total_count {
        return Page {
            items: Vec::new(),
            total_count,
            has_more: false,
            next_page: None,
        };
    }

    let end = start.saturating_add(request.page_size()).min(total_count);
    let has_more = end < total_count;

    Page {
        items: sorted[start..end].iter().map(|&record| record.clone()).collect(),
        total_count,
        has_more,
        next_page: has_more.then(|| request.page() + 1),
    }
}
