//! Outcomes of network-facing operations.
//!
//! Transient failures are values here, not errors: the harvest loop keeps
//! going and records what it skipped.

use std::fmt;

/// A request that kept failing until the retry budget ran out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub attempts: u32,
    pub reason: String,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (after {} attempts)", self.reason, self.attempts)
    }
}

/// Raw body lookup for a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    /// Wikitext of the latest revision
    Body(String),
    /// The page exists in the listing but has no revision data
    Missing,
    /// Fetch gave up
    Failed(FetchFailure),
}

impl PageContent {
    /// Batch-mode view: empty string for both missing and failed pages.
    pub fn body_or_empty(&self) -> &str {
        match self {
            PageContent::Body(text) => text,
            PageContent::Missing | PageContent::Failed(_) => "",
        }
    }
}

/// Titles collected from a paginated category listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryListing {
    pub titles: Vec<String>,
    /// False when a page fetch failed or the server looped on its token
    pub complete: bool,
    pub pages: usize,
}
