//! Harvest run bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::CategoryIndex;

/// Result of one harvest pass.
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    pub index: CategoryIndex,
    pub report: HarvestReport,
}

/// Which titles were indexed and which were skipped, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestReport {
    /// Titles handed to the builder
    pub listed: usize,

    /// Listing pages fetched; zero when titles were given directly
    #[serde(default)]
    pub listing_pages: usize,

    /// False when the category listing ended early
    #[serde(default = "default_true")]
    pub listing_complete: bool,

    /// Titles indexed
    pub harvested: usize,

    /// Titles without revision content; not worth retrying
    #[serde(default)]
    pub missing: Vec<String>,

    /// Titles whose fetch gave up; a later run may retry these
    #[serde(default)]
    pub failed: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Default for HarvestReport {
    fn default() -> Self {
        Self {
            listed: 0,
            listing_pages: 0,
            listing_complete: true,
            harvested: 0,
            missing: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl HarvestReport {
    pub fn skipped(&self) -> usize {
        self.missing.len() + self.failed.len()
    }
}

/// Wall-clock statistics for a harvest run.
#[derive(Debug, Clone)]
pub struct HarvestStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl HarvestStats {
    pub fn elapsed_secs(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}
