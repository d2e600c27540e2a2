// src/models/mod.rs

//! Domain models for the cookbook application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod corpus;
mod harvest;
mod outcome;

// Re-export all public types
pub use config::{
    Config, DisplayConfig, HarvestConfig, HttpConfig, LoggingConfig, PathsConfig, WikiConfig,
};
pub use corpus::{
    Buckets, Category, CategoryIndex, NormalizedIndex, RecipeInfo, UNKNOWN_DIFFICULTY, VERY_LONG,
};
pub use harvest::{Harvest, HarvestReport, HarvestStats};
pub use outcome::{CategoryListing, FetchFailure, PageContent};
