//! Pipeline entry points.
//!
//! - `run_harvest`: List the category and index every page
//! - `run_retry_failed`: Re-fetch pages that failed last run
//! - `run_normalize`: Collapse difficulty and time labels into buckets
//! - `Oracle`: Pick and render recipes from the normalized corpus

pub mod harvest;
pub mod normalize;
pub mod oracle;

pub use harvest::{run_harvest, run_retry_failed};
pub use normalize::run_normalize;
pub use oracle::{Oracle, RecipeCard, load_corpus, render};
