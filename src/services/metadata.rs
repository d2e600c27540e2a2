//! Recipe template metadata extraction.
//!
//! Reads `| field = value` parameters out of raw wikitext. Which template
//! parameter feeds which category is data in [`FIELD_TABLE`].

use std::collections::HashMap;

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::Category;

/// Template parameter read for each category.
pub const FIELD_TABLE: &[(Category, &str)] = &[
    (Category::Difficulty, "difficulty"),
    (Category::Time, "time"),
    (Category::Origin, "origin"),
    (Category::Type, "course"),
];

/// Trimmed raw value per category, first match only.
pub type RawMetadata = HashMap<Category, String>;

/// Applies one case-insensitive pattern per table row.
pub struct MetadataExtractor {
    fields: Vec<(Category, Regex)>,
}

impl MetadataExtractor {
    /// Extractor over the default [`FIELD_TABLE`].
    pub fn new() -> Result<Self> {
        Self::with_fields(FIELD_TABLE)
    }

    /// Extractor over a custom `(category, template parameter)` table.
    pub fn with_fields(table: &[(Category, &str)]) -> Result<Self> {
        let fields = table
            .iter()
            .map(|&(category, param)| {
                let pattern = format!(r"(?i)\|\s*{}\s*=\s*([^|\n]+)", regex::escape(param));
                Regex::new(&pattern)
                    .map(|regex| (category, regex))
                    .map_err(|e| AppError::pattern(param, e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { fields })
    }

    /// Extract known fields from `text`. Absent fields have no entry.
    pub fn extract(&self, text: &str) -> RawMetadata {
        self.fields
            .iter()
            .filter_map(|(category, regex)| {
                let value = regex.captures(text)?.get(1)?.as_str().trim();
                Some((*category, value.to_string()))
            })
            .collect()
    }
}
