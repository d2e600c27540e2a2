// src/models/corpus.rs

//! Category index structures shared by the harvest, normalize and pick stages.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label to titles mapping. Insertion order is preserved and persisted.
pub type Buckets = IndexMap<String, Vec<String>>;

/// Catch-all difficulty bucket.
pub const UNKNOWN_DIFFICULTY: &str = "unknown";

/// Catch-all time bucket.
pub const VERY_LONG: &str = "Very long";

/// The four metadata categories a recipe is indexed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Difficulty,
    Time,
    Origin,
    Type,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Difficulty,
        Category::Time,
        Category::Origin,
        Category::Type,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Difficulty => "difficulty",
            Category::Time => "time",
            Category::Origin => "origin",
            Category::Type => "type",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw label index built by a harvest run.
///
/// Labels are lower-cased template values. A title may show up more than once
/// when runs are merged, so consumers must tolerate duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryIndex {
    #[serde(default)]
    pub difficulty: Buckets,

    #[serde(default)]
    pub time: Buckets,

    #[serde(default)]
    pub origin: Buckets,

    #[serde(default, rename = "type")]
    pub kind: Buckets,
}

impl CategoryIndex {
    pub fn buckets(&self, category: Category) -> &Buckets {
        match category {
            Category::Difficulty => &self.difficulty,
            Category::Time => &self.time,
            Category::Origin => &self.origin,
            Category::Type => &self.kind,
        }
    }

    pub fn buckets_mut(&mut self, category: Category) -> &mut Buckets {
        match category {
            Category::Difficulty => &mut self.difficulty,
            Category::Time => &mut self.time,
            Category::Origin => &mut self.origin,
            Category::Type => &mut self.kind,
        }
    }

    /// Append a title under `label` in `category`.
    pub fn push(&mut self, category: Category, label: impl Into<String>, title: impl Into<String>) {
        self.buckets_mut(category)
            .entry(label.into())
            .or_default()
            .push(title.into());
    }

    /// Number of title entries across all difficulty buckets, duplicates included.
    pub fn recipe_count(&self) -> usize {
        self.difficulty.values().map(Vec::len).sum()
    }

    /// Append every entry of `other` after the entries already present.
    pub fn merge(&mut self, other: CategoryIndex) {
        for (category, buckets) in [
            (Category::Difficulty, other.difficulty),
            (Category::Time, other.time),
            (Category::Origin, other.origin),
            (Category::Type, other.kind),
        ] {
            let target = self.buckets_mut(category);
            for (label, titles) in buckets {
                target.entry(label).or_default().extend(titles);
            }
        }
    }
}

/// Index whose difficulty and time labels are canonical bucket keys.
///
/// Only the bucket normalizer builds one from a raw index; loading a persisted
/// stage-two document trusts its keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedIndex(CategoryIndex);

impl NormalizedIndex {
    pub(crate) fn from_normalized(index: CategoryIndex) -> Self {
        Self(index)
    }

    pub fn as_index(&self) -> &CategoryIndex {
        &self.0
    }

    pub fn difficulty(&self) -> &Buckets {
        &self.0.difficulty
    }

    pub fn time(&self) -> &Buckets {
        &self.0.time
    }

    pub fn recipe_count(&self) -> usize {
        self.0.recipe_count()
    }

    /// Difficulty and time buckets holding `title`, first match wins.
    pub fn info_for(&self, title: &str) -> RecipeInfo {
        let find = |buckets: &Buckets| {
            buckets
                .iter()
                .find(|(_, titles)| titles.iter().any(|t| t == title))
                .map(|(label, _)| label.clone())
        };

        RecipeInfo {
            difficulty: find(self.difficulty()),
            time: find(self.time()),
        }
    }
}

/// Bucket membership of one recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeInfo {
    pub difficulty: Option<String>,
    pub time: Option<String>,
}

impl RecipeInfo {
    pub fn difficulty_label(&self) -> &str {
        self.difficulty.as_deref().unwrap_or("Unknown")
    }

    pub fn time_label(&self) -> &str {
        self.time.as_deref().unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_serializes_type_key_in_order() {
        let mut index = CategoryIndex::default();
        index.push(Category::Type, "soup", "Cookbook:Borscht");
        index.push(Category::Difficulty, "2", "Cookbook:Borscht");

        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(
            json,
            r#"{"difficulty":{"2":["Cookbook:Borscht"]},"time":{},"origin":{},"type":{"soup":["Cookbook:Borscht"]}}"#
        );
    }

    #[test]
    fn test_missing_categories_default_to_empty() {
        let index: CategoryIndex =
            serde_json::from_str(r#"{"difficulty":{"3":["A"]}}"#).unwrap();
        assert_eq!(index.difficulty["3"], vec!["A".to_string()]);
        assert!(index.time.is_empty());
        assert!(index.kind.is_empty());
    }

    #[test]
    fn test_merge_appends_and_keeps_duplicates() {
        let mut first = CategoryIndex::default();
        first.push(Category::Difficulty, "2", "A");

        let mut second = CategoryIndex::default();
        second.push(Category::Difficulty, "2", "A");
        second.push(Category::Difficulty, "3", "B");

        first.merge(second);
        assert_eq!(first.difficulty["2"], vec!["A", "A"]);
        assert_eq!(first.difficulty["3"], vec!["B"]);
        assert_eq!(first.recipe_count(), 3);
    }

    #[test]
    fn test_info_for_first_bucket_wins() {
        let mut index = CategoryIndex::default();
        index.push(Category::Difficulty, "2", "A");
        index.push(Category::Difficulty, "unknown", "A");
        index.push(Category::Time, "30", "B");
        let corpus = NormalizedIndex::from_normalized(index);

        let info = corpus.info_for("A");
        assert_eq!(info.difficulty.as_deref(), Some("2"));
        assert_eq!(info.time_label(), "Unknown");

        let missing = corpus.info_for("Z");
        assert_eq!(missing.difficulty_label(), "Unknown");
        assert_eq!(corpus.info_for("B").time_label(), "30");
    }
}
