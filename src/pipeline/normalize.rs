//! Stage 2: normalize the raw index into the served corpus.

use crate::error::{AppError, Result};
use crate::models::{CategoryIndex, Config, NormalizedIndex};
use crate::services::buckets;
use crate::storage::{DocumentStore, read_json, write_json};

/// Load the raw index, collapse its difficulty and time labels, and persist.
pub async fn run_normalize(config: &Config, store: &dyn DocumentStore) -> Result<NormalizedIndex> {
    let raw: CategoryIndex = read_json(store, &config.paths.raw_corpus)
        .await?
        .ok_or_else(|| {
            AppError::config(format!(
                "Raw corpus not found at {}. Run 'harvest' first.",
                store.location(&config.paths.raw_corpus)
            ))
        })?;

    let corpus = buckets::normalize(&raw);
    write_json(store, &config.paths.corpus, &corpus).await?;

    log::info!(
        "Normalized {} difficulty and {} time labels into {} and {} buckets",
        raw.difficulty.len(),
        raw.time.len(),
        corpus.difficulty().len(),
        corpus.time().len()
    );
    log::info!(
        "Normalized categories saved to {}",
        store.location(&config.paths.corpus)
    );

    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::storage::LocalStorage;

    #[tokio::test]
    async fn test_normalize_writes_ordered_document() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("recipes.json"),
            r#"{
                "difficulty": {"unknown": ["U"], "3": ["C"], "1": ["A"], "7": ["S"]},
                "time": {"2 hours": ["C"], "10 minutes": ["A"], "overnight": ["U"]},
                "origin": {"india": ["A"]},
                "type": {"bread": ["C"]}
            }"#,
        )
        .unwrap();
        let storage = LocalStorage::new(dir.path());
        let config = Config::default();

        let corpus = run_normalize(&config, &storage).await.unwrap();
        assert_eq!(corpus.recipe_count(), 4);

        let written = std::fs::read_to_string(dir.path().join("recipes_clean.json")).unwrap();
        let reparsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        let difficulty: Vec<_> = reparsed["difficulty"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        let time: Vec<_> = reparsed["time"].as_object().unwrap().keys().cloned().collect();

        assert_eq!(difficulty, vec!["1", "3", "unknown"]);
        assert_eq!(reparsed["difficulty"]["unknown"], serde_json::json!(["U", "S"]));
        assert_eq!(time, vec!["15", "120", "Very long"]);
        assert_eq!(reparsed["type"]["bread"], serde_json::json!(["C"]));
    }

    #[tokio::test]
    async fn test_normalize_without_raw_corpus_fails() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let result = run_normalize(&Config::default(), &storage).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
