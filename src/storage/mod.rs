//! Storage abstractions for corpus persistence.
//!
//! The pipeline only needs an opaque key-value document store:
//!
//! ```text
//! storage/
//! ├── config.toml              # Configuration
//! ├── recipes.json             # Stage 1: raw category index
//! ├── recipes_clean.json       # Stage 2: normalized corpus
//! └── harvest_failures.json    # Titles to retry
//! ```

pub mod local;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for document storage backends.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a document, `None` if it does not exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace a document.
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Human-readable location of `key`, for logs.
    fn location(&self, key: &str) -> String;
}

/// Read and decode a JSON document.
pub async fn read_json<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    key: &str,
) -> Result<Option<T>> {
    match store.read_bytes(key).await? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

/// Encode and write a pretty-printed JSON document.
pub async fn write_json<T: Serialize + ?Sized + Sync>(
    store: &dyn DocumentStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    store.write_bytes(key, &bytes).await
}
