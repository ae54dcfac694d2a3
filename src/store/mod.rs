//! Content store access.
//!
//! The store is an immutable, already-validated document store keyed by
//! collection + entry slug. Lookups return `Ok(None)` for absent entries;
//! turning an absence into `NotFound` or `DanglingReference` is the
//! resolver's call, since it depends on where the reference came from.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Author, Category, CollectionKind, ContentItem, Tag};

pub mod fs;

pub use fs::FsStore;

/// Errors reading the backing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Read-only query surface over the content store.
///
/// Implementations must be safe for unlimited concurrent readers; the
/// resolver issues independent lookups jointly.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Load a content item from a top-level collection
    async fn item(
        &self,
        collection: CollectionKind,
        slug: &str,
    ) -> Result<Option<ContentItem>, StoreError>;

    /// Load a category entry
    async fn category(&self, slug: &str) -> Result<Option<Category>, StoreError>;

    /// Load an author entry
    async fn author(&self, slug: &str) -> Result<Option<Author>, StoreError>;

    /// Load a tag entry
    async fn tag(&self, id: &str) -> Result<Option<Tag>, StoreError>;

    /// List every item in a top-level collection, sorted by slug
    async fn items(&self, collection: CollectionKind) -> Result<Vec<ContentItem>, StoreError>;
}
