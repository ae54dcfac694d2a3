//! Filesystem-backed content store.
//!
//! One YAML document per entry under `<root>/<collection>/<slug>.yaml`.
//! Entries are read fresh on every lookup; there is no cache to invalidate.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::fs;

use crate::domain::{Author, Category, CollectionKind, ContentItem, Tag};

use super::{ContentStore, StoreError};

const CATEGORIES_DIR: &str = "categories";
const AUTHORS_DIR: &str = "authors";
const TAGS_DIR: &str = "tags";

/// Content store rooted at a directory of per-collection subdirectories
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, dir: &str, slug: &str) -> PathBuf {
        self.root.join(dir).join(format!("{}.yaml", slug))
    }

    /// Read and parse one document. Absent files are `Ok(None)`; anything
    /// else that goes wrong is a store fault.
    async fn read_doc<T: DeserializeOwned>(
        &self,
        dir: &str,
        slug: &str,
    ) -> Result<Option<T>, StoreError> {
        let path = self.entry_path(dir, slug);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io { path, source: e }),
        };
        let doc = serde_yaml::from_str(&raw).map_err(|e| StoreError::Parse { path, source: e })?;
        Ok(Some(doc))
    }

    /// Entry slugs in a collection directory, sorted. A missing directory
    /// reads as an empty collection.
    async fn entry_slugs(&self, dir: &str) -> Result<Vec<String>, StoreError> {
        let path = self.root.join(dir);
        let mut entries = match fs::read_dir(&path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io { path, source: e }),
        };

        let mut slugs = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::Io {
                path: path.clone(),
                source: e,
            })?
        {
            let file = entry.path();
            if file.extension().and_then(|e| e.to_str()) == Some("yaml") {
                if let Some(stem) = file.file_stem().and_then(|s| s.to_str()) {
                    slugs.push(stem.to_string());
                }
            }
        }
        slugs.sort();
        Ok(slugs)
    }
}

#[async_trait]
impl ContentStore for FsStore {
    async fn item(
        &self,
        collection: CollectionKind,
        slug: &str,
    ) -> Result<Option<ContentItem>, StoreError> {
        let item: Option<ContentItem> = self.read_doc(collection.dir(), slug).await?;
        Ok(item.map(|mut item| {
            item.slug = slug.to_string();
            item
        }))
    }

    async fn category(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        let category: Option<Category> = self.read_doc(CATEGORIES_DIR, slug).await?;
        Ok(category.map(|mut category| {
            category.slug = slug.to_string();
            category
        }))
    }

    async fn author(&self, slug: &str) -> Result<Option<Author>, StoreError> {
        let author: Option<Author> = self.read_doc(AUTHORS_DIR, slug).await?;
        Ok(author.map(|mut author| {
            author.slug = slug.to_string();
            author
        }))
    }

    async fn tag(&self, id: &str) -> Result<Option<Tag>, StoreError> {
        let tag: Option<Tag> = self.read_doc(TAGS_DIR, id).await?;
        Ok(tag.map(|mut tag| {
            tag.id = id.to_string();
            tag
        }))
    }

    async fn items(&self, collection: CollectionKind) -> Result<Vec<ContentItem>, StoreError> {
        let mut items = Vec::new();
        for slug in self.entry_slugs(collection.dir()).await? {
            if let Some(item) = self.item(collection, &slug).await? {
                items.push(item);
            }
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn write_entry(root: &Path, dir: &str, slug: &str, body: &str) {
        let dir = root.join(dir);
        fs::create_dir_all(&dir).await.unwrap();
        fs::write(dir.join(format!("{}.yaml", slug)), body)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_missing_entry_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = FsStore::new(tmp.path());
        let item = store.item(CollectionKind::Courses, "nope").await.unwrap();
        assert!(item.is_none());
    }

    #[tokio::test]
    async fn test_slug_comes_from_entry_key() {
        let tmp = TempDir::new().unwrap();
        write_entry(
            tmp.path(),
            "authors",
            "jane-doe",
            "name: Jane Doe\nbio: Writes about Rust\n",
        )
        .await;

        let store = FsStore::new(tmp.path());
        let author = store.author("jane-doe").await.unwrap().unwrap();
        assert_eq!(author.slug, "jane-doe");
        assert_eq!(author.name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_malformed_yaml_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        write_entry(tmp.path(), "tags", "rust", ": not yaml [").await;

        let store = FsStore::new(tmp.path());
        let err = store.tag("rust").await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_items_sorted_by_slug() {
        let tmp = TempDir::new().unwrap();
        for slug in ["zebra", "alpha"] {
            write_entry(
                tmp.path(),
                "articles",
                slug,
                &format!(
                    "title: {slug}\ndescription: d\ncategory: explanation\npublished_at: 2024-01-01T00:00:00Z\n"
                ),
            )
            .await;
        }

        let store = FsStore::new(tmp.path());
        let items = store.items(CollectionKind::Articles).await.unwrap();
        let slugs: Vec<&str> = items.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["alpha", "zebra"]);
    }
}
