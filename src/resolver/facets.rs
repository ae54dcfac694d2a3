//! Search facet derivation.
//!
//! Facets are `"<Group>:<Value>"` strings consumed by the external search
//! indexer. Derivation is total: missing optional data omits the facet, it
//! never fails.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{CategoryName, ResolvedItem};

/// A single facet marker, e.g. `"Authors:Jane Doe"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FacetTag(String);

impl FacetTag {
    fn new(group: &str, value: impl AsRef<str>) -> Self {
        Self(format!("{}:{}", group, value.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FacetTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category-name to facet-label mapping.
///
/// Injectable so the vocabulary can change without touching resolution
/// logic; the default carries the site's fixed table. Unmapped names yield
/// no category facet.
#[derive(Debug, Clone)]
pub struct FacetTable {
    labels: HashMap<CategoryName, String>,
}

impl Default for FacetTable {
    fn default() -> Self {
        let mut labels = HashMap::new();
        labels.insert(CategoryName::Course, "Courses".to_string());
        labels.insert(CategoryName::Bundle, "Courses (Bundles)".to_string());
        labels.insert(CategoryName::Tutorial, "Articles (Tutorials)".to_string());
        labels.insert(
            CategoryName::Explanation,
            "Articles (Explanations)".to_string(),
        );
        labels.insert(CategoryName::Opinion, "Articles (Opinions)".to_string());
        Self { labels }
    }
}

impl FacetTable {
    /// An empty table (no category facets at all)
    pub fn empty() -> Self {
        Self {
            labels: HashMap::new(),
        }
    }

    /// Add or replace a label
    pub fn with_label(mut self, name: CategoryName, label: impl Into<String>) -> Self {
        self.labels.insert(name, label.into());
        self
    }

    pub fn label(&self, name: CategoryName) -> Option<&str> {
        self.labels.get(&name).map(String::as_str)
    }
}

/// Derive the facet set for a resolved item.
///
/// Emits, in order: the top-level-type facet, the category facet (when
/// mapped), one facet per author-like entity, one per tag, and the
/// last-updated marker.
pub fn build_search_facets(resolved: &ResolvedItem, table: &FacetTable) -> Vec<FacetTag> {
    let mut facets = Vec::new();

    facets.push(FacetTag::new(
        "Categories",
        resolved.collection.facet_label(),
    ));

    if let Some(label) = table.label(resolved.category.name) {
        facets.push(FacetTag::new("Categories", label));
    }

    for author in resolved.author_like() {
        facets.push(FacetTag::new("Authors", &author.name));
    }

    for tag in &resolved.tags {
        facets.push(FacetTag::new("Tags", &tag.id));
    }

    facets.push(FacetTag::new(
        "Updated",
        resolved.item.last_modified().format("%Y-%m-%d").to_string(),
    ));

    facets
}
