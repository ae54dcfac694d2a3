//! Fully hydrated view models produced by the resolver.
//!
//! A `ResolvedItem` has every reference replaced by its loaded entity; a
//! `ResolvedPage` adds the derived metadata (pricing, structured data,
//! facets, bundle aggregates). Both are built per resolution and discarded
//! after rendering.

use serde::Serialize;

use crate::pricing::PricingInfo;
use crate::resolver::facets::FacetTag;
use crate::resolver::schema::StructuredDataDocument;

use super::content::{Benefits, CollectionKind, ContentItem, Difficulty};
use super::entities::{Author, Category, Tag};

/// A content item with all references resolved to concrete entities.
///
/// Entity vectors preserve the reference order declared on the item.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedItem {
    pub collection: CollectionKind,

    pub item: ContentItem,

    pub category: Category,

    pub authors: Vec<Author>,

    pub instructors: Vec<Author>,

    pub collaborators: Vec<Author>,

    pub tags: Vec<Tag>,

    /// Bundled items, resolved exactly one level deep. Entries here always
    /// have an empty `bundled` of their own.
    pub bundled: Vec<ResolvedItem>,
}

impl ResolvedItem {
    /// All resolved author-like entities in declaration order, deduplicated
    /// by entry key
    pub fn author_like(&self) -> Vec<&Author> {
        let mut seen = std::collections::HashSet::new();
        self.authors
            .iter()
            .chain(self.instructors.iter())
            .chain(self.collaborators.iter())
            .filter(|a| seen.insert(a.slug.as_str()))
            .collect()
    }

    /// The items bundle aggregates are computed over: the bundle members
    /// when present, otherwise the item itself.
    pub fn aggregate_members(&self) -> Vec<&ContentItem> {
        if self.bundled.is_empty() {
            vec![&self.item]
        } else {
            self.bundled.iter().map(|b| &b.item).collect()
        }
    }
}

/// Everything a page render needs: the resolved entity graph plus derived
/// metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPage {
    #[serde(flatten)]
    pub resolved: ResolvedItem,

    /// Absent for free items or when pricing was deliberately skipped
    pub pricing: Option<PricingInfo>,

    /// Summed benefits across bundle members (or the item itself)
    pub benefits: Benefits,

    /// Highest difficulty across bundle members (or the item itself)
    pub difficulty: Difficulty,

    pub structured_data: StructuredDataDocument,

    pub facets: Vec<FacetTag>,
}
