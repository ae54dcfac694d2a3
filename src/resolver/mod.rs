//! The content resolver: identifier in, fully hydrated page out.
//!
//! Resolution stages:
//! 1. load the item (miss => `NotFound`)
//! 2. resolve category, author-like, and tag references jointly
//!    (any miss => `DanglingReference`)
//! 3. resolve bundled items exactly one level deep
//! 4. fetch pricing (unless the item is free or pricing is disabled)
//! 5. derive aggregates, structured data, and search facets
//!
//! Any failure aborts the whole resolution; a page is never produced in a
//! half-resolved state.

use futures::future::try_join_all;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::config::SiteConfig;
use crate::domain::{Author, CollectionKind, ResolvedItem, ResolvedPage, Tag};
use crate::pricing::{PricingClient, PricingError, PricingInfo};
use crate::store::{ContentStore, StoreError};

pub mod aggregate;
pub mod facets;
pub mod schema;

pub use aggregate::{aggregate_benefits, aggregate_difficulty};
pub use facets::{build_search_facets, FacetTable, FacetTag};
pub use schema::StructuredDataDocument;

/// How many bundle levels to expand below the requested item.
///
/// Exactly one: bundled items are loaded and resolved, but their own
/// bundles never are, so bundles of bundles cannot recurse.
const BUNDLE_DEPTH: u8 = 1;

/// Errors that abort a resolution. None are retried here; retry, if any,
/// belongs to the caller.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no entry `{slug}` in collection `{collection}`")]
    NotFound {
        collection: CollectionKind,
        slug: String,
    },

    #[error("`{from}` references missing {collection} entry `{slug}`")]
    DanglingReference {
        from: String,
        collection: String,
        slug: String,
    },

    #[error("pricing fetch failed: {0}")]
    ExternalService(#[from] PricingError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The content resolver. Holds the store, the optional pricing client, the
/// facet table, and site identity; all read-only, safe to share.
pub struct Resolver<S> {
    store: S,
    pricing: Option<PricingClient>,
    facet_table: FacetTable,
    site: SiteConfig,
}

impl<S: ContentStore> Resolver<S> {
    pub fn new(store: S, pricing: Option<PricingClient>, site: SiteConfig) -> Self {
        Self {
            store,
            pricing,
            facet_table: FacetTable::default(),
            site,
        }
    }

    /// Replace the category facet table
    pub fn with_facet_table(mut self, table: FacetTable) -> Self {
        self.facet_table = table;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve a content item into a render-ready page.
    #[instrument(skip(self), fields(collection = %collection, slug = slug))]
    pub async fn resolve(
        &self,
        collection: CollectionKind,
        slug: &str,
    ) -> Result<ResolvedPage, ResolveError> {
        let resolved = self.resolve_item(collection, slug, BUNDLE_DEPTH).await?;
        debug!(
            bundled = resolved.bundled.len(),
            tags = resolved.tags.len(),
            "References resolved"
        );

        let pricing = self.fetch_pricing(&resolved).await?;

        let (benefits, difficulty) = {
            let members = resolved.aggregate_members();
            (
                aggregate_benefits(members.iter().copied()),
                aggregate_difficulty(members.iter().copied()),
            )
        };

        let structured_data =
            StructuredDataDocument::for_item(&resolved, difficulty, pricing.as_ref(), &self.site);
        let facets = build_search_facets(&resolved, &self.facet_table);

        info!(%difficulty, facets = facets.len(), "Resolution complete");
        Ok(ResolvedPage {
            resolved,
            pricing,
            benefits,
            difficulty,
            structured_data,
            facets,
        })
    }

    /// Resolve an item and its references, expanding bundles `depth` levels.
    pub async fn resolve_item(
        &self,
        collection: CollectionKind,
        slug: &str,
        depth: u8,
    ) -> Result<ResolvedItem, ResolveError> {
        let mut resolved = self.resolve_entry(collection, slug).await?;

        if depth > 0 && !resolved.item.bundle.is_empty() {
            let parent = resolved.item.slug.clone();
            let bundled = try_join_all(resolved.item.bundle.iter().map(|member| {
                let parent = parent.clone();
                async move {
                    // A missing bundle member is a broken reference on the
                    // parent, not a top-level lookup miss
                    self.resolve_entry(collection, member)
                        .await
                        .map_err(|e| match e {
                            ResolveError::NotFound { collection, slug } => {
                                ResolveError::DanglingReference {
                                    from: parent,
                                    collection: collection.dir().to_string(),
                                    slug,
                                }
                            }
                            other => other,
                        })
                }
            }))
            .await?;
            resolved.bundled = bundled;
        }

        Ok(resolved)
    }

    /// Resolve one item without expanding its bundle references.
    ///
    /// Category, author-like, and tag lookups are issued concurrently and
    /// awaited jointly; each resolved list preserves the declared order.
    async fn resolve_entry(
        &self,
        collection: CollectionKind,
        slug: &str,
    ) -> Result<ResolvedItem, ResolveError> {
        let item = self
            .store
            .item(collection, slug)
            .await?
            .ok_or_else(|| ResolveError::NotFound {
                collection,
                slug: slug.to_string(),
            })?;

        let (category, authors, instructors, collaborators, tags) = tokio::try_join!(
            self.resolve_category(&item.category, &item.slug),
            self.resolve_authors(&item.authors, &item.slug),
            self.resolve_authors(&item.instructors, &item.slug),
            self.resolve_authors(&item.collaborators, &item.slug),
            self.resolve_tags(&item.tags, &item.slug),
        )?;

        Ok(ResolvedItem {
            collection,
            item,
            category,
            authors,
            instructors,
            collaborators,
            tags,
            bundled: Vec::new(),
        })
    }

    async fn resolve_category(
        &self,
        slug: &str,
        from: &str,
    ) -> Result<crate::domain::Category, ResolveError> {
        self.store
            .category(slug)
            .await?
            .ok_or_else(|| ResolveError::DanglingReference {
                from: from.to_string(),
                collection: "categories".to_string(),
                slug: slug.to_string(),
            })
    }

    async fn resolve_authors(
        &self,
        refs: &[String],
        from: &str,
    ) -> Result<Vec<Author>, ResolveError> {
        try_join_all(refs.iter().map(|slug| async move {
            self.store
                .author(slug)
                .await?
                .ok_or_else(|| ResolveError::DanglingReference {
                    from: from.to_string(),
                    collection: "authors".to_string(),
                    slug: slug.clone(),
                })
        }))
        .await
    }

    async fn resolve_tags(&self, refs: &[String], from: &str) -> Result<Vec<Tag>, ResolveError> {
        try_join_all(refs.iter().map(|id| async move {
            self.store
                .tag(id)
                .await?
                .ok_or_else(|| ResolveError::DanglingReference {
                    from: from.to_string(),
                    collection: "tags".to_string(),
                    slug: id.clone(),
                })
        }))
        .await
    }

    /// Fetch pricing for a paid item. Free items and resolvers built
    /// without a pricing client skip the call entirely.
    async fn fetch_pricing(
        &self,
        resolved: &ResolvedItem,
    ) -> Result<Option<PricingInfo>, ResolveError> {
        if resolved.item.free {
            return Ok(None);
        }
        let (Some(client), Some(plan)) = (&self.pricing, &resolved.item.pricing_plan) else {
            return Ok(None);
        };
        debug!(plan = plan.as_str(), "Fetching pricing");
        Ok(Some(client.fetch(plan).await?))
    }
}
