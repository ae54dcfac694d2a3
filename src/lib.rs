//! syllabus - content resolution and derivation engine
//!
//! Turns a content item identifier (collection + slug) into a fully
//! hydrated, render-ready page: every reference (category, authors,
//! instructors, collaborators, tags, bundled items) resolved to a loaded
//! entity, plus derived metadata (pricing, schema.org structured data,
//! search facets, bundle aggregates).
//!
//! # Architecture
//!
//! - `domain`: data structures (content items, entities, view models)
//! - `store`: read-only content store trait and the filesystem backend
//! - `resolver`: the resolution pipeline and the pure derivations
//! - `pricing`: HTTP client for the external pricing service
//! - `cli`: command-line interface
//!
//! The content store is immutable; resolutions share no mutable state and
//! any failure (missing entry, dangling reference, pricing fault) aborts
//! the whole resolution rather than producing a partial page.
//!
//! # Usage
//!
//! ```bash
//! # Resolve a course into its page JSON
//! syllabus resolve courses rust-fundamentals
//!
//! # Sweep the store for broken references
//! syllabus check
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod pricing;
pub mod resolver;
pub mod store;

// Re-export main types at crate root for convenience
pub use config::SiteConfig;
pub use domain::{
    Author, Benefits, Category, CategoryName, CollectionKind, ContentItem, Difficulty, Faq,
    ResolvedItem, ResolvedPage, Tag,
};
pub use pricing::{PricingClient, PricingError, PricingInfo};
pub use resolver::{
    aggregate_benefits, aggregate_difficulty, build_search_facets, FacetTable, FacetTag,
    ResolveError, Resolver, StructuredDataDocument,
};
pub use store::{ContentStore, FsStore, StoreError};
