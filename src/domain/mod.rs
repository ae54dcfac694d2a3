//! Data structures for content items and the entities they reference.
//!
//! Everything here is read-only: entries are loaded fresh from the content
//! store on each resolution and never written back.

pub mod content;
pub mod entities;
pub mod resolved;

pub use content::{Benefits, CollectionKind, ContentItem, Difficulty};
pub use entities::{Author, Category, CategoryName, Faq, Tag};
pub use resolved::{ResolvedItem, ResolvedPage};
