//! Content item records: courses and articles.
//!
//! A content item carries its own scalar fields plus references (slugs) into
//! the other collections. References stay unresolved at this layer; the
//! resolver turns them into loaded entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level item collections in the content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    /// Courses, including course bundles
    Courses,

    /// Articles (tutorials, explanations, opinion pieces)
    Articles,
}

impl CollectionKind {
    /// Directory name of this collection in the content store
    pub fn dir(&self) -> &'static str {
        match self {
            CollectionKind::Courses => "courses",
            CollectionKind::Articles => "articles",
        }
    }

    /// Facet value covering every item of this type
    pub fn facet_label(&self) -> &'static str {
        match self {
            CollectionKind::Courses => "Courses",
            CollectionKind::Articles => "Articles",
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir())
    }
}

impl std::str::FromStr for CollectionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "courses" | "course" => Ok(CollectionKind::Courses),
            "articles" | "article" => Ok(CollectionKind::Articles),
            _ => anyhow::bail!("Unknown collection: {}", s),
        }
    }
}

/// Difficulty level with a strict total order: beginner < intermediate < advanced.
///
/// The derived `Ord` is the ordinal used for bundle aggregation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Label used for the schema.org `educationalLevel` field
    pub fn educational_level(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        };
        write!(f, "{}", label)
    }
}

/// Numeric benefits advertised on an item. Absent fields read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Benefits {
    /// Total workload in hours
    pub hours: f64,

    /// Lines of code written across the material
    pub lines_of_code: u64,
}

/// A course or article record as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Identifier within the collection (set from the entry key, not the document body)
    #[serde(default)]
    pub slug: String,

    /// Display title
    pub title: String,

    /// Short description, also used for structured data
    pub description: String,

    /// Category reference (exactly one per item)
    pub category: String,

    /// Author references, in display order
    #[serde(default)]
    pub authors: Vec<String>,

    /// Instructor references (courses)
    #[serde(default)]
    pub instructors: Vec<String>,

    /// Collaborator references
    #[serde(default)]
    pub collaborators: Vec<String>,

    /// Tag references
    #[serde(default)]
    pub tags: Vec<String>,

    /// Difficulty level, if declared
    #[serde(default)]
    pub difficulty: Option<Difficulty>,

    /// Workload in hours, if declared
    #[serde(default)]
    pub hours: Option<f64>,

    /// Lines of code, if declared
    #[serde(default)]
    pub lines_of_code: Option<u64>,

    /// Slugs of bundled items within the same collection (course bundles)
    #[serde(default)]
    pub bundle: Vec<String>,

    /// Pricing plan identifier for the external pricing service
    #[serde(default)]
    pub pricing_plan: Option<String>,

    /// Free items never trigger a pricing fetch
    #[serde(default)]
    pub free: bool,

    /// Cover image URL
    #[serde(default)]
    pub cover_image: Option<String>,

    /// First publication timestamp
    pub published_at: DateTime<Utc>,

    /// Last content update, if any
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ContentItem {
    /// Declared benefits with absent fields as zero
    pub fn benefits(&self) -> Benefits {
        Benefits {
            hours: self.hours.unwrap_or(0.0),
            lines_of_code: self.lines_of_code.unwrap_or(0),
        }
    }

    /// The timestamp to report as "last modified"
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.published_at)
    }

    /// All author-like references (authors, instructors, collaborators) in
    /// declaration order
    pub fn author_like_refs(&self) -> impl Iterator<Item = &str> {
        self.authors
            .iter()
            .chain(self.instructors.iter())
            .chain(self.collaborators.iter())
            .map(String::as_str)
    }
}
