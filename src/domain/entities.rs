//! Referenced entities: categories, authors, and tags.

use serde::{Deserialize, Serialize};

/// Closed set of category names.
///
/// Adding a site category means adding a variant here and a label in the
/// facet table; resolution logic does not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryName {
    Course,
    Bundle,
    Tutorial,
    Explanation,
    Opinion,
}

impl std::fmt::Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CategoryName::Course => "course",
            CategoryName::Bundle => "bundle",
            CategoryName::Tutorial => "tutorial",
            CategoryName::Explanation => "explanation",
            CategoryName::Opinion => "opinion",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for CategoryName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "course" => Ok(CategoryName::Course),
            "bundle" => Ok(CategoryName::Bundle),
            "tutorial" => Ok(CategoryName::Tutorial),
            "explanation" => Ok(CategoryName::Explanation),
            "opinion" => Ok(CategoryName::Opinion),
            _ => anyhow::bail!("Unknown category name: {}", s),
        }
    }
}

/// A frequently-asked question attached to a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// A content category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Entry key in the categories collection
    #[serde(default)]
    pub slug: String,

    pub name: CategoryName,

    /// Display color (CSS value)
    pub color: String,

    #[serde(default)]
    pub faq: Vec<Faq>,
}

/// An author, instructor, or collaborator profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    /// Entry key in the authors collection
    #[serde(default)]
    pub slug: String,

    pub name: String,

    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub twitter: Option<String>,

    #[serde(default)]
    pub github: Option<String>,

    #[serde(default)]
    pub company: Option<String>,

    /// Photo URL
    #[serde(default)]
    pub photo: Option<String>,

    /// Personal site URL
    #[serde(default)]
    pub site: Option<String>,
}

/// A content tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// Entry key in the tags collection, used verbatim in facets
    #[serde(default)]
    pub id: String,

    /// Display label
    pub label: String,
}
