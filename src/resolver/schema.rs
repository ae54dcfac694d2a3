//! Typed schema.org structured data.
//!
//! The document shape is fixed at compile time; a missing or misnamed field
//! is a type error here rather than a silently wrong object in the page
//! head. Output is best-effort shape-matching, not validated against an
//! external schema.

use serde::Serialize;

use crate::config::SiteConfig;
use crate::domain::{Author, CollectionKind, Difficulty, ResolvedItem};
use crate::pricing::PricingInfo;

const CONTEXT: &str = "https://schema.org";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentType {
    Course,
    BlogPosting,
}

/// An `Organization` node (site provider/publisher)
#[derive(Debug, Clone, Serialize)]
pub struct Organization {
    #[serde(rename = "@type")]
    kind: &'static str,
    pub name: String,
    pub url: String,
}

impl Organization {
    fn from_site(site: &SiteConfig) -> Self {
        Self {
            kind: "Organization",
            name: site.site_name.clone(),
            url: site.site_url.clone(),
        }
    }
}

/// A `Person` node (author or instructor)
#[derive(Debug, Clone, Serialize)]
pub struct Person {
    #[serde(rename = "@type")]
    kind: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&Author> for Person {
    fn from(author: &Author) -> Self {
        // Prefer a link; fall back to the biography when there is none
        let (url, description) = match &author.site {
            Some(site) => (Some(site.clone()), None),
            None => (None, author.bio.clone()),
        };
        Self {
            kind: "Person",
            name: author.name.clone(),
            url,
            description,
            image: author.photo.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OfferCategory {
    Free,
    Paid,
}

/// An `Offer` node
#[derive(Debug, Clone, Serialize)]
pub struct Offer {
    #[serde(rename = "@type")]
    kind: &'static str,
    pub category: OfferCategory,
    #[serde(rename = "priceCurrency")]
    pub price_currency: String,
    /// Price in display units (dollars), zero when free
    pub price: f64,
}

impl Offer {
    fn from_pricing(pricing: Option<&PricingInfo>) -> Self {
        match pricing {
            Some(info) => Self {
                kind: "Offer",
                category: OfferCategory::Paid,
                price_currency: info.currency.to_string(),
                price: info.display_price(),
            },
            None => Self {
                kind: "Offer",
                category: OfferCategory::Free,
                price_currency: "USD".to_string(),
                price: 0.0,
            },
        }
    }
}

/// Fixed-shape structured data document emitted to the page head
#[derive(Debug, Clone, Serialize)]
pub struct StructuredDataDocument {
    #[serde(rename = "@context")]
    context: &'static str,

    #[serde(rename = "@type")]
    pub document_type: DocumentType,

    /// Course title (`name`), courses only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Article title (`headline`), articles only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Organization>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Organization>,

    pub offers: Offer,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<Person>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instructor: Vec<Person>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(rename = "inLanguage")]
    pub in_language: String,

    #[serde(rename = "educationalLevel", skip_serializing_if = "Option::is_none")]
    pub educational_level: Option<String>,

    #[serde(rename = "dateModified")]
    pub date_modified: String,

    #[serde(rename = "datePublished")]
    pub date_published: String,
}

impl StructuredDataDocument {
    /// Build the document for a resolved item, dispatching on its collection
    pub fn for_item(
        resolved: &ResolvedItem,
        difficulty: Difficulty,
        pricing: Option<&PricingInfo>,
        site: &SiteConfig,
    ) -> Self {
        match resolved.collection {
            CollectionKind::Courses => Self::course(resolved, difficulty, pricing, site),
            CollectionKind::Articles => Self::article(resolved, pricing, site),
        }
    }

    /// `Course` document: provider + instructor list + educational level
    pub fn course(
        resolved: &ResolvedItem,
        difficulty: Difficulty,
        pricing: Option<&PricingInfo>,
        site: &SiteConfig,
    ) -> Self {
        Self {
            context: CONTEXT,
            document_type: DocumentType::Course,
            name: Some(resolved.item.title.clone()),
            headline: None,
            description: resolved.item.description.clone(),
            provider: Some(Organization::from_site(site)),
            publisher: None,
            offers: Offer::from_pricing(pricing),
            author: Vec::new(),
            instructor: resolved.author_like().into_iter().map(Person::from).collect(),
            image: resolved.item.cover_image.clone(),
            in_language: site.language.clone(),
            educational_level: Some(difficulty.educational_level().to_string()),
            date_modified: resolved.item.last_modified().to_rfc3339(),
            date_published: resolved.item.published_at.to_rfc3339(),
        }
    }

    /// `BlogPosting` document: publisher + author list, no educational level
    pub fn article(
        resolved: &ResolvedItem,
        pricing: Option<&PricingInfo>,
        site: &SiteConfig,
    ) -> Self {
        Self {
            context: CONTEXT,
            document_type: DocumentType::BlogPosting,
            name: None,
            headline: Some(resolved.item.title.clone()),
            description: resolved.item.description.clone(),
            provider: None,
            publisher: Some(Organization::from_site(site)),
            offers: Offer::from_pricing(pricing),
            author: resolved.author_like().into_iter().map(Person::from).collect(),
            instructor: Vec::new(),
            image: resolved.item.cover_image.clone(),
            in_language: site.language.clone(),
            educational_level: None,
            date_modified: resolved.item.last_modified().to_rfc3339(),
            date_published: resolved.item.published_at.to_rfc3339(),
        }
    }
}
