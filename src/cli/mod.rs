//! Command-line interface for syllabus.
//!
//! Provides commands for resolving a single content item, listing a
//! collection, and sweeping the whole store for broken references.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::SiteConfig;
use crate::domain::CollectionKind;
use crate::pricing::PricingClient;
use crate::resolver::Resolver;
use crate::store::{ContentStore, FsStore};

/// syllabus - content resolution and derivation engine
#[derive(Parser, Debug)]
#[command(name = "syllabus")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./syllabus.yaml when present)
    #[arg(short, long, global = true, env = "SYLLABUS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve one content item and print the page as JSON
    Resolve {
        /// Collection the item lives in
        #[arg(value_enum)]
        collection: CollectionArg,

        /// Entry slug
        slug: String,

        /// Print only the structured data document
        #[arg(long)]
        schema: bool,

        /// Print only the search facets
        #[arg(long)]
        facets: bool,

        /// Skip the pricing fetch (no network)
        #[arg(long)]
        no_pricing: bool,
    },

    /// List the entries of a collection
    List {
        #[arg(value_enum)]
        collection: CollectionArg,
    },

    /// Resolve every item in the store and report broken references
    Check,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CollectionArg {
    Courses,
    Articles,
}

impl From<CollectionArg> for CollectionKind {
    fn from(arg: CollectionArg) -> Self {
        match arg {
            CollectionArg::Courses => CollectionKind::Courses,
            CollectionArg::Articles => CollectionKind::Articles,
        }
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let site = SiteConfig::load(self.config.as_deref())?;
        let store = FsStore::new(&site.content_dir);

        match self.command {
            Commands::Resolve {
                collection,
                slug,
                schema,
                facets,
                no_pricing,
            } => {
                let pricing = if no_pricing {
                    None
                } else {
                    Some(
                        PricingClient::new(&site.pricing_base_url, site.pricing_timeout)
                            .context("Failed to build pricing client")?,
                    )
                };
                let resolver = Resolver::new(store, pricing, site);

                let page = resolver.resolve(collection.into(), &slug).await?;
                let output = if schema {
                    serde_json::to_string_pretty(&page.structured_data)?
                } else if facets {
                    serde_json::to_string_pretty(&page.facets)?
                } else {
                    serde_json::to_string_pretty(&page)?
                };
                println!("{}", output);
                Ok(())
            }

            Commands::List { collection } => {
                let collection: CollectionKind = collection.into();
                let items = store
                    .items(collection)
                    .await
                    .with_context(|| format!("Failed to list {}", collection))?;
                for item in &items {
                    println!("{:<30} {}", item.slug, item.title);
                }
                println!("\n{} entries in {}", items.len(), collection);
                Ok(())
            }

            Commands::Check => check_store(store, site).await,
        }
    }
}

/// Integrity sweep: every item in both collections must fully resolve.
///
/// Pricing is skipped; this is a reference check, not a network check.
async fn check_store(store: FsStore, site: SiteConfig) -> Result<()> {
    let resolver = Resolver::new(store, None, site);
    let mut failures = 0usize;
    let mut total = 0usize;

    for collection in [CollectionKind::Courses, CollectionKind::Articles] {
        let items = resolver.store().items(collection).await?;
        for item in items {
            total += 1;
            match resolver.resolve(collection, &item.slug).await {
                Ok(_) => {}
                Err(e) => {
                    failures += 1;
                    eprintln!("FAIL {}/{}: {}", collection, item.slug, e);
                }
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} items failed to resolve", failures, total);
    }
    println!("{} items resolved cleanly", total);
    Ok(())
}
