use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    Tops,
    Bottoms,
    Outerwear,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 3] = [
        ProductCategory::Tops,
        ProductCategory::Bottoms,
        ProductCategory::Outerwear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Tops => "Tops",
            ProductCategory::Bottoms => "Bottoms",
            ProductCategory::Outerwear => "Outerwear",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown category '{}', expected one of: tops, bottoms, outerwear",
                    s
                )
            })
    }
}

/// A normalized clothing item, ready for display and try-on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    pub category: ProductCategory,
    pub style_keywords: Vec<String>,
    /// Name of the catalog source the product came from.
    pub source: String,
}

/// Source-agnostic view of one raw catalog record, before any filtering.
/// Fields the source left out or sent as `null` are `None` (or empty).
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    pub native_id: Option<u64>,
    pub title: String,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub clothing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    Ok,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReport {
    pub source: String,
    #[serde(flatten)]
    pub status: SourceStatus,
    pub fetched: usize,
    pub not_clothing: usize,
    pub invalid: usize,
    pub kept: usize,
}

impl SourceReport {
    pub fn succeeded(source: &str, fetched: usize) -> Self {
        Self {
            source: source.to_string(),
            status: SourceStatus::Ok,
            fetched,
            not_clothing: 0,
            invalid: 0,
            kept: 0,
        }
    }

    pub fn failed(source: &str, reason: String) -> Self {
        Self {
            source: source.to_string(),
            status: SourceStatus::Failed { reason },
            fetched: 0,
            not_clothing: 0,
            invalid: 0,
            kept: 0,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, SourceStatus::Failed { .. })
    }
}

/// Per-call summary of what each source contributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchReport {
    pub fetched_at: DateTime<Utc>,
    pub sources: Vec<SourceReport>,
    pub id_collisions: usize,
}

impl FetchReport {
    pub fn new(fetched_at: DateTime<Utc>) -> Self {
        Self {
            fetched_at,
            sources: Vec::new(),
            id_collisions: 0,
        }
    }

    pub fn total_kept(&self) -> usize {
        self.sources.iter().map(|s| s.kept).sum()
    }

    /// Names of the sources that failed, in merge order.
    pub fn failed_sources(&self) -> Vec<&str> {
        self.sources
            .iter()
            .filter(|s| s.is_failed())
            .map(|s| s.source.as_str())
            .collect()
    }

    pub fn all_failed(&self) -> bool {
        !self.sources.is_empty() && self.sources.iter().all(SourceReport::is_failed)
    }
}

/// Result of one aggregation call.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub report: FetchReport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFile {
    pub name: String,
    pub contents: String,
}

#[derive(Debug, Clone)]
pub struct RenderedCatalog {
    pub products: Vec<Product>,
    pub report: FetchReport,
    pub files: Vec<RenderedFile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Csv,
    Digest,
}

impl OutputFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "products.json",
            OutputFormat::Csv => "products.csv",
            OutputFormat::Digest => "digest.txt",
        }
    }
}

/// One garment per category, as worn together in a try-on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outfit {
    pub top: Option<Product>,
    pub bottom: Option<Product>,
    pub outerwear: Option<Product>,
}

impl Outfit {
    /// Puts the product in its category slot, returning the item it replaced.
    pub fn wear(&mut self, product: Product) -> Option<Product> {
        let slot = match product.category {
            ProductCategory::Tops => &mut self.top,
            ProductCategory::Bottoms => &mut self.bottom,
            ProductCategory::Outerwear => &mut self.outerwear,
        };
        slot.replace(product)
    }

    /// Looks up each id in `products` and wears it; unknown ids are skipped.
    pub fn from_ids(products: &[Product], ids: &[u64]) -> Self {
        let mut outfit = Outfit::default();
        for id in ids {
            if let Some(product) = products.iter().find(|p| p.id == *id) {
                outfit.wear(product.clone());
            }
        }
        outfit
    }

    pub fn items(&self) -> impl Iterator<Item = &Product> {
        [&self.top, &self.bottom, &self.outerwear]
            .into_iter()
            .filter_map(Option::as_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.items().next().is_none()
    }

    pub fn total_price(&self) -> f64 {
        self.items().map(|p| p.price).sum()
    }
}
