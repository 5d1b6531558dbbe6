use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_positive_number, validate_unique, validate_url, Validate};
use serde::{Deserialize, Serialize};

pub const PLATZI_ENDPOINT: &str = "https://api.escuelajs.co/api/v1/products?offset=0&limit=50";
pub const FAKE_STORE_ENDPOINT: &str = "https://fakestoreapi.com/products";
pub const FAKE_STORE_ID_OFFSET: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Platzi,
    FakeStore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub endpoint: String,
    #[serde(default)]
    pub id_offset: u64,
}

impl SourceConfig {
    pub fn platzi(endpoint: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Platzi,
            endpoint: endpoint.into(),
            id_offset: 0,
        }
    }

    pub fn fake_store(endpoint: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::FakeStore,
            endpoint: endpoint.into(),
            id_offset: FAKE_STORE_ID_OFFSET,
        }
    }
}

/// Everything the aggregator needs, fixed at construction. Source order is
/// merge priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    pub sources: Vec<SourceConfig>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                SourceConfig::platzi(PLATZI_ENDPOINT),
                SourceConfig::fake_store(FAKE_STORE_ENDPOINT),
            ],
            request_timeout_secs: None,
        }
    }
}

impl Validate for AggregatorConfig {
    fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(CatalogError::MissingConfigError {
                field: "sources".to_string(),
            });
        }

        for (i, source) in self.sources.iter().enumerate() {
            validate_url(&format!("sources[{}].endpoint", i), &source.endpoint)?;
        }

        validate_unique("sources.id_offset", self.sources.iter().map(|s| s.id_offset))?;

        if let Some(secs) = self.request_timeout_secs {
            validate_positive_number("request_timeout_secs", secs, 1)?;
        }

        Ok(())
    }
}
