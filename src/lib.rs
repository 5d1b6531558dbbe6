pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::{AggregatorConfig, SourceConfig, SourceKind, TomlConfig};
pub use crate::core::{aggregator::CatalogAggregator, etl::ExportEngine, pipeline::CatalogPipeline};
pub use domain::model::{FetchReport, OutputFormat, Outfit, Product, ProductCategory};
pub use utils::error::{CatalogError, Result};
