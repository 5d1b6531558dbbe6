use crate::config::sources::{
    AggregatorConfig, SourceConfig, FAKE_STORE_ENDPOINT, PLATZI_ENDPOINT,
};
use crate::core::ConfigProvider;
use crate::domain::model::{OutputFormat, ProductCategory};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "tryon-catalog")]
#[command(about = "Aggregate clothing products from public catalog APIs")]
pub struct CliConfig {
    #[arg(long, default_value = PLATZI_ENDPOINT)]
    pub platzi_endpoint: String,

    #[arg(long, default_value = FAKE_STORE_ENDPOINT)]
    pub fake_store_endpoint: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_enum, value_delimiter = ',', default_values = ["json", "csv"])]
    pub formats: Vec<OutputFormat>,

    /// Only export one category (tops, bottoms, outerwear)
    #[arg(long)]
    pub category: Option<ProductCategory>,

    /// Write a single zip bundle instead of separate files
    #[arg(long)]
    pub bundle: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub request_timeout: Option<u64>,

    /// Product ids to assemble into an outfit after export
    #[arg(long, value_delimiter = ',')]
    pub outfit: Vec<u64>,

    /// TOML configuration file; replaces the source and export flags above
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            sources: vec![
                SourceConfig::platzi(self.platzi_endpoint.clone()),
                SourceConfig::fake_store(self.fake_store_endpoint.clone()),
            ],
            request_timeout_secs: self.request_timeout,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    fn category_filter(&self) -> Option<ProductCategory> {
        self.category
    }

    fn bundle(&self) -> bool {
        self.bundle
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;
        self.aggregator_config().validate()
    }
}
