use crate::config::sources::AggregatorConfig;
use crate::config::sources::SourceConfig;
use crate::core::ConfigProvider;
use crate::domain::model::{OutputFormat, ProductCategory};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Merge priority follows table order. Defaults to the public catalogs.
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
    pub http: Option<HttpConfig>,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<OutputFormat>,
    pub category: Option<ProductCategory>,
    #[serde(default)]
    pub bundle: bool,
}

fn default_sources() -> Vec<SourceConfig> {
    AggregatorConfig::default().sources
}

fn default_formats() -> Vec<OutputFormat> {
    vec![OutputFormat::Json, OutputFormat::Csv]
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            sources: self.sources.clone(),
            request_timeout_secs: self.http.as_ref().and_then(|h| h.timeout_seconds),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.export.formats
    }

    fn category_filter(&self) -> Option<ProductCategory> {
        self.export.category
    }

    fn bundle(&self) -> bool {
        self.export.bundle
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("export.output_path", &self.export.output_path)?;
        self.aggregator_config().validate()
    }
}
