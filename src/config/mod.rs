#[cfg(feature = "cli")]
pub mod cli;
pub mod sources;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use sources::{AggregatorConfig, SourceConfig, SourceKind};
pub use toml_config::TomlConfig;
