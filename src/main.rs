use anyhow::Context;
use clap::Parser;
use tryon_catalog::core::etl::ExportOutcome;
use tryon_catalog::core::ConfigProvider;
use tryon_catalog::utils::error::ErrorSeverity;
use tryon_catalog::utils::{logger, validation::Validate};
use tryon_catalog::{
    AggregatorConfig, CatalogAggregator, CatalogPipeline, CliConfig, ExportEngine, LocalStorage,
    Outfit, TomlConfig,
};

async fn export<C>(
    aggregator_config: AggregatorConfig,
    config: C,
) -> tryon_catalog::Result<ExportOutcome>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    let aggregator = CatalogAggregator::from_config(&aggregator_config)?;
    let storage = LocalStorage::new(config.output_path());
    let pipeline = CatalogPipeline::new(storage, config, aggregator);

    ExportEngine::new(pipeline).run().await
}

fn print_outfit(outfit: &Outfit) {
    if outfit.is_empty() {
        println!("👗 None of the requested outfit ids are in the catalog");
        return;
    }
    println!("👗 Outfit:");
    for item in outfit.items() {
        println!("   {} {} ({:.2})", item.category, item.name, item.price);
    }
    println!("   Total: {:.2}", outfit.total_price());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting tryon-catalog");
    tracing::debug!("CLI config: {:?}", cli);

    let outfit_ids = cli.outfit.clone();
    let result = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let file_config = TomlConfig::from_file(&path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            export(file_config.aggregator_config(), file_config).await
        }
        None => export(cli.aggregator_config(), cli).await,
    };

    match result {
        Ok(outcome) => {
            let failed = outcome.report.failed_sources();
            if outcome.report.all_failed() {
                println!("⚠️  No catalog source could be reached; no products are available right now.");
            } else if !failed.is_empty() {
                println!("⚠️  Some catalog sources are unavailable; fewer products are shown.");
            }

            println!(
                "✅ Exported {} products to {}",
                outcome.products.len(),
                outcome.location
            );

            if !outfit_ids.is_empty() {
                print_outfit(&Outfit::from_ids(&outcome.products, &outfit_ids));
            }
        }
        Err(e) => {
            tracing::error!("❌ Catalog export failed: {} (Severity: {:?})", e, e.severity());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
