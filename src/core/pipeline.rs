use crate::core::aggregator::CatalogAggregator;
use crate::core::render::{render, render_report};
use crate::core::{CatalogSnapshot, ConfigProvider, Pipeline, RenderedCatalog, Storage};
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const BUNDLE_FILE_NAME: &str = "catalog_bundle.zip";

/// Aggregate, render and write the catalog.
pub struct CatalogPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    aggregator: CatalogAggregator,
}

impl<S: Storage, C: ConfigProvider> CatalogPipeline<S, C> {
    pub fn new(storage: S, config: C, aggregator: CatalogAggregator) -> Self {
        Self {
            storage,
            config,
            aggregator,
        }
    }

    fn bundle_files(rendered: &RenderedCatalog) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for file in &rendered.files {
            zip.start_file(file.name.as_str(), SimpleFileOptions::default())?;
            zip.write_all(file.contents.as_bytes())?;
        }
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CatalogPipeline<S, C> {
    async fn extract(&self) -> Result<CatalogSnapshot> {
        Ok(self.aggregator.fetch_with_report().await)
    }

    async fn transform(&self, snapshot: CatalogSnapshot) -> Result<RenderedCatalog> {
        let products = match self.config.category_filter() {
            Some(category) => snapshot
                .products
                .into_iter()
                .filter(|p| p.category == category)
                .collect(),
            None => snapshot.products,
        };

        // A format listed twice is rendered once; a second copy would collide in the bundle.
        let mut formats = Vec::new();
        for format in self.config.output_formats() {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }

        let mut files = Vec::with_capacity(formats.len() + 1);
        for format in formats {
            files.push(render(format, &products)?);
        }
        files.push(render_report(&snapshot.report)?);

        Ok(RenderedCatalog {
            products,
            report: snapshot.report,
            files,
        })
    }

    async fn load(&self, rendered: &RenderedCatalog) -> Result<String> {
        if self.config.bundle() {
            let zip_data = Self::bundle_files(rendered)?;
            tracing::debug!("Writing bundle ({} bytes) to storage", zip_data.len());
            self.storage.write_file(BUNDLE_FILE_NAME, &zip_data).await?;
            return Ok(format!("{}/{}", self.config.output_path(), BUNDLE_FILE_NAME));
        }

        for file in &rendered.files {
            tracing::debug!("Writing {} ({} bytes)", file.name, file.contents.len());
            self.storage
                .write_file(&file.name, file.contents.as_bytes())
                .await?;
        }
        Ok(self.config.output_path().to_string())
    }
}
