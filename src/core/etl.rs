use crate::core::Pipeline;
use crate::domain::model::{FetchReport, Product};
use crate::utils::error::Result;

/// Where the export landed and what went into it.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub location: String,
    pub products: Vec<Product>,
    pub report: FetchReport,
}

pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract, transform and load once. A source outage is not an error here;
    /// only rendering and storage failures are.
    pub async fn run(&self) -> Result<ExportOutcome> {
        tracing::info!("Starting catalog export");

        let snapshot = self.pipeline.extract().await?;
        tracing::info!("Extracted {} products", snapshot.products.len());

        let rendered = self.pipeline.transform(snapshot).await?;
        tracing::info!(
            "Rendered {} files for {} products",
            rendered.files.len(),
            rendered.products.len()
        );

        let location = self.pipeline.load(&rendered).await?;
        tracing::info!("Output saved to: {}", location);

        Ok(ExportOutcome {
            location,
            products: rendered.products,
            report: rendered.report,
        })
    }
}
