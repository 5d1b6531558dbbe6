use crate::domain::model::{
    CatalogSnapshot, OutputFormat, ProductCategory, RenderedCatalog, SourceRecord,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// One external catalog API.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn name(&self) -> &str;

    /// Added to every native id so ids from different sources never meet.
    fn id_offset(&self) -> u64;

    /// Single attempt; any transport, status or decode failure is an `Err`.
    async fn fetch_records(&self) -> Result<Vec<SourceRecord>>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[OutputFormat];
    fn category_filter(&self) -> Option<ProductCategory>;
    fn bundle(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<CatalogSnapshot>;
    async fn transform(&self, snapshot: CatalogSnapshot) -> Result<RenderedCatalog>;
    async fn load(&self, rendered: &RenderedCatalog) -> Result<String>;
}
