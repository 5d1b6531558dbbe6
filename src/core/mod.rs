pub mod aggregator;
pub mod etl;
pub mod normalize;
pub mod pipeline;
pub mod render;

pub use crate::domain::model::{CatalogSnapshot, Product, RenderedCatalog};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
