use crate::adapters::http::fetch_json;
use crate::domain::model::SourceRecord;
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const CLOTHING_CATEGORIES: [&str; 2] = ["men's clothing", "women's clothing"];

// Every field is optional so one incomplete record cannot fail the whole response.
#[derive(Debug, Deserialize)]
struct FakeStoreProduct {
    id: Option<u64>,
    title: Option<String>,
    price: Option<f64>,
    category: Option<String>,
    image: Option<String>,
}

impl From<FakeStoreProduct> for SourceRecord {
    fn from(p: FakeStoreProduct) -> Self {
        SourceRecord {
            native_id: p.id,
            clothing: p
                .category
                .is_some_and(|c| CLOTHING_CATEGORIES.contains(&c.as_str())),
            image_url: p.image.filter(|url| !url.is_empty()),
            title: p.title.unwrap_or_default(),
            price: p.price,
        }
    }
}

/// fakestoreapi.com (`/products`).
pub struct FakeStoreSource {
    client: Client,
    endpoint: String,
    id_offset: u64,
}

impl FakeStoreSource {
    pub fn new(client: Client, endpoint: String, id_offset: u64) -> Self {
        Self {
            client,
            endpoint,
            id_offset,
        }
    }
}

#[async_trait]
impl CatalogSource for FakeStoreSource {
    fn name(&self) -> &str {
        "FakeStore"
    }

    fn id_offset(&self) -> u64 {
        self.id_offset
    }

    async fn fetch_records(&self) -> Result<Vec<SourceRecord>> {
        let products: Vec<FakeStoreProduct> =
            fetch_json(&self.client, self.name(), &self.endpoint).await?;
        Ok(products.into_iter().map(SourceRecord::from).collect())
    }
}
