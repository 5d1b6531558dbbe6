use crate::adapters::http::fetch_json;
use crate::domain::model::SourceRecord;
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const CLOTHING_CATEGORY: &str = "Clothes";

// Every field is optional so one incomplete record cannot fail the whole response.
#[derive(Debug, Deserialize)]
struct PlatziProduct {
    id: Option<u64>,
    title: Option<String>,
    price: Option<f64>,
    images: Option<Vec<Option<String>>>,
    category: Option<PlatziCategory>,
}

#[derive(Debug, Deserialize)]
struct PlatziCategory {
    name: Option<String>,
}

impl From<PlatziProduct> for SourceRecord {
    fn from(p: PlatziProduct) -> Self {
        SourceRecord {
            native_id: p.id,
            clothing: p
                .category
                .and_then(|c| c.name)
                .is_some_and(|name| name == CLOTHING_CATEGORY),
            image_url: p.images.into_iter().flatten().next().flatten(),
            title: p.title.unwrap_or_default(),
            price: p.price,
        }
    }
}

/// Platzi Fake Store API (`/api/v1/products`).
pub struct PlatziSource {
    client: Client,
    endpoint: String,
    id_offset: u64,
}

impl PlatziSource {
    pub fn new(client: Client, endpoint: String, id_offset: u64) -> Self {
        Self {
            client,
            endpoint,
            id_offset,
        }
    }
}

#[async_trait]
impl CatalogSource for PlatziSource {
    fn name(&self) -> &str {
        "Platzi"
    }

    fn id_offset(&self) -> u64 {
        self.id_offset
    }

    async fn fetch_records(&self) -> Result<Vec<SourceRecord>> {
        let products: Vec<PlatziProduct> =
            fetch_json(&self.client, self.name(), &self.endpoint).await?;
        Ok(products.into_iter().map(SourceRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CatalogError;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_maps_platzi_shape() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/products");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!([
                        {
                            "id": 12,
                            "title": "Classic Red Pullover Hoodie",
                            "price": 10,
                            "description": "soft",
                            "images": ["https://i.imgur.com/1twoaDy.jpeg", "https://i.imgur.com/FDwQgLy.jpeg"],
                            "category": {"id": 1, "name": "Clothes", "image": "https://i.imgur.com/QkIa5tT.jpeg"}
                        },
                        {
                            "id": 40,
                            "title": "Sleek Wireless Headphones",
                            "price": 58,
                            "images": [],
                            "category": {"id": 2, "name": "Electronics"}
                        }
                    ]));
            })
            .await;

        let source = PlatziSource::new(Client::new(), server.url("/api/v1/products"), 0);
        let records = source.fetch_records().await.unwrap();

        api_mock.assert_async().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].native_id, Some(12));
        assert_eq!(records[0].price, Some(10.0));
        assert!(records[0].clothing);
        assert_eq!(
            records[0].image_url.as_deref(),
            Some("https://i.imgur.com/1twoaDy.jpeg")
        );
        assert!(!records[1].clothing);
        assert_eq!(records[1].image_url, None);
    }

    #[tokio::test]
    async fn test_fetch_fails_on_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/products");
                then.status(503);
            })
            .await;

        let source = PlatziSource::new(Client::new(), server.url("/api/v1/products"), 0);
        let err = source.fetch_records().await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UpstreamStatusError { status: 503, .. }
        ));
    }

    #[tokio::test]
    async fn test_null_fields_drop_only_that_record() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/products");
                then.status(200).json_body(serde_json::json!([
                    {
                        "id": 1,
                        "title": "Classic Red Pullover Hoodie",
                        "price": 10,
                        "images": ["https://i.imgur.com/1twoaDy.jpeg"],
                        "category": {"id": 1, "name": "Clothes"}
                    },
                    {
                        "id": 2,
                        "title": "Half Listed Shirt",
                        "price": null,
                        "images": null,
                        "category": {"id": 3}
                    },
                    {
                        "id": 3,
                        "title": "Shirt Without Pictures",
                        "price": 15,
                        "images": [null],
                        "category": null
                    }
                ]));
            })
            .await;

        let source = PlatziSource::new(Client::new(), server.url("/api/v1/products"), 0);
        let records = source.fetch_records().await.unwrap();

        assert_eq!(records.len(), 3);
        assert!(records[0].clothing);
        assert_eq!(records[1].price, None);
        assert_eq!(records[1].image_url, None);
        assert!(!records[1].clothing);
        assert_eq!(records[2].image_url, None);
        assert!(!records[2].clothing);
    }
}
