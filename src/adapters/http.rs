use crate::utils::error::{CatalogError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// GETs `endpoint` and decodes the body as `T`. Non-2xx statuses are errors.
pub async fn fetch_json<T: DeserializeOwned>(
    client: &Client,
    source_name: &str,
    endpoint: &str,
) -> Result<T> {
    tracing::debug!("Making API request to: {}", endpoint);
    let response = client.get(endpoint).send().await?;

    let status = response.status();
    tracing::debug!("{} response status: {}", source_name, status);
    if !status.is_success() {
        return Err(CatalogError::UpstreamStatusError {
            source_name: source_name.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| CatalogError::DecodeError {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}
