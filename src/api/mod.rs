/// API Client Module
///
/// This module handles all interactions with the chain indexing API.
/// Views depend on the `IndexerApi` trait; `HttpIndexer` implements it over HTTP.
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ExplorerConfig;
use crate::error::ApiError;
use crate::models::Envelope;

/// One query parameter sent with a request
pub type QueryPair = (&'static str, String);

#[async_trait]
pub trait IndexerApi: Send + Sync {
    /// GET `path` with `query` and return the raw JSON envelope
    async fn fetch_value(&self, path: &str, query: &[QueryPair]) -> Result<Envelope<serde_json::Value>, ApiError>;
}

/// Fetch and decode `path` into the envelope of a typed record
pub async fn fetch<T, A>(api: &A, path: &str, query: &[QueryPair]) -> Result<Envelope<T>, ApiError>
where
    T: DeserializeOwned,
    A: IndexerApi + ?Sized,
{
    let envelope = api.fetch_value(path, query).await?;
    let result = envelope
        .result
        .filter(|value| !value.is_null())
        .map(serde_json::from_value)
        .transpose()
        .map_err(|source| ApiError::Decode { path: path.to_string(), source })?;

    Ok(Envelope { result })
}

pub struct HttpIndexer {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpIndexer {
    /// Create a new client for the configured indexer endpoint
    pub fn new(config: &ExplorerConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("scan-explorer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ApiError::Transport { path: config.api_url.to_string(), source })?;

        Ok(Self { client, base_url: config.api_url.clone() })
    }

    /// Get the endpoint URL this client talks to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let joined = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path.trim_start_matches('/'));
        Url::parse(&joined).map_err(|source| ApiError::InvalidUrl { url: joined.clone(), source })
    }
}

#[async_trait]
impl IndexerApi for HttpIndexer {
    async fn fetch_value(&self, path: &str, query: &[QueryPair]) -> Result<Envelope<serde_json::Value>, ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {} {:?}", url, query);

        let transport = |source| ApiError::Transport { path: path.to_string(), source };
        let response = self.client.get(url).query(query).send().await.map_err(transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("{} not found", path);
            return Ok(Envelope::empty());
        }
        if !status.is_success() {
            return Err(ApiError::Status { path: path.to_string(), status: status.as_u16() });
        }

        let body = response.bytes().await.map_err(transport)?;
        if body.is_empty() {
            return Ok(Envelope::empty());
        }

        let value: serde_json::Value =
            serde_json::from_slice(&body).map_err(|source| ApiError::Decode { path: path.to_string(), source })?;

        Ok(Envelope { result: Some(value) })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeIndexer;
    use super::*;
    use crate::models::{Block, ListResult};

    #[test]
    fn test_endpoint_join() {
        let config = ExplorerConfig {
            api_url: Url::parse("https://api.example.org/v1/").unwrap(),
            ..ExplorerConfig::default()
        };
        let indexer = HttpIndexer::new(&config).unwrap();

        assert_eq!(indexer.endpoint("/events").unwrap().as_str(), "https://api.example.org/v1/events");
        assert_eq!(indexer.endpoint("blocks/5").unwrap().as_str(), "https://api.example.org/v1/blocks/5");
    }

    #[tokio::test]
    async fn test_fetch_decodes_record() {
        let api = FakeIndexer::new().respond("/blocks/5", serde_json::json!({ "height": 5, "hash": "0x05" }));

        let envelope: Envelope<Block> = fetch(&api, "/blocks/5", &[]).await.unwrap();
        let block = envelope.result.unwrap();
        assert_eq!(block.height, Some(5));
        assert_eq!(block.hash.as_deref(), Some("0x05"));
    }

    #[tokio::test]
    async fn test_fetch_null_result_is_empty() {
        let api = FakeIndexer::new().respond("/blocks/5", serde_json::Value::Null);

        let envelope: Envelope<Block> = fetch(&api, "/blocks/5", &[]).await.unwrap();
        assert!(envelope.result.is_none());
    }

    #[tokio::test]
    async fn test_fake_unknown_path_is_empty() {
        let api = FakeIndexer::new();

        let envelope: Envelope<Block> = fetch(&api, "/blocks/404", &[]).await.unwrap();
        assert!(envelope.result.is_none());
        assert_eq!(api.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_decode_error() {
        let api = FakeIndexer::new().respond("/events", serde_json::json!({ "items": "nope" }));

        let result: Result<Envelope<ListResult<Block>>, _> = fetch(&api, "/events", &[]).await;
        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }
}
