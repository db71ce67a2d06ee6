//! nft.storage `/store` adapter.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

use super::{ContentId, ContentStore, TokenMetadata};
use crate::constants::HTTP_TIMEOUT_SECS;
use crate::error::{MintError, MintResult};

#[derive(Debug, Deserialize)]
struct StoreResponse {
    ok: bool,
    value: Option<StoreValue>,
    error: Option<StoreError>,
}

#[derive(Debug, Deserialize)]
struct StoreValue {
    ipnft: String,
}

#[derive(Debug, Deserialize)]
struct StoreError {
    message: Option<String>,
}

pub struct NftStorageClient {
    client: Client,
    api_key: String,
    endpoint: String,
    gateway: String,
}

impl NftStorageClient {
    pub fn new(api_url: &str, api_key: &str, gateway: &str) -> MintResult<Self> {
        if api_key.is_empty() {
            return Err(MintError::Config(
                "nft.storage API key not configured. Set NFT_STORAGE_API_KEY or add it to config.toml"
                    .to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            endpoint: format!("{}/store", api_url.trim_end_matches('/')),
            gateway: gateway.to_string(),
        })
    }
}

/// The image itself travels as the `image` file part; the metadata refers to it
/// with a null placeholder that the service fills in.
fn meta_json(metadata: &TokenMetadata) -> MintResult<String> {
    let mut meta = serde_json::to_value(metadata)?;
    meta["image"] = serde_json::Value::Null;
    Ok(meta.to_string())
}

#[async_trait]
impl ContentStore for NftStorageClient {
    async fn store(&self, file_name: &str, image: &[u8], metadata: &TokenMetadata) -> MintResult<ContentId> {
        let image_part = Part::bytes(image.to_vec())
            .file_name(file_name.to_string())
            .mime_str("image/png")?;
        let form = Form::new()
            .text("meta", meta_json(metadata)?)
            .part("image", image_part);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let parsed = serde_json::from_str::<StoreResponse>(&text).ok();

        match parsed {
            Some(StoreResponse { ok: true, value: Some(value), .. }) if status.is_success() => {
                let cid = ContentId::new(&value.ipnft)?;
                info!(%cid, file = file_name, "stored artwork");
                Ok(cid)
            }
            other => {
                let message = other
                    .and_then(|r| r.error)
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Upload failed").to_string());
                warn!(status = status.as_u16(), %message, "storage upload rejected");
                Err(MintError::Storage(message))
            }
        }
    }

    fn gateway(&self) -> &str {
        &self.gateway
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MetadataProperties;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn metadata() -> TokenMetadata {
        TokenMetadata {
            name: "image_0.png".to_string(),
            description: "a dragon".to_string(),
            properties: MetadataProperties {
                prompt: "a dragon".to_string(),
                negative_prompt: None,
                style: None,
            },
        }
    }

    #[test]
    fn meta_part_has_image_placeholder() {
        let meta: serde_json::Value = serde_json::from_str(&meta_json(&metadata()).unwrap()).unwrap();
        assert!(meta["image"].is_null());
        assert_eq!(meta["name"], "image_0.png");
    }

    #[tokio::test]
    async fn returns_ipnft_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/store"))
            .and(header("authorization", "Bearer token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "value": {"ipnft": "bafyreia", "url": "ipfs://bafyreia/metadata.json"}
            })))
            .mount(&server)
            .await;

        let client = NftStorageClient::new(&server.uri(), "token", "nftstorage.link").unwrap();
        let cid = client.store("image_0.png", &[1, 2, 3], &metadata()).await.unwrap();
        assert_eq!(cid.as_str(), "bafyreia");
    }

    #[tokio::test]
    async fn error_payload_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "ok": false,
                "error": {"name": "HTTPError", "message": "API Key is missing"}
            })))
            .mount(&server)
            .await;

        let client = NftStorageClient::new(&server.uri(), "token", "nftstorage.link").unwrap();
        let err = client.store("image_0.png", &[1], &metadata()).await.unwrap_err();
        assert!(matches!(err, MintError::Storage(ref m) if m == "API Key is missing"));
    }
}
