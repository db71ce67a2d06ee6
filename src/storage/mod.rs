mod nft_storage;

pub use nft_storage::NftStorageClient;

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use crate::constants::METADATA_FILE_NAME;
use crate::error::{MintError, MintResult};
use crate::generation::GeneratedArtifact;

/// IPFS content identifier returned by the pinning service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(cid: &str) -> MintResult<Self> {
        let cid = cid.trim();
        if cid.is_empty() || cid.contains('/') || cid.chars().any(char::is_whitespace) {
            return Err(MintError::InvalidId(cid.to_string()));
        }
        Ok(ContentId(cid.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `https://<gateway>/ipfs/<cid>/<filename>`
    pub fn gateway_url(&self, gateway: &str, filename: &str) -> String {
        format!("https://{}/ipfs/{}/{}", gateway.trim_end_matches('/'), self.0, filename)
    }

    /// `ipfs://<cid>/metadata.json`
    pub fn metadata_uri(&self) -> String {
        format!("ipfs://{}/{}", self.0, METADATA_FILE_NAME)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataProperties {
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub style: Option<String>,
}

/// NFT metadata stored next to the image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    pub properties: MetadataProperties,
}

impl TokenMetadata {
    pub fn for_artifact(artifact: &GeneratedArtifact) -> Self {
        let request = &artifact.request;
        Self {
            name: artifact.name.clone(),
            description: request.prompt().to_string(),
            properties: MetadataProperties {
                prompt: request.prompt().to_string(),
                negative_prompt: request.negative_prompt().map(str::to_string),
                style: request.style().map(|s| s.value().to_string()),
            },
        }
    }
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Upload the image plus its metadata and return the root content id.
    async fn store(&self, file_name: &str, image: &[u8], metadata: &TokenMetadata) -> MintResult<ContentId>;

    /// Gateway host used to build retrieval URLs
    fn gateway(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{GenerationRequest, RenderedImage};

    #[test]
    fn content_id_urls() {
        let cid = ContentId::new("bafybeigdyr").unwrap();
        assert_eq!(cid.metadata_uri(), "ipfs://bafybeigdyr/metadata.json");
        assert_eq!(
            cid.gateway_url("nftstorage.link", "image_0.png"),
            "https://nftstorage.link/ipfs/bafybeigdyr/image_0.png"
        );
    }

    #[test]
    fn rejects_bad_content_ids() {
        assert!(ContentId::new("").is_err());
        assert!(ContentId::new("bafy/x").is_err());
        assert!(ContentId::new("ba fy").is_err());
    }

    #[test]
    fn metadata_carries_prompt_properties() {
        let request = GenerationRequest::validate("a dragon", "blurry", Some("anime")).unwrap();
        let artifact = GeneratedArtifact::new(request, RenderedImage { seed: 5, png: vec![] });
        let json = serde_json::to_value(TokenMetadata::for_artifact(&artifact)).unwrap();
        assert_eq!(json["name"], "image_5.png");
        assert_eq!(json["description"], "a dragon");
        assert_eq!(json["properties"]["prompt"], "a dragon");
        assert_eq!(json["properties"]["negativePrompt"], "blurry");
        assert_eq!(json["properties"]["style"], "anime");
    }
}
