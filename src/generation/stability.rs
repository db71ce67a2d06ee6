//! Stability AI text-to-image adapter.

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{GenerationRequest, ImageGenerator, RenderedImage};
use crate::constants::{
    GENERATION_CFG_SCALE, GENERATION_HEIGHT, GENERATION_SAMPLES, GENERATION_SEED,
    GENERATION_STEPS, GENERATION_WIDTH, HTTP_TIMEOUT_SECS, NEGATIVE_PROMPT_WEIGHT, NSFW_PROMPT,
    NSFW_WEIGHT, PROMPT_WEIGHT,
};
use crate::error::{MintError, MintResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedPrompt {
    pub text: String,
    pub weight: f32,
}

impl WeightedPrompt {
    fn new(text: &str, weight: f32) -> Self {
        Self {
            text: text.to_string(),
            weight,
        }
    }
}

/// Positive prompt first, then the fixed nsfw guard, then the user's negative prompt.
pub fn weighted_prompts(request: &GenerationRequest) -> Vec<WeightedPrompt> {
    let mut prompts = vec![
        WeightedPrompt::new(request.prompt(), PROMPT_WEIGHT),
        WeightedPrompt::new(NSFW_PROMPT, NSFW_WEIGHT),
    ];
    if let Some(negative) = request.negative_prompt() {
        prompts.push(WeightedPrompt::new(negative, NEGATIVE_PROMPT_WEIGHT));
    }
    prompts
}

#[derive(Debug, Serialize)]
struct TextToImageBody {
    steps: u32,
    width: u32,
    height: u32,
    seed: u64,
    cfg_scale: u32,
    samples: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    style_preset: Option<&'static str>,
    text_prompts: Vec<WeightedPrompt>,
}

impl TextToImageBody {
    fn from_request(request: &GenerationRequest) -> Self {
        Self {
            steps: GENERATION_STEPS,
            width: GENERATION_WIDTH,
            height: GENERATION_HEIGHT,
            seed: GENERATION_SEED,
            cfg_scale: GENERATION_CFG_SCALE,
            samples: GENERATION_SAMPLES,
            style_preset: request.style().map(|s| s.value()),
            text_prompts: weighted_prompts(request),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TextToImageResponse {
    #[serde(default)]
    artifacts: Vec<Artifact>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Artifact {
    base64: String,
    #[serde(default)]
    seed: u64,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn decode_artifacts(response: TextToImageResponse) -> MintResult<RenderedImage> {
    let artifact = response
        .artifacts
        .into_iter()
        .last()
        .ok_or_else(|| MintError::Generation("No image was returned".to_string()))?;

    if artifact.finish_reason.as_deref() == Some("ERROR") {
        return Err(MintError::Generation("Image generation failed".to_string()));
    }

    let png = base64::engine::general_purpose::STANDARD.decode(artifact.base64.as_bytes())?;
    Ok(RenderedImage {
        seed: artifact.seed,
        png,
    })
}

/// Client for `/v1/generation/{engine}/text-to-image`
pub struct StabilityClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl StabilityClient {
    pub fn new(api_url: &str, engine: &str, api_key: &str) -> MintResult<Self> {
        if api_key.is_empty() {
            return Err(MintError::Config(
                "Stability API key not configured. Set STABILITY_API_KEY or add it to config.toml"
                    .to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            endpoint: format!(
                "{}/v1/generation/{}/text-to-image",
                api_url.trim_end_matches('/'),
                engine
            ),
        })
    }
}

#[async_trait]
impl ImageGenerator for StabilityClient {
    async fn generate(&self, request: &GenerationRequest) -> MintResult<RenderedImage> {
        let body = TextToImageBody::from_request(request);
        debug!(endpoint = %self.endpoint, style = ?body.style_preset, "requesting image");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
            warn!(status = status.as_u16(), %message, "image generation rejected");
            return Err(MintError::Generation(message));
        }

        let image = decode_artifacts(response.json().await?)?;
        info!(seed = image.seed, bytes = image.png.len(), "image generated");
        Ok(image)
    }
}
