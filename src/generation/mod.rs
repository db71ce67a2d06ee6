mod stability;
mod style;

pub use stability::StabilityClient;
pub use style::Style;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{Field, FieldError, MintError, MintResult};
use crate::storage::ContentId;

/// A validated prompt submission. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt: String,
    negative_prompt: Option<String>,
    style: Option<Style>,
}

impl GenerationRequest {
    /// Validate raw form input.
    ///
    /// A whitespace-only prompt counts as missing and an empty negative prompt
    /// is dropped. All field errors are reported together.
    pub fn validate(prompt: &str, negative_prompt: &str, style: Option<&str>) -> MintResult<Self> {
        let mut errors = Vec::new();

        if prompt.trim().is_empty() {
            errors.push(FieldError::new(Field::Prompt, "Positive prompt is required"));
        }

        let style = match style.map(str::trim).filter(|s| !s.is_empty() && *s != "none") {
            None => None,
            Some(raw) => match raw.parse::<Style>() {
                Ok(style) => Some(style),
                Err(message) => {
                    errors.push(FieldError::new(Field::Style, message));
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(MintError::Validation(errors));
        }

        let negative_prompt = Some(negative_prompt.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Self {
            prompt: prompt.trim().to_string(),
            negative_prompt,
            style,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn negative_prompt(&self) -> Option<&str> {
        self.negative_prompt.as_deref()
    }

    pub fn style(&self) -> Option<Style> {
        self.style
    }

    pub fn description(&self) -> String {
        format!(
            "Prompt: {}\n\nNegative Prompt: {}\n\nStyle: {}",
            self.prompt,
            self.negative_prompt.as_deref().unwrap_or("None"),
            self.style.map(|s| s.value()).unwrap_or("None"),
        )
    }
}

/// Raw output of the image API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub seed: u64,
    pub png: Vec<u8>,
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> MintResult<RenderedImage>;
}

/// The one piece of artwork currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub request: GenerationRequest,
    pub name: String,
    pub seed: u64,
    pub image_data: Vec<u8>,
    pub description: String,
    pub content_id: Option<ContentId>,
    pub source_url: Option<String>,
    pub saved_path: Option<PathBuf>,
}

impl GeneratedArtifact {
    pub fn new(request: GenerationRequest, image: RenderedImage) -> Self {
        let description = request.description();
        Self {
            name: format!("image_{}.png", image.seed),
            seed: image.seed,
            image_data: image.png,
            description,
            content_id: None,
            source_url: None,
            saved_path: None,
            request,
        }
    }

    /// Record where the image landed in content storage.
    pub fn attach_content(&mut self, content_id: ContentId, gateway: &str) {
        self.source_url = Some(content_id.gateway_url(gateway, &self.name));
        self.content_id = Some(content_id);
    }

    /// Write the PNG into `dir`. Failures are logged and leave `saved_path` empty.
    pub fn save_to(&mut self, dir: &Path) {
        let path = dir.join(&self.name);
        let result = std::fs::create_dir_all(dir).and_then(|_| std::fs::write(&path, &self.image_data));
        match result {
            Ok(()) => {
                info!(path = %path.display(), "saved generated image");
                self.saved_path = Some(path);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "failed to save generated image"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prompt_is_rejected() {
        let err = GenerationRequest::validate("   ", "", None).unwrap_err();
        assert_eq!(err.field_errors()[0].field, Field::Prompt);
        assert_eq!(err.to_string(), "Positive prompt is required");
    }

    #[test]
    fn unknown_style_is_rejected_with_prompt_error() {
        let err = GenerationRequest::validate("", "", Some("watercolor")).unwrap_err();
        let fields: Vec<_> = err.field_errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::Prompt, Field::Style]);
    }

    #[test]
    fn optional_fields_normalise() {
        let request = GenerationRequest::validate("a dragon", "  ", Some("none")).unwrap();
        assert_eq!(request.prompt(), "a dragon");
        assert_eq!(request.negative_prompt(), None);
        assert_eq!(request.style(), None);

        let request = GenerationRequest::validate("a dragon", "blurry", Some("pixel-art")).unwrap();
        assert_eq!(request.negative_prompt(), Some("blurry"));
        assert_eq!(request.style(), Some(Style::PixelArt));
    }

    #[test]
    fn artifact_takes_name_from_seed() {
        let request = GenerationRequest::validate("a dragon", "blurry", Some("anime")).unwrap();
        let artifact = GeneratedArtifact::new(request, RenderedImage { seed: 42, png: vec![1, 2] });
        assert_eq!(artifact.name, "image_42.png");
        assert_eq!(
            artifact.description,
            "Prompt: a dragon\n\nNegative Prompt: blurry\n\nStyle: anime"
        );
        assert!(artifact.content_id.is_none());
    }

    #[test]
    fn attaching_content_builds_gateway_url() {
        let request = GenerationRequest::validate("a dragon", "", None).unwrap();
        let mut artifact = GeneratedArtifact::new(request, RenderedImage { seed: 7, png: vec![] });
        artifact.attach_content(ContentId::new("bafyabc").unwrap(), "nftstorage.link");
        assert_eq!(
            artifact.source_url.as_deref(),
            Some("https://nftstorage.link/ipfs/bafyabc/image_7.png")
        );
    }

    #[test]
    fn saves_png_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let request = GenerationRequest::validate("a dragon", "", None).unwrap();
        let mut artifact = GeneratedArtifact::new(request, RenderedImage { seed: 3, png: vec![9, 9] });
        artifact.save_to(&dir.path().join("art"));
        let saved = artifact.saved_path.clone().unwrap();
        assert_eq!(std::fs::read(saved).unwrap(), vec![9, 9]);
    }
}
