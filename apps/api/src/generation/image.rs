//! Image Synthesizer — optional stage producing a background image for the
//! image ad.
//!
//! Candidate models are tried in order; the first binary image response wins.
//! Loading, error and non-image responses advance to the next candidate.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine};
use bytes::Bytes;
use reqwest::{header, Client, StatusCode};
use serde_json::json;
use thiserror::Error;
use tracing::info;

use crate::errors::AppError;
use crate::generation::fallback::first_success;
use crate::generation::prompts::IMAGE_PROMPT_TEMPLATE;
use crate::generation::tone::mood_for_tone;
use crate::llm_client::prompts::fill_template;
use crate::models::{FormData, ImageAd, Insights};

/// Tried in this order when `IMAGE_MODELS` is not set.
pub const DEFAULT_IMAGE_MODELS: &[&str] = &[
    "stabilityai/stable-diffusion-xl-base-1.0",
    "runwayml/stable-diffusion-v1-5",
    "prompthero/openjourney",
];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image-generation credential is not configured")]
    MissingApiToken,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model is still loading")]
    ModelLoading,

    #[error("image API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("expected an image but got '{content_type}'")]
    NotAnImage { content_type: String },
}

/// A binary image returned by a backend.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes: Bytes,
}

impl GeneratedImage {
    /// Self-contained `data:` reference embeddable in HTML or JSON.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// One image-generation service, addressed per model.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<GeneratedImage, ImageError>;
}

/// Hugging Face Inference API backend.
#[derive(Clone)]
pub struct HuggingFaceClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl HuggingFaceClient {
    pub fn new(base_url: String, api_token: Option<String>) -> Result<Self, ImageError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }
}

#[async_trait]
impl ImageBackend for HuggingFaceClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<GeneratedImage, ImageError> {
        let token = self.api_token.as_deref().ok_or(ImageError::MissingApiToken)?;

        let response = self
            .client
            .post(format!("{}/models/{}", self.base_url, model))
            .bearer_auth(token)
            .header(header::ACCEPT, "image/png")
            .json(&json!({ "inputs": prompt }))
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, body));
        }

        let bytes = response.bytes().await?;
        if !content_type.starts_with("image/") || bytes.is_empty() {
            return Err(ImageError::NotAnImage { content_type });
        }

        let mime_type = content_type
            .split(';')
            .next()
            .unwrap_or("image/png")
            .trim()
            .to_string();

        Ok(GeneratedImage { mime_type, bytes })
    }
}

/// Cold models answer 503 with an "is currently loading" body.
fn classify_failure(status: StatusCode, body: String) -> ImageError {
    if status == StatusCode::SERVICE_UNAVAILABLE && body.to_lowercase().contains("loading") {
        return ImageError::ModelLoading;
    }
    ImageError::Api {
        status: status.as_u16(),
        message: body,
    }
}

/// Composes the image prompt from context, insights and the ad descriptor.
pub fn build_image_prompt(form: &FormData, insights: &Insights, image_ad: &ImageAd) -> String {
    let benefits = insights
        .key_benefits
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let emotions = insights
        .customer_emotions
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");

    fill_template(
        IMAGE_PROMPT_TEMPLATE,
        &[
            ("mood", mood_for_tone(&form.primary_tone())),
            ("design_style", non_empty_or(&image_ad.design_style, "clean and modern")),
            ("benefits", non_empty_or(&benefits, "a great experience")),
            ("emotions", non_empty_or(&emotions, "satisfied")),
            (
                "business_type",
                form.business_type.first().map(String::as_str).unwrap_or("local business"),
            ),
            ("business_name", form.business_name.trim()),
        ],
    )
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

pub struct ImageSynthesizer {
    backend: Arc<dyn ImageBackend>,
    models: Vec<String>,
}

impl ImageSynthesizer {
    pub fn new(backend: Arc<dyn ImageBackend>, models: Vec<String>) -> Self {
        Self { backend, models }
    }

    /// Returns a `data:` URL for the first candidate that produced an image.
    pub async fn synthesize(
        &self,
        form: &FormData,
        insights: &Insights,
        image_ad: &ImageAd,
    ) -> Result<String, AppError> {
        let prompt = build_image_prompt(form, insights, image_ad);
        let backend = &self.backend;
        let prompt_ref = prompt.as_str();

        match first_success(&self.models, |model| async move {
            backend.generate(model, prompt_ref).await
        })
        .await
        {
            Ok((model, image)) => {
                info!("Image generated by {model} ({} bytes)", image.bytes.len());
                Ok(image.to_data_url())
            }
            Err(exhausted) => match exhausted.last_error() {
                Some(ImageError::MissingApiToken) => Err(ImageError::MissingApiToken.into()),
                _ => Err(AppError::ImageGenerationExhausted(exhausted.last_failure())),
            },
        }
    }
}
