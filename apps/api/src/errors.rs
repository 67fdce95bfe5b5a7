use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::image::ImageError;
use crate::llm_client::LlmError;
use crate::reviews::places_client::PlacesError;

/// Application-level error type.
///
/// Pipeline stages return it and the orchestrator stores its `Display` text
/// on the failed job. Implements `IntoResponse` so Axum handlers can return
/// `Result<T, AppError>` for failures that happen before a job exists.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Insufficient reviews: found {found} distinct non-empty reviews, at least {required} are required")]
    InsufficientReviews { found: usize, required: usize },

    #[error("Invalid Maps link: no place identifier could be extracted from '{0}'")]
    InvalidMapsLink(String),

    #[error("Place not found: {0}")]
    PlaceNotFound(String),

    #[error("No reviews found for place {0}")]
    NoReviewsFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream call failed: {0}")]
    Upstream(String),

    #[error("Could not parse model response: {0}")]
    ResponseParse(String),

    #[error("Image generation failed on every candidate model: {0}")]
    ImageGenerationExhausted(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::MissingApiKey => {
                AppError::Config("ANTHROPIC_API_KEY is not configured".to_string())
            }
            LlmError::Http(_) | LlmError::Api { .. } => AppError::Upstream(e.to_string()),
            LlmError::Parse(_) | LlmError::EmptyContent => AppError::ResponseParse(e.to_string()),
        }
    }
}

impl From<PlacesError> for AppError {
    fn from(e: PlacesError) -> Self {
        match e {
            PlacesError::MissingApiKey => {
                AppError::Config("PLACES_API_KEY is not configured".to_string())
            }
            PlacesError::Http(_) | PlacesError::Api { .. } | PlacesError::Status(_) => {
                AppError::Upstream(e.to_string())
            }
        }
    }
}

impl From<ImageError> for AppError {
    fn from(e: ImageError) -> Self {
        match e {
            ImageError::MissingApiToken => {
                AppError::Config("HF_API_TOKEN is not configured".to_string())
            }
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InsufficientReviews { .. }
            | AppError::InvalidMapsLink(_)
            | AppError::PlaceNotFound(_)
            | AppError::NoReviewsFound(_) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", self.to_string())
            }
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIG_ERROR",
                    self.to_string(),
                )
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "An AI service call failed".to_string(),
                )
            }
            AppError::ResponseParse(msg) => {
                tracing::error!("Response parse error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "RESPONSE_PARSE_ERROR",
                    "An AI service returned an unreadable response".to_string(),
                )
            }
            AppError::ImageGenerationExhausted(msg) => {
                tracing::error!("Image generation exhausted: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "IMAGE_GENERATION_EXHAUSTED",
                    "No image model produced an image".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_llm_key_maps_to_config_error() {
        let err: AppError = LlmError::MissingApiKey.into();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_llm_api_error_maps_to_upstream() {
        let err: AppError = LlmError::Api {
            status: 500,
            message: "overloaded".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Upstream(_)));
        assert!(err.to_string().contains("overloaded"));
    }

    #[test]
    fn test_empty_content_maps_to_parse_error() {
        let err: AppError = LlmError::EmptyContent.into();
        assert!(matches!(err, AppError::ResponseParse(_)));
    }

    #[test]
    fn test_insufficient_reviews_message() {
        let err = AppError::InsufficientReviews {
            found: 2,
            required: 3,
        };
        assert!(err.to_string().starts_with("Insufficient reviews"));
    }

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound("Job x not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_status() {
        let response = AppError::Validation("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
