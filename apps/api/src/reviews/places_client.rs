//! Place directory collaborator: Google Places Web Service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
const DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("place directory credential is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Places API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Places API returned status {0}")]
    Status(String),
}

/// Looks places up and lists their reviews.
#[async_trait]
pub trait PlaceDirectory: Send + Sync {
    /// Returns the canonical id of the first candidate, if any.
    async fn text_search(&self, query: &str) -> Result<Option<String>, PlacesError>;

    /// Returns the raw review texts attached to a place.
    async fn reviews(&self, place_id: &str) -> Result<Vec<String>, PlacesError>;
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<TextSearchCandidate>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextSearchCandidate {
    place_id: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    result: Option<DetailsResult>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    #[serde(default)]
    reviews: Vec<PlaceReview>,
}

#[derive(Debug, Deserialize)]
struct PlaceReview {
    #[serde(default)]
    text: String,
}

#[derive(Clone)]
pub struct GooglePlacesClient {
    client: Client,
    api_key: Option<String>,
}

impl GooglePlacesClient {
    pub fn new(api_key: Option<String>) -> Result<Self, PlacesError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
        })
    }

    fn key(&self) -> Result<&str, PlacesError> {
        self.api_key.as_deref().ok_or(PlacesError::MissingApiKey)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, PlacesError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json().await?)
    }
}

/// Google reports most failures in-band with HTTP 200.
fn check_status(status: &str, error_message: Option<String>) -> Result<(), PlacesError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(PlacesError::Status(match error_message {
            Some(msg) => format!("{other}: {msg}"),
            None => other.to_string(),
        })),
    }
}

#[async_trait]
impl PlaceDirectory for GooglePlacesClient {
    async fn text_search(&self, query: &str) -> Result<Option<String>, PlacesError> {
        let key = self.key()?;
        let body: TextSearchResponse = self
            .get_json(TEXT_SEARCH_URL, &[("query", query), ("key", key)])
            .await?;
        check_status(&body.status, body.error_message)?;
        debug!("Places text search returned {} candidates", body.results.len());
        Ok(body.results.into_iter().next().map(|c| c.place_id))
    }

    async fn reviews(&self, place_id: &str) -> Result<Vec<String>, PlacesError> {
        let key = self.key()?;
        let body: DetailsResponse = self
            .get_json(
                DETAILS_URL,
                &[("place_id", place_id), ("fields", "reviews"), ("key", key)],
            )
            .await?;
        check_status(&body.status, body.error_message)?;
        Ok(body
            .result
            .map(|r| r.reviews.into_iter().map(|review| review.text).collect())
            .unwrap_or_default())
    }
}
