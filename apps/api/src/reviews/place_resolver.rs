//! Place Resolver — turns a Maps link into review texts.
//!
//! Flow: extract token from the link → canonical id (directly, or via text
//! search) → details lookup → up to `MAX_FETCHED_REVIEWS` non-empty reviews.

use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use crate::errors::AppError;
use crate::reviews::places_client::{PlaceDirectory, PlacesError};

/// Canonical place ids start with this prefix.
const PLACE_ID_PREFIX: &str = "ChIJ";
/// Minimum characters after the prefix for a token to count as canonical.
const PLACE_ID_MIN_SUFFIX: usize = 6;
pub const MAX_FETCHED_REVIEWS: usize = 50;

/// Extracts a place token from a Maps-style link.
///
/// Priority: `place_id` query param, `cid` query param, the segment after
/// `/place/`, then a path segment labeled `place_id`.
pub fn extract_place_token(link: &str) -> Option<String> {
    let url = parse_link(link)?;

    let query_value = |name: &str| {
        url.query_pairs()
            .find(|(k, v)| k == name && !v.trim().is_empty())
            .map(|(_, v)| v.trim().to_string())
    };

    if let Some(id) = query_value("place_id") {
        return Some(id);
    }
    if let Some(cid) = query_value("cid") {
        return Some(cid);
    }

    let segments: Vec<String> = url
        .path_segments()
        .map(|s| s.map(decode_segment).collect())
        .unwrap_or_default();

    if let Some(name) = segment_after(&segments, "place") {
        return Some(name);
    }

    for (i, segment) in segments.iter().enumerate() {
        if let Some(token) = segment.strip_prefix("place_id:") {
            if !token.trim().is_empty() {
                return Some(token.trim().to_string());
            }
        }
        if segment == "place_id" {
            if let Some(next) = segments.get(i + 1).filter(|s| !s.trim().is_empty()) {
                return Some(next.trim().to_string());
            }
        }
    }

    None
}

/// True when a token already looks like a canonical place id.
pub fn is_canonical_place_id(token: &str) -> bool {
    token.strip_prefix(PLACE_ID_PREFIX).is_some_and(|rest| {
        rest.len() >= PLACE_ID_MIN_SUFFIX
            && rest
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    })
}

fn parse_link(link: &str) -> Option<Url> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }
    Url::parse(link)
        .or_else(|_| Url::parse(&format!("https://{link}")))
        .ok()
}

fn segment_after(segments: &[String], label: &str) -> Option<String> {
    let pos = segments.iter().position(|s| s == label)?;
    segments
        .get(pos + 1)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && !s.starts_with('@'))
}

/// Percent-decodes a path segment, treating `+` as a space.
fn decode_segment(segment: &str) -> String {
    let escaped = segment.replace('&', "%26").replace('=', "%3D");
    url::form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}

pub struct PlaceResolver {
    directory: Arc<dyn PlaceDirectory>,
}

impl PlaceResolver {
    pub fn new(directory: Arc<dyn PlaceDirectory>) -> Self {
        Self { directory }
    }

    /// Resolves a Maps link to a canonical place id.
    pub async fn resolve(&self, link: &str) -> Result<String, AppError> {
        let token =
            extract_place_token(link).ok_or_else(|| AppError::InvalidMapsLink(link.to_string()))?;

        if is_canonical_place_id(&token) {
            info!("Maps link carries canonical place id {token}");
            return Ok(token);
        }

        info!("Resolving place token '{token}' via text search");
        match self.directory.text_search(&token).await {
            Ok(Some(place_id)) => Ok(place_id),
            Ok(None) => Err(AppError::PlaceNotFound(format!(
                "no place matched '{token}'"
            ))),
            Err(PlacesError::MissingApiKey) => Err(PlacesError::MissingApiKey.into()),
            Err(e) => {
                warn!("Place text search failed for '{token}': {e}");
                Err(AppError::PlaceNotFound(format!(
                    "lookup for '{token}' failed: {e}"
                )))
            }
        }
    }

    /// Fetches up to `MAX_FETCHED_REVIEWS` non-empty review texts.
    pub async fn fetch_reviews(&self, place_id: &str) -> Result<Vec<String>, AppError> {
        let reviews: Vec<String> = self
            .directory
            .reviews(place_id)
            .await?
            .into_iter()
            .filter(|r| !r.trim().is_empty())
            .take(MAX_FETCHED_REVIEWS)
            .collect();

        if reviews.is_empty() {
            return Err(AppError::NoReviewsFound(place_id.to_string()));
        }

        info!("Fetched {} reviews for place {place_id}", reviews.len());
        Ok(reviews)
    }
}
