use anyhow::{bail, Context, Result};

use crate::generation::image::DEFAULT_IMAGE_MODELS;

const DEFAULT_HF_API_BASE: &str = "https://api-inference.huggingface.co";

/// Where a job's reviews come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSource {
    /// Reviews pasted into the questionnaire, one per line.
    Manual,
    /// Reviews fetched from the place directory behind a Maps link.
    MapsLink,
}

/// Which marketing-copy shape the content generator asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketingCopyStyle {
    Plain,
    Structured,
}

/// Application configuration loaded from environment variables.
///
/// Credentials are optional here: a job that needs a missing credential
/// fails with a config error instead of the process refusing to boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub places_api_key: Option<String>,
    pub hf_api_token: Option<String>,
    pub hf_api_base: String,
    pub image_models: Vec<String>,
    pub image_generation_enabled: bool,
    pub review_source: ReviewSource,
    pub marketing_copy_style: MarketingCopyStyle,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let hf_api_token = optional_env("HF_API_TOKEN");
        let image_generation_enabled = match optional_env("IMAGE_GENERATION_ENABLED") {
            Some(raw) => parse_bool(&raw).context("IMAGE_GENERATION_ENABLED must be true or false")?,
            None => hf_api_token.is_some(),
        };

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            places_api_key: optional_env("PLACES_API_KEY"),
            hf_api_token,
            hf_api_base: optional_env("HF_API_BASE")
                .unwrap_or_else(|| DEFAULT_HF_API_BASE.to_string()),
            image_models: optional_env("IMAGE_MODELS")
                .map(|raw| parse_list(&raw))
                .filter(|models| !models.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_MODELS.iter().map(|m| m.to_string()).collect()),
            image_generation_enabled,
            review_source: parse_review_source(
                &optional_env("REVIEW_SOURCE").unwrap_or_else(|| "manual".to_string()),
            )?,
            marketing_copy_style: parse_copy_style(
                &optional_env("MARKETING_COPY_STYLE").unwrap_or_else(|| "structured".to_string()),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating empty values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognised boolean '{other}'"),
    }
}

fn parse_review_source(raw: &str) -> Result<ReviewSource> {
    match raw.to_ascii_lowercase().as_str() {
        "manual" => Ok(ReviewSource::Manual),
        "maps_link" | "maps" => Ok(ReviewSource::MapsLink),
        other => bail!("REVIEW_SOURCE must be 'manual' or 'maps_link', got '{other}'"),
    }
}

fn parse_copy_style(raw: &str) -> Result<MarketingCopyStyle> {
    match raw.to_ascii_lowercase().as_str() {
        "plain" => Ok(MarketingCopyStyle::Plain),
        "structured" => Ok(MarketingCopyStyle::Structured),
        other => bail!("MARKETING_COPY_STYLE must be 'plain' or 'structured', got '{other}'"),
    }
}
