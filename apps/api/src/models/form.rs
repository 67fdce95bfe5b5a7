//! Questionnaire payload and its pre-job validation.

use serde::{Deserialize, Serialize};

use crate::config::ReviewSource;
use crate::errors::AppError;

pub const BUSINESS_TYPES: &[&str] = &[
    "restaurant",
    "cafe",
    "retail",
    "salon",
    "fitness",
    "healthcare",
    "home_services",
    "professional_services",
    "hospitality",
    "automotive",
    "other",
];

pub const MARKETING_GOALS: &[&str] = &[
    "brand_awareness",
    "lead_generation",
    "sales",
    "foot_traffic",
    "bookings",
    "engagement",
];

pub const TARGET_AUDIENCES: &[&str] = &[
    "local_residents",
    "young_professionals",
    "families",
    "students",
    "seniors",
    "tourists",
    "businesses",
];

pub const PLATFORMS: &[&str] = &[
    "facebook",
    "instagram",
    "google_ads",
    "tiktok",
    "linkedin",
    "x",
];

pub const BRAND_TONES: &[&str] = &[
    "professional",
    "friendly",
    "bold",
    "premium",
    "playful",
    "minimal",
];

pub const CALLS_TO_ACTION: &[&str] = &[
    "Book Now",
    "Call Today",
    "Visit Us",
    "Order Online",
    "Get a Quote",
    "Learn More",
    "Shop Now",
    "Sign Up",
];

/// Reviews as submitted: either one newline-delimited block or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewInput {
    Text(String),
    List(Vec<String>),
}

impl ReviewInput {
    fn is_blank(&self) -> bool {
        match self {
            ReviewInput::Text(text) => text.trim().is_empty(),
            ReviewInput::List(items) => items.iter().all(|r| r.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub business_name: String,
    #[serde(default)]
    pub business_type: Vec<String>,
    #[serde(default)]
    pub marketing_goal: Vec<String>,
    #[serde(default)]
    pub target_audience: Vec<String>,
    #[serde(default)]
    pub platform: Vec<String>,
    #[serde(default)]
    pub brand_tone: Vec<String>,
    #[serde(default, rename = "preferredCTA")]
    pub preferred_cta: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<ReviewInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps_link: Option<String>,
}

impl FormData {
    /// The CTA every output section must carry.
    pub fn primary_cta(&self) -> &str {
        self.preferred_cta.first().map(String::as_str).unwrap_or("")
    }

    /// First brand-tone selection, lowercased; drives image mood.
    pub fn primary_tone(&self) -> String {
        self.brand_tone
            .first()
            .map(|t| t.trim().to_lowercase())
            .unwrap_or_default()
    }

    fn categorical_fields(&self) -> [(&'static str, &[String], &'static [&'static str]); 6] {
        [
            ("businessType", self.business_type.as_slice(), BUSINESS_TYPES),
            ("marketingGoal", self.marketing_goal.as_slice(), MARKETING_GOALS),
            ("targetAudience", self.target_audience.as_slice(), TARGET_AUDIENCES),
            ("platform", self.platform.as_slice(), PLATFORMS),
            ("brandTone", self.brand_tone.as_slice(), BRAND_TONES),
            ("preferredCTA", self.preferred_cta.as_slice(), CALLS_TO_ACTION),
        ]
    }

    /// Checks everything that can be checked without calling a collaborator.
    ///
    /// Review count is NOT checked here: too few reviews is a job failure,
    /// not a rejected submission.
    pub fn validate(&self, source: ReviewSource) -> Result<(), AppError> {
        let mut problems = Vec::new();

        if self.business_name.trim().is_empty() {
            problems.push("businessName is required".to_string());
        }

        for (field, selected, allowed) in self.categorical_fields() {
            if selected.is_empty() {
                problems.push(format!("{field} requires at least one selection"));
                continue;
            }
            for value in selected {
                if !allowed.iter().any(|a| a.eq_ignore_ascii_case(value.trim())) {
                    problems.push(format!("{field} has unknown option '{value}'"));
                }
            }
        }

        match source {
            ReviewSource::Manual => {
                if self.reviews.as_ref().map_or(true, ReviewInput::is_blank) {
                    problems.push("reviews are required".to_string());
                }
            }
            ReviewSource::MapsLink => {
                if self
                    .maps_link
                    .as_deref()
                    .map_or(true, |l| l.trim().is_empty())
                {
                    problems.push("mapsLink is required".to_string());
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(problems.join("; ")))
        }
    }
}

/// Option lists served to clients rendering the questionnaire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    pub business_type: &'static [&'static str],
    pub marketing_goal: &'static [&'static str],
    pub target_audience: &'static [&'static str],
    pub platform: &'static [&'static str],
    pub brand_tone: &'static [&'static str],
    #[serde(rename = "preferredCTA")]
    pub preferred_cta: &'static [&'static str],
    pub review_source: ReviewSource,
}

impl FormOptions {
    pub fn new(review_source: ReviewSource) -> Self {
        Self {
            business_type: BUSINESS_TYPES,
            marketing_goal: MARKETING_GOALS,
            target_audience: TARGET_AUDIENCES,
            platform: PLATFORMS,
            brand_tone: BRAND_TONES,
            preferred_cta: CALLS_TO_ACTION,
            review_source,
        }
    }
}
