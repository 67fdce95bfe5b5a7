use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Recurring language and themes mined from the reviews.
///
/// `review_count` is filled in with the number of reviews actually sent;
/// whatever the model echoes back is never read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    #[serde(default)]
    pub repeated_phrases: Vec<String>,
    #[serde(default)]
    pub key_benefits: Vec<String>,
    #[serde(default)]
    pub trust_signals: Vec<String>,
    #[serde(default)]
    pub customer_emotions: Vec<String>,
    #[serde(default)]
    pub important_keywords: Vec<String>,
    #[serde(default, skip_deserializing)]
    pub review_count: usize,
}

/// Numbers shown next to the ad copy to back it with review evidence.
///
/// Every field is recomputed or clamped after generation, so whatever number
/// shape the model sends is coerced instead of rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSupport {
    #[serde(default, skip_deserializing)]
    pub reviews_analyzed: usize,
    #[serde(default, deserialize_with = "lenient_count")]
    pub positive_mentions: usize,
    #[serde(default, deserialize_with = "lenient_count")]
    pub repeated_themes: usize,
}

/// Reads any JSON number (or numeric string) as a non-negative count.
/// Anything else becomes 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .filter(|n| n.is_finite())
        .map(|n| n.max(0.0) as usize)
        .unwrap_or(0))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdCopy {
    #[serde(default)]
    pub headlines: Vec<String>,
    #[serde(default)]
    pub body_copy: Vec<String>,
    #[serde(default)]
    pub cta: String,
    #[serde(default)]
    pub proof_phrases: Vec<String>,
    #[serde(default)]
    pub review_support: ReviewSupport,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredCopy {
    #[serde(default)]
    pub campaign_summary: String,
    #[serde(default)]
    pub headline_options: Vec<String>,
    #[serde(default)]
    pub subheadline: String,
    #[serde(default)]
    pub core_copy: String,
    #[serde(default)]
    pub value_points: Vec<String>,
    #[serde(default)]
    pub social_proof_text: String,
    #[serde(default)]
    pub cta_variants: Vec<String>,
}

/// Marketing copy comes back either as one block of prose or as a bundle.
///
/// Untagged on the wire so a bare JSON string parses as `Plain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarketingCopy {
    Plain(String),
    Structured(StructuredCopy),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAd {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub subheadline: String,
    #[serde(default)]
    pub cta: String,
    #[serde(default)]
    pub design_style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outputs {
    pub json: AdCopy,
    pub marketing_copy: MarketingCopy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ad: Option<ImageAd>,
}
