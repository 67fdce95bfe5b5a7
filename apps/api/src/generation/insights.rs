//! Insight Extractor — mines recurring language from normalized reviews.

use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{INSIGHTS_PROMPT_TEMPLATE, INSIGHTS_SYSTEM};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{generate_json, TextGenerator};
use crate::models::Insights;

/// Builds the extraction prompt. Reviews are separated by blank lines.
pub fn build_insights_prompt(reviews: &[String]) -> String {
    fill_template(
        INSIGHTS_PROMPT_TEMPLATE,
        &[
            ("review_count", reviews.len().to_string().as_str()),
            ("reviews", reviews.join("\n\n").as_str()),
        ],
    )
}

/// Extracts insights from at least `MIN_REVIEWS` normalized reviews.
///
/// `review_count` on the result is always the number of reviews sent.
pub async fn extract_insights(
    generator: &dyn TextGenerator,
    reviews: &[String],
) -> Result<Insights, AppError> {
    let prompt = build_insights_prompt(reviews);
    let mut insights: Insights = generate_json(generator, &prompt, INSIGHTS_SYSTEM).await?;
    insights.review_count = reviews.len();
    info!(
        "Extracted {} repeated phrases and {} key benefits from {} reviews",
        insights.repeated_phrases.len(),
        insights.key_benefits.len(),
        insights.review_count
    );

    Ok(insights)
}
