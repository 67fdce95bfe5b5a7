//! Content Generator — turns business context + insights into ad copy.
//!
//! Post-processing overrides the model on two points: every CTA field is set
//! to the user's first preferred CTA, and the review-support numbers are
//! derived from the insights instead of trusted.

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::MarketingCopyStyle;
use crate::errors::AppError;
use crate::generation::prompts::{
    CONTENT_PROMPT_TEMPLATE, CONTENT_SYSTEM, PLAIN_COPY_SCHEMA, STRUCTURED_COPY_SCHEMA,
};
use crate::generation::tone::tone_guide;
use crate::llm_client::prompts::{bullet_list, fill_template, GROUNDING_INSTRUCTION};
use crate::llm_client::{generate_json, TextGenerator};
use crate::models::{AdCopy, FormData, ImageAd, Insights, MarketingCopy, Outputs};

/// The three-part shape requested from the model.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedContent {
    json: AdCopy,
    marketing_copy: MarketingCopy,
    #[serde(default)]
    image_ad: Option<ImageAd>,
}

pub fn build_content_prompt(
    form: &FormData,
    insights: &Insights,
    style: MarketingCopyStyle,
) -> String {
    let guide = tone_guide(&form.primary_tone());
    let schema = match style {
        MarketingCopyStyle::Plain => PLAIN_COPY_SCHEMA,
        MarketingCopyStyle::Structured => STRUCTURED_COPY_SCHEMA,
    };

    let insights_block = format!(
        "Repeated phrases:\n{}\nKey benefits:\n{}\nTrust signals:\n{}\nCustomer emotions:\n{}\nImportant keywords:\n{}\nReviews analyzed: {}",
        bullet_list(&insights.repeated_phrases),
        bullet_list(&insights.key_benefits),
        bullet_list(&insights.trust_signals),
        bullet_list(&insights.customer_emotions),
        bullet_list(&insights.important_keywords),
        insights.review_count,
    );

    let cta = form.primary_cta();
    let schema = fill_template(schema, &[("cta", cta)]);

    fill_template(
        CONTENT_PROMPT_TEMPLATE,
        &[
            ("grounding_instruction", GROUNDING_INSTRUCTION),
            ("marketing_copy_schema", schema.as_str()),
            ("tone_voice", guide.voice_words.join(", ").as_str()),
            ("tone_avoid", guide.avoid_words.join(", ").as_str()),
            ("insights", insights_block.as_str()),
            ("cta", cta),
            ("business_type", form.business_type.join(", ").as_str()),
            ("marketing_goal", form.marketing_goal.join(", ").as_str()),
            ("target_audience", form.target_audience.join(", ").as_str()),
            ("platform", form.platform.join(", ").as_str()),
            ("brand_tone", form.brand_tone.join(", ").as_str()),
            ("business_name", form.business_name.trim()),
        ],
    )
}

/// Generates ad copy, marketing copy and the image-ad descriptor.
pub async fn generate_content(
    generator: &dyn TextGenerator,
    form: &FormData,
    insights: &Insights,
    style: MarketingCopyStyle,
) -> Result<Outputs, AppError> {
    let prompt = build_content_prompt(form, insights, style);
    let generated: GeneratedContent = generate_json(generator, &prompt, CONTENT_SYSTEM).await?;

    let mut outputs = Outputs {
        json: generated.json,
        marketing_copy: generated.marketing_copy,
        image_ad: Some(generated.image_ad.unwrap_or_default()),
    };
    enforce_cta(&mut outputs, form.primary_cta());
    derive_review_support(&mut outputs.json, insights);

    info!(
        "Generated {} headlines and {} body variants",
        outputs.json.headlines.len(),
        outputs.json.body_copy.len()
    );

    Ok(outputs)
}

/// Forces every CTA field to the user's first preferred CTA.
pub fn enforce_cta(outputs: &mut Outputs, cta: &str) {
    if outputs.json.cta != cta {
        warn!(
            "Replacing generated CTA {:?} with preferred CTA {:?}",
            outputs.json.cta, cta
        );
    }
    outputs.json.cta = cta.to_string();

    if let Some(image_ad) = outputs.image_ad.as_mut() {
        image_ad.cta = cta.to_string();
    }

    if let MarketingCopy::Structured(copy) = &mut outputs.marketing_copy {
        let mut variants = vec![cta.to_string()];
        for variant in copy.cta_variants.drain(..) {
            let variant = variant.trim().to_string();
            if !variant.is_empty() && !variants.contains(&variant) {
                variants.push(variant);
            }
        }
        copy.cta_variants = variants;
    }
}

/// Review-support numbers come from the insights, never from the model.
pub fn derive_review_support(ad_copy: &mut AdCopy, insights: &Insights) {
    let support = &mut ad_copy.review_support;
    support.reviews_analyzed = insights.review_count;
    support.positive_mentions = support.positive_mentions.min(insights.review_count);
    support.repeated_themes = support
        .repeated_themes
        .min(insights.repeated_phrases.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::models::form::fixtures::form_with_reviews;
    use crate::models::outputs::StructuredCopy;

    fn insights() -> Insights {
        Insights {
            repeated_phrases: vec!["friendly staff".to_string(), "fresh bread".to_string()],
            key_benefits: vec!["fresh bread every morning".to_string()],
            trust_signals: vec!["family run for 20 years".to_string()],
            customer_emotions: vec!["welcomed".to_string()],
            important_keywords: vec!["croissant".to_string()],
            review_count: 12,
        }
    }

    const STRUCTURED_REPLY: &str = r#"{
        "json": {
            "headlines": ["Fresh Every Morning", "Your Neighbourhood Bakery"],
            "bodyCopy": ["Bread baked at dawn."],
            "cta": "Buy Now!!!",
            "proofPhrases": ["friendly staff"],
            "reviewSupport": {"reviewsAnalyzed": 500, "positiveMentions": 480, "repeatedThemes": 9}
        },
        "marketingCopy": {
            "campaignSummary": "Morning freshness",
            "headlineOptions": ["A", "B"],
            "subheadline": "Baked daily",
            "coreCopy": "Come in.",
            "valuePoints": ["fresh"],
            "socialProofText": "Locals love the staff.",
            "ctaVariants": ["Order Ahead", "Visit Us", "Drop By"]
        },
        "imageAd": {
            "headline": "Fresh Bread",
            "subheadline": "Baked at dawn",
            "cta": "Click Here",
            "designStyle": "warm tones"
        }
    }"#;

    #[tokio::test]
    async fn test_cta_is_forced_everywhere() {
        let form = form_with_reviews("a\nb\nc");
        let generator = ScriptedGenerator::replying(&[STRUCTURED_REPLY]);
        let outputs = generate_content(
            &generator,
            &form,
            &insights(),
            MarketingCopyStyle::Structured,
        )
        .await
        .unwrap();

        assert_eq!(outputs.json.cta, "Visit Us");
        assert_eq!(outputs.image_ad.as_ref().unwrap().cta, "Visit Us");
        match &outputs.marketing_copy {
            MarketingCopy::Structured(copy) => {
                assert_eq!(copy.cta_variants, vec!["Visit Us", "Order Ahead", "Drop By"]);
            }
            MarketingCopy::Plain(_) => panic!("expected structured copy"),
        }
    }

    #[tokio::test]
    async fn test_review_support_is_derived() {
        let form = form_with_reviews("a\nb\nc");
        let generator = ScriptedGenerator::replying(&[STRUCTURED_REPLY]);
        let outputs = generate_content(
            &generator,
            &form,
            &insights(),
            MarketingCopyStyle::Structured,
        )
        .await
        .unwrap();

        let support = &outputs.json.review_support;
        assert_eq!(support.reviews_analyzed, 12);
        assert_eq!(support.positive_mentions, 12);
        assert_eq!(support.repeated_themes, 2);
    }

    #[tokio::test]
    async fn test_plain_marketing_copy() {
        let form = form_with_reviews("a\nb\nc");
        let reply = r#"```json
{"json": {"headlines": ["H"], "bodyCopy": ["B"], "cta": "x", "proofPhrases": []},
 "marketingCopy": "Fresh bread, friendly faces.",
 "imageAd": {"headline": "H", "subheadline": "S", "cta": "y", "designStyle": "d"}}
```"#;
        let generator = ScriptedGenerator::replying(&[reply]);
        let outputs = generate_content(&generator, &form, &insights(), MarketingCopyStyle::Plain)
            .await
            .unwrap();
        assert_eq!(
            outputs.marketing_copy,
            MarketingCopy::Plain("Fresh bread, friendly faces.".to_string())
        );
        assert_eq!(outputs.json.cta, "Visit Us");
    }

    #[tokio::test]
    async fn test_missing_ad_copy_is_parse_error() {
        let form = form_with_reviews("a\nb\nc");
        let generator = ScriptedGenerator::replying(&[r#"{"marketingCopy": "hi"}"#]);
        let err = generate_content(&generator, &form, &insights(), MarketingCopyStyle::Plain)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ResponseParse(_)));
    }

    #[tokio::test]
    async fn test_loose_review_support_numbers_are_clamped() {
        let form = form_with_reviews("a\nb\nc");
        let reply = r#"{"json": {"headlines": ["H"], "bodyCopy": ["B"], "cta": "x",
            "reviewSupport": {"reviewsAnalyzed": "many", "positiveMentions": 2.5, "repeatedThemes": -1}},
            "marketingCopy": "Fresh bread."}"#;
        let generator = ScriptedGenerator::replying(&[reply]);
        let outputs = generate_content(&generator, &form, &insights(), MarketingCopyStyle::Plain)
            .await
            .unwrap();

        let support = &outputs.json.review_support;
        assert_eq!(support.reviews_analyzed, 12);
        assert_eq!(support.positive_mentions, 2);
        assert_eq!(support.repeated_themes, 0);
    }

    #[tokio::test]
    async fn test_null_image_ad_gets_default_descriptor() {
        let form = form_with_reviews("a\nb\nc");
        let reply = r#"{"json": {"headlines": ["H"], "bodyCopy": ["B"], "cta": "x"},
            "marketingCopy": "Fresh bread.", "imageAd": null}"#;
        let generator = ScriptedGenerator::replying(&[reply]);
        let outputs = generate_content(&generator, &form, &insights(), MarketingCopyStyle::Plain)
            .await
            .unwrap();

        let image_ad = outputs.image_ad.unwrap();
        assert_eq!(image_ad.cta, "Visit Us");
        assert!(image_ad.headline.is_empty());
    }

    #[test]
    fn test_placeholders_inside_insights_stay_literal() {
        let form = form_with_reviews("a\nb\nc");
        let mut insights = insights();
        insights.key_benefits = vec!["staff say {cta} to {business_name}".to_string()];
        let prompt = build_content_prompt(&form, &insights, MarketingCopyStyle::Plain);
        assert!(prompt.contains("- staff say {cta} to {business_name}"));
        assert!(prompt.contains("Preferred call to action: Visit Us"));
    }

    #[test]
    fn test_prompt_embeds_context_and_schema() {
        let form = form_with_reviews("a\nb\nc");
        let prompt = build_content_prompt(&form, &insights(), MarketingCopyStyle::Structured);
        assert!(prompt.contains("Name: Rosie's Bakery"));
        assert!(prompt.contains("- fresh bread every morning"));
        assert!(prompt.contains("\"ctaVariants\": [\"Visit Us\""));
        assert!(prompt.contains("Do NOT invent claims"));
        assert!(!prompt.contains("{cta}"));
    }

    #[test]
    fn test_enforce_cta_with_empty_variants() {
        let mut outputs = Outputs {
            json: AdCopy::default(),
            marketing_copy: MarketingCopy::Structured(StructuredCopy::default()),
            image_ad: None,
        };
        enforce_cta(&mut outputs, "Book Now");
        assert_eq!(outputs.json.cta, "Book Now");
        match outputs.marketing_copy {
            MarketingCopy::Structured(copy) => assert_eq!(copy.cta_variants, vec!["Book Now"]),
            MarketingCopy::Plain(_) => unreachable!(),
        }
    }
}
