// All LLM prompt constants for the generation stages.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for insight extraction.
pub const INSIGHTS_SYSTEM: &str = "You are a customer-research analyst who reads \
    small-business reviews and extracts the language customers actually use. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Insight extraction prompt. Replace `{review_count}` and `{reviews}`.
pub const INSIGHTS_PROMPT_TEMPLATE: &str = r#"Analyze the following {review_count} customer reviews.

Return a JSON object with this EXACT schema (no extra fields):
{
  "repeatedPhrases": ["phrases that appear in more than one review, verbatim where possible"],
  "keyBenefits": ["concrete benefits customers describe"],
  "trustSignals": ["statements that build credibility: reliability, honesty, years of service"],
  "customerEmotions": ["emotions customers express: relieved, delighted, welcomed"],
  "importantKeywords": ["short keywords worth using in ads"],
  "reviewCount": {review_count}
}

Rules:
- Quote or closely paraphrase the reviews; never invent benefits.
- Each list holds at most 8 entries, most frequent first.
- Leave a list empty rather than guessing.

REVIEWS (separated by blank lines):
{reviews}"#;

/// System prompt for ad content generation.
pub const CONTENT_SYSTEM: &str = "You are a senior direct-response copywriter for \
    local businesses. You write grounded ad copy from verified customer insights. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Content generation prompt.
/// Replace: {grounding_instruction}, {business_name}, {business_type}, {marketing_goal},
///          {target_audience}, {platform}, {brand_tone}, {tone_voice}, {tone_avoid},
///          {cta}, {insights}, {marketing_copy_schema}
pub const CONTENT_PROMPT_TEMPLATE: &str = r#"{grounding_instruction}

BUSINESS CONTEXT:
- Name: {business_name}
- Type: {business_type}
- Marketing goal: {marketing_goal}
- Target audience: {target_audience}
- Advertising platform: {platform}
- Brand tone: {brand_tone}
- Preferred call to action: {cta}

TONE CALIBRATION:
- Lean on words like: {tone_voice}
- Avoid: {tone_avoid}

CUSTOMER INSIGHTS (source of truth, ONLY use claims supported here):
{insights}

Write ads that fit the platform's format and the brand tone. Return a JSON object:
{
  "json": {
    "headlines": ["3 to 5 short headlines"],
    "bodyCopy": ["2 or 3 body copy variants"],
    "cta": "{cta}",
    "proofPhrases": ["short phrases lifted from the insights that prove the claims"],
    "reviewSupport": {
      "reviewsAnalyzed": 0,
      "positiveMentions": 0,
      "repeatedThemes": 0
    }
  },
  "marketingCopy": {marketing_copy_schema},
  "imageAd": {
    "headline": "max 6 words",
    "subheadline": "max 12 words",
    "cta": "{cta}",
    "designStyle": "one sentence describing layout, palette and mood"
  }
}"#;

/// Marketing copy schema for the plain variant.
pub const PLAIN_COPY_SCHEMA: &str =
    r#""one ready-to-post paragraph of marketing copy (60 to 120 words)""#;

/// Marketing copy schema for the structured variant.
pub const STRUCTURED_COPY_SCHEMA: &str = r#"{
    "campaignSummary": "one sentence describing the campaign angle",
    "headlineOptions": ["3 headline options"],
    "subheadline": "supporting line",
    "coreCopy": "main paragraph (60 to 120 words)",
    "valuePoints": ["3 to 5 value points drawn from the key benefits"],
    "socialProofText": "a sentence summarizing what customers say",
    "ctaVariants": ["{cta}", "2 alternative phrasings"]
  }"#;

/// Image prompt. Replace: {business_type}, {business_name}, {mood}, {design_style},
///                        {benefits}, {emotions}
pub const IMAGE_PROMPT_TEMPLATE: &str = "Professional advertising photograph for a \
    {business_type} called {business_name}. Mood: {mood}. Style: {design_style}. \
    Scene evokes {benefits}; customers feel {emotions}. Natural lighting, realistic, \
    high detail, clean composition with empty space for a headline overlay. \
    No large text blocks, no logos, no watermarks, no exaggerated or unrealistic imagery.";
