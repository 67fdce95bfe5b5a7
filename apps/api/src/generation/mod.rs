// Generation stages: insight extraction, ad content, optional image.
// All text-generation calls go through llm_client — no direct API calls here.

pub mod content;
pub mod fallback;
pub mod image;
pub mod insights;
pub mod prompts;
pub mod tone;
