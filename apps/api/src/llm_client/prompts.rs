// Shared prompt constants and prompt-building utilities.
// Each stage that needs LLM calls defines its own prompts alongside it.
// This file contains cross-cutting prompt fragments.

/// Common instruction appended to every generation prompt.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Use ONLY language supported by the customer insights provided. \
    Do NOT invent claims, statistics, awards, prices or guarantees. \
    If the insights do not support a claim, leave it out.";

/// Renders a list of strings as a bullet block for prompt embedding.
pub fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "- (none)".to_string();
    }
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Substitutes `{key}` placeholders in a single pass.
///
/// Inserted values are never rescanned, so review or model text that happens
/// to contain a placeholder stays literal. Unknown `{...}` spans (JSON
/// schemas) are copied through untouched.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let filled = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (close, *value))
        });
        match filled {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
