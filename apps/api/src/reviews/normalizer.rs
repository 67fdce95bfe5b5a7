use std::collections::HashSet;

use crate::errors::AppError;
use crate::models::ReviewInput;

/// Fewest distinct reviews the insight extractor will accept.
pub const MIN_REVIEWS: usize = 3;

/// Splits newline-delimited text into trimmed, non-empty, unique reviews.
pub fn normalize_text(raw: &str) -> Vec<String> {
    normalize_list(raw.lines())
}

/// Trims, drops empties and removes exact duplicates, keeping the first
/// occurrence. Comparison is case-sensitive.
pub fn normalize_list<I, S>(reviews: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for review in reviews {
        let trimmed = review.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            out.push(trimmed.to_string());
        }
    }
    out
}

pub fn normalize_input(input: &ReviewInput) -> Vec<String> {
    match input {
        ReviewInput::Text(text) => normalize_text(text),
        // Each entry is one review, even when it spans several lines.
        ReviewInput::List(items) => normalize_list(items),
    }
}

pub fn require_min_reviews(reviews: &[String]) -> Result<(), AppError> {
    if reviews.len() < MIN_REVIEWS {
        return Err(AppError::InsufficientReviews {
            found: reviews.len(),
            required: MIN_REVIEWS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_sensitive_duplicates_are_kept() {
        let out = normalize_list(["Great service!", "great service!", ""]);
        assert_eq!(out, vec!["Great service!", "great service!"]);
        assert!(matches!(
            require_min_reviews(&out),
            Err(AppError::InsufficientReviews { found: 2, required: 3 })
        ));
    }

    #[test]
    fn test_first_occurrence_order_preserved() {
        let out = normalize_text("b\n a \nb\n\nc\na");
        assert_eq!(out, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_crlf_lines() {
        let out = normalize_text("one\r\ntwo\r\n\r\nthree\r\n");
        assert_eq!(out, vec!["one", "two", "three"]);
        assert!(require_min_reviews(&out).is_ok());
    }

    #[test]
    fn test_whitespace_only_input() {
        assert!(normalize_text("  \n\t\n").is_empty());
    }

    #[test]
    fn test_list_entries_are_not_split_on_lines() {
        let input = ReviewInput::List(vec![
            "Lovely staff.\nWould come back.".to_string(),
            " Fast service. ".to_string(),
            "Fast service.".to_string(),
        ]);
        let out = normalize_input(&input);
        assert_eq!(out, vec!["Lovely staff.\nWould come back.", "Fast service."]);
        assert!(matches!(
            require_min_reviews(&out),
            Err(AppError::InsufficientReviews { found: 2, required: 3 })
        ));
    }

    #[test]
    fn test_output_has_no_duplicates_or_empties() {
        let raw = "x\n\ny\nx\n  y  \nz\n \n";
        let out = normalize_text(raw);
        let unique: HashSet<_> = out.iter().collect();
        assert_eq!(unique.len(), out.len());
        assert!(out.iter().all(|r| !r.is_empty()));
    }
}
