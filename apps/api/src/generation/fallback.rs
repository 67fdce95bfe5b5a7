//! Ordered try-each combinator over interchangeable candidates.

use std::fmt;
use std::future::Future;

use tracing::warn;

/// Every candidate failed. Failures are kept in attempt order.
#[derive(Debug)]
pub struct FallbackExhausted<E> {
    pub failures: Vec<(String, E)>,
}

impl<E: fmt::Display> FallbackExhausted<E> {
    /// The last failure seen, formatted as `candidate: reason`.
    pub fn last_failure(&self) -> String {
        match self.failures.last() {
            Some((candidate, err)) => format!("{candidate}: {err}"),
            None => "no candidates configured".to_string(),
        }
    }

    pub fn last_error(&self) -> Option<&E> {
        self.failures.last().map(|(_, e)| e)
    }
}

impl<E: fmt::Display> fmt::Display for FallbackExhausted<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "all {} candidates failed (last: {})",
            self.failures.len(),
            self.last_failure()
        )
    }
}

/// Tries each candidate in order and returns the first success together
/// with the candidate that produced it.
pub async fn first_success<'a, T, E, F, Fut>(
    candidates: &'a [String],
    mut attempt: F,
) -> Result<(&'a str, T), FallbackExhausted<E>>
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let mut failures = Vec::new();
    for candidate in candidates {
        match attempt(candidate.as_str()).await {
            Ok(value) => return Ok((candidate.as_str(), value)),
            Err(err) => {
                warn!("Candidate {candidate} failed: {err}");
                failures.push((candidate.clone(), err));
            }
        }
    }
    Err(FallbackExhausted { failures })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_stops_at_first_success() {
        let candidates = names(&["a", "b", "c"]);
        let mut tried = Vec::new();
        let result = first_success(&candidates, |c| {
            tried.push(c.to_string());
            async move {
                if c == "b" {
                    Ok(42)
                } else {
                    Err(format!("{c} down"))
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(result, ("b", 42));
        assert_eq!(tried, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_last_failure() {
        let candidates = names(&["a", "b"]);
        let err = first_success(&candidates, |c| async move { Err::<(), _>(format!("{c} down")) })
            .await
            .unwrap_err();
        assert_eq!(err.failures.len(), 2);
        assert_eq!(err.last_failure(), "b: b down");
        assert!(err.to_string().contains("all 2 candidates failed"));
    }

    #[tokio::test]
    async fn test_empty_candidate_list() {
        let err = first_success(&[], |_| async { Ok::<(), String>(()) })
            .await
            .unwrap_err();
        assert!(err.failures.is_empty());
        assert_eq!(err.last_failure(), "no candidates configured");
    }
}
