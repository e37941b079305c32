//! Suggestion engine — near-match recovery for mistyped container names.
//!
//! Advisory only: suggestions are shown to the user, never acted on.

const MAX_SUGGESTIONS: usize = 3;
const MIN_RATIO: f64 = 0.6;

/// Rank `known` names by similarity to `query` and return up to three that
/// clear the threshold, best first. Ties keep the first-seen order of
/// `known`. Returns an empty vector when nothing is close enough.
pub fn suggest(query: &str, known: &[String]) -> Vec<String> {
    let mut scored: Vec<(usize, f64, &String)> = known
        .iter()
        .enumerate()
        .map(|(index, name)| (index, similarity(query, name), name))
        .filter(|(_, ratio, _)| *ratio >= MIN_RATIO)
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, _, name)| name.clone())
        .collect()
}

/// Similarity ratio in [0, 1]: twice the longest common subsequence over the
/// combined length, so transposed letters still score high.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let total = a.chars().count() + b.chars().count();
    (2 * lcs_length(a, b)) as f64 / total as f64
}

fn lcs_length(a: &str, b: &str) -> usize {
    let b_chars = b.chars().collect::<Vec<_>>();
    let mut previous = vec![0usize; b_chars.len() + 1];
    let mut current = vec![0usize; b_chars.len() + 1];

    for left in a.chars() {
        for (j, right) in b_chars.iter().enumerate() {
            current[j + 1] = if left == *right {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        previous.clone_from_slice(&current);
    }

    previous[b_chars.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_transposed_letters_match() {
        let known = names(&["web", "worker", "db"]);
        assert_eq!(suggest("wbe", &known), vec!["web"]);
    }

    #[test]
    fn test_no_match_below_threshold() {
        let known = names(&["web", "worker", "db"]);
        assert!(suggest("zzz", &known).is_empty());
    }

    #[test]
    fn test_exact_match_ranks_first() {
        let known = names(&["webapp", "web"]);
        let result = suggest("web", &known);
        assert_eq!(result.first().map(String::as_str), Some("web"));
    }

    #[test]
    fn test_at_most_three_suggestions() {
        let known = names(&["app-1", "app-2", "app-3", "app-4"]);
        assert_eq!(suggest("app-", &known).len(), 3);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let known = names(&["app-b", "app-a"]);
        assert_eq!(suggest("app-", &known), vec!["app-b", "app-a"]);
    }

    #[test]
    fn test_empty_known_set() {
        assert!(suggest("web", &[]).is_empty());
    }

    // ── Ratio ────────────────────────────────────────────────────

    #[test]
    fn test_similarity_identical() {
        assert_eq!(similarity("web", "web"), 1.0);
    }

    #[test]
    fn test_similarity_disjoint() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_similarity_transposition() {
        // LCS("wbe", "web") = "we" → 2·2 / 6
        let ratio = similarity("wbe", "web");
        assert!((ratio - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_empty_inputs() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("web", ""), 0.0);
    }
}
