//! Fuzzy ranking of auto-complete suggestions.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Rank `labels` against `query`.
///
/// Returns the indices of matching labels, best score first; equal scores
/// keep declaration order. An empty query returns every index in order.
pub(crate) fn fuzzy_rank<'a>(query: &str, labels: impl IntoIterator<Item = &'a str>) -> Vec<usize> {
    let labels = labels.into_iter();
    if query.trim().is_empty() {
        return labels.enumerate().map(|(index, _)| index).collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let mut buf = Vec::new();
    let mut scored: Vec<(usize, u32)> = labels
        .enumerate()
        .filter_map(|(index, label)| {
            let haystack = Utf32Str::new(label, &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| (index, score))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(index, _)| index).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_keeps_order() {
        let labels = ["Pune", "Mumbai", "Nagpur"];
        assert_eq!(fuzzy_rank("", labels), vec![0, 1, 2]);
    }

    #[test]
    fn test_filters_non_matches() {
        let labels = ["banana", "apple", "apricot"];
        let ranked = fuzzy_rank("ap", labels);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.contains(&1));
        assert!(ranked.contains(&2));
    }

    #[test]
    fn test_case_insensitive() {
        let labels = ["Mumbai", "Delhi"];
        assert_eq!(fuzzy_rank("MUM", labels), vec![0]);
    }
}
