//! Fuzzy filtering for picker overlays.

use std::cmp::Reverse;

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Indices of `haystacks` matching `pattern`, best match first.
///
/// An empty pattern keeps every entry in its original order. Ties keep
/// their original relative order.
pub fn rank<S: AsRef<str>>(pattern: &str, haystacks: &[S]) -> Vec<usize> {
    if pattern.trim().is_empty() {
        return (0..haystacks.len()).collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::parse(pattern, CaseMatching::Ignore, Normalization::Smart);
    let mut buf = Vec::new();

    let mut scored: Vec<(usize, u32)> = haystacks
        .iter()
        .enumerate()
        .filter_map(|(idx, haystack)| {
            let haystack = Utf32Str::new(haystack.as_ref(), &mut buf);
            pattern.score(haystack, &mut matcher).map(|score| (idx, score))
        })
        .collect();

    scored.sort_by_key(|(_, score)| Reverse(*score));
    scored.into_iter().map(|(idx, _)| idx).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pattern_keeps_order() {
        assert_eq!(rank("", &["b", "a"]), vec![0, 1]);
    }

    #[test]
    fn test_filters_and_ranks() {
        let items = ["Germany +49", "United Kingdom +44", "Ghana +233"];
        let ranked = rank("kingdom", &items);
        assert_eq!(ranked, vec![1]);
    }

    #[test]
    fn test_matches_calling_code() {
        let items = ["France +33", "United Kingdom +44"];
        assert_eq!(rank("+44", &items), vec![1]);
    }

    #[test]
    fn test_case_insensitive() {
        let items = ["Japan +81"];
        assert_eq!(rank("JAP", &items), vec![0]);
    }
}
