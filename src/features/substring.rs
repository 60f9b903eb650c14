// Weighted substring counting.
//
// Each keyword contributes weight * (non-overlapping occurrences in the raw
// text). Korean morphemes are matched as plain substrings, so "미래" also
// counts inside "미래형".

use super::traits::EndpointScorer;
use crate::corpus::keywords::WeightedKeyword;

/// Sums weighted substring occurrences. The default scoring policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeightedSubstringScorer;

impl EndpointScorer for WeightedSubstringScorer {
    fn score(&self, text: &str, keywords: &[WeightedKeyword]) -> f64 {
        keywords
            .iter()
            .map(|kw| kw.weight * count_occurrences(text, &kw.keyword) as f64)
            .sum()
    }
}

/// Non-overlapping occurrences of `needle` in `haystack`. Empty needles never match.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}
