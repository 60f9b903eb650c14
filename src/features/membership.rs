// Token-membership counting.
//
// The document is split on whitespace into a set of tokens, and the score is
// the number of distinct endpoint keywords found in that set. Weights and
// repeat occurrences are ignored.

use std::collections::HashSet;

use super::traits::EndpointScorer;
use crate::corpus::keywords::WeightedKeyword;

#[derive(Debug, Default, Clone, Copy)]
pub struct TokenMembershipScorer;

impl EndpointScorer for TokenMembershipScorer {
    fn score(&self, text: &str, keywords: &[WeightedKeyword]) -> f64 {
        let tokens: HashSet<&str> = text.split_whitespace().collect();
        let present: HashSet<&str> = keywords
            .iter()
            .map(|kw| kw.keyword.as_str())
            .filter(|kw| tokens.contains(kw))
            .collect();
        present.len() as f64
    }
}
