// Per-document endpoint scores.
//
// Runs the configured scorer over every endpoint in corpus order, damps each
// sum, and optionally rescales each endpoint column across the corpus before
// the scores are differenced into axes.

use crate::config::{Damping, ScoringPolicy};
use crate::corpus::documents::{Document, DocumentId};
use crate::corpus::keywords::{KeywordCorpus, WeightedKeyword};

use super::membership::TokenMembershipScorer;
use super::substring::WeightedSubstringScorer;
use super::traits::EndpointScorer;

/// One document's damped score per endpoint, in endpoint order.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointScores {
    pub id: DocumentId,
    pub scores: Vec<f64>,
}

pub struct FeatureExtractor {
    scorer: Box<dyn EndpointScorer>,
    damping: Damping,
}

impl FeatureExtractor {
    pub fn new(policy: ScoringPolicy, damping: Damping) -> Self {
        let scorer: Box<dyn EndpointScorer> = match policy {
            ScoringPolicy::Substring => Box::new(WeightedSubstringScorer),
            ScoringPolicy::Membership => Box::new(TokenMembershipScorer),
        };
        Self { scorer, damping }
    }

    /// Score one document's text against a single endpoint keyword list.
    pub fn score(&self, text: &str, keywords: &[WeightedKeyword]) -> f64 {
        self.damping.apply(self.scorer.score(text, keywords))
    }

    /// Score one document against every endpoint of the corpus.
    pub fn endpoint_scores(&self, document: &Document, corpus: &KeywordCorpus) -> EndpointScores {
        let scores = corpus
            .endpoints()
            .iter()
            .map(|endpoint| self.score(&document.text, &endpoint.keywords))
            .collect();
        EndpointScores {
            id: document.id,
            scores,
        }
    }
}

/// Min-max each endpoint column to [0, 1] across all documents.
///
/// A column with no spread scales to 0.0 everywhere.
pub fn prescale_endpoints(rows: &mut [EndpointScores]) {
    let Some(width) = rows.first().map(|r| r.scores.len()) else {
        return;
    };

    for col in 0..width {
        let (min, max) = rows
            .iter()
            .map(|r| r.scores[col])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let range = max - min;
        for row in rows.iter_mut() {
            row.scores[col] = if range > 0.0 {
                (row.scores[col] - min) / range
            } else {
                0.0
            };
        }
    }
}
