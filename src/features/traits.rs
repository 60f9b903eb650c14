// Endpoint scorer trait.
//
// A scorer turns a document's raw text and one endpoint's keyword list into
// an undamped count. Damping and corpus-wide rescaling happen in the
// extractor, so every scorer stays a pure counting function.

use crate::corpus::keywords::WeightedKeyword;

/// Trait for scoring a document against one axis endpoint.
pub trait EndpointScorer {
    /// Raw (undamped) score of `text` for the given keywords. Never negative.
    fn score(&self, text: &str, keywords: &[WeightedKeyword]) -> f64;
}
