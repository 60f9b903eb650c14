// Feature extraction: per-document, per-endpoint keyword scores.

pub mod extract;
pub mod membership;
pub mod substring;
pub mod traits;
