// Per-axis normalization across the whole corpus.
//
// Each axis is rescaled on its own column of values (one per document), and
// the output keeps both the length and the document order of the input.
//
// Uniform:  (v - min) / (max - min), then (x - 0.5) * 2   -> [-1, 1]
// Split:    v >= 0 scaled against [0, max]               -> [0, 1]
//           v <  0 scaled against [min, 0], then - 1      -> [-1, 0)
//
// The split policy anchors both halves at zero. That is what keeps a
// positive raw value positive and a negative one negative; the uniform
// policy moves zero whenever the raw distribution is lopsided.

use tracing::debug;

use super::{common_width, NormalizedAxisVector, RawAxisVector};
use crate::config::NormalizationMode;
use crate::error::Result;

/// Value given to every document on an axis with no spread.
pub const ZERO_VARIANCE_VALUE: f64 = 0.0;

/// Normalize one axis column with the given policy.
pub fn normalize_column(values: &[f64], mode: NormalizationMode) -> Vec<f64> {
    match mode {
        NormalizationMode::Uniform => normalize_uniform(values),
        NormalizationMode::Split => normalize_split(values),
    }
}

/// Min-max rescale to [-1, 1]. A zero-variance column maps to 0.0 everywhere.
pub fn normalize_uniform(values: &[f64]) -> Vec<f64> {
    let Some((min, max)) = min_max(values.iter().copied()) else {
        return Vec::new();
    };

    if max == min {
        debug!(value = min, "Zero-variance axis, using constant");
        return vec![ZERO_VARIANCE_VALUE; values.len()];
    }

    let range = max - min;
    values
        .iter()
        .map(|v| ((v - min) / range - 0.5) * 2.0)
        .collect()
}

/// Sign-preserving rescale: non-negatives into [0, 1], negatives into [-1, 0).
pub fn normalize_split(values: &[f64]) -> Vec<f64> {
    let max = values
        .iter()
        .copied()
        .filter(|v| *v >= 0.0)
        .fold(0.0_f64, f64::max);
    let min = values
        .iter()
        .copied()
        .filter(|v| *v < 0.0)
        .fold(0.0_f64, f64::min);

    values
        .iter()
        .map(|&v| {
            if v >= 0.0 {
                if max > 0.0 {
                    v / max
                } else {
                    ZERO_VARIANCE_VALUE
                }
            } else {
                // min < 0 whenever a negative value exists
                v / -min
            }
        })
        .collect()
}

/// Normalize every axis column across the corpus.
pub fn normalize(
    vectors: &[RawAxisVector],
    mode: NormalizationMode,
) -> Result<Vec<NormalizedAxisVector>> {
    let Some(width) = common_width("normalization", vectors.iter().map(|v| v.values.as_slice()))?
    else {
        return Ok(Vec::new());
    };

    let mut out: Vec<NormalizedAxisVector> = vectors
        .iter()
        .map(|v| NormalizedAxisVector {
            id: v.id,
            values: Vec::with_capacity(width),
        })
        .collect();

    for axis in 0..width {
        let column: Vec<f64> = vectors.iter().map(|v| v.values[axis]).collect();
        for (row, value) in out.iter_mut().zip(normalize_column(&column, mode)) {
            row.values.push(value);
        }
    }

    Ok(out)
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::documents::DocumentId;

    #[test]
    fn test_uniform_hits_bounds() {
        let out = normalize_uniform(&[3.0, -1.0, 1.0]);
        assert_eq!(out, vec![1.0, -1.0, 0.0]);
    }

    #[test]
    fn test_uniform_zero_variance() {
        let out = normalize_uniform(&[0.7, 0.7, 0.7]);
        assert_eq!(out, vec![ZERO_VARIANCE_VALUE; 3]);
    }

    #[test]
    fn test_uniform_empty() {
        assert!(normalize_uniform(&[]).is_empty());
    }

    #[test]
    fn test_split_keeps_sign() {
        let out = normalize_split(&[4.0, 1.0, 0.0, -0.5, -2.0]);
        assert_eq!(out, vec![1.0, 0.25, 0.0, -0.25, -1.0]);
    }

    #[test]
    fn test_split_only_negatives() {
        let out = normalize_split(&[-1.0, -3.0]);
        assert!((out[0] + 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(out[1], -1.0);
    }

    #[test]
    fn test_split_all_zero() {
        assert_eq!(normalize_split(&[0.0, 0.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_normalize_keeps_ids_and_order() {
        let raw = vec![
            RawAxisVector { id: DocumentId(9), values: vec![1.0, 5.0] },
            RawAxisVector { id: DocumentId(4), values: vec![3.0, 5.0] },
        ];
        let out = normalize(&raw, NormalizationMode::Uniform).unwrap();
        assert_eq!(out[0].id, DocumentId(9));
        assert_eq!(out[1].id, DocumentId(4));
        assert_eq!(out[0].values, vec![-1.0, 0.0]);
        assert_eq!(out[1].values, vec![1.0, 0.0]);
    }
}
