// Antonym-pair differencing.
//
// Endpoint scores arrive as [A0, B0, A1, B1, ...]. Each consecutive pair
// collapses into one signed axis value B - A: negative leans towards the
// first endpoint, positive towards the second.

use super::{common_width, RawAxisVector};
use crate::error::{Result, VectorError};
use crate::features::extract::EndpointScores;

/// Collapse consecutive endpoint scores into axis values.
///
/// `out[i / 2] = scores[i + 1] - scores[i]` for i = 0, 2, 4, ...
pub fn difference(scores: &[f64]) -> Result<Vec<f64>> {
    if scores.len() % 2 != 0 {
        return Err(VectorError::DimensionMismatch {
            stage: "axis differencing",
            expected: scores.len() + 1,
            actual: scores.len(),
        });
    }
    Ok(scores.chunks_exact(2).map(|pair| pair[1] - pair[0]).collect())
}

/// Difference every document's endpoint scores, keeping document ids.
pub fn difference_all(rows: &[EndpointScores]) -> Result<Vec<RawAxisVector>> {
    common_width("axis differencing", rows.iter().map(|r| r.scores.as_slice()))?;

    rows.iter()
        .map(|row| {
            Ok(RawAxisVector {
                id: row.id,
                values: difference(&row.scores)?,
            })
        })
        .collect()
}
