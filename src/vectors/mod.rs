// Axis vectors: differencing, normalization, cluster aggregation, distances.
//
// Every vector carries its document id. Stages that combine documents with
// vectors check ids pairwise instead of trusting positions.

pub mod aggregate;
pub mod combinations;
pub mod difference;
pub mod distance;
pub mod normalize;

use crate::corpus::documents::{Document, DocumentId};
use crate::error::{Result, VectorError};

/// One value per bipolar axis for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisVector {
    pub id: DocumentId,
    pub values: Vec<f64>,
}

/// Signed endpoint differences, before normalization.
pub type RawAxisVector = AxisVector;
/// Axis values rescaled across the corpus.
pub type NormalizedAxisVector = AxisVector;

/// A document together with its normalized vector.
#[derive(Debug, Clone, Copy)]
pub struct Member<'a> {
    pub document: &'a Document,
    pub vector: &'a NormalizedAxisVector,
}

/// Pair documents with vectors position by position, requiring matching ids.
pub fn pair_members<'a>(
    documents: &'a [Document],
    vectors: &'a [NormalizedAxisVector],
) -> Result<Vec<Member<'a>>> {
    if documents.len() != vectors.len() {
        return Err(VectorError::DimensionMismatch {
            stage: "document pairing",
            expected: documents.len(),
            actual: vectors.len(),
        });
    }

    documents
        .iter()
        .zip(vectors)
        .map(|(document, vector)| {
            if document.id != vector.id {
                return Err(VectorError::MisalignedDocument {
                    expected: document.id,
                    found: vector.id,
                });
            }
            Ok(Member { document, vector })
        })
        .collect()
}

/// Shared axis count of a set of vectors. Errors if any row differs.
pub(crate) fn common_width<'a>(
    stage: &'static str,
    rows: impl IntoIterator<Item = &'a [f64]>,
) -> Result<Option<usize>> {
    let mut width = None;
    for row in rows {
        match width {
            None => width = Some(row.len()),
            Some(w) if w != row.len() => {
                return Err(VectorError::DimensionMismatch {
                    stage,
                    expected: w,
                    actual: row.len(),
                })
            }
            Some(_) => {}
        }
    }
    Ok(width)
}
