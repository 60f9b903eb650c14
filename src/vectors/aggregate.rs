// Cluster aggregation.
//
// Averages the normalized vectors of each cluster's members. With time
// weighting, each member's coordinates are first scaled by
// (year - baseline_year) / year_span, so later documents pull the cluster
// vector harder. The per-document vectors themselves are never modified.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::{common_width, Member};
use crate::config::Weighting;
use crate::corpus::documents::ClusterLabel;
use crate::error::{Result, VectorError};

/// Representative vector of one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterVector {
    pub label: ClusterLabel,
    pub values: Vec<f64>,
    pub members: usize,
}

/// Constants for time weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub baseline_year: i32,
    pub year_span: f64,
}

impl TimeScale {
    pub fn factor(&self, year: i32) -> f64 {
        f64::from(year - self.baseline_year) / self.year_span
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self {
            baseline_year: 1994,
            year_span: 26.0,
        }
    }
}

/// Compute one vector per cluster label present in `members`, sorted by label.
///
/// When `declared` is given, a member whose label is not in it fails the
/// whole aggregation with `UnknownClusterLabel`.
pub fn aggregate(
    members: &[Member<'_>],
    declared: Option<&BTreeSet<ClusterLabel>>,
    weighting: Weighting,
    time: TimeScale,
) -> Result<Vec<ClusterVector>> {
    let Some(width) = common_width(
        "cluster aggregation",
        members.iter().map(|m| m.vector.values.as_slice()),
    )?
    else {
        return Ok(Vec::new());
    };

    if weighting == Weighting::Time && (time.year_span == 0.0 || !time.year_span.is_finite()) {
        return Err(VectorError::MalformedConfig(format!(
            "year span must be a non-zero number, got {}",
            time.year_span
        )));
    }

    let mut sums: BTreeMap<ClusterLabel, (Vec<f64>, usize)> = BTreeMap::new();

    for member in members {
        let label = member.document.cluster;
        if let Some(declared) = declared {
            if !declared.contains(&label) {
                return Err(VectorError::UnknownClusterLabel {
                    document: member.document.id,
                    label,
                });
            }
        }

        let factor = match weighting {
            Weighting::None => 1.0,
            Weighting::Time => time.factor(member.document.year),
        };

        let (sum, count) = sums
            .entry(label)
            .or_insert_with(|| (vec![0.0; width], 0));
        for (acc, value) in sum.iter_mut().zip(&member.vector.values) {
            *acc += value * factor;
        }
        *count += 1;
    }

    let clusters: Vec<ClusterVector> = sums
        .into_iter()
        .map(|(label, (sum, count))| ClusterVector {
            label,
            values: sum.into_iter().map(|s| s / count as f64).collect(),
            members: count,
        })
        .collect();

    debug!(clusters = clusters.len(), ?weighting, "Aggregated cluster vectors");
    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::documents::{Document, DocumentId};
    use crate::vectors::{pair_members, AxisVector};

    fn doc(id: u32, year: i32, cluster: ClusterLabel) -> Document {
        Document {
            id: DocumentId(id),
            category: String::new(),
            year,
            title: String::new(),
            text: String::new(),
            cluster,
        }
    }

    #[test]
    fn test_time_factor() {
        let time = TimeScale::default();
        assert_eq!(time.factor(1994), 0.0);
        assert_eq!(time.factor(2020), 1.0);
        assert!((time.factor(2007) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_undeclared_label_fails() {
        let docs = vec![doc(1, 2000, ClusterLabel::Id(0)), doc(2, 2000, ClusterLabel::Id(5))];
        let vectors = vec![
            AxisVector { id: DocumentId(1), values: vec![0.5] },
            AxisVector { id: DocumentId(2), values: vec![0.5] },
        ];
        let members = pair_members(&docs, &vectors).unwrap();
        let declared: BTreeSet<ClusterLabel> = [ClusterLabel::Id(0), ClusterLabel::Id(1)].into();

        let result = aggregate(&members, Some(&declared), Weighting::None, TimeScale::default());
        assert!(matches!(
            result,
            Err(VectorError::UnknownClusterLabel {
                document: DocumentId(2),
                label: ClusterLabel::Id(5)
            })
        ));
    }

    #[test]
    fn test_unassigned_is_its_own_group() {
        let docs = vec![doc(1, 2000, ClusterLabel::Id(0)), doc(2, 2000, ClusterLabel::Unassigned)];
        let vectors = vec![
            AxisVector { id: DocumentId(1), values: vec![1.0] },
            AxisVector { id: DocumentId(2), values: vec![-1.0] },
        ];
        let members = pair_members(&docs, &vectors).unwrap();
        let clusters = aggregate(&members, None, Weighting::None, TimeScale::default()).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].label, ClusterLabel::Unassigned);
        assert_eq!(clusters[0].values, vec![-1.0]);
    }

    #[test]
    fn test_empty_members() {
        let clusters = aggregate(&[], None, Weighting::Time, TimeScale::default()).unwrap();
        assert!(clusters.is_empty());
    }
}
