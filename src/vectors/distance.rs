// Distance from cluster.
//
// The metric is the Euclidean distance between a document's normalized
// vector and its own cluster's aggregate vector:
//
//   distance = sqrt(sum_i (doc_i - cluster_i)^2)
//
// The cluster vector is whatever the aggregator produced. Under time
// weighting that is the year-scaled mean, while the document side stays the
// unscaled normalized vector. A cluster whose members all sit at the baseline
// year therefore aggregates to zero, and each member's distance is its own
// norm.
//
// The connected-node-count from the network table rides along unchanged; it
// does not enter the metric.

use std::collections::HashMap;

use super::aggregate::ClusterVector;
use super::Member;
use crate::corpus::documents::{ClusterLabel, DocumentId};
use crate::corpus::loader::Connectivity;
use crate::error::{Result, VectorError};

/// Everything the distance table needs for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceRecord {
    pub id: DocumentId,
    pub category: String,
    pub year: i32,
    pub title: String,
    pub cluster: ClusterLabel,
    pub values: Vec<f64>,
    pub connected_node_count: Option<u32>,
    pub distance_from_cluster: f64,
}

/// Euclidean distance between two equal-length vectors.
pub fn euclidean(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(VectorError::DimensionMismatch {
            stage: "distance",
            expected: b.len(),
            actual: a.len(),
        });
    }
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt())
}

/// Build the distance record for one document against its cluster vector.
pub fn distance(
    member: &Member<'_>,
    cluster: &ClusterVector,
    connectivity: Option<u32>,
) -> Result<DistanceRecord> {
    let document = member.document;
    if cluster.label != document.cluster {
        return Err(VectorError::UnknownClusterLabel {
            document: document.id,
            label: document.cluster,
        });
    }

    Ok(DistanceRecord {
        id: document.id,
        category: document.category.clone(),
        year: document.year,
        title: document.title.clone(),
        cluster: document.cluster,
        values: member.vector.values.clone(),
        connected_node_count: connectivity,
        distance_from_cluster: euclidean(&member.vector.values, &cluster.values)?,
    })
}

/// One record per member, in member order.
pub fn distances(
    members: &[Member<'_>],
    clusters: &[ClusterVector],
    connectivity: &Connectivity,
) -> Result<Vec<DistanceRecord>> {
    let by_label: HashMap<ClusterLabel, &ClusterVector> =
        clusters.iter().map(|c| (c.label, c)).collect();

    members
        .iter()
        .map(|member| {
            let document = member.document;
            let cluster = by_label.get(&document.cluster).ok_or(
                VectorError::UnknownClusterLabel {
                    document: document.id,
                    label: document.cluster,
                },
            )?;
            distance(member, cluster, connectivity.get(&document.id).copied())
        })
        .collect()
}
