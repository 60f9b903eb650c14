// Unit tests for the axis-vector stages.
//
// Tests the properties each stage guarantees on its own: differencing
// antisymmetry, normalization bounds and sign preservation, cluster means
// under both weightings, and distance records.

use std::collections::{BTreeSet, HashMap};

use axiscope::config::{NormalizationMode, Weighting};
use axiscope::corpus::documents::{ClusterLabel, Document, DocumentId};
use axiscope::error::VectorError;
use axiscope::vectors::aggregate::{aggregate, TimeScale};
use axiscope::vectors::difference::difference;
use axiscope::vectors::distance::distances;
use axiscope::vectors::normalize::{normalize, normalize_split, normalize_uniform};
use axiscope::vectors::{pair_members, AxisVector};

const TOL: f64 = 1e-9;

fn doc(id: u32, year: i32, cluster: u32) -> Document {
    Document {
        id: DocumentId(id),
        category: "report".to_string(),
        year,
        title: format!("document {id}"),
        text: String::new(),
        cluster: ClusterLabel::Id(cluster),
    }
}

fn vector(id: u32, values: &[f64]) -> AxisVector {
    AxisVector {
        id: DocumentId(id),
        values: values.to_vec(),
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(*v), hi.max(*v))
    })
}

// ============================================================
// AxisDifferencer
// ============================================================

#[test]
fn difference_is_antisymmetric_under_endpoint_swap() {
    let (a, b) = (0.75, 2.5);
    let forward = difference(&[a, b]).unwrap();
    let swapped = difference(&[b, a]).unwrap();
    assert_eq!(forward, vec![b - a]);
    assert_eq!(swapped, vec![a - b]);
    assert_eq!(forward[0], -swapped[0]);
}

#[test]
fn difference_length_three_is_dimension_mismatch() {
    let result = difference(&[1.0, 2.0, 3.0]);
    assert!(
        matches!(result, Err(VectorError::DimensionMismatch { .. })),
        "Odd input should fail, got {result:?}"
    );
}

#[test]
fn difference_output_follows_pair_order() {
    let out = difference(&[0.0, 1.0, 1.0, 0.0, 2.0, 2.0]).unwrap();
    assert_eq!(out, vec![1.0, -1.0, 0.0]);
}

// ============================================================
// Normalizer
// ============================================================

#[test]
fn uniform_axes_span_minus_one_to_one() {
    let raw = vec![
        vector(1, &[0.3, -4.0, 7.0]),
        vector(2, &[1.9, 2.0, 7.5]),
        vector(3, &[-0.4, 0.0, 9.0]),
        vector(4, &[0.0, 1.0, 8.0]),
    ];
    let normalized = normalize(&raw, NormalizationMode::Uniform).unwrap();

    for axis in 0..3 {
        let column: Vec<f64> = normalized.iter().map(|v| v.values[axis]).collect();
        let (lo, hi) = min_max(&column);
        assert!((lo + 1.0).abs() < TOL, "axis {axis} min is {lo}");
        assert!((hi - 1.0).abs() < TOL, "axis {axis} max is {hi}");
    }
}

#[test]
fn uniform_zero_variance_axis_is_constant() {
    let raw = vec![vector(1, &[0.5, 1.0]), vector(2, &[0.5, 3.0]), vector(3, &[0.5, 2.0])];
    let normalized = normalize(&raw, NormalizationMode::Uniform).unwrap();
    for v in &normalized {
        assert_eq!(v.values[0], 0.0);
    }
    assert_eq!(normalized[2].values[1], 0.0);
}

#[test]
fn uniform_can_flip_sign_of_lopsided_axis() {
    // Midpoint of [-1, 10] is 4.5, so a raw 0.5 lands below the new zero
    let out = normalize_uniform(&[-1.0, 0.5, 10.0]);
    assert!(out[1] < 0.0, "positive raw value mapped negative: {}", out[1]);
}

#[test]
fn split_preserves_sign_of_every_nonzero_value() {
    let raw = [-3.2, -0.001, 0.0, 0.002, 4.5, -1e-12, 1e-12, 2.0, -3.2];
    let out = normalize_split(&raw);
    assert_eq!(out.len(), raw.len());
    for (r, n) in raw.iter().zip(&out) {
        if *r != 0.0 {
            assert_eq!(r.signum(), n.signum(), "raw {r} normalized to {n}");
        }
        assert!(*n >= -1.0 && *n <= 1.0);
    }
    let (lo, hi) = min_max(&out);
    assert_eq!(lo, -1.0);
    assert_eq!(hi, 1.0);
}

#[test]
fn split_mode_through_normalize() {
    let raw = vec![vector(1, &[2.0]), vector(2, &[-4.0]), vector(3, &[1.0]), vector(4, &[-1.0])];
    let normalized = normalize(&raw, NormalizationMode::Split).unwrap();
    let column: Vec<f64> = normalized.iter().map(|v| v.values[0]).collect();
    assert_eq!(column, vec![1.0, -1.0, 0.5, -0.25]);
}

#[test]
fn normalize_rejects_ragged_vectors() {
    let raw = vec![vector(1, &[1.0, 2.0]), vector(2, &[1.0])];
    assert!(matches!(
        normalize(&raw, NormalizationMode::Uniform),
        Err(VectorError::DimensionMismatch { .. })
    ));
}

// ============================================================
// ClusterAggregator: 2 clusters, 4 documents
// ============================================================

fn two_cluster_corpus() -> (Vec<Document>, Vec<AxisVector>) {
    let docs = vec![
        doc(1, 2020, 0),
        doc(2, 2007, 1),
        doc(3, 2007, 0),
        doc(4, 1994, 1),
    ];
    let vectors = vec![
        vector(1, &[1.0, -0.5]),
        vector(2, &[0.0, 0.5]),
        vector(3, &[0.5, 0.5]),
        vector(4, &[-1.0, 1.0]),
    ];
    (docs, vectors)
}

#[test]
fn unweighted_cluster_means() {
    let (docs, vectors) = two_cluster_corpus();
    let members = pair_members(&docs, &vectors).unwrap();
    let clusters = aggregate(&members, None, Weighting::None, TimeScale::default()).unwrap();

    let labels: Vec<ClusterLabel> = clusters.iter().map(|c| c.label).collect();
    assert_eq!(labels, vec![ClusterLabel::Id(0), ClusterLabel::Id(1)]);

    // cluster 0: docs 1, 3; cluster 1: docs 2, 4
    assert!((clusters[0].values[0] - 0.75).abs() < TOL);
    assert!((clusters[0].values[1] - 0.0).abs() < TOL);
    assert!((clusters[1].values[0] + 0.5).abs() < TOL);
    assert!((clusters[1].values[1] - 0.75).abs() < TOL);
    assert_eq!(clusters[0].members, 2);
}

#[test]
fn time_weighted_cluster_means() {
    let (docs, vectors) = two_cluster_corpus();
    let members = pair_members(&docs, &vectors).unwrap();
    let clusters = aggregate(&members, None, Weighting::Time, TimeScale::default()).unwrap();

    // factors: 2020 -> 1.0, 2007 -> 0.5, 1994 -> 0.0
    // cluster 0: ([1.0, -0.5] + [0.25, 0.25]) / 2
    assert!((clusters[0].values[0] - 0.625).abs() < TOL);
    assert!((clusters[0].values[1] + 0.125).abs() < TOL);
    // cluster 1: ([0.0, 0.25] + [0.0, 0.0]) / 2
    assert!(clusters[1].values[0].abs() < TOL);
    assert!((clusters[1].values[1] - 0.125).abs() < TOL);

    // Stored per-document vectors are untouched
    assert_eq!(vectors[0].values, vec![1.0, -0.5]);
}

#[test]
fn cluster_set_equals_distinct_labels_sorted() {
    let docs = vec![doc(1, 2000, 7), doc(2, 2000, 2), doc(3, 2000, 7), doc(4, 2000, 5)];
    let vectors: Vec<AxisVector> = (1..=4).map(|i| vector(i, &[0.0])).collect();
    let members = pair_members(&docs, &vectors).unwrap();
    let declared: BTreeSet<ClusterLabel> =
        [2, 5, 7, 9].into_iter().map(ClusterLabel::Id).collect();

    let clusters = aggregate(&members, Some(&declared), Weighting::None, TimeScale::default()).unwrap();
    let labels: Vec<ClusterLabel> = clusters.iter().map(|c| c.label).collect();
    // Declared but empty cluster 9 is not emitted
    assert_eq!(labels, vec![ClusterLabel::Id(2), ClusterLabel::Id(5), ClusterLabel::Id(7)]);
}

#[test]
fn label_outside_declared_set_fails() {
    let (docs, vectors) = two_cluster_corpus();
    let members = pair_members(&docs, &vectors).unwrap();
    let declared: BTreeSet<ClusterLabel> = [ClusterLabel::Id(0)].into();
    let result = aggregate(&members, Some(&declared), Weighting::None, TimeScale::default());
    assert!(matches!(
        result,
        Err(VectorError::UnknownClusterLabel { document: DocumentId(2), .. })
    ));
}

#[test]
fn zero_year_span_is_rejected_for_time_weighting() {
    let (docs, vectors) = two_cluster_corpus();
    let members = pair_members(&docs, &vectors).unwrap();
    let time = TimeScale { baseline_year: 1994, year_span: 0.0 };
    assert!(matches!(
        aggregate(&members, None, Weighting::Time, time),
        Err(VectorError::MalformedConfig(_))
    ));
}

// ============================================================
// DistanceComputer
// ============================================================

#[test]
fn distances_use_euclidean_metric_and_carry_connectivity() {
    let (docs, vectors) = two_cluster_corpus();
    let members = pair_members(&docs, &vectors).unwrap();
    let clusters = aggregate(&members, None, Weighting::None, TimeScale::default()).unwrap();
    let connectivity: HashMap<DocumentId, u32> = [(DocumentId(1), 12), (DocumentId(4), 3)].into();

    let records = distances(&members, &clusters, &connectivity).unwrap();
    let ids: Vec<DocumentId> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![DocumentId(1), DocumentId(2), DocumentId(3), DocumentId(4)]);

    // doc 1 [1.0, -0.5] vs cluster 0 [0.75, 0.0]: sqrt(0.0625 + 0.25)
    let expected = (0.0625_f64 + 0.25).sqrt();
    assert!((records[0].distance_from_cluster - expected).abs() < TOL);
    assert_eq!(records[0].connected_node_count, Some(12));
    assert_eq!(records[1].connected_node_count, None);
    assert_eq!(records[3].connected_node_count, Some(3));
    assert_eq!(records[2].values, vec![0.5, 0.5]);
    assert_eq!(records[2].title, "document 3");
}

#[test]
fn distance_without_cluster_vector_fails() {
    let (docs, vectors) = two_cluster_corpus();
    let members = pair_members(&docs, &vectors).unwrap();
    let clusters = aggregate(&members[..2], None, Weighting::None, TimeScale::default()).unwrap();
    let only_zero: Vec<_> = clusters.into_iter().filter(|c| c.label == ClusterLabel::Id(0)).collect();

    let result = distances(&members, &only_zero, &HashMap::new());
    assert!(matches!(result, Err(VectorError::UnknownClusterLabel { .. })));
}

#[test]
fn time_weighted_distance_measures_against_scaled_cluster_vector() {
    // Both members of cluster 0 sit at the baseline year, so the weighted
    // cluster vector is zero and each distance is the member's own norm.
    let docs = vec![doc(1, 1994, 0), doc(2, 1994, 0)];
    let vectors = vec![vector(1, &[0.6, 0.8]), vector(2, &[-1.0, 0.0])];
    let members = pair_members(&docs, &vectors).unwrap();
    let clusters = aggregate(&members, None, Weighting::Time, TimeScale::default()).unwrap();
    assert_eq!(clusters[0].values, vec![0.0, 0.0]);

    let records = distances(&members, &clusters, &HashMap::new()).unwrap();
    assert!((records[0].distance_from_cluster - 1.0).abs() < TOL);
    assert!((records[1].distance_from_cluster - 1.0).abs() < TOL);
}
