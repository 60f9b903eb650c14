// One-shot vector pipeline.
//
// Stages run in a fixed order and each one fails the whole run:
// 1. Score every document against every endpoint
// 2. Optionally min-max each endpoint column
// 3. Difference endpoint pairs into raw axis vectors
// 4. Normalize each axis across the corpus
// 5. Aggregate normalized vectors per cluster
// 6. Measure each document's distance from its cluster vector
//
// Nothing is written here; the caller renders and writes the tables only
// after every stage has succeeded.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::config::PipelineConfig;
use crate::corpus::documents::Document;
use crate::corpus::keywords::KeywordCorpus;
use crate::corpus::loader::Connectivity;
use crate::features::extract::{prescale_endpoints, EndpointScores, FeatureExtractor};
use crate::vectors::aggregate::{aggregate, ClusterVector, TimeScale};
use crate::vectors::combinations::{axis_combinations, AxisPair};
use crate::vectors::difference::difference_all;
use crate::vectors::distance::{distances, DistanceRecord};
use crate::vectors::normalize::normalize;
use crate::vectors::{pair_members, NormalizedAxisVector, RawAxisVector};

/// Raw and normalized vectors, one per document in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisVectors {
    pub axes: Vec<String>,
    pub raw: Vec<RawAxisVector>,
    pub normalized: Vec<NormalizedAxisVector>,
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub vectors: AxisVectors,
    pub clusters: Vec<ClusterVector>,
    pub combinations: Vec<AxisPair>,
    pub distances: Vec<DistanceRecord>,
}

/// Run stages 1-4: endpoint scores through normalized axis vectors.
pub fn vectorize(
    config: &PipelineConfig,
    corpus: &KeywordCorpus,
    documents: &[Document],
) -> Result<AxisVectors> {
    config.validate()?;

    let extractor = FeatureExtractor::new(config.scoring, config.damping);

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Scoring [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut scores: Vec<EndpointScores> = Vec::with_capacity(documents.len());
    for document in documents {
        scores.push(extractor.endpoint_scores(document, corpus));
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        documents = scores.len(),
        endpoints = corpus.endpoint_count(),
        scoring = ?config.scoring,
        damping = ?config.damping,
        "Endpoint scores computed"
    );

    if config.endpoint_prescale {
        prescale_endpoints(&mut scores);
    }

    let raw = difference_all(&scores).context("Differencing endpoint scores failed")?;
    let normalized =
        normalize(&raw, config.normalization).context("Normalizing axis vectors failed")?;

    info!(
        axes = corpus.axis_count(),
        mode = ?config.normalization,
        "Axis vectors normalized"
    );

    Ok(AxisVectors {
        axes: corpus.axis_names(),
        raw,
        normalized,
    })
}

/// Run every stage.
pub fn run(
    config: &PipelineConfig,
    corpus: &KeywordCorpus,
    documents: &[Document],
    connectivity: &Connectivity,
) -> Result<PipelineOutput> {
    let vectors = vectorize(config, corpus, documents)?;

    let members = pair_members(documents, &vectors.normalized)?;
    let time = TimeScale {
        baseline_year: config.baseline_year,
        year_span: config.year_span,
    };
    let clusters = aggregate(
        &members,
        config.declared_clusters.as_ref(),
        config.weighting,
        time,
    )
    .context("Aggregating cluster vectors failed")?;

    info!(
        clusters = clusters.len(),
        weighting = ?config.weighting,
        "Cluster vectors aggregated"
    );

    let distances = distances(&members, &clusters, connectivity)
        .context("Computing distances from cluster failed")?;
    let with_network = distances
        .iter()
        .filter(|d| d.connected_node_count.is_some())
        .count();
    info!(
        records = distances.len(),
        with_network, "Distances from cluster computed"
    );

    let combinations = axis_combinations(&vectors.axes);

    Ok(PipelineOutput {
        vectors,
        clusters,
        combinations,
        distances,
    })
}
