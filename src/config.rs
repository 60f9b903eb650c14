use std::collections::BTreeSet;
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::corpus::documents::ClusterLabel;
use crate::error::VectorError;

/// How each axis is rescaled across the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMode {
    /// Min-max to [-1, 1] over the whole axis
    #[default]
    Uniform,
    /// Positives to [0, 1] and negatives to [-1, 0) separately, keeping sign
    Split,
}

/// How member vectors are combined into a cluster vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Plain arithmetic mean
    #[default]
    None,
    /// Members scaled by (year - baseline_year) / year_span before averaging
    Time,
}

/// Compression applied to a summed endpoint count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
pub enum Damping {
    /// sqrt(sqrt(sum))
    #[default]
    #[value(name = "sqrtsqrt")]
    #[serde(rename = "sqrtsqrt")]
    SqrtSqrt,
    #[value(name = "none")]
    #[serde(rename = "none")]
    None,
}

impl Damping {
    pub fn apply(self, sum: f64) -> f64 {
        match self {
            Damping::SqrtSqrt => sum.sqrt().sqrt(),
            Damping::None => sum,
        }
    }
}

/// Which endpoint scorer to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScoringPolicy {
    /// Weighted substring occurrence count
    #[default]
    Substring,
    /// Distinct keywords present in the whitespace token set
    Membership,
}

/// Options for one pipeline run. Passed explicitly to `pipeline::run`.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    pub normalization: NormalizationMode,
    pub weighting: Weighting,
    pub damping: Damping,
    pub scoring: ScoringPolicy,
    /// Min-max each endpoint's scores across the corpus before differencing
    pub endpoint_prescale: bool,
    pub baseline_year: i32,
    pub year_span: f64,
    /// When set, every document's cluster must be one of these labels
    pub declared_clusters: Option<BTreeSet<ClusterLabel>>,
    /// Also write EUC-KR copies of the cluster and combination tables
    pub legacy_encoding: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("outputs"),
            normalization: NormalizationMode::default(),
            weighting: Weighting::default(),
            damping: Damping::default(),
            scoring: ScoringPolicy::default(),
            endpoint_prescale: false,
            baseline_year: 1994,
            year_span: 26.0,
            declared_clusters: None,
            legacy_encoding: true,
        }
    }
}

impl PipelineConfig {
    /// Reject settings no stage can run with.
    pub fn validate(&self) -> Result<(), VectorError> {
        if !self.year_span.is_finite() || self.year_span == 0.0 {
            return Err(VectorError::MalformedConfig(format!(
                "year span must be a non-zero number, got {}",
                self.year_span
            )));
        }
        if let Some(declared) = &self.declared_clusters {
            if declared.is_empty() {
                return Err(VectorError::MalformedConfig(
                    "declared cluster set is empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Locations of the input tables.
#[derive(Debug, Clone, Default)]
pub struct InputPaths {
    pub keywords_dir: Option<PathBuf>,
    pub clusters: Option<PathBuf>,
    pub contents: Option<PathBuf>,
    /// Network table with connected-node-counts; distance output leaves the
    /// count empty when absent
    pub network: Option<PathBuf>,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy; CLI flags override
/// whatever is set here.
pub struct Config {
    pub inputs: InputPaths,
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Load configuration from `AXISCOPE_*` environment variables.
    ///
    /// Every setting has a default except the input paths, which are checked
    /// by the `require_*` methods before the command that needs them.
    pub fn load() -> Result<Self> {
        let defaults = PipelineConfig::default();

        let pipeline = PipelineConfig {
            output_dir: env_path("AXISCOPE_OUTPUT_DIR").unwrap_or(defaults.output_dir),
            normalization: env_enum("AXISCOPE_NORMALIZATION")?.unwrap_or(defaults.normalization),
            weighting: env_enum("AXISCOPE_WEIGHTING")?.unwrap_or(defaults.weighting),
            damping: env_enum("AXISCOPE_DAMPING")?.unwrap_or(defaults.damping),
            scoring: env_enum("AXISCOPE_SCORING")?.unwrap_or(defaults.scoring),
            endpoint_prescale: env_parse("AXISCOPE_ENDPOINT_PRESCALE")?
                .unwrap_or(defaults.endpoint_prescale),
            baseline_year: env_parse("AXISCOPE_BASELINE_YEAR")?.unwrap_or(defaults.baseline_year),
            year_span: env_parse("AXISCOPE_YEAR_SPAN")?.unwrap_or(defaults.year_span),
            declared_clusters: declared_clusters(env::var("AXISCOPE_CLUSTERS_DECLARED").ok())
                .context("AXISCOPE_CLUSTERS_DECLARED is not a cluster list")?,
            legacy_encoding: env_parse("AXISCOPE_LEGACY_ENCODING")?
                .unwrap_or(defaults.legacy_encoding),
        };

        Ok(Self {
            inputs: InputPaths {
                keywords_dir: env_path("AXISCOPE_KEYWORDS_DIR"),
                clusters: env_path("AXISCOPE_CLUSTERS"),
                contents: env_path("AXISCOPE_CONTENTS"),
                network: env_path("AXISCOPE_NETWORK"),
            },
            pipeline,
        })
    }

    /// Check that the keyword directory is configured.
    pub fn require_keywords(&self) -> Result<&PathBuf> {
        self.inputs.keywords_dir.as_ref().context(
            "Keyword directory not set. Pass --keywords or set AXISCOPE_KEYWORDS_DIR.",
        )
    }

    /// Check that both document tables are configured.
    pub fn require_documents(&self) -> Result<(&PathBuf, &PathBuf)> {
        let clusters = self.inputs.clusters.as_ref().context(
            "Cluster table not set. Pass --clusters or set AXISCOPE_CLUSTERS.",
        )?;
        let contents = self.inputs.contents.as_ref().context(
            "Content table not set. Pass --contents or set AXISCOPE_CONTENTS.",
        )?;
        Ok((clusters, contents))
    }
}

/// Parse a comma-separated cluster list such as "0,1,2,3" or "unassigned,0,1".
pub fn parse_cluster_list(list: &str) -> Result<BTreeSet<ClusterLabel>> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<ClusterLabel>().map_err(anyhow::Error::msg))
        .collect()
}

/// A blank value leaves the cluster set undeclared.
fn declared_clusters(raw: Option<String>) -> Result<Option<BTreeSet<ClusterLabel>>> {
    raw.filter(|list| !list.trim().is_empty())
        .map(|list| parse_cluster_list(&list))
        .transpose()
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key).ok().filter(|v| !v.is_empty()).map(PathBuf::from)
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| anyhow::anyhow!("{key} has an invalid value: {value:?}")),
        Err(_) => Ok(None),
    }
}

fn env_enum<T: ValueEnum>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(value) => T::from_str(value.trim(), true)
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{key}: {e}")),
        Err(_) => Ok(None),
    }
}
