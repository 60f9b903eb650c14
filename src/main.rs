use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use axiscope::config::{
    parse_cluster_list, Config, Damping, NormalizationMode, ScoringPolicy, Weighting,
};
use axiscope::corpus::loader;
use axiscope::output::{tables, terminal, writer};
use axiscope::pipeline::run as pipeline;

/// Axiscope: place documents on bipolar semantic axes.
///
/// Scores each document against weighted keyword lists for both ends of
/// every axis, normalizes the resulting vectors, and summarizes them per
/// cluster.
#[derive(Parser)]
#[command(name = "axiscope", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write every table
    Run(RunArgs),

    /// Write only the raw and normalized vector tables
    Vectors(RunArgs),

    /// Write the axis combination table from the keyword corpus
    Combinations {
        /// Keyword directory (overrides AXISCOPE_KEYWORDS_DIR)
        #[arg(long)]
        keywords: Option<PathBuf>,

        /// Output directory (overrides AXISCOPE_OUTPUT_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Load and validate the keyword corpus, then list its axes
    Inspect {
        /// Keyword directory (overrides AXISCOPE_KEYWORDS_DIR)
        #[arg(long)]
        keywords: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Keyword directory: <dir>/<group>/<NN. endpoint>.csv
    #[arg(long)]
    keywords: Option<PathBuf>,

    /// Cluster-assignment table
    #[arg(long)]
    clusters: Option<PathBuf>,

    /// Document-content table
    #[arg(long)]
    contents: Option<PathBuf>,

    /// Network table with connected-node-counts
    #[arg(long)]
    network: Option<PathBuf>,

    /// Output directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[arg(long, value_enum)]
    normalization: Option<NormalizationMode>,

    #[arg(long, value_enum)]
    weighting: Option<Weighting>,

    #[arg(long, value_enum)]
    damping: Option<Damping>,

    #[arg(long, value_enum)]
    scoring: Option<ScoringPolicy>,

    /// Min-max each endpoint across the corpus before differencing
    #[arg(long)]
    endpoint_prescale: bool,

    /// Comma-separated cluster labels every document must belong to
    #[arg(long)]
    declared_clusters: Option<String>,

    /// Skip the EUC-KR copies of the cluster and combination tables
    #[arg(long)]
    no_legacy_encoding: bool,
}

impl RunArgs {
    /// Layer CLI flags over the environment configuration.
    fn apply(self, config: &mut Config) -> Result<()> {
        let inputs = &mut config.inputs;
        inputs.keywords_dir = self.keywords.or(inputs.keywords_dir.take());
        inputs.clusters = self.clusters.or(inputs.clusters.take());
        inputs.contents = self.contents.or(inputs.contents.take());
        inputs.network = self.network.or(inputs.network.take());

        let pipeline = &mut config.pipeline;
        if let Some(dir) = self.output_dir {
            pipeline.output_dir = dir;
        }
        if let Some(mode) = self.normalization {
            pipeline.normalization = mode;
        }
        if let Some(weighting) = self.weighting {
            pipeline.weighting = weighting;
        }
        if let Some(damping) = self.damping {
            pipeline.damping = damping;
        }
        if let Some(scoring) = self.scoring {
            pipeline.scoring = scoring;
        }
        if self.endpoint_prescale {
            pipeline.endpoint_prescale = true;
        }
        if let Some(list) = self.declared_clusters {
            pipeline.declared_clusters =
                Some(parse_cluster_list(&list).context("--declared-clusters")?);
        }
        if self.no_legacy_encoding {
            pipeline.legacy_encoding = false;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct RunManifest<'a> {
    generated_at: String,
    config: &'a axiscope::config::PipelineConfig,
    documents: usize,
    axes: &'a [String],
    clusters: usize,
    files: Vec<&'a str>,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("axiscope=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let mut config = Config::load()?;
            args.apply(&mut config)?;

            let corpus = loader::load_keyword_dir(config.require_keywords()?)?;
            let (clusters, contents) = config.require_documents()?;
            let documents = loader::load_documents(clusters, contents)?;
            let connectivity = match &config.inputs.network {
                Some(path) => loader::load_network(path)?,
                None => {
                    info!("No network table configured, connected node counts left empty");
                    HashMap::new()
                }
            };

            println!(
                "Scoring {} documents on {} axes...",
                documents.len(),
                corpus.axis_count()
            );
            let output = pipeline::run(&config.pipeline, &corpus, &documents, &connectivity)?;

            let tables = tables::all_tables(&documents, &output)?;
            let mut files = writer::render_all(&tables, config.pipeline.legacy_encoding)?;
            let manifest = RunManifest {
                generated_at: chrono::Utc::now().to_rfc3339(),
                config: &config.pipeline,
                documents: documents.len(),
                axes: &output.vectors.axes,
                clusters: output.clusters.len(),
                files: files.iter().map(|f| f.file_name.as_str()).collect(),
            };
            let manifest_file = writer::render_json("run_manifest.json", &manifest)?;
            files.push(manifest_file);

            let written = writer::write_all(&config.pipeline.output_dir, &files)?;

            terminal::display_clusters(&output.vectors.axes, &output.clusters);
            println!(
                "{}",
                format!(
                    "Wrote {} files to {}",
                    written.len(),
                    config.pipeline.output_dir.display()
                )
                .bold()
            );
        }

        Commands::Vectors(args) => {
            let mut config = Config::load()?;
            args.apply(&mut config)?;

            let corpus = loader::load_keyword_dir(config.require_keywords()?)?;
            let (clusters, contents) = config.require_documents()?;
            let documents = loader::load_documents(clusters, contents)?;

            let vectors = pipeline::vectorize(&config.pipeline, &corpus, &documents)?;
            let tables =
                tables::vector_tables(&vectors.axes, &documents, &vectors.raw, &vectors.normalized)?;
            let files = writer::render_all(&tables, config.pipeline.legacy_encoding)?;
            let written = writer::write_all(&config.pipeline.output_dir, &files)?;

            println!(
                "Wrote {} vector tables for {} documents to {}",
                written.len(),
                documents.len(),
                config.pipeline.output_dir.display()
            );
        }

        Commands::Combinations {
            keywords,
            output_dir,
        } => {
            let mut config = Config::load()?;
            if keywords.is_some() {
                config.inputs.keywords_dir = keywords;
            }
            if let Some(dir) = output_dir {
                config.pipeline.output_dir = dir;
            }

            let corpus = loader::load_keyword_dir(config.require_keywords()?)?;
            let pairs = axiscope::vectors::combinations::axis_combinations(&corpus.axis_names());
            let table = tables::combinations_table(&pairs);
            let files = writer::render_all(&[table], config.pipeline.legacy_encoding)?;
            writer::write_all(&config.pipeline.output_dir, &files)?;

            println!(
                "Wrote {} axis combinations to {}",
                pairs.len(),
                config.pipeline.output_dir.display()
            );
        }

        Commands::Inspect { keywords } => {
            let mut config = Config::load()?;
            if keywords.is_some() {
                config.inputs.keywords_dir = keywords;
            }
            let corpus = loader::load_keyword_dir(config.require_keywords()?)?;
            terminal::display_corpus(&corpus);
        }
    }

    Ok(())
}
