//! End-to-end run: load, vectorize, link, aggregate, classify, write.

use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use tracing::info;

use crate::config::PipelineConfig;
use crate::corpus::{load_corpus, LoadedCorpus};
use crate::graph::{
    aggregate_edges, classify_nodes, find_raw_edges, AggregatedEdge, Classification,
    DatedDocument,
};
use crate::output::{write_artifacts, WrittenArtifacts};
use crate::vector::{TfIdfModel, Tokenizer};

/// The in-memory result of every stage after loading.
#[derive(Debug, Clone)]
pub struct OutletGraph {
    pub vocabulary_size: usize,
    pub raw_edge_count: usize,
    pub edges: Vec<AggregatedEdge>,
    pub classification: Classification,
    pub timings: Vec<(&'static str, Duration)>,
}

/// What a completed run produced, for the CLI summary.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub articles_loaded: usize,
    pub files_skipped: usize,
    pub graph: OutletGraph,
    pub artifacts: WrittenArtifacts,
    pub elapsed: Duration,
}

/// Runs vectorization, similarity, aggregation and classification over an
/// already loaded corpus. Nothing is written.
pub fn build_graph(corpus: LoadedCorpus, config: &PipelineConfig) -> OutletGraph {
    let mut timings = Vec::new();
    let outlets = corpus.outlets();

    let stage = Instant::now();
    let tokenizer = Tokenizer::new().with_stemming(config.stem);
    let bodies: Vec<&str> = corpus.articles.iter().map(|a| a.body.as_str()).collect();
    let model = TfIdfModel::from_texts(&bodies, &tokenizer, config.idf);
    timings.push(("tf-idf", stage.elapsed()));

    // Only outlet and date are needed past this point.
    let documents: Vec<DatedDocument> = corpus
        .articles
        .into_iter()
        .map(|article| DatedDocument {
            outlet: article.outlet,
            published: article.published,
        })
        .collect();

    let stage = Instant::now();
    let raw_edges = find_raw_edges(&documents, &model.vectors, config.threshold);
    timings.push(("similarity", stage.elapsed()));

    let stage = Instant::now();
    let edges = aggregate_edges(&raw_edges);
    timings.push(("aggregate", stage.elapsed()));

    let stage = Instant::now();
    let classification = classify_nodes(&outlets, &edges);
    timings.push(("classify", stage.elapsed()));

    OutletGraph {
        vocabulary_size: model.vocabulary.len(),
        raw_edge_count: raw_edges.len(),
        edges,
        classification,
        timings,
    }
}

fn run_stages(config: &PipelineConfig) -> Result<PipelineReport> {
    let start = Instant::now();

    info!("Loading articles from {}", config.input_dir.display());
    let stage = Instant::now();
    let corpus = load_corpus(&config.input_dir)?;
    let load_time = stage.elapsed();
    let articles_loaded = corpus.articles.len();
    let files_skipped = corpus.skipped.len();

    let mut graph = build_graph(corpus, config);
    graph.timings.insert(0, ("load", load_time));

    let stage = Instant::now();
    let artifacts = write_artifacts(
        &config.output_dir,
        &graph.classification.nodes,
        &graph.edges,
    )?;
    graph.timings.push(("write", stage.elapsed()));

    Ok(PipelineReport {
        articles_loaded,
        files_skipped,
        graph,
        artifacts,
        elapsed: start.elapsed(),
    })
}

/// Runs the whole pipeline with `config`.
///
/// Artifacts are written only after every other stage has succeeded. When
/// `config.threads` is nonzero the parallel stages run on a dedicated pool of
/// that size.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport> {
    config.validate()?;
    info!(
        "Starting run: threshold={} idf={} stem={} threads={}",
        config.threshold,
        config.idf,
        config.stem,
        if config.threads == 0 {
            "default".to_string()
        } else {
            config.threads.to_string()
        }
    );

    let report = if config.threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .context("Failed to build worker thread pool")?;
        pool.install(|| run_stages(config))?
    } else {
        run_stages(config)?
    };

    info!("Pipeline completed in {:.2?}", report.elapsed);
    for (name, elapsed) in &report.graph.timings {
        info!("  {:<10} {:.2?}", name, elapsed);
    }

    Ok(report)
}
