use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use prettytable::{Cell, Row, Table};
use std::path::PathBuf;

use provenance::config::{IdfFormula, PipelineConfig};
use provenance::graph::NodeType;
use provenance::logging::configure_logging;
use provenance::PipelineReport;

/// Builds the outlet provenance graph from a corpus of dated news articles.
///
/// Usage:
///    provenance --input "MC1/News Articles" --output output --threshold 0.5
///
/// Writes nodes.json and edges.json into the output directory.
#[derive(Parser)]
#[clap(name = "provenance", about = "Infer source-to-derivative links between news outlets")]
struct Cli {
    /// Corpus root: one subdirectory of .txt articles per outlet [env: PROVENANCE_INPUT]
    #[clap(short, long)]
    input: Option<PathBuf>,

    /// Directory that receives nodes.json and edges.json [env: PROVENANCE_OUTPUT]
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Minimum cosine similarity (inclusive) for an article pair to link [env: PROVENANCE_SIM_THRESHOLD]
    #[clap(short, long)]
    threshold: Option<f64>,

    /// Inverse document frequency formula
    #[clap(long, value_enum, default_value_t = IdfFormula::Natural)]
    idf: IdfFormula,

    /// Apply English Snowball stemming before weighting terms
    #[clap(long)]
    stem: bool,

    /// Worker threads for the parallel stages, 0 for one per core [env: PROVENANCE_THREADS]
    #[clap(long)]
    threads: Option<usize>,

    /// Directory for the rolling log file
    #[clap(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Print the classified outlets and heaviest edges when done
    #[clap(short, long)]
    summary: bool,
}

impl Cli {
    fn into_config(self) -> PipelineConfig {
        let mut config = PipelineConfig::from_env()
            .with_idf(self.idf)
            .with_stemming(self.stem);
        if let Some(input) = self.input {
            config.input_dir = input;
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if let Some(threshold) = self.threshold {
            config = config.with_threshold(threshold);
        }
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        config
    }
}

fn print_summary(report: &PipelineReport) {
    let classification = &report.graph.classification;

    println!("\n{}", "═".repeat(72).bright_blue());
    println!(
        "{}  {} articles, {} skipped, {} terms, {} article links",
        "OUTLET GRAPH".bright_blue(),
        report.articles_loaded,
        report.files_skipped,
        report.graph.vocabulary_size,
        report.graph.raw_edge_count
    );
    println!("{}", "═".repeat(72).bright_blue());

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Outlet"),
        Cell::new("Type"),
        Cell::new("Out"),
        Cell::new("In"),
        Cell::new("Log ratio"),
    ]));
    for node in &classification.nodes {
        let node_type = match node.node_type {
            NodeType::Primary => "primary".bright_green().to_string(),
            NodeType::Derivative => "derivative".bright_yellow().to_string(),
        };
        table.add_row(Row::new(vec![
            Cell::new(&node.id),
            Cell::new(&node_type),
            Cell::new(&node.out.to_string()),
            Cell::new(&node.inn.to_string()),
            Cell::new(&format!("{:.4}", node.ratio)),
        ]));
    }
    table.printstd();
    println!(
        "{}: {:.4}",
        "Median log ratio".bright_blue(),
        classification.median
    );

    let mut heaviest: Vec<_> = report.graph.edges.iter().collect();
    heaviest.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.source.cmp(&b.source)));
    if !heaviest.is_empty() {
        let mut edge_table = Table::new();
        edge_table.add_row(Row::new(vec![
            Cell::new("Source"),
            Cell::new("Target"),
            Cell::new("Count"),
            Cell::new("Mean similarity"),
        ]));
        for edge in heaviest.into_iter().take(20) {
            edge_table.add_row(Row::new(vec![
                Cell::new(&edge.source),
                Cell::new(&edge.target),
                Cell::new(&edge.count.to_string()),
                Cell::new(&format!("{:.3}", edge.mean_similarity)),
            ]));
        }
        edge_table.printstd();
    }

    println!(
        "{}: {}",
        "Nodes".bright_blue(),
        report.artifacts.nodes_path.display()
    );
    println!(
        "{}: {}",
        "Edges".bright_blue(),
        report.artifacts.edges_path.display()
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    configure_logging(&cli.log_dir);

    let summary = cli.summary;
    let config = cli.into_config();
    let report = provenance::run(&config)?;

    if summary {
        print_summary(&report);
    }

    Ok(())
}
