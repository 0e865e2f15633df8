pub mod config;
pub mod corpus;
pub mod environment;
pub mod error;
pub mod graph;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod vector;

pub const TARGET_CORPUS: &str = "corpus";
pub const TARGET_VECTOR: &str = "vector";
pub const TARGET_GRAPH: &str = "graph";
pub const TARGET_OUTPUT: &str = "output";

pub use config::{IdfFormula, PipelineConfig};
pub use error::{PipelineError, SkipReason};
pub use pipeline::{run, PipelineReport};
