use chrono::NaiveDateTime;
use serde::Serialize;

/// The parts of an article that outlive vectorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedDocument {
    pub outlet: String,
    pub published: NaiveDateTime,
}

/// One qualifying article pair: `source_article` was published strictly
/// before `target_article` and their bodies are similar enough.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEdge {
    pub source_outlet: String,
    pub target_outlet: String,
    pub similarity: f64,
    pub source_article: usize,
    pub target_article: usize,
}

/// Article pairs collapsed onto an outlet pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedEdge {
    pub source: String,
    pub target: String,
    pub count: usize,
    #[serde(skip)]
    pub mean_similarity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Primary,
    Derivative,
}

/// A classified outlet, serialized as `{id, type, out, inn}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutletNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub out: usize,
    pub inn: usize,
    #[serde(skip)]
    pub ratio: f64,
}
