//! Primary/derivative classification of outlets.
//!
//! Each outlet gets `ratio = ln((out + 1) / (inn + 1))` from its weighted
//! degrees. Outlets strictly above the median ratio of the corpus are
//! primary; everything else, including ties at the median, is derivative.

use std::collections::BTreeMap;
use tracing::info;

use super::types::{AggregatedEdge, NodeType, OutletNode};
use crate::TARGET_GRAPH;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub nodes: Vec<OutletNode>,
    pub median: f64,
}

impl Classification {
    pub fn count(&self, node_type: NodeType) -> usize {
        self.nodes.iter().filter(|n| n.node_type == node_type).count()
    }
}

/// `(out, inn)` per outlet: summed edge counts as source and as target.
///
/// Every outlet in `outlets` gets an entry, zero when it has no edges.
pub fn degree_table<'a>(
    outlets: &'a [String],
    edges: &'a [AggregatedEdge],
) -> BTreeMap<&'a str, (usize, usize)> {
    let table: BTreeMap<&str, (usize, usize)> =
        outlets.iter().map(|id| (id.as_str(), (0, 0))).collect();

    edges.iter().fold(table, |mut table, edge| {
        table.entry(edge.source.as_str()).or_insert((0, 0)).0 += edge.count;
        table.entry(edge.target.as_str()).or_insert((0, 0)).1 += edge.count;
        table
    })
}

pub fn log_ratio(out: usize, inn: usize) -> f64 {
    ((out as f64 + 1.0) / (inn as f64 + 1.0)).ln()
}

/// Median of `values`; the mean of the two middle values for even sizes.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Classifies every outlet in `outlets` against the aggregated edge set.
///
/// Edges whose endpoints are not in `outlets` still count toward degrees but
/// never produce a node. Nodes come back sorted by id.
pub fn classify_nodes(outlets: &[String], edges: &[AggregatedEdge]) -> Classification {
    let degrees = degree_table(outlets, edges);

    let mut ids: Vec<&str> = outlets.iter().map(String::as_str).collect();
    ids.sort_unstable();
    ids.dedup();

    let ratios: Vec<(&str, usize, usize, f64)> = ids
        .iter()
        .map(|&id| {
            let (out, inn) = degrees.get(id).copied().unwrap_or((0, 0));
            (id, out, inn, log_ratio(out, inn))
        })
        .collect();

    let all_ratios: Vec<f64> = ratios.iter().map(|r| r.3).collect();
    let median_ratio = median(&all_ratios).unwrap_or(0.0);

    let nodes: Vec<OutletNode> = ratios
        .into_iter()
        .map(|(id, out, inn, ratio)| OutletNode {
            id: id.to_string(),
            node_type: if ratio > median_ratio {
                NodeType::Primary
            } else {
                NodeType::Derivative
            },
            out,
            inn,
            ratio,
        })
        .collect();

    let classification = Classification {
        nodes,
        median: median_ratio,
    };
    info!(
        target: TARGET_GRAPH,
        "Classified {} outlets (median log ratio {:.4}): {} primary, {} derivative",
        classification.nodes.len(),
        median_ratio,
        classification.count(NodeType::Primary),
        classification.count(NodeType::Derivative)
    );

    classification
}
