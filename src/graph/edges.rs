//! Article-pair edges and their aggregation onto outlet pairs.

use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::types::{AggregatedEdge, DatedDocument, RawEdge};
use crate::vector::{cosine_from_parts, TermVector};
use crate::TARGET_GRAPH;

/// Finds every ordered pair `(i, j)` with `date(i) < date(j)` whose cosine
/// similarity is at least `threshold`.
///
/// Pairs with equal dates never qualify. Work is split across the rayon pool
/// by source article; each task only reads the shared vectors, and the result
/// keeps `(i, j)` order regardless of scheduling.
pub fn find_raw_edges(
    documents: &[DatedDocument],
    vectors: &[TermVector],
    threshold: f64,
) -> Vec<RawEdge> {
    debug_assert_eq!(documents.len(), vectors.len());
    let n = documents.len().min(vectors.len());
    let magnitudes: Vec<f64> = vectors[..n].par_iter().map(TermVector::magnitude).collect();

    let edges: Vec<RawEdge> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            let source = &documents[i];
            let magnitudes = &magnitudes;
            (0..n).filter_map(move |j| {
                let target = &documents[j];
                if i == j || source.published >= target.published {
                    return None;
                }
                let similarity =
                    cosine_from_parts(vectors[i].dot(&vectors[j]), magnitudes[i], magnitudes[j]);
                (similarity >= threshold).then(|| RawEdge {
                    source_outlet: source.outlet.clone(),
                    target_outlet: target.outlet.clone(),
                    similarity,
                    source_article: i,
                    target_article: j,
                })
            })
        })
        .collect();

    info!(target: TARGET_GRAPH, "Raw edges >= {}: {}", threshold, edges.len());
    edges
}

/// Counts qualifying article pairs per `(source, target)` outlet pair.
///
/// Same-outlet pairs are kept. The result is sorted by source, then target.
pub fn aggregate_edges(raw_edges: &[RawEdge]) -> Vec<AggregatedEdge> {
    let grouped: BTreeMap<(&str, &str), (usize, f64)> =
        raw_edges
            .iter()
            .fold(BTreeMap::new(), |mut acc, edge| {
                let entry = acc
                    .entry((edge.source_outlet.as_str(), edge.target_outlet.as_str()))
                    .or_insert((0, 0.0));
                entry.0 += 1;
                entry.1 += edge.similarity;
                acc
            });

    let aggregated: Vec<AggregatedEdge> = grouped
        .into_iter()
        .map(|((source, target), (count, similarity_sum))| AggregatedEdge {
            source: source.to_string(),
            target: target.to_string(),
            count,
            mean_similarity: similarity_sum / count as f64,
        })
        .collect();

    for edge in &aggregated {
        debug!(
            target: TARGET_GRAPH,
            "{} -> {}: {} pairs (mean similarity {:.3})",
            edge.source, edge.target, edge.count, edge.mean_similarity
        );
    }
    info!(target: TARGET_GRAPH, "Aggregated edges: {}", aggregated.len());

    aggregated
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn doc(outlet: &str, day: u32) -> DatedDocument {
        DatedDocument {
            outlet: outlet.to_string(),
            published: NaiveDate::from_ymd_opt(2014, 1, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    fn raw(source: &str, target: &str, similarity: f64) -> RawEdge {
        RawEdge {
            source_outlet: source.to_string(),
            target_outlet: target.to_string(),
            similarity,
            source_article: 0,
            target_article: 1,
        }
    }

    #[test]
    fn test_edges_follow_time() {
        let documents = vec![doc("B", 5), doc("A", 1), doc("C", 9)];
        let v = TermVector::from_dense(&[1.0, 2.0]);
        let vectors = vec![v.clone(), v.clone(), v];
        let edges = find_raw_edges(&documents, &vectors, 0.5);

        let pairs: Vec<(usize, usize)> = edges
            .iter()
            .map(|e| (e.source_article, e.target_article))
            .collect();
        assert_eq!(pairs, vec![(0, 2), (1, 0), (1, 2)]);
        for edge in &edges {
            assert!(documents[edge.source_article].published < documents[edge.target_article].published);
            assert_eq!(edge.source_outlet, documents[edge.source_article].outlet);
            assert_eq!(edge.target_outlet, documents[edge.target_article].outlet);
        }
    }

    #[test]
    fn test_equal_dates_never_link() {
        let documents = vec![doc("A", 3), doc("B", 3)];
        let v = TermVector::from_dense(&[1.0]);
        assert!(find_raw_edges(&documents, &[v.clone(), v], 0.0).is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // cos = 0.6 exactly: (3,4)·(1,0) / (5·1)
        let documents = vec![doc("A", 1), doc("B", 2)];
        let vectors = vec![
            TermVector::from_dense(&[3.0, 4.0]),
            TermVector::from_dense(&[1.0, 0.0]),
        ];
        let similarity = cosine_from_parts(
            vectors[0].dot(&vectors[1]),
            vectors[0].magnitude(),
            vectors[1].magnitude(),
        );
        assert_eq!(find_raw_edges(&documents, &vectors, similarity).len(), 1);
        assert!(find_raw_edges(&documents, &vectors, similarity + 1e-9).is_empty());
    }

    #[test]
    fn test_zero_vectors_only_link_at_zero_threshold() {
        let documents = vec![doc("A", 1), doc("B", 2)];
        let vectors = vec![TermVector::default(), TermVector::from_dense(&[1.0])];
        assert!(find_raw_edges(&documents, &vectors, 0.5).is_empty());
        let edges = find_raw_edges(&documents, &vectors, 0.0);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].similarity, 0.0);
    }

    #[test]
    fn test_aggregate_counts_pairs() {
        let edges = vec![
            raw("A", "B", 0.9),
            raw("A", "B", 0.5),
            raw("B", "A", 0.7),
            raw("A", "A", 0.6),
        ];
        let aggregated = aggregate_edges(&edges);
        let summary: Vec<(&str, &str, usize)> = aggregated
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str(), e.count))
            .collect();
        assert_eq!(summary, vec![("A", "A", 1), ("A", "B", 2), ("B", "A", 1)]);
        assert!((aggregated[1].mean_similarity - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_edges(&[]).is_empty());
    }
}
