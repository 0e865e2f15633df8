use std::collections::HashMap;

/// Terms that carry a nonzero TF-IDF weight somewhere in the corpus, in
/// lexicographic order. The position of a term is its vector index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Builds a vocabulary from terms that are already sorted and distinct.
    pub(crate) fn from_sorted(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        Self { terms, index }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// TF-IDF weights of one document over the shared vocabulary.
///
/// Only nonzero weights are stored, ordered by vocabulary index. Sums are
/// accumulated in that order, which yields exactly the values a dense vector
/// would produce since every skipped position contributes `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    entries: Vec<(usize, f64)>,
}

impl TermVector {
    /// Drops zero weights and sorts by index.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, weight)| weight != 0.0);
        entries.sort_by_key(|&(idx, _)| idx);
        Self { entries }
    }

    /// Builds a sparse vector from a dense weight slice.
    pub fn from_dense(weights: &[f64]) -> Self {
        Self::from_entries(weights.iter().copied().enumerate().collect())
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of nonzero dimensions.
    pub fn active_dimensions(&self) -> usize {
        self.entries.len()
    }

    pub fn weight(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(idx, _)| idx)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn magnitude(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, w)| w * w)
            .sum::<f64>()
            .sqrt()
    }

    pub fn dot(&self, other: &TermVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            if a_idx == b_idx {
                sum += a_w * b_w;
                i += 1;
                j += 1;
            } else if a_idx < b_idx {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }

    /// Expands to a dense vector over `dimensions` vocabulary slots.
    ///
    /// Together with [`calculate_direct_similarity`](super::calculate_direct_similarity)
    /// this is the dense reference the sparse arithmetic must reproduce
    /// exactly; the pipeline itself never densifies.
    pub fn to_dense(&self, dimensions: usize) -> Vec<f64> {
        let mut dense = vec![0.0; dimensions];
        for &(idx, weight) in &self.entries {
            if idx < dimensions {
                dense[idx] = weight;
            }
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_lookup() {
        let vocab = Vocabulary::from_sorted(vec!["abila".into(), "fire".into(), "kronos".into()]);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.index_of("fire"), Some(1));
        assert_eq!(vocab.index_of("water"), None);
        assert_eq!(vocab.term(2), Some("kronos"));
    }

    #[test]
    fn test_sparse_matches_dense() {
        let a = TermVector::from_dense(&[0.0, 1.5, 0.0, 2.0, 0.25]);
        let b = TermVector::from_entries(vec![(4, 3.0), (1, 0.5), (2, 0.0)]);
        assert_eq!(a.active_dimensions(), 3);
        assert_eq!(b.active_dimensions(), 2);
        assert_eq!(a.dot(&b), 1.5 * 0.5 + 0.25 * 3.0);
        assert_eq!(b.to_dense(5), vec![0.0, 0.5, 0.0, 0.0, 3.0]);
        assert_eq!(a.weight(3), 2.0);
        assert_eq!(a.weight(0), 0.0);
        assert_eq!(TermVector::default().magnitude(), 0.0);
    }
}
