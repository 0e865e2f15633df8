//! TF-IDF model over the whole corpus.
//!
//! Term frequency is the raw count of a term in a document. Inverse document
//! frequency follows [`IdfFormula`]. The vocabulary keeps only terms that end
//! up with a nonzero weight in at least one document, so under the plain
//! formula a term found in every document is left out entirely. The default
//! natural formula keeps it.

use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::info;

use super::tokenizer::Tokenizer;
use super::types::{TermVector, Vocabulary};
use crate::config::IdfFormula;
use crate::TARGET_VECTOR;

#[derive(Debug, Clone)]
pub struct TfIdfModel {
    pub formula: IdfFormula,
    pub vocabulary: Vocabulary,
    /// IDF per vocabulary index.
    pub idf: Vec<f64>,
    /// One vector per input document, in input order.
    pub vectors: Vec<TermVector>,
}

impl TfIdfModel {
    /// Fits the model to tokenized documents.
    pub fn fit(documents: &[Vec<String>], formula: IdfFormula) -> Self {
        let n_docs = documents.len();

        let term_counts: Vec<HashMap<&str, usize>> = documents
            .par_iter()
            .map(|tokens| {
                let mut counts = HashMap::new();
                for token in tokens {
                    *counts.entry(token.as_str()).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let doc_freq: BTreeMap<&str, usize> =
            term_counts.iter().fold(BTreeMap::new(), |mut df, counts| {
                for term in counts.keys() {
                    *df.entry(*term).or_insert(0) += 1;
                }
                df
            });

        let (terms, idf): (Vec<String>, Vec<f64>) = doc_freq
            .iter()
            .map(|(term, &df)| (term.to_string(), formula.idf(n_docs, df)))
            .filter(|(_, idf)| *idf != 0.0)
            .unzip();
        let vocabulary = Vocabulary::from_sorted(terms);

        let vectors: Vec<TermVector> = term_counts
            .par_iter()
            .map(|counts| {
                TermVector::from_entries(
                    counts
                        .iter()
                        .filter_map(|(term, &tf)| {
                            vocabulary
                                .index_of(term)
                                .map(|idx| (idx, tf as f64 * idf[idx]))
                        })
                        .collect(),
                )
            })
            .collect();

        Self {
            formula,
            vocabulary,
            idf,
            vectors,
        }
    }

    /// Tokenizes `texts` and fits the model.
    pub fn from_texts<S: AsRef<str> + Sync>(
        texts: &[S],
        tokenizer: &Tokenizer,
        formula: IdfFormula,
    ) -> Self {
        let documents: Vec<Vec<String>> = texts
            .par_iter()
            .map(|text| tokenizer.tokenize(text.as_ref()))
            .collect();

        let model = Self::fit(&documents, formula);

        let distinct_tokens: usize = documents
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<HashSet<_>>()
            .len();
        info!(
            target: TARGET_VECTOR,
            "Built {} TF-IDF vectors over a vocabulary of {} terms ({} distinct tokens, {} idf)",
            model.vectors.len(),
            model.vocabulary.len(),
            distinct_tokens,
            formula
        );

        model
    }

    /// Weight of `term` in document `doc`, 0 when absent.
    pub fn weight(&self, doc: usize, term: &str) -> f64 {
        match (self.vectors.get(doc), self.vocabulary.index_of(term)) {
            (Some(vector), Some(idx)) => vector.weight(idx),
            _ => 0.0,
        }
    }
}
