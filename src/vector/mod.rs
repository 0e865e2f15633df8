//! Vector-space model for article bodies: tokenization, TF-IDF weighting and
//! cosine similarity.

pub mod similarity;
pub mod tfidf;
pub mod tokenizer;
pub mod types;

pub use similarity::*;
pub use tfidf::TfIdfModel;
pub use tokenizer::Tokenizer;
pub use types::*;
