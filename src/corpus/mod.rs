//! Corpus loading for the provenance pipeline.
//!
//! An input corpus is a directory with one subdirectory per news outlet,
//! each holding plain-text articles that start with a `KEY: value` header
//! block.

pub mod date;
pub mod loader;
pub mod parser;
pub mod types;

pub use self::date::parse_published;
pub use self::loader::{article_from_text, discover_files, load_article, load_corpus};
pub use self::parser::{parse_document, parse_header_line};
pub use self::types::*;
