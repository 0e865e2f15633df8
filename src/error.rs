use std::path::PathBuf;

use thiserror::Error;

/// Why a single article file was left out of the corpus. These never abort a
/// run; the loader logs them and moves on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("no PUBLISHED header")]
    MissingPublished,

    #[error("unparsable PUBLISHED value '{0}'")]
    InvalidDate(String),

    #[error("unreadable file: {0}")]
    Unreadable(String),
}

/// Errors that abort the whole run before any artifact is written.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read corpus root {path}: {source}")]
    ReadRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no article in {0} has a valid publication date")]
    EmptyCorpus(PathBuf),

    #[error("similarity threshold must be a finite value in [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
