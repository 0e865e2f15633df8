//! Corpus discovery and loading.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::date::parse_published;
use super::parser::parse_document;
use super::types::{Article, LoadedCorpus};
use crate::error::{PipelineError, SkipReason};
use crate::TARGET_CORPUS;

/// Finds every `.txt` file that sits directly inside an outlet directory.
///
/// # Returns
/// - Paths sorted lexicographically, or `PipelineError::ReadRoot` when the
///   root itself cannot be listed. Unreadable outlet directories are logged
///   and skipped.
pub fn discover_files(root: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let entries = fs::read_dir(root).map_err(|source| PipelineError::ReadRoot {
        path: root.to_path_buf(),
        source,
    })?;

    let mut outlet_dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    outlet_dirs.sort();

    let mut files = Vec::new();
    for dir in outlet_dirs {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(target: TARGET_CORPUS, "Skipping unreadable outlet directory {}: {}", dir.display(), err);
                continue;
            }
        };
        files.extend(
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_file() && is_text_file(path)),
        );
    }
    files.sort();

    Ok(files)
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}

/// Reads and validates one article file.
pub fn load_article(path: &Path) -> Result<Article, SkipReason> {
    let bytes = fs::read(path).map_err(|err| SkipReason::Unreadable(err.to_string()))?;
    let content = String::from_utf8_lossy(&bytes);
    article_from_text(path, &content)
}

/// Builds an article from already-read file contents.
///
/// The outlet is the name of the file's parent directory.
pub fn article_from_text(path: &Path, content: &str) -> Result<Article, SkipReason> {
    let document = parse_document(content);

    let published_raw = document
        .header
        .published
        .as_deref()
        .ok_or(SkipReason::MissingPublished)?;
    let published = parse_published(published_raw)
        .ok_or_else(|| SkipReason::InvalidDate(published_raw.to_string()))?;

    let outlet = path
        .parent()
        .and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Article {
        outlet,
        filename,
        header: document.header,
        body: document.body,
        published,
    })
}

/// Loads every article under `root`.
///
/// Files without a usable publication date are skipped with a warning. The
/// run fails when the root cannot be read or when no article survives.
pub fn load_corpus(root: &Path) -> Result<LoadedCorpus, PipelineError> {
    let start = Instant::now();
    let files = discover_files(root)?;
    info!(target: TARGET_CORPUS, "Found {} files to load under {}", files.len(), root.display());

    let results: Vec<(PathBuf, Result<Article, SkipReason>)> = files
        .into_par_iter()
        .map(|path| {
            let result = load_article(&path);
            (path, result)
        })
        .collect();

    let mut corpus = LoadedCorpus::default();
    for (path, result) in results {
        match result {
            Ok(article) => {
                debug!(target: TARGET_CORPUS, "Loaded {} ({})", path.display(), article.published);
                corpus.articles.push(article);
            }
            Err(reason) => {
                warn!(target: TARGET_CORPUS, "Skipping {}: {}", path.display(), reason);
                corpus.skipped.push((path, reason));
            }
        }
    }

    if corpus.articles.is_empty() {
        return Err(PipelineError::EmptyCorpus(root.to_path_buf()));
    }

    corpus
        .articles
        .sort_by(|a, b| (&a.outlet, &a.filename).cmp(&(&b.outlet, &b.filename)));

    info!(
        target: TARGET_CORPUS,
        "Loaded {} articles with valid dates ({} skipped) in {:.2?}",
        corpus.articles.len(),
        corpus.skipped.len(),
        start.elapsed()
    );

    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, outlet: &str, name: &str, content: &str) {
        let dir = root.join(outlet);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_article_from_text() {
        let path = Path::new("/corpus/World Journal/12.txt");
        let article = article_from_text(
            path,
            "TITLE: Protest\nPUBLISHED: 19 January 2014\n\nCrowds gathered.",
        )
        .unwrap();
        assert_eq!(article.outlet, "World Journal");
        assert_eq!(article.filename, "12.txt");
        assert_eq!(article.body, "Crowds gathered.");
        assert_eq!(article.header.title.as_deref(), Some("Protest"));
    }

    #[test]
    fn test_skip_reasons() {
        let path = Path::new("/corpus/Outlet/1.txt");
        assert_eq!(
            article_from_text(path, "TITLE: x\n\nbody").unwrap_err(),
            SkipReason::MissingPublished
        );
        assert_eq!(
            article_from_text(path, "PUBLISHED: someday\n\nbody").unwrap_err(),
            SkipReason::InvalidDate("someday".to_string())
        );
    }

    #[test]
    fn test_load_corpus_filters_and_sorts() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "Beta", "2.txt", "PUBLISHED: 2014/01/20\n\nsecond");
        write(root, "Alpha", "1.txt", "PUBLISHED: 2014/01/19\n\nfirst");
        write(root, "Alpha", "bad.txt", "PUBLISHED: not a date\n\nignored");
        write(root, "Alpha", "notes.md", "PUBLISHED: 2014/01/19\n\nnot a text file");
        write(root, "OnlyBad", "x.txt", "no header at all");
        fs::write(root.join("stray.txt"), "PUBLISHED: 2014/01/19\n\nstray").unwrap();

        let corpus = load_corpus(root).unwrap();
        let ids: Vec<(&str, &str)> = corpus
            .articles
            .iter()
            .map(|a| (a.outlet.as_str(), a.filename.as_str()))
            .collect();
        assert_eq!(ids, vec![("Alpha", "1.txt"), ("Beta", "2.txt")]);
        assert_eq!(corpus.skipped.len(), 2);
        assert_eq!(corpus.outlets(), vec!["Alpha".to_string(), "Beta".to_string()]);
    }

    #[test]
    fn test_empty_corpus_is_fatal() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "Outlet", "1.txt", "TITLE: undated\n\nbody");
        assert!(matches!(
            load_corpus(tmp.path()),
            Err(PipelineError::EmptyCorpus(_))
        ));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            load_corpus(&tmp.path().join("missing")),
            Err(PipelineError::ReadRoot { .. })
        ));
    }
}
