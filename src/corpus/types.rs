use chrono::NaiveDateTime;
use std::path::PathBuf;

use crate::error::SkipReason;

/// Header keys recognized at the top of an article file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKey {
    Source,
    Title,
    Author,
    Published,
    Publisher,
    Location,
}

impl HeaderKey {
    pub const ALL: [HeaderKey; 6] = [
        HeaderKey::Source,
        HeaderKey::Title,
        HeaderKey::Author,
        HeaderKey::Published,
        HeaderKey::Publisher,
        HeaderKey::Location,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HeaderKey::Source => "SOURCE",
            HeaderKey::Title => "TITLE",
            HeaderKey::Author => "AUTHOR",
            HeaderKey::Published => "PUBLISHED",
            HeaderKey::Publisher => "PUBLISHER",
            HeaderKey::Location => "LOCATION",
        }
    }
}

/// Metadata taken from the header block. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleHeader {
    pub source: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub published: Option<String>,
    pub publisher: Option<String>,
    pub location: Option<String>,
}

impl ArticleHeader {
    pub fn get(&self, key: HeaderKey) -> Option<&str> {
        match key {
            HeaderKey::Source => self.source.as_deref(),
            HeaderKey::Title => self.title.as_deref(),
            HeaderKey::Author => self.author.as_deref(),
            HeaderKey::Published => self.published.as_deref(),
            HeaderKey::Publisher => self.publisher.as_deref(),
            HeaderKey::Location => self.location.as_deref(),
        }
    }

    /// Stores `value` under `key` unless the key was already seen.
    pub fn set_if_absent(&mut self, key: HeaderKey, value: String) {
        let slot = match key {
            HeaderKey::Source => &mut self.source,
            HeaderKey::Title => &mut self.title,
            HeaderKey::Author => &mut self.author,
            HeaderKey::Published => &mut self.published,
            HeaderKey::Publisher => &mut self.publisher,
            HeaderKey::Location => &mut self.location,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

/// A header block and body split out of one file, before date validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub header: ArticleHeader,
    pub body: String,
}

/// An article with a valid publication date.
#[derive(Debug, Clone)]
pub struct Article {
    pub outlet: String,
    pub filename: String,
    pub header: ArticleHeader,
    pub body: String,
    pub published: NaiveDateTime,
}

/// Loader output: the valid articles plus every file that was left out.
#[derive(Debug, Default)]
pub struct LoadedCorpus {
    pub articles: Vec<Article>,
    pub skipped: Vec<(PathBuf, SkipReason)>,
}

impl LoadedCorpus {
    /// Distinct outlet ids among loaded articles, sorted.
    pub fn outlets(&self) -> Vec<String> {
        let mut outlets: Vec<String> = self.articles.iter().map(|a| a.outlet.clone()).collect();
        outlets.sort();
        outlets.dedup();
        outlets
    }
}
