//! Header/body splitting for article files.

use super::types::{ArticleHeader, HeaderKey, ParsedDocument};

/// Matches a trimmed line against the recognized `KEY: value` headers.
///
/// # Returns
/// - `Some((key, value))` with the value trimmed, or `None` when the line is
///   not a recognized header.
pub fn parse_header_line(line: &str) -> Option<(HeaderKey, String)> {
    HeaderKey::ALL.iter().find_map(|&key| {
        line.strip_prefix(key.as_str())
            .and_then(|rest| rest.strip_prefix(':'))
            .map(|value| (key, value.trim().to_string()))
    })
}

/// Splits the raw text of an article into its header block and body.
///
/// Blank lines inside the header block are skipped. The first line that is
/// neither blank nor a recognized header starts the body, which runs to the
/// end of the file. Both LF and CRLF line endings are accepted.
pub fn parse_document(content: &str) -> ParsedDocument {
    let lines: Vec<&str> = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut header = ArticleHeader::default();
    let mut body_start = lines.len();

    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_header_line(trimmed) {
            Some((key, value)) => header.set_if_absent(key, value),
            None => {
                body_start = idx;
                break;
            }
        }
    }

    let body = lines[body_start..].join("\n").trim().to_string();

    ParsedDocument { header, body }
}
