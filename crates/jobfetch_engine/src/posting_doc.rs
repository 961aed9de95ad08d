//! Reading posting documents back from disk.

use std::fs;
use std::path::Path;

use crate::persist::PersistError;

const TRUNCATED_MARKER: &str = "\n.[truncated]";

/// Front matter and body of a written posting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingDocument {
    pub source: String,
    pub fetched: String,
    pub company: Option<String>,
    pub position: Option<String>,
    pub body: String,
}

/// Parse a posting document. Returns `None` when the front matter is missing,
/// unterminated or lacks `source`.
pub fn parse_posting_document(content: &str) -> Option<PostingDocument> {
    let mut lines = content.lines();
    if lines.next()?.trim() != "---" {
        return None;
    }

    let mut doc = PostingDocument::default();
    let mut closed = false;
    for line in &mut lines {
        if line.trim() == "---" {
            closed = true;
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        match key.trim() {
            "source" => doc.source = value,
            "fetched" => doc.fetched = value,
            "company" => doc.company = Some(value),
            "position" => doc.position = Some(value),
            _ => {}
        }
    }
    if !closed || doc.source.is_empty() {
        return None;
    }

    doc.body = lines
        .collect::<Vec<_>>()
        .join("\n")
        .trim_start_matches('\n')
        .to_string();
    Some(doc)
}

/// Read and parse a posting file.
pub fn read_posting_document(path: &Path) -> Result<Option<PostingDocument>, PersistError> {
    let content = fs::read_to_string(path)?;
    Ok(parse_posting_document(&content))
}

/// Body text without front matter, cut to at most `max_bytes` on a char boundary.
pub fn body_preview(markdown: &str, max_bytes: usize) -> String {
    let stripped = strip_frontmatter(markdown);
    if stripped.len() <= max_bytes {
        return stripped.to_string();
    }
    let mut end = max_bytes;
    while end > 0 && !stripped.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{TRUNCATED_MARKER}", &stripped[..end])
}

fn strip_frontmatter(markdown: &str) -> &str {
    if let Some(rest) = markdown.strip_prefix("---\n") {
        if let Some(idx) = rest.find("\n---") {
            let after = &rest[idx + "\n---".len()..];
            let after = after.strip_prefix('\n').unwrap_or(after);
            return after.trim_start_matches('\n');
        }
    }
    markdown
}
