// crates/parse_snippets/src/lib.rs

//! Line-oriented scanner for named snippet tags embedded in source comments.
//!
//! Tags are recognized purely as substrings within a line; the scanner never
//! interprets the language of the file it reads. A snippet's code is the
//! exact text of the lines strictly between its start and end markers.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use snippet_errors::{Diagnostic, DiagnosticKind, Diagnostics};

/// Marker that opens a named snippet scope. The tag name is the text between
/// this marker and the next `]` on the same line, trimmed.
pub const SNIPPET_START: &str = "snippet-start:[";

/// Marker that closes a previously opened snippet scope.
pub const SNIPPET_END: &str = "snippet-end:[";

/// One extracted excerpt.
///
/// `line_start` and `line_end` are zero-based indices of the marker lines.
/// `line_end` stays `None` while the scope is open; a snippet that still has
/// no end when its file runs out is never valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub id: String,
    pub file: PathBuf,
    pub line_start: usize,
    pub line_end: Option<usize>,
    pub code: String,
}

impl Snippet {
    /// True once the closing tag has been matched.
    pub fn is_complete(&self) -> bool {
        self.line_end.is_some()
    }
}

/// Extracts the tag name following `token` on `line`: everything up to the
/// next `]`, trimmed, with `prefix` prepended. A line with no closing `]`
/// yields the whole remainder of the line as the tag text.
fn tag_from_line(token: &str, line: &str, prefix: &str) -> String {
    let tag_start = line.find(token).map(|idx| idx + token.len()).unwrap_or(0);
    let rest = &line[tag_start..];
    let name = match rest.find(']') {
        Some(end) => &rest[..end],
        None => rest,
    };
    format!("{}{}", prefix, name.trim())
}

/// Scans `content` once, line by line, and returns every snippet found plus
/// any malformation diagnostics.
///
/// Scopes may overlap: a line inside two open scopes is appended to both
/// snippets. The currently-open tags are tracked in opening order, so
/// per-line appends and end-of-file diagnostics are deterministic.
pub fn parse_snippets(
    content: &str,
    file: &Path,
    prefix: &str,
) -> (BTreeMap<String, Snippet>, Diagnostics) {
    let mut snippets: BTreeMap<String, Snippet> = BTreeMap::new();
    let mut errors = Diagnostics::new();
    let mut open_tags: Vec<String> = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        if line.contains(SNIPPET_START) {
            let tag = tag_from_line(SNIPPET_START, line, prefix);
            if snippets.contains_key(&tag) {
                // The first occurrence wins; the tag is not reopened.
                errors.push(
                    Diagnostic::new(file, DiagnosticKind::DuplicateSnippetStart)
                        .with_line(line_idx)
                        .with_tag(&tag),
                );
            } else {
                snippets.insert(
                    tag.clone(),
                    Snippet {
                        id: tag.clone(),
                        file: file.to_path_buf(),
                        line_start: line_idx,
                        line_end: None,
                        code: String::new(),
                    },
                );
                open_tags.push(tag);
            }
        } else if line.contains(SNIPPET_END) {
            let tag = tag_from_line(SNIPPET_END, line, prefix);
            if !snippets.contains_key(&tag) {
                errors.push(
                    Diagnostic::new(file, DiagnosticKind::MissingSnippetStart)
                        .with_line(line_idx)
                        .with_tag(&tag),
                );
            } else if let Some(pos) = open_tags.iter().position(|open| open == &tag) {
                open_tags.remove(pos);
                if let Some(snippet) = snippets.get_mut(&tag) {
                    snippet.line_end = Some(line_idx);
                }
            } else {
                // Opened and already closed: a second end marker.
                errors.push(
                    Diagnostic::new(file, DiagnosticKind::DuplicateSnippetEnd)
                        .with_line(line_idx)
                        .with_tag(&tag),
                );
            }
        } else {
            for tag in &open_tags {
                if let Some(snippet) = snippets.get_mut(tag) {
                    snippet.code.push_str(line);
                    snippet.code.push('\n');
                }
            }
        }
    }

    for tag in &open_tags {
        if let Some(snippet) = snippets.get(tag) {
            errors.push(
                Diagnostic::new(file, DiagnosticKind::MissingSnippetEnd)
                    .with_line(snippet.line_start)
                    .with_tag(tag),
            );
        }
    }

    (snippets, errors)
}

/// Reads `file` and parses its snippet tags. A file that cannot be read as
/// text produces a single decode-error diagnostic and an empty result, so
/// one bad file never aborts a scan.
pub fn find_snippets(file: &Path, prefix: &str) -> (BTreeMap<String, Snippet>, Diagnostics) {
    match fs::read_to_string(file) {
        Ok(content) => parse_snippets(&content, file, prefix),
        Err(err) => {
            let mut errors = Diagnostics::new();
            errors.push(Diagnostic::new(
                file,
                DiagnosticKind::DecodeError {
                    cause: err.to_string(),
                },
            ));
            (BTreeMap::new(), errors)
        }
    }
}
