// crates/validate_references/src/lib.rs

//! Cross-checks the extracted snippet corpus against the example catalog:
//! every referenced tag must have been extracted, and every referenced
//! snippet file must exist under the root with a filesystem-safe name.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use example_catalog::Example;
use parse_snippets::Snippet;
use snippet_errors::{Diagnostic, DiagnosticKind, Diagnostics};

// Characters reserved in Windows file names. `/` and `\` are exempt because
// the whole value is validated as a path.
static WIN_UNSAFE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[:*?"<>|]"#).unwrap());

/// Walks the catalog in a fixed order (example, then language, then version,
/// then excerpt, tag list before file list) and appends one diagnostic per
/// broken reference into `errors`.
///
/// The existence check and the Windows-name check on a snippet file are
/// independent; a path can trigger both. Every declared snippet file, valid
/// or not, lands in the returned set so the caller can copy the ones that
/// exist.
pub fn validate_snippet_references(
    examples: &[Example],
    snippets: &BTreeMap<String, Snippet>,
    root: &Path,
    errors: &mut Diagnostics,
) -> BTreeSet<String> {
    let mut snippet_files: BTreeSet<String> = BTreeSet::new();
    for example in examples {
        for (lang, language) in &example.languages {
            for version in &language.versions {
                let id = format!("{}:{}", lang, version.sdk_version);
                for excerpt in &version.excerpts {
                    for snippet_tag in &excerpt.snippet_tags {
                        if !snippets.contains_key(snippet_tag) {
                            errors.push(
                                Diagnostic::new(&example.file, DiagnosticKind::MissingSnippet)
                                    .with_id(&id)
                                    .with_tag(snippet_tag),
                            );
                        }
                    }
                    for snippet_file in &excerpt.snippet_files {
                        if !root.join(snippet_file).exists() {
                            errors.push(
                                Diagnostic::new(
                                    &example.file,
                                    DiagnosticKind::MissingSnippetFile {
                                        snippet_file: snippet_file.clone(),
                                    },
                                )
                                .with_id(&id),
                            );
                        }
                        if WIN_UNSAFE_RE.is_match(snippet_file) {
                            errors.push(
                                Diagnostic::new(
                                    &example.file,
                                    DiagnosticKind::WindowsUnsafeFilename {
                                        snippet_file: snippet_file.clone(),
                                    },
                                )
                                .with_id(&id),
                            );
                        }
                        snippet_files.insert(snippet_file.clone());
                    }
                }
            }
        }
    }
    snippet_files
}
