// crates/write_snippets/src/lib.rs

//! Persists extracted snippets as one plain-text artifact per tag, plus the
//! output-directory lifecycle and the auxiliary snippet-file copy.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use parse_snippets::Snippet;
use snippet_errors::{Diagnostic, DiagnosticKind, Diagnostics};

/// Writes each complete snippet's code verbatim to `out_dir/{tag}.txt`.
///
/// An artifact that already exists is never overwritten: it means the same
/// tag was written by an earlier pass, so the collision is reported and the
/// first write stands. Write failures are reported per artifact; emission
/// continues with the remaining tags.
pub fn write_snippets(out_dir: &Path, snippets: &BTreeMap<String, Snippet>) -> Diagnostics {
    let mut errors = Diagnostics::new();
    for (tag, snippet) in snippets {
        // Unterminated scopes were already diagnosed by the parser.
        if !snippet.is_complete() {
            continue;
        }
        let name = out_dir.join(format!("{}.txt", tag));
        if name.exists() {
            errors.push(Diagnostic::new(&name, DiagnosticKind::AlreadyWritten));
        } else if let Err(err) = fs::write(&name, &snippet.code) {
            errors.push(Diagnostic::new(
                &name,
                DiagnosticKind::WriteError {
                    cause: err.to_string(),
                },
            ));
        }
    }
    errors
}

/// Removes `dir` if present and recreates it empty.
pub fn clear_output_dir(dir: &Path) -> io::Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)
}

/// Copies an auxiliary snippet file referenced by example metadata into
/// `out_dir`, flattening its path (`/` becomes `.`) and appending `.txt`.
/// Idempotent: an existing destination is left untouched.
pub fn copy_snippet_file(root: &Path, out_dir: &Path, snippet_file: &str) -> Diagnostics {
    let mut errors = Diagnostics::new();
    let name = format!("{}.txt", snippet_file.replace('/', "."));
    let dest = out_dir.join(name);
    if dest.exists() {
        return errors;
    }
    if let Err(err) = fs::copy(root.join(snippet_file), &dest) {
        errors.push(Diagnostic::new(
            &dest,
            DiagnosticKind::WriteError {
                cause: err.to_string(),
            },
        ));
    }
    errors
}
