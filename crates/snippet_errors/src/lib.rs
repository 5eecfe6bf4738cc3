// crates/snippet_errors/src/lib.rs

//! File-and-line-attributed diagnostics shared by every stage of the
//! snippet tool-chain.

use std::fmt;
use std::path::PathBuf;

/// The closed set of problems a run can report. One variant per
/// malformation/validation class, so consumers can match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A second `snippet-start` for a tag already defined in this file.
    DuplicateSnippetStart,
    /// A second `snippet-end` for a tag that was already closed.
    DuplicateSnippetEnd,
    /// A `snippet-end` whose tag was never opened.
    MissingSnippetStart,
    /// A `snippet-start` still open when the file ended.
    MissingSnippetEnd,
    /// The file could not be read as text.
    DecodeError { cause: String },
    /// An example excerpt references a tag that was never extracted.
    MissingSnippet,
    /// An example excerpt references a snippet file that does not exist.
    MissingSnippetFile { snippet_file: String },
    /// A referenced snippet file path uses characters reserved on Windows.
    WindowsUnsafeFilename { snippet_file: String },
    /// The tag's output artifact already exists from an earlier write.
    AlreadyWritten,
    /// Writing or copying an output artifact failed.
    WriteError { cause: String },
}

impl DiagnosticKind {
    fn message(&self) -> String {
        match self {
            DiagnosticKind::DuplicateSnippetStart => "duplicate snippet-start tag".to_string(),
            DiagnosticKind::DuplicateSnippetEnd => "duplicate snippet-end tag".to_string(),
            DiagnosticKind::MissingSnippetStart => {
                "snippet-end with no matching start".to_string()
            }
            DiagnosticKind::MissingSnippetEnd => {
                "snippet-start with no matching end".to_string()
            }
            DiagnosticKind::DecodeError { cause } => {
                format!("file could not be read as text: {}", cause)
            }
            DiagnosticKind::MissingSnippet => "missing snippet".to_string(),
            DiagnosticKind::MissingSnippetFile { snippet_file } => {
                format!("missing snippet file {}", snippet_file)
            }
            DiagnosticKind::WindowsUnsafeFilename { snippet_file } => {
                format!("snippet file name is unsafe on Windows: {}", snippet_file)
            }
            DiagnosticKind::AlreadyWritten => {
                "snippet artifact already exists, so this tag is defined in more than one source file"
                    .to_string()
            }
            DiagnosticKind::WriteError { cause } => {
                format!("error writing snippet artifact: {}", cause)
            }
        }
    }
}

/// One immutable diagnostic. The optional fields carry whatever context the
/// reporting stage had: the example id (`language:sdk_version`), the source
/// line, and the snippet tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: PathBuf,
    pub id: Option<String>,
    pub line: Option<usize>,
    pub tag: Option<String>,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(file: impl Into<PathBuf>, kind: DiagnosticKind) -> Self {
        Diagnostic {
            file: file.into(),
            id: None,
            line: None,
            tag: None,
            kind,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file.display())?;
        if let Some(id) = &self.id {
            write!(f, " ({})", id)?;
        }
        if let Some(line) = self.line {
            write!(f, " at l{}", line)?;
        }
        if let Some(tag) = &self.tag {
            write!(f, " for {}", tag)?;
        }
        write!(f, ": {}", self.kind.message())
    }
}

/// Ordered, append-only collection of diagnostics for one run. There is no
/// ambient error sink; each stage returns (or appends into) one of these.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Appends every diagnostic of `other`, preserving order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{}", item)?;
        }
        Ok(())
    }
}
