// crates/example_catalog/src/lib.rs

//! In-memory shape of the documentation-example catalog, plus its JSON
//! loader. The catalog is operator input; this crate only reads it.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// One documentation example and the per-language excerpts it publishes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Example {
    /// The metadata file this example was defined in.
    pub file: String,
    /// Languages keyed by name. A sorted map keeps catalog traversal
    /// reproducible.
    #[serde(default)]
    pub languages: BTreeMap<String, Language>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Language {
    #[serde(default)]
    pub versions: Vec<Version>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Version {
    pub sdk_version: u32,
    #[serde(default)]
    pub excerpts: Vec<Excerpt>,
}

/// The snippet tags and snippet files one excerpt depends on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Excerpt {
    #[serde(default)]
    pub snippet_tags: Vec<String>,
    #[serde(default)]
    pub snippet_files: Vec<String>,
}

/// Loads the example catalog from a JSON document holding a top-level array
/// of examples.
pub fn load_examples(path: &Path) -> Result<Vec<Example>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Error reading example catalog {}", path.display()))?;
    let examples: Vec<Example> = serde_json::from_str(&content)
        .with_context(|| format!("Error parsing example catalog {}", path.display()))?;
    Ok(examples)
}
