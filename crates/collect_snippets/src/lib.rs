// crates/collect_snippets/src/lib.rs

//! Applies the tag parser across a file tree and merges the per-file results
//! into one global tag -> snippet mapping.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use parse_snippets::{find_snippets, Snippet};
use snippet_errors::Diagnostics;

/// Trait that abstracts enumeration of candidate source files under a root.
/// Callers bring their own skip rules; the collector only requires that the
/// yielded paths are readable as text.
pub trait FileLister {
    fn list_files(&self, root: &Path) -> Vec<PathBuf>;
}

/// Default lister: walks the tree with `walkdir`, pruning directories on a
/// name deny-list, and yields regular files in sorted order so every run
/// enumerates identically.
pub struct WalkdirLister {
    skip_dirs: Vec<String>,
}

impl WalkdirLister {
    pub fn new(skip_dirs: &[&str]) -> Self {
        WalkdirLister {
            skip_dirs: skip_dirs.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for WalkdirLister {
    fn default() -> Self {
        WalkdirLister::new(&[".git", ".snippets", "target", "node_modules", ".build"])
    }
}

impl FileLister for WalkdirLister {
    fn list_files(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !(entry.file_type().is_dir()
                    && entry
                        .file_name()
                        .to_str()
                        .map(|name| self.skip_dirs.iter().any(|skip| skip == name))
                        .unwrap_or(false))
            })
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect()
    }
}

/// Runs the tag parser over every file yielded by `lister` and merges the
/// results. A tag defined in more than one file keeps the last file's
/// snippet; duplicate detection only happens within a single file.
/// Diagnostics concatenate in enumeration order, then per-file parse order.
pub fn collect_snippets(
    root: &Path,
    prefix: &str,
    lister: &dyn FileLister,
) -> (BTreeMap<String, Snippet>, Diagnostics) {
    let mut snippets: BTreeMap<String, Snippet> = BTreeMap::new();
    let mut errors = Diagnostics::new();
    for file in lister.list_files(root) {
        let (snips, errs) = find_snippets(&file, prefix);
        if !snips.is_empty() {
            log::debug!("{}: {} snippet(s)", file.display(), snips.len());
        }
        snippets.extend(snips);
        errors.extend(errs);
    }
    (snippets, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collects_across_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("a.rs"),
            "snippet-start:[alpha]\none\nsnippet-end:[alpha]\n",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("b.rs"),
            "snippet-start:[beta]\ntwo\nsnippet-end:[beta]\n",
        )
        .unwrap();

        let lister = WalkdirLister::default();
        let (snippets, errors) = collect_snippets(temp_dir.path(), "", &lister);
        assert!(errors.is_empty());
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets["alpha"].code, "one\n");
        assert_eq!(snippets["beta"].code, "two\n");
    }

    #[test]
    fn test_cross_file_duplicate_keeps_last_file() {
        let temp_dir = TempDir::new().unwrap();
        // Sorted enumeration visits a.rs before b.rs.
        fs::write(
            temp_dir.path().join("a.rs"),
            "snippet-start:[shared]\nfrom a\nsnippet-end:[shared]\n",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("b.rs"),
            "snippet-start:[shared]\nfrom b\nsnippet-end:[shared]\n",
        )
        .unwrap();

        let lister = WalkdirLister::default();
        let (snippets, errors) = collect_snippets(temp_dir.path(), "", &lister);
        // Last file wins silently; the collision is not a diagnostic here.
        assert!(errors.is_empty());
        assert_eq!(snippets["shared"].code, "from b\n");
        assert_eq!(snippets["shared"].file, temp_dir.path().join("b.rs"));
    }

    #[test]
    fn test_diagnostics_follow_enumeration_order() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.rs"), "snippet-start:[left.open]\n").unwrap();
        fs::write(temp_dir.path().join("b.rs"), "snippet-end:[never.opened]\n").unwrap();

        let lister = WalkdirLister::default();
        let (_, errors) = collect_snippets(temp_dir.path(), "", &lister);
        let files: Vec<String> = errors
            .iter()
            .map(|d| d.file.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files, vec!["a.rs", "b.rs"]);
    }

    #[test]
    fn test_lister_skips_configured_directories() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        fs::write(
            temp_dir.path().join(".git/config"),
            "snippet-start:[hidden]\nsnippet-end:[hidden]\n",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("visible.rs"),
            "snippet-start:[seen]\ncode\nsnippet-end:[seen]\n",
        )
        .unwrap();

        let lister = WalkdirLister::default();
        let files = lister.list_files(temp_dir.path());
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("visible.rs"));

        let (snippets, _) = collect_snippets(temp_dir.path(), "", &lister);
        assert!(snippets.contains_key("seen"));
        assert!(!snippets.contains_key("hidden"));
    }

    #[test]
    fn test_prefix_applies_to_every_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("a.rs"),
            "snippet-start:[tag]\ncode\nsnippet-end:[tag]\n",
        )
        .unwrap();

        let lister = WalkdirLister::default();
        let (snippets, _) = collect_snippets(temp_dir.path(), "demo.", &lister);
        assert!(snippets.contains_key("demo.tag"));
    }
}
