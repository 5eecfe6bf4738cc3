use anyhow::{Context, Result};
use clap::{Arg, Command};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process;

// Library dependencies.
use collect_snippets::{collect_snippets, WalkdirLister};
use example_catalog::load_examples;
use validate_references::validate_snippet_references;
use write_snippets::{clear_output_dir, copy_snippet_file, write_snippets};

fn main() -> Result<()> {
    let matches = Command::new("extract_snippets")
        .version("0.1.0")
        .about("Extracts tagged code snippets from a source tree and cross-checks them against example metadata")
        .arg(
            Arg::new("root")
                .long("root")
                .num_args(1)
                .default_value(".")
                .help("Root of the source tree to scan"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .num_args(1)
                .default_value("")
                .help("Prefix prepended to every extracted tag name"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .num_args(1)
                .help("Output directory for snippet artifacts (default: <root>/.snippets)"),
        )
        .arg(
            Arg::new("metadata")
                .long("metadata")
                .num_args(1)
                .help("Example catalog (JSON) to cross-check the extracted snippets against"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue)
                .default_value("false"),
        )
        .get_matches();

    let verbose = *matches.get_one::<bool>("verbose").unwrap();
    env_logger::Builder::from_default_env()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let root = PathBuf::from(matches.get_one::<String>("root").unwrap());
    let prefix = matches.get_one::<String>("prefix").unwrap();
    let out_dir = matches
        .get_one::<String>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| root.join(".snippets"));

    // 1. Scan the tree and build the global tag -> snippet mapping.
    let lister = WalkdirLister::default();
    let (snippets, mut errors) = collect_snippets(&root, prefix, &lister);
    println!("Found {} snippets", snippets.len());

    // 2. Cross-check against the example catalog, when one was supplied.
    let mut snippet_files: BTreeSet<String> = BTreeSet::new();
    if let Some(metadata) = matches.get_one::<String>("metadata") {
        let examples = load_examples(Path::new(metadata))
            .context("Failed to load the example catalog")?;
        snippet_files = validate_snippet_references(&examples, &snippets, &root, &mut errors);
    }

    // 3. Persist artifacts into a fresh output directory.
    clear_output_dir(&out_dir)
        .with_context(|| format!("Failed to prepare output directory {}", out_dir.display()))?;
    errors.extend(write_snippets(&out_dir, &snippets));

    // 4. Copy referenced snippet files that exist; the missing ones were
    //    already diagnosed by the validator.
    for snippet_file in &snippet_files {
        if root.join(snippet_file).exists() {
            errors.extend(copy_snippet_file(&root, &out_dir, snippet_file));
        }
    }

    if !errors.is_empty() {
        eprint!("{}", errors);
        process::exit(1);
    }
    Ok(())
}
