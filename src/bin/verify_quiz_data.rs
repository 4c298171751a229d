//! Verify quiz stage files: question counts plus intra- and cross-stage
//! kanji duplicates. Run: cargo run --bin verify_quiz_data [-- <resources-dir>]

use std::path::PathBuf;

use onitan::cli::{repo_path, DEFAULT_RESOURCES_SUFFIX};
use onitan::data::validate::{print_report, verify_stage_files};

fn main() {
    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| repo_path(DEFAULT_RESOURCES_SUFFIX));

    if !root.is_dir() {
        eprintln!("error: resources directory not found: {}", root.display());
        eprintln!("Pass the directory holding the stage<N>.json files as the first argument.");
        std::process::exit(1);
    }

    println!("Checking quiz data: {}\n", root.display());
    match verify_stage_files(&root) {
        Ok(report) => print_report(&report),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
