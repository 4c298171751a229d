//! One-off: rewrite a legacy `{ "unused_questions": [...] }` pool file
//! into a top-level array.
//! Run: cargo run --bin fix_unused_questions [-- <pool-file>]

use std::path::PathBuf;

use onitan::cli::{repo_path, DEFAULT_RESOURCES_SUFFIX};
use onitan::data::pool::{flatten_pool_file, FlattenOutcome, UNUSED_POOL_FILE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| repo_path(DEFAULT_RESOURCES_SUFFIX).join(UNUSED_POOL_FILE));

    match flatten_pool_file(&path)? {
        FlattenOutcome::Rewritten { questions } => {
            println!(
                "Modified {} to be a top-level array ({} questions).",
                path.display(),
                questions
            );
        }
        FlattenOutcome::AlreadyFlat { questions } => {
            println!(
                "{} is already a top-level array ({} questions).",
                path.display(),
                questions
            );
        }
    }
    Ok(())
}
