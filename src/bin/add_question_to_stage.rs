//! Move the first question from the unused pool into a stage file.
//! Run: cargo run --bin add_question_to_stage [-- <stage-number> [<resources-dir>]]

use std::path::PathBuf;

use onitan::cli::{repo_path, DEFAULT_RESOURCES_SUFFIX};
use onitan::data::pool::{move_first_to_stage, UNUSED_POOL_FILE};
use onitan::data::stage::stage_file_name;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let stage_index: u32 = match args.get(1) {
        Some(raw) => match raw.parse() {
            Ok(index) => index,
            Err(_) => {
                eprintln!("usage: add_question_to_stage [<stage-number> [<resources-dir>]]");
                std::process::exit(2);
            }
        },
        None => 1,
    };
    let dir = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| repo_path(DEFAULT_RESOURCES_SUFFIX));

    let kanji = move_first_to_stage(&dir, stage_index)?;
    let label = kanji.unwrap_or_else(|| "<no kanji>".to_string());
    println!(
        "Added question '{}' to {} and removed it from {}.",
        label,
        stage_file_name(stage_index),
        UNUSED_POOL_FILE
    );
    Ok(())
}
