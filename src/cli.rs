use std::path::{Path, PathBuf};

use crate::data::explain::rewrite_explain_file;
use crate::data::pool::{flatten_pool_file, move_first_to_stage, FlattenOutcome, UNUSED_POOL_FILE};
use crate::data::validate::{print_report, verify_stage_files};

/// Default resources directory, relative to the repo root.
pub const DEFAULT_RESOURCES_SUFFIX: &str = "OniTan/Resources";

/// Resolve a path relative to the repo root (CARGO_MANIFEST_DIR when run
/// via cargo).
pub fn repo_path(suffix: &str) -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        return PathBuf::from(manifest_dir).join(suffix);
    }
    PathBuf::from(suffix)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Verify,
    AddQuestion,
    FlattenPool,
    ReformatExplain,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("verify") => Some(Command::Verify),
        Some("add-question") => Some(Command::AddQuestion),
        Some("flatten-pool") => Some(Command::FlattenPool),
        Some("reformat-explain") => Some(Command::ReformatExplain),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Verify) => handle_verify(args),
        Some(Command::AddQuestion) => handle_add_question(args),
        Some(Command::FlattenPool) => handle_flatten_pool(args),
        Some(Command::ReformatExplain) => handle_reformat_explain(args),
        None => {
            eprintln!("usage: onitan <verify|add-question|flatten-pool|reformat-explain>");
            2
        }
    }
}

fn resources_dir(arg: Option<&String>) -> PathBuf {
    match arg {
        Some(dir) => PathBuf::from(dir),
        None => repo_path(DEFAULT_RESOURCES_SUFFIX),
    }
}

fn handle_verify(args: &[String]) -> i32 {
    let root = resources_dir(args.get(2));
    println!("Checking quiz data: {}\n", root.display());
    match verify_stage_files(&root) {
        Ok(report) => {
            print_report(&report);
            0
        }
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

fn handle_add_question(args: &[String]) -> i32 {
    let stage_index = parse_stage_arg(args.get(2), 1);
    let dir = resources_dir(args.get(3));
    match move_first_to_stage(&dir, stage_index) {
        Ok(kanji) => {
            let label = kanji.unwrap_or_else(|| "<no kanji>".to_string());
            println!(
                "Added question '{label}' to stage {stage_index} and removed it from {UNUSED_POOL_FILE}."
            );
            0
        }
        Err(err) => {
            eprintln!("add-question failed: {err}");
            1
        }
    }
}

fn handle_flatten_pool(args: &[String]) -> i32 {
    let path = match args.get(2) {
        Some(path) => PathBuf::from(path),
        None => repo_path(DEFAULT_RESOURCES_SUFFIX).join(UNUSED_POOL_FILE),
    };
    match flatten_pool_file(&path) {
        Ok(FlattenOutcome::Rewritten { questions }) => {
            println!(
                "Modified {} to be a top-level array ({questions} questions).",
                path.display()
            );
            0
        }
        Ok(FlattenOutcome::AlreadyFlat { questions }) => {
            println!(
                "{} is already a top-level array ({questions} questions).",
                path.display()
            );
            0
        }
        Err(err) => {
            eprintln!("flatten-pool failed: {err}");
            1
        }
    }
}

fn handle_reformat_explain(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: onitan reformat-explain <json-file>");
        return 2;
    };
    match rewrite_explain_file(Path::new(path)) {
        Ok(rewritten) => {
            println!("Updated {path} ({rewritten} explain fields).");
            0
        }
        Err(err) => {
            eprintln!("reformat-explain failed: {err}");
            1
        }
    }
}

fn parse_stage_arg(raw: Option<&String>, default: u32) -> u32 {
    raw.and_then(|value| value.parse::<u32>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid stage '{value}', defaulting to {default}");
            }
            default
        })
}
