//! Rewrite every `explain` field in one quiz data file, extracting the
//! labeled meaning and four-character-idiom lines.
//! Run: cargo run --bin update_explain -- <json-file>

use std::path::Path;

use onitan::data::explain::rewrite_explain_file;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: update_explain <json-file>");
        std::process::exit(2);
    };

    let rewritten = rewrite_explain_file(Path::new(&path))?;
    println!("Updated {path} ({rewritten} explain fields).");
    Ok(())
}
