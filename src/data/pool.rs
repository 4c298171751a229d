//! Unused-question pool: a reserve of questions not yet assigned to any
//! stage, stored as a top-level JSON array in `unused_questions.json`.
//! Rewrites work on raw values so fields we do not model survive intact.

use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::data::stage::stage_file_name;

pub const UNUSED_POOL_FILE: &str = "unused_questions.json";

/// Key used by the legacy wrapper-object layout.
const LEGACY_POOL_KEY: &str = "unused_questions";

#[derive(Debug)]
pub enum PoolError {
    Read(std::io::Error),
    Parse(serde_json::Error),
    Write(std::io::Error),
    Serialize(serde_json::Error),
    EmptyPool,
    NotAnArray(String),
    MissingQuestions(String),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read pool file: {err}"),
            Self::Parse(err) => write!(f, "failed to parse json: {err}"),
            Self::Write(err) => write!(f, "failed to write file: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize json: {err}"),
            Self::EmptyPool => write!(f, "unused-question pool is empty"),
            Self::NotAnArray(path) => {
                write!(f, "expected a top-level array in '{path}'")
            }
            Self::MissingQuestions(path) => {
                write!(f, "no 'questions' array in '{path}'")
            }
        }
    }
}

impl std::error::Error for PoolError {}

fn read_json(path: &Path) -> Result<Value, PoolError> {
    let raw = fs::read_to_string(path).map_err(PoolError::Read)?;
    serde_json::from_str(&raw).map_err(PoolError::Parse)
}

fn write_json_pretty(path: &Path, value: &Value) -> Result<(), PoolError> {
    let payload = serde_json::to_string_pretty(value).map_err(PoolError::Serialize)?;
    fs::write(path, payload).map_err(PoolError::Write)
}

/// Outcome of a flatten pass over a pool file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlattenOutcome {
    /// The legacy wrapper was removed; the array was written back.
    Rewritten { questions: usize },
    /// The file already holds a top-level array; nothing written.
    AlreadyFlat { questions: usize },
}

/// Rewrite a legacy `{ "unused_questions": [...] }` pool file into a
/// top-level array. A wrapper object without the key yields an empty
/// array, matching the historical fix-up behavior.
pub fn flatten_pool_file(path: &Path) -> Result<FlattenOutcome, PoolError> {
    let value = read_json(path)?;
    match value {
        Value::Array(questions) => Ok(FlattenOutcome::AlreadyFlat {
            questions: questions.len(),
        }),
        Value::Object(mut object) => {
            let questions = match object.remove(LEGACY_POOL_KEY) {
                Some(Value::Array(questions)) => questions,
                _ => Vec::new(),
            };
            let count = questions.len();
            write_json_pretty(path, &Value::Array(questions))?;
            Ok(FlattenOutcome::Rewritten { questions: count })
        }
        _ => Err(PoolError::NotAnArray(path.display().to_string())),
    }
}

/// Move the first pooled question into `stage<N>.json`'s question list.
/// Both files are rewritten in place; returns the moved question's kanji
/// when it has one.
pub fn move_first_to_stage(
    resources_dir: &Path,
    stage_index: u32,
) -> Result<Option<String>, PoolError> {
    let pool_path = resources_dir.join(UNUSED_POOL_FILE);
    let stage_path = resources_dir.join(stage_file_name(stage_index));

    let mut pool = read_json(&pool_path)?;
    let Some(entries) = pool.as_array_mut() else {
        return Err(PoolError::NotAnArray(pool_path.display().to_string()));
    };
    if entries.is_empty() {
        return Err(PoolError::EmptyPool);
    }
    let question = entries.remove(0);
    let kanji = question
        .get("kanji")
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut stage = read_json(&stage_path)?;
    let Some(questions) = stage.get_mut("questions").and_then(Value::as_array_mut) else {
        return Err(PoolError::MissingQuestions(stage_path.display().to_string()));
    };
    questions.push(question);

    write_json_pretty(&stage_path, &stage)?;
    write_json_pretty(&pool_path, &pool)?;
    Ok(kanji)
}
