//! Explain-field rewriting: stage files were authored with a free-text
//! `explain` holding labeled lines (`意味: …`, `四字熟語: …`). This pulls
//! the labeled parts out and rebuilds the field as `<meaning>` plus an
//! optional `。四字熟語: <idiom>` tail.

use std::fmt;
use std::fs;
use std::path::Path;

use regex::Regex;
use serde_json::Value;

const MEANING_PATTERN: &str = r"意味:\s*(.*?)(?:\n|$)";
const IDIOM_PATTERN: &str = r"四字熟語:\s*(.*?)(?:\n|$)";

#[derive(Debug)]
pub enum ExplainError {
    Read(std::io::Error),
    Parse(serde_json::Error),
    Write(std::io::Error),
    Serialize(serde_json::Error),
    Pattern(regex::Error),
    NoQuestionList(String),
}

impl fmt::Display for ExplainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read file: {err}"),
            Self::Parse(err) => write!(f, "failed to parse json: {err}"),
            Self::Write(err) => write!(f, "failed to write file: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize json: {err}"),
            Self::Pattern(err) => write!(f, "bad extraction pattern: {err}"),
            Self::NoQuestionList(path) => {
                write!(
                    f,
                    "no 'questions' or 'unused_questions' array in '{path}'"
                )
            }
        }
    }
}

impl std::error::Error for ExplainError {}

struct ExplainRewriter {
    meaning: Regex,
    idiom: Regex,
}

impl ExplainRewriter {
    fn new() -> Result<Self, ExplainError> {
        Ok(Self {
            meaning: Regex::new(MEANING_PATTERN).map_err(ExplainError::Pattern)?,
            idiom: Regex::new(IDIOM_PATTERN).map_err(ExplainError::Pattern)?,
        })
    }

    fn capture(&self, regex: &Regex, text: &str) -> String {
        regex
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|group| group.as_str().trim().to_string())
            .unwrap_or_default()
    }

    fn rewrite(&self, text: &str) -> String {
        let meaning = self.capture(&self.meaning, text);
        let idiom = self.capture(&self.idiom, text);
        if idiom.is_empty() {
            meaning
        } else {
            format!("{meaning}。四字熟語: {idiom}")
        }
    }
}

/// Extract the labeled sub-fields from one explain text.
pub fn reformat_explain(text: &str) -> Result<String, ExplainError> {
    Ok(ExplainRewriter::new()?.rewrite(text))
}

/// Rewrite every `explain` field in a stage file (`questions` key) or a
/// legacy pool file (`unused_questions` key). Returns how many entries
/// were rewritten.
pub fn rewrite_explain_file(path: &Path) -> Result<usize, ExplainError> {
    let raw = fs::read_to_string(path).map_err(ExplainError::Read)?;
    let mut value: Value = serde_json::from_str(&raw).map_err(ExplainError::Parse)?;

    let entries = match &mut value {
        // Flattened pool files are already a bare array.
        Value::Array(entries) => entries,
        Value::Object(object) => {
            let key = if object.get("questions").map_or(false, Value::is_array) {
                "questions"
            } else if object.get("unused_questions").map_or(false, Value::is_array) {
                "unused_questions"
            } else {
                return Err(ExplainError::NoQuestionList(path.display().to_string()));
            };
            object
                .get_mut(key)
                .and_then(Value::as_array_mut)
                .ok_or_else(|| ExplainError::NoQuestionList(path.display().to_string()))?
        }
        _ => return Err(ExplainError::NoQuestionList(path.display().to_string())),
    };

    let rewriter = ExplainRewriter::new()?;
    let mut rewritten = 0;
    for entry in entries.iter_mut() {
        let Some(text) = entry.get("explain").and_then(Value::as_str) else {
            continue;
        };
        let updated = rewriter.rewrite(text);
        entry["explain"] = Value::String(updated);
        rewritten += 1;
    }

    let payload = serde_json::to_string_pretty(&value).map_err(ExplainError::Serialize)?;
    fs::write(path, payload).map_err(ExplainError::Write)?;
    Ok(rewritten)
}
