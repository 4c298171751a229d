//! Stage data: one JSON file per stage (`stage<N>.json`) holding 30 quiz
//! questions. Files are authored upstream; this module only reads them.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::question::Question;

pub const STAGE_FILE_PREFIX: &str = "stage";
pub const STAGE_FILE_SUFFIX: &str = ".json";
pub const QUESTIONS_PER_STAGE: usize = 30;

/// Typed read model for a stage file. Both fields are defaulted so a file
/// missing either one still loads and gets reported instead of rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageFile {
    #[serde(default)]
    pub stage: Option<u32>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Label used in reports: the `stage` field, or `Unknown` when absent.
pub fn stage_label(stage: Option<u32>) -> String {
    match stage {
        Some(n) => n.to_string(),
        None => "Unknown".to_string(),
    }
}

/// Extract the numeric index from a stage file name: strip the `stage`
/// prefix and `.json` suffix, parse the remaining digits. Returns None for
/// anything else, including an empty digit run (`stage.json`).
pub fn stage_index_from_filename(file_name: &str) -> Option<u32> {
    let rest = file_name.strip_prefix(STAGE_FILE_PREFIX)?;
    let digits = rest.strip_suffix(STAGE_FILE_SUFFIX)?;
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

pub fn stage_file_name(index: u32) -> String {
    format!("{STAGE_FILE_PREFIX}{index}{STAGE_FILE_SUFFIX}")
}

#[derive(Debug)]
pub enum StageLoadError {
    Read(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for StageLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "read error: {err}"),
            Self::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for StageLoadError {}

/// Load a stage file as the typed model.
pub fn load_stage_file(path: &Path) -> Result<StageFile, StageLoadError> {
    let raw = fs::read_to_string(path).map_err(StageLoadError::Read)?;
    serde_json::from_str(&raw).map_err(StageLoadError::Parse)
}

#[cfg(test)]
mod tests {
    use super::{stage_file_name, stage_index_from_filename, stage_label};

    #[test]
    fn filename_index_round_trip() {
        assert_eq!(stage_index_from_filename("stage1.json"), Some(1));
        assert_eq!(stage_index_from_filename("stage12.json"), Some(12));
        assert_eq!(stage_index_from_filename(&stage_file_name(7)), Some(7));
    }

    #[test]
    fn filename_index_rejects_non_numeric() {
        assert_eq!(stage_index_from_filename("stage.json"), None);
        assert_eq!(stage_index_from_filename("stageX.json"), None);
        assert_eq!(stage_index_from_filename("stage1.txt"), None);
        assert_eq!(stage_index_from_filename("unused_questions.json"), None);
    }

    #[test]
    fn label_falls_back_to_unknown() {
        assert_eq!(stage_label(Some(3)), "3");
        assert_eq!(stage_label(None), "Unknown");
    }
}
