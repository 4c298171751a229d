//! Stage validator: scan a resources directory for `stage<N>.json` files,
//! check per-stage and cross-stage invariants, and build a printable
//! report. Findings never abort the run; only setup problems do.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::stage::{
    load_stage_file, stage_index_from_filename, stage_label, StageFile, QUESTIONS_PER_STAGE,
    STAGE_FILE_PREFIX, STAGE_FILE_SUFFIX,
};

/// One data-quality finding against a single stage file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageIssue {
    /// Question count differs from the expected 30.
    QuestionCount { actual: usize },
    /// The same kanji appears more than once within one stage file.
    DuplicateInStage { kanji: String },
    /// The kanji already appeared in an earlier stage.
    DuplicateAcrossStages { kanji: String, first_stage: String },
    /// The file could not be read or parsed; `detail` is the full message.
    Load { detail: String },
}

impl fmt::Display for StageIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuestionCount { actual } => {
                write!(
                    f,
                    "question count is {actual} (expected: {QUESTIONS_PER_STAGE})"
                )
            }
            Self::DuplicateInStage { kanji } => {
                write!(f, "kanji '{kanji}' is duplicated within this stage")
            }
            Self::DuplicateAcrossStages { kanji, first_stage } => {
                write!(f, "kanji '{kanji}' already used in stage {first_stage}")
            }
            Self::Load { detail } => write!(f, "{detail}"),
        }
    }
}

/// Validation outcome for one stage file, in processed order.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage_label: String,
    pub file_name: String,
    pub issues: Vec<StageIssue>,
}

impl StageReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub stages: Vec<StageReport>,
}

impl VerifyReport {
    pub fn has_issues(&self) -> bool {
        self.stages.iter().any(|stage| !stage.is_clean())
    }
}

/// Setup failure that aborts the run before any report is produced.
#[derive(Debug)]
pub enum VerifyError {
    MissingRoot(PathBuf),
    List(std::io::Error),
    StageIndex { file_name: String },
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRoot(path) => {
                write!(f, "resources directory not found: {}", path.display())
            }
            Self::List(err) => write!(f, "failed to list resources directory: {err}"),
            Self::StageIndex { file_name } => {
                write!(f, "cannot parse stage index from file name '{file_name}'")
            }
        }
    }
}

impl std::error::Error for VerifyError {}

/// Validate every stage file under `root`, ascending by filename index.
pub fn verify_stage_files(root: &Path) -> Result<VerifyReport, VerifyError> {
    if !root.is_dir() {
        return Err(VerifyError::MissingRoot(root.to_path_buf()));
    }

    let mut files: Vec<(u32, PathBuf)> = Vec::new();
    for entry in fs::read_dir(root).map_err(VerifyError::List)? {
        let entry = entry.map_err(VerifyError::List)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if !file_name.starts_with(STAGE_FILE_PREFIX) || !file_name.ends_with(STAGE_FILE_SUFFIX) {
            continue;
        }
        match stage_index_from_filename(file_name) {
            Some(index) => files.push((index, path)),
            None => {
                return Err(VerifyError::StageIndex {
                    file_name: file_name.to_string(),
                })
            }
        }
    }
    files.sort_by_key(|(index, _)| *index);

    let mut first_appearance: HashMap<String, String> = HashMap::new();
    let mut report = VerifyReport::default();
    for (_, path) in &files {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        report
            .stages
            .push(verify_one_stage(path, file_name, &mut first_appearance));
    }
    Ok(report)
}

fn verify_one_stage(
    path: &Path,
    file_name: String,
    first_appearance: &mut HashMap<String, String>,
) -> StageReport {
    let stage_file = match load_stage_file(path) {
        Ok(stage_file) => stage_file,
        Err(err) => {
            return StageReport {
                stage_label: stage_label(None),
                file_name,
                issues: vec![StageIssue::Load {
                    detail: err.to_string(),
                }],
            }
        }
    };

    let StageFile { stage, questions } = stage_file;
    let label = stage_label(stage);
    let mut issues = Vec::new();

    if questions.len() != QUESTIONS_PER_STAGE {
        issues.push(StageIssue::QuestionCount {
            actual: questions.len(),
        });
    }

    // One walk; an occurrence yields at most one issue. The run-wide
    // first-appearance entry is never overwritten.
    let mut seen_in_stage: HashSet<&str> = HashSet::new();
    for question in &questions {
        let Some(kanji) = question.kanji_key() else {
            continue;
        };
        if seen_in_stage.contains(kanji) {
            issues.push(StageIssue::DuplicateInStage {
                kanji: kanji.to_string(),
            });
        } else if let Some(first_stage) = first_appearance.get(kanji) {
            issues.push(StageIssue::DuplicateAcrossStages {
                kanji: kanji.to_string(),
                first_stage: first_stage.clone(),
            });
        } else {
            first_appearance.insert(kanji.to_string(), label.clone());
            seen_in_stage.insert(kanji);
        }
    }

    StageReport {
        stage_label: label,
        file_name,
        issues,
    }
}

/// Print the per-stage summary and the final verdict line.
pub fn print_report(report: &VerifyReport) {
    println!("--- validation summary ---\n");
    for stage in &report.stages {
        if stage.is_clean() {
            println!(
                "Stage {} ({}): ✅ no issues",
                stage.stage_label, stage.file_name
            );
        } else {
            println!("Stage {} ({}):", stage.stage_label, stage.file_name);
            for issue in &stage.issues {
                println!("  ❌ {issue}");
            }
            println!();
        }
    }
    if report.has_issues() {
        println!("\n--- result: issues found in some stages ---");
    } else {
        println!("\n--- result: no issues found ---");
    }
}
