//! Question record: one kanji-reading quiz entry as stored in stage files
//! and the unused pool. Fields mirror the app's schema; everything is
//! defaulted so the validator can read partially-filled files.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kanji: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explain: Option<String>,
}

impl Question {
    /// Kanji key for duplicate checks. Empty strings are treated as absent.
    pub fn kanji_key(&self) -> Option<&str> {
        match self.kanji.as_deref() {
            Some(k) if !k.is_empty() => Some(k),
            _ => None,
        }
    }
}
