//! Dispatch tests against the real `onitan` binary: usage errors, the
//! verify report surface, and the single-file reformat utility.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::json;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_onitan")
}

fn unique_temp_dir(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("onitan-cli-{name}-{stamp}"));
    fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn write_stage(dir: &Path, index: u32, kanji: &[String]) {
    let questions: Vec<_> = kanji
        .iter()
        .map(|k| json!({ "kanji": k, "explain": "意味: テスト" }))
        .collect();
    let payload = json!({ "stage": index, "questions": questions });
    fs::write(dir.join(format!("stage{index}.json")), payload.to_string())
        .expect("stage file should be writable");
}

fn unique_kanji(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i:02}")).collect()
}

#[test]
fn no_command_prints_usage() {
    let output = Command::new(bin()).output().expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: onitan"));
}

#[test]
fn verify_clean_directory_exits_zero() {
    let dir = unique_temp_dir("clean");
    write_stage(&dir, 1, &unique_kanji("a", 30));

    let output = Command::new(bin())
        .args(["verify", dir.to_str().expect("temp path should be utf-8")])
        .output()
        .expect("verify should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Stage 1 (stage1.json)"));
    assert!(stdout.contains("no issues found"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn verify_with_findings_still_exits_zero() {
    let dir = unique_temp_dir("findings");
    let mut first = unique_kanji("a", 29);
    first.push("同".to_string());
    let mut second = unique_kanji("b", 29);
    second.push("同".to_string());
    write_stage(&dir, 1, &first);
    write_stage(&dir, 2, &second);

    let output = Command::new(bin())
        .args(["verify", dir.to_str().expect("temp path should be utf-8")])
        .output()
        .expect("verify should run");

    assert_eq!(
        output.status.code(),
        Some(0),
        "findings are a report, not a process failure"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("already used in stage 1"));
    assert!(stdout.contains("issues found in some stages"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn verify_missing_directory_exits_one() {
    let dir = unique_temp_dir("missing");
    let target = dir.join("not-there");

    let output = Command::new(bin())
        .args(["verify", target.to_str().expect("temp path should be utf-8")])
        .output()
        .expect("verify should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("resources directory not found"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn reformat_explain_requires_a_path() {
    let output = Command::new(bin())
        .arg("reformat-explain")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: onitan reformat-explain"));
}

#[test]
fn reformat_explain_rewrites_labeled_fields() {
    let dir = unique_temp_dir("reformat");
    let path = dir.join("stage1.json");
    let payload = json!({
        "stage": 1,
        "questions": [
            { "kanji": "閑", "explain": "意味: ひま\n四字熟語: 安閑恬静" }
        ]
    });
    fs::write(&path, payload.to_string()).expect("write should succeed");

    let output = Command::new(bin())
        .args([
            "reformat-explain",
            path.to_str().expect("temp path should be utf-8"),
        ])
        .output()
        .expect("reformat should run");

    assert_eq!(output.status.code(), Some(0));
    let raw = fs::read_to_string(&path).expect("file should be readable");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("file should stay json");
    assert_eq!(value["questions"][0]["explain"], "ひま。四字熟語: 安閑恬静");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn flatten_pool_rewrites_wrapper_via_cli() {
    let dir = unique_temp_dir("flatten");
    let path = dir.join("unused_questions.json");
    fs::write(
        &path,
        json!({ "unused_questions": [{ "kanji": "予" }] }).to_string(),
    )
    .expect("write should succeed");

    let output = Command::new(bin())
        .args([
            "flatten-pool",
            path.to_str().expect("temp path should be utf-8"),
        ])
        .output()
        .expect("flatten should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("top-level array"));
    let raw = fs::read_to_string(&path).expect("file should be readable");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("file should stay json");
    assert!(value.is_array());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn add_question_moves_pool_head_into_stage() {
    let dir = unique_temp_dir("add");
    fs::write(
        dir.join("unused_questions.json"),
        json!([{ "kanji": "新", "explain": "意味: あたらしい" }]).to_string(),
    )
    .expect("write should succeed");
    write_stage(&dir, 1, &unique_kanji("a", 29));

    let output = Command::new(bin())
        .args([
            "add-question",
            "1",
            dir.to_str().expect("temp path should be utf-8"),
        ])
        .output()
        .expect("add-question should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added question '新' to stage 1"));

    let raw =
        fs::read_to_string(dir.join("stage1.json")).expect("stage file should be readable");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("stage should stay json");
    let questions = value["questions"].as_array().expect("questions array");
    assert_eq!(questions.len(), 30);
    assert_eq!(questions[29]["kanji"], "新");

    let raw =
        fs::read_to_string(dir.join("unused_questions.json")).expect("pool should be readable");
    let pool: serde_json::Value = serde_json::from_str(&raw).expect("pool should stay json");
    assert_eq!(pool.as_array().map(Vec::len), Some(0));

    fs::remove_dir_all(&dir).ok();
}
