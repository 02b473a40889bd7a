//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::Value;
use tempfile::TempDir;

use classdemo::cli::{Prompter, ValueType};

/// Export configuration for two-student groups.
///
/// Columns: Team, Student, Score. `Student` is the key column and rows sort by it.
pub const GROUP_EXPORT_JSON: &str = r#"{
    "groupSize": 2,
    "titles": [
        { "title": "Team", "regexp": "^lab\\.team$", "default": "" },
        { "title": "Student", "regexp": "^lab\\.student\\.\\d+$", "default": "" },
        { "title": "Score", "regexp": "^lab\\.score\\.\\d+$", "default": "0" }
    ],
    "rules": [
        { "regexp": "^lab\\.team$", "type": "plaintext", "for": "all" },
        { "regexp": "^lab\\.student\\.(?P<g>\\d+)$", "type": "plaintext", "for": "g" },
        { "regexp": "^lab\\.score\\.(?P<g>\\d+)$", "type": "valuable_partial", "value": 10, "for": "g" }
    ],
    "keyColumns": [1],
    "sortColumns": [1]
}"#;

/// Record script asking for a team name and a pass/fail confirmation.
pub const SIMPLE_RECORD_JSON: &str = r#"[
    { "type": "pterm", "pterm": { "type": "section", "section": { "level": 1, "println": "Lab" } } },
    { "type": "survey", "survey": { "type": "input", "key": "lab.team", "valueType": "string", "message": "Team?" } },
    { "type": "survey", "survey": { "type": "confirm", "key": "lab.passed", "message": "Passed?" } }
]"#;

/// Assets root with `<root>/<kind>/<name>.json` written.
pub fn create_assets(kind: &str, name: &str, content: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_asset(temp_dir.path(), kind, name, content);
    temp_dir
}

pub fn write_asset(root: &Path, kind: &str, name: &str, content: &str) -> PathBuf {
    let dir = root.join(kind);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{}.json", name));
    std::fs::write(&path, content).unwrap();
    path
}

/// Write result documents into a fresh store directory, one file per document.
pub fn create_store(documents: &[(&str, Value)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (file_name, document) in documents {
        std::fs::write(
            temp_dir.path().join(file_name),
            serde_json::to_string(document).unwrap(),
        )
        .unwrap();
    }
    temp_dir
}

/// The single CSV file in `dir`.
pub fn read_single_csv(dir: &Path) -> String {
    let files: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().map(|e| e == "csv").unwrap_or(false))
        .collect();
    assert_eq!(files.len(), 1, "expected exactly one csv in {}", dir.display());
    std::fs::read_to_string(&files[0]).unwrap()
}

/// Prompter answering from queues, for driving record scripts in tests.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    pub inputs: VecDeque<Value>,
    pub confirms: VecDeque<bool>,
    pub selects: VecDeque<usize>,
    pub messages: Vec<String>,
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, message: &str, _value_type: ValueType) -> Result<Value> {
        self.messages.push(message.to_string());
        self.inputs
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected input prompt: {}", message))
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        self.messages.push(message.to_string());
        self.confirms
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected confirm prompt: {}", message))
    }

    fn select(&mut self, message: &str, _items: &[String]) -> Result<usize> {
        self.messages.push(message.to_string());
        self.selects
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected select prompt: {}", message))
    }
}
