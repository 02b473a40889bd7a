//! Record module - runs a demo script and stores the answers
//!
//! A record asset is a list of processes: display steps, inline images and
//! survey prompts. Survey answers accumulate in a flat key-value store that
//! is saved as one JSON result document, the input of the export command.

pub mod display;
pub mod error;
pub mod survey;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::assets::Asset;
use crate::cli::Prompter;
use crate::utils::{cat_image, print_prefixed, PrefixLevel};

pub use display::*;
pub use error::RecordError;
pub use survey::*;

/// Answers collected by a record run, keyed by survey key
pub type ResultStore = serde_json::Map<String, Value>;

/// Default directory result documents are stored in
pub const DEFAULT_STORE_DIR: &str = "record/store";

/// Metadata keys appended to every result, prefixed by the record name
pub const STORE_KEY_CREATED_AT: &str = "createdAt";
pub const STORE_KEY_CREATED_BY: &str = "createdBy";
pub const STORE_KEY_VERSION: &str = "version";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageStep {
    #[serde(rename = "fileName", default)]
    pub file_name: String,
}

/// One step of a record script. Only the payload named by `type` is used.
#[derive(Debug, Clone, Deserialize)]
pub struct Process {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "pterm", default)]
    pub display: DisplayStep,
    #[serde(rename = "imgcat", default)]
    pub image: ImageStep,
    #[serde(default)]
    pub survey: SurveyStep,
}

/// Runs record processes against a prompter and collects the answers.
#[derive(Debug, Default)]
pub struct Recorder {
    pub processes: Vec<Process>,
    store: ResultStore,
}

impl Recorder {
    pub fn new(processes: Vec<Process>) -> Self {
        Self {
            processes,
            store: ResultStore::new(),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let processes: Vec<Process> =
            serde_json::from_str(s).context("Failed to parse record object")?;
        Ok(Self::new(processes))
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Run every process in order. A failing process is reported and the
    /// remaining ones still run; returns the number of failures.
    pub fn execute(&mut self, prompter: &mut dyn Prompter, image_dir: &Path) -> usize {
        let mut failures = 0;

        for process in &self.processes {
            debug!("{:?}", process);

            if let Err(e) = run_process(process, prompter, image_dir, &mut self.store) {
                print_prefixed(
                    PrefixLevel::Error,
                    &format!("Fail to execute record process: {:#}", e),
                );
                failures += 1;
            }
        }

        failures
    }

    /// Add the `<name>.createdAt`, `<name>.createdBy` and `<name>.version` keys.
    pub fn add_metadata(&mut self, name: &str, created_at: DateTime<Local>, created_by: &str) {
        self.store.insert(
            format!("{}.{}", name, STORE_KEY_CREATED_AT),
            Value::String(created_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        self.store.insert(
            format!("{}.{}", name, STORE_KEY_CREATED_BY),
            Value::String(created_by.to_string()),
        );
        self.store.insert(
            format!("{}.{}", name, STORE_KEY_VERSION),
            Value::String(env!("CARGO_PKG_VERSION").to_string()),
        );
    }

    /// Serialize the store as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.store).context("Failed to marshal result store")
    }
}

fn run_process(
    process: &Process,
    prompter: &mut dyn Prompter,
    image_dir: &Path,
    store: &mut ResultStore,
) -> Result<()> {
    match process.kind.as_str() {
        "pterm" => process.display.execute()?,
        "imgcat" => cat_image(&image_dir.join(&process.image.file_name), &mut std::io::stdout())?,
        "survey" => process.survey.execute(prompter, store)?,
        other => return Err(RecordError::InvalidProcessType(other.to_string()).into()),
    }
    Ok(())
}

/// Name of the user running the demo, if the environment tells.
pub fn current_user() -> Option<String> {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|name| !name.trim().is_empty())
}

/// Path a result document recorded at `unix_seconds` is stored under.
pub fn result_file_path(store_dir: &Path, name: &str, unix_seconds: i64) -> PathBuf {
    store_dir.join(format!("{}_{}.json", name, unix_seconds))
}

/// Write a result document into the store directory, creating it if needed.
pub fn save_result(store_dir: &Path, name: &str, json: &str, unix_seconds: i64) -> Result<PathBuf> {
    std::fs::create_dir_all(store_dir)
        .with_context(|| format!("Failed to mkdir store directory {}", store_dir.display()))?;

    let path = result_file_path(store_dir, name, unix_seconds);
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to store result to file {}", path.display()))?;
    Ok(path)
}

/// Run a record asset, then offer to store the collected result.
///
/// Returns the stored file, or `None` when the user declined.
pub fn run_record(
    asset: &Asset,
    store_dir: &Path,
    prompter: &mut dyn Prompter,
) -> Result<Option<PathBuf>> {
    debug!("Running record from file: {}", asset.path.display());

    let text = std::fs::read_to_string(&asset.path)
        .with_context(|| format!("Failed to read record file {}", asset.path.display()))?;
    let mut recorder = Recorder::from_json_str(&text)?;

    recorder.execute(prompter, &asset.base_dir);

    let created_by = current_user().unwrap_or_else(|| {
        print_prefixed(PrefixLevel::Error, "Fail to get current username");
        "unknown".to_string()
    });
    recorder.add_metadata(&asset.name, Local::now(), &created_by);

    let result = recorder.to_json()?;

    println!();
    print_prefixed(PrefixLevel::Success, &format!("result: {}", result));
    println!();

    let stored = if prompter.confirm("Do you want to store the result?")? {
        Some(save_result(store_dir, &asset.name, &result, Utc::now().timestamp())?)
    } else {
        None
    };

    println!();
    print_prefixed(PrefixLevel::Success, "done.");

    Ok(stored)
}
