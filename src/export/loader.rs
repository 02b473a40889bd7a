//! Loading of export configurations and stored result documents

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use super::engine::ResultDocument;
use super::error::{json_type_name, ExportError};
use super::spec::{ExportConfig, ExportSpec};

/// List result files in `store_dir` whose file name matches `filter`,
/// sorted by file name.
pub fn list_result_files(store_dir: &Path, filter: &str) -> Result<Vec<PathBuf>> {
    let re = Regex::new(filter).with_context(|| format!("Failed to compile filter regexp {}", filter))?;

    let entries = std::fs::read_dir(store_dir)
        .with_context(|| format!("Failed to read the store directory {}", store_dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read the store directory {}", store_dir.display()))?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        if !re.is_match(&name) {
            continue;
        }
        files.push(entry.path());
    }

    files.sort();
    Ok(files)
}

/// Load and compile an export configuration.
pub fn load_export_spec(path: &Path) -> Result<ExportSpec> {
    debug!("Running export from file: {}", path.display());

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read export file {}", path.display()))?;
    let config = ExportConfig::from_json_str(&text)
        .with_context(|| format!("Failed to decode export file {}", path.display()))?;

    debug!("Load export file content: {:?}", config);

    config
        .compile()
        .with_context(|| format!("Failed to compile exporter {}", path.display()))
}

/// Parse one result document; the top level must be a JSON object.
pub fn parse_result_document(text: &str) -> Result<ResultDocument, ExportError> {
    match serde_json::from_str(text)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(ExportError::NotAnObject(json_type_name(&other))),
    }
}

/// Read and parse one stored result document.
pub fn load_result_document(path: &Path) -> Result<ResultDocument> {
    debug!("Handling result file: {}", path.display());

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read result file {}", path.display()))?;
    let document = parse_result_document(&text)
        .with_context(|| format!("Failed to decode result file {}", path.display()))?;

    debug!("Load result file content: {:?}", document);
    Ok(document)
}
