//! The `export` command: stored result files in, one detail CSV out

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;

use super::engine::DetailTable;
use super::loader::{list_result_files, load_export_spec, load_result_document};
use super::writer::write_csv;
use crate::assets::Asset;
use crate::report::ExportSummary;
use crate::utils::{create_progress_bar, finish_with_success};

/// Default directory the exported CSV files are written to
pub const DEFAULT_EXPORT_DIR: &str = "export/store";

/// Default pattern selecting result files in the store
pub const DEFAULT_FILTER: &str = r".*\.json";

/// Parameters of one export run
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub asset: Asset,
    pub store_dir: PathBuf,
    pub export_dir: PathBuf,
    pub filter: String,
}

/// Output path for an export run started at `unix_seconds`.
pub fn detail_csv_path(export_dir: &Path, name: &str, unix_seconds: i64) -> PathBuf {
    export_dir.join(format!("{}_detail_{}.csv", name, unix_seconds))
}

/// Evaluate every matching result file in order and write the sorted rows.
pub fn run_export(options: &ExportOptions) -> Result<ExportSummary> {
    let result_files = list_result_files(&options.store_dir, &options.filter)
        .context("Failed to load result files")?;

    let spec = load_export_spec(&options.asset.path).context("Failed to load export file")?;

    let mut table = DetailTable::new(&spec);
    let pb = create_progress_bar(result_files.len() as u64, "Evaluating results");
    for path in &result_files {
        let document = load_result_document(path)?;
        table
            .evaluate(&document)
            .with_context(|| format!("Failed to evaluate detail of {}", path.display()))?;
        pb.inc(1);
    }
    finish_with_success(&pb, &format!("Evaluated {} result file(s)", result_files.len()));

    std::fs::create_dir_all(&options.export_dir).with_context(|| {
        format!(
            "Failed to mkdir export directory {}",
            options.export_dir.display()
        )
    })?;

    let output = detail_csv_path(
        &options.export_dir,
        &options.asset.name,
        Utc::now().timestamp(),
    );

    let (rows, stats) = table.into_sorted_rows();
    write_csv(&output, &spec.header(), &rows)
        .with_context(|| format!("Failed to export detail file {}", output.display()))?;

    Ok(ExportSummary::new(&options.asset.name, output, stats, rows.len()))
}
