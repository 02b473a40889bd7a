//! Asset lookup for the question, record and export commands
//!
//! Each command reads its JSON assets from its own directory under the
//! assets root: `<root>/<command>/<name>.json`. A name that already points
//! at an existing `.json` file is used as given.

use std::path::{Path, PathBuf};

/// Default assets root, relative to the working directory
pub const DEFAULT_ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Question,
    Record,
    Export,
}

impl AssetKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            AssetKind::Question => "question",
            AssetKind::Record => "record",
            AssetKind::Export => "export",
        }
    }
}

/// Resolved location of a named asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Short name used for store keys and output file names
    pub name: String,
    /// JSON file to load
    pub path: PathBuf,
    /// Directory that relative image paths inside the asset resolve against
    pub base_dir: PathBuf,
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Resolve `name` for `kind` under the assets `root`.
pub fn resolve_asset(root: &Path, kind: AssetKind, name: &str) -> Asset {
    let direct = Path::new(name);
    if is_json_path(direct) && direct.is_file() {
        let stem = direct
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(name)
            .to_string();
        let base_dir = direct
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        return Asset {
            name: stem,
            path: direct.to_path_buf(),
            base_dir,
        };
    }

    let base_dir = root.join(kind.dir_name());
    Asset {
        name: name.to_string(),
        path: base_dir.join(format!("{}.json", name)),
        base_dir,
    }
}
