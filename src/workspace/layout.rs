//! Filesystem layout under the workspace root.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use super::config::workspace_root;

/// Subdirectory holding sheet documents.
pub const SHEETS_SUBDIR: &str = "sheets";
/// Subdirectory holding the audit log.
pub const LOGS_SUBDIR: &str = "logs";
pub const EVENTS_FILE: &str = "events.jsonl";

/// Convenience struct exposing important workspace paths.
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub sheets_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl WorkspacePaths {
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            sheets_dir: root.join(SHEETS_SUBDIR),
            logs_dir: root.join(LOGS_SUBDIR),
            root,
        }
    }

    pub fn sheet_path(&self, sheet_name: &str) -> PathBuf {
        self.sheets_dir.join(format!("{sheet_name}.json"))
    }

    pub fn events_path(&self) -> PathBuf {
        self.logs_dir.join(EVENTS_FILE)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Ensures the workspace structure exists under the resolved root.
pub fn ensure_workspace_structure() -> Result<WorkspacePaths> {
    let paths = WorkspacePaths::at(workspace_root()?);
    fs::create_dir_all(&paths.sheets_dir)?;
    fs::create_dir_all(&paths.logs_dir)?;
    Ok(paths)
}
