mod config;
mod layout;

pub use config::{
    config_dir, config_file_path, load_or_default, save, workspace_root, SurveyConfig,
    CONFIG_FILE_NAME, HOME_ENV_VAR,
};
pub use layout::{
    ensure_workspace_structure, WorkspacePaths, EVENTS_FILE, LOGS_SUBDIR, SHEETS_SUBDIR,
};

use anyhow::Result;

use crate::catalog::QuestionCatalog;
use crate::orchestration::SurveyLog;
use crate::storage::FileSheetStore;

/// Resolved configuration plus workspace paths for one installation.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub config: SurveyConfig,
    pub paths: WorkspacePaths,
}

impl Workspace {
    /// Loads config and creates the directory structure if needed.
    pub fn open() -> Result<Self> {
        let paths = ensure_workspace_structure()?;
        let config = load_or_default()?;
        Ok(Self { config, paths })
    }

    pub fn sheet_store(&self) -> FileSheetStore {
        FileSheetStore::new(self.paths.sheet_path(&self.config.sheet_name))
    }

    pub fn log(&self) -> SurveyLog {
        SurveyLog::new(self.paths.events_path())
    }

    pub fn catalog(&self) -> Result<QuestionCatalog> {
        Ok(QuestionCatalog::standard()?)
    }
}
