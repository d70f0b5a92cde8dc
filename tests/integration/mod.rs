use householdsurvey::catalog::QuestionCatalog;
use householdsurvey::export::RecordFlattener;
use householdsurvey::orchestration::SurveyLog;
use householdsurvey::storage::FileSheetStore;
use householdsurvey::workspace::{SurveyConfig, WorkspacePaths};
use householdsurvey::Locale;
use std::path::Path;
use tempfile::TempDir;

pub struct IntegrationHarness {
    workspace: TempDir,
    pub catalog: QuestionCatalog,
    pub config: SurveyConfig,
}

impl IntegrationHarness {
    pub fn new() -> Self {
        let workspace = TempDir::new().expect("failed to create temp workspace");
        Self {
            workspace,
            catalog: QuestionCatalog::standard().expect("standard catalog is valid"),
            config: SurveyConfig::default(),
        }
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn paths(&self) -> WorkspacePaths {
        WorkspacePaths::at(self.workspace.path())
    }

    pub fn store(&self) -> FileSheetStore {
        FileSheetStore::new(self.paths().sheet_path(&self.config.sheet_name))
    }

    pub fn log(&self) -> SurveyLog {
        SurveyLog::new(self.paths().events_path())
    }

    pub fn flattener(&self) -> RecordFlattener<'_> {
        RecordFlattener::new(
            &self.catalog,
            self.config.dependent_capacity,
            Locale::French,
        )
    }
}

mod interview_branching;
mod resume_update;
mod submission_failure;
pub mod support;
