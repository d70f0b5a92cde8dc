pub mod catalog;
pub mod error;
pub mod export;
pub mod interview;
pub mod orchestration;
pub mod resume;
pub mod storage;
pub mod workspace;

// Re-export commonly used types for convenience.
pub use catalog::{Locale, QuestionCatalog};
pub use error::{StoreError, SurveyError, SurveyResult};
pub use export::RecordFlattener;
pub use interview::{FlowController, InterviewRecord, InterviewSession};
pub use orchestration::{EventType, SurveyEvent, SurveyLog};
pub use resume::{ResumeSession, SearchMatch};
pub use workspace::{SurveyConfig, Workspace};
