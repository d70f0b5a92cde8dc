//! Writing a finished interview to the store.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{SurveyError, SurveyResult};
use crate::export::RecordFlattener;
use crate::orchestration::{EventType, SubmissionDetails, SurveyLog};
use crate::storage::{RecordStore, RowLocator, SheetHandle};

use super::record::InterviewRecord;
use super::session::{FlowState, InterviewSession};

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub locator: RowLocator,
    /// True when an existing row was overwritten.
    pub updated: bool,
    pub event_id: Option<Uuid>,
}

/// Flattens `record`, writes it (overwriting the update target when the
/// session was resumed) and resets both values once the store accepted it.
///
/// On any failure `session` and `record` are returned untouched so the same
/// action can be retried.
pub fn submit<S: RecordStore>(
    store: &S,
    flattener: &RecordFlattener<'_>,
    session: &mut InterviewSession,
    record: &mut InterviewRecord,
    log: &SurveyLog,
    at: DateTime<Utc>,
) -> SurveyResult<SubmissionReceipt> {
    let state = session.state();
    if state != FlowState::Recap {
        return Err(SurveyError::InvalidTransition {
            action: "submit the interview",
            state: state.describe(),
        });
    }

    let target = session.update_target();
    let result = write_row(store, flattener, record, target, at);
    let mut details = SubmissionDetails {
        row: target,
        locale: session.locale(),
        dependents: record.dependents().len(),
        error: None,
    };

    match result {
        Ok(locator) => {
            details.row = Some(locator);
            let event_type = if target.is_some() {
                EventType::InterviewUpdated
            } else {
                EventType::InterviewSubmitted
            };
            let event_id = log.record_quietly(event_type, &details);
            tracing::info!(row = %locator, updated = target.is_some(), "interview stored");
            record.clear();
            session.reset();
            Ok(SubmissionReceipt {
                locator,
                updated: target.is_some(),
                event_id,
            })
        }
        Err(err) => {
            tracing::warn!(error = %err, retryable = err.is_retryable(), "submission failed");
            details.error = Some(err.to_string());
            log.record_quietly(EventType::SubmissionFailed, &details);
            Err(err)
        }
    }
}

fn write_row<S: RecordStore>(
    store: &S,
    flattener: &RecordFlattener<'_>,
    record: &InterviewRecord,
    target: Option<RowLocator>,
    at: DateTime<Utc>,
) -> SurveyResult<RowLocator> {
    let row = flattener.flatten(record, at)?;
    let mut sheet = store.connect()?;
    sheet.ensure_headers(&flattener.headers())?;
    match target {
        Some(locator) => {
            sheet.update(locator, &row)?;
            Ok(locator)
        }
        None => Ok(sheet.append(&row)?),
    }
}
