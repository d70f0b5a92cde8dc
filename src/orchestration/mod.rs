//! Append-only audit trail of interview lifecycle events.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::catalog::Locale;
use crate::storage::RowLocator;

/// Type of lifecycle events that can be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    InterviewStarted,
    InterviewSubmitted,
    InterviewUpdated,
    InterviewCancelled,
    ResumeLoaded,
    SubmissionFailed,
}

/// Single audit event stored as one JSONL line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyEvent {
    pub event_id: Uuid,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    pub details: serde_json::Value,
}

/// Payload of submission events. Answers themselves stay in the sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionDetails {
    pub row: Option<RowLocator>,
    pub locale: Locale,
    pub dependents: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Wraps the events file of a workspace.
#[derive(Debug, Clone)]
pub struct SurveyLog {
    events_path: PathBuf,
}

impl SurveyLog {
    pub fn new(events_path: impl Into<PathBuf>) -> Self {
        Self {
            events_path: events_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.events_path
    }

    pub fn append_event(&self, event: &SurveyEvent) -> Result<()> {
        if let Some(parent) = self.events_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.events_path)
            .with_context(|| format!("Failed to open audit log {:?}", self.events_path))?;
        file.write_all(serde_json::to_string(event)?.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    /// Builds and appends an event, returning its id.
    pub fn record(&self, event_type: EventType, details: impl Serialize) -> Result<Uuid> {
        let event = SurveyEvent {
            event_id: Uuid::new_v4(),
            event_type,
            timestamp: Utc::now(),
            details: serde_json::to_value(details)?,
        };
        self.append_event(&event)?;
        Ok(event.event_id)
    }

    /// Like [`SurveyLog::record`], but a failed write is only reported
    /// through `tracing`. Used where the action itself already succeeded.
    pub fn record_quietly(&self, event_type: EventType, details: impl Serialize) -> Option<Uuid> {
        match self.record(event_type, details) {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!(error = %err, ?event_type, "audit event could not be written");
                None
            }
        }
    }

    pub fn load_events(&self) -> Result<Vec<SurveyEvent>> {
        if !self.events_path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.events_path)?;
        let mut events = Vec::new();
        for line in data.lines().filter(|l| !l.trim().is_empty()) {
            let event: SurveyEvent = serde_json::from_str(line)
                .with_context(|| format!("Corrupt audit line in {:?}", self.events_path))?;
            events.push(event);
        }
        Ok(events)
    }
}
