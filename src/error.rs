//! Typed failures raised by the interview engine and the record store.
//!
//! Plumbing (config, workspace, audit log) reports through `anyhow`; these
//! enums exist for the cases a caller has to tell apart, such as a store
//! outage the respondent can retry versus a broken catalog.

use std::io;

use thiserror::Error;

/// Failures surfaced by the record store contract.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or opened.
    #[error("store unreachable: {0}")]
    Connection(String),
    /// The store refused the write (layout mismatch, unknown row, ...).
    #[error("store rejected the write: {0}")]
    Rejected(String),
    #[error("store I/O failure: {0}")]
    Io(#[from] io::Error),
    #[error("store payload could not be decoded: {0}")]
    Format(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether presenting the failure and letting the respondent retry the
    /// same action makes sense.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Connection(_) | StoreError::Io(_))
    }
}

/// Failures raised while driving an interview.
#[derive(Debug, Error)]
pub enum SurveyError {
    /// A question id referenced by a jump rule or edit target does not exist.
    #[error("unknown question id '{0}'")]
    UnknownQuestion(String),
    #[error("question catalog is inconsistent: {0}")]
    InvalidCatalog(String),
    #[error("{requested} dependents declared but the layout only reserves {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SurveyError {
    pub fn is_retryable(&self) -> bool {
        match self {
            SurveyError::Store(err) => err.is_retryable(),
            _ => false,
        }
    }
}

pub type SurveyResult<T> = Result<T, SurveyError>;
