//! Finding a stored interview again and reopening it for correction.

use crate::catalog::{FAMILY_NAME_KEY, HEAD_NAME_KEY};
use crate::error::SurveyResult;
use crate::export::RecordFlattener;
use crate::interview::{Cursor, InterviewRecord, InterviewSession};
use crate::storage::{FieldMap, RecordStore, RowLocator, SheetHandle};

/// A stored row whose names matched a search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub locator: RowLocator,
    pub fields: FieldMap,
}

impl SearchMatch {
    /// Short label for a result list: head of family, then family name.
    pub fn label(&self) -> String {
        let head = self.fields.get(HEAD_NAME_KEY).map(String::as_str).unwrap_or("");
        let family = self
            .fields
            .get(FAMILY_NAME_KEY)
            .map(String::as_str)
            .unwrap_or("");
        format!("{head} ({family})")
    }
}

pub struct ResumeSession<'a, S: RecordStore> {
    store: &'a S,
    flattener: RecordFlattener<'a>,
}

impl<'a, S: RecordStore> ResumeSession<'a, S> {
    pub fn new(store: &'a S, flattener: RecordFlattener<'a>) -> Self {
        Self { store, flattener }
    }

    /// Case-insensitive substring search over the head-of-family and family
    /// name columns. A blank term matches nothing.
    pub fn search(&self, term: &str) -> SurveyResult<Vec<SearchMatch>> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let sheet = self.store.connect()?;
        let rows = sheet.search_rows(&|fields| matches_term(fields, &needle))?;
        tracing::info!(matches = rows.len(), "resume search finished");
        Ok(rows
            .into_iter()
            .map(|(locator, fields)| SearchMatch { locator, fields })
            .collect())
    }

    /// Rebuilds the record of `found` and puts `session` in update mode on
    /// the first question. The chosen locale is kept.
    pub fn load(&self, found: &SearchMatch, session: &mut InterviewSession) -> InterviewRecord {
        let record = self.flattener.unflatten(&found.fields);
        session.reset();
        session.update_target = Some(found.locator);
        session.cursor = Cursor::At(0);
        tracing::info!(row = %found.locator, "stored interview reopened");
        record
    }

    /// Drops the loaded record and the update target.
    pub fn cancel(&self, session: &mut InterviewSession, record: &mut InterviewRecord) {
        record.clear();
        session.reset();
    }
}

fn matches_term(fields: &FieldMap, needle: &str) -> bool {
    [HEAD_NAME_KEY, FAMILY_NAME_KEY].iter().any(|key| {
        fields
            .get(*key)
            .is_some_and(|value| value.to_lowercase().contains(needle))
    })
}
