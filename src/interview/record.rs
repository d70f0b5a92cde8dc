//! In-memory answers for one respondent.

use std::collections::BTreeMap;

use crate::catalog::dependents::{ASSISTANCE, EDUCATION, HEALTH, OCCUPATION, SEX};
use crate::catalog::{Choice, Locale};
use crate::export::cells;

/// Whether a dwelling photo was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoStatus {
    Received,
    NotProvided,
}

/// A coerced answer to a main question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Text(String),
    Number(i64),
    Choice(Choice),
    /// The "other" option with the respondent's free text (possibly empty).
    Other(String),
    Photo(PhotoStatus),
    /// Coordinates acknowledged; the values live on the record itself.
    GeoAcknowledged,
}

impl AnswerValue {
    /// Display text, also the cell written to storage for this answer.
    pub fn display(&self, locale: Locale) -> String {
        match self {
            AnswerValue::Text(text) => text.clone(),
            AnswerValue::Number(n) => n.to_string(),
            AnswerValue::Choice(choice) => choice.label(locale).to_string(),
            AnswerValue::Other(text) => cells::other_text(locale, text),
            AnswerValue::Photo(PhotoStatus::Received) => cells::PHOTO_RECEIVED.to_string(),
            AnswerValue::Photo(PhotoStatus::NotProvided) => cells::PHOTO_MISSING.to_string(),
            AnswerValue::GeoAcknowledged => cells::GEO_OK.to_string(),
        }
    }
}

/// A sub-field that only applies when its governing field has a given value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conditional<T> {
    NotApplicable,
    Applicable(T),
}

impl<T> Conditional<T> {
    pub fn as_applicable(&self) -> Option<&T> {
        match self {
            Conditional::Applicable(value) => Some(value),
            Conditional::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Conditional::Applicable(_))
    }
}

/// One dependent's sub-record (questions 15–25).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentRecord {
    pub name: String,
    pub sex: Choice,
    pub mother: String,
    pub education: Choice,
    pub occupation: Choice,
    pub grade: Conditional<Choice>,
    pub female_activity: Conditional<String>,
    pub health: Choice,
    pub illness: Conditional<Choice>,
    pub assistance: Choice,
    pub provider: Conditional<String>,
}

impl Default for DependentRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            sex: Choice::first(&SEX),
            mother: String::new(),
            education: Choice::first(&EDUCATION),
            occupation: Choice::first(&OCCUPATION),
            grade: Conditional::NotApplicable,
            female_activity: Conditional::NotApplicable,
            health: Choice::first(&HEALTH),
            illness: Conditional::NotApplicable,
            assistance: ASSISTANCE
                .choice("no")
                .unwrap_or_else(|| Choice::first(&ASSISTANCE)),
            provider: Conditional::NotApplicable,
        }
    }
}

/// Main answers, coordinates and the dependent list of one interview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterviewRecord {
    answers: BTreeMap<String, AnswerValue>,
    pub latitude: String,
    pub longitude: String,
    dependents: Vec<DependentRecord>,
    declared_dependents: Option<usize>,
}

impl InterviewRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, key: &str) -> Option<&AnswerValue> {
        self.answers.get(key)
    }

    pub fn set_answer(&mut self, key: impl Into<String>, value: AnswerValue) {
        self.answers.insert(key.into(), value);
    }

    pub fn answers(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn dependents(&self) -> &[DependentRecord] {
        &self.dependents
    }

    pub fn dependent(&self, index: usize) -> Option<&DependentRecord> {
        self.dependents.get(index)
    }

    pub fn declared_dependents(&self) -> Option<usize> {
        self.declared_dependents
    }

    /// Records the declared count and grows the list to match it. Existing
    /// entries are never dropped, even when the new count is smaller.
    pub fn declare_dependents(&mut self, count: usize) {
        self.declared_dependents = Some(count);
        if self.dependents.len() < count {
            self.dependents.resize_with(count, DependentRecord::default);
        }
    }

    /// Replaces the entry at `index`, appending if it is the next slot.
    pub fn store_dependent(&mut self, index: usize, dependent: DependentRecord) {
        if index < self.dependents.len() {
            self.dependents[index] = dependent;
        } else {
            self.dependents.resize_with(index, DependentRecord::default);
            self.dependents.push(dependent);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty() && self.dependents.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
