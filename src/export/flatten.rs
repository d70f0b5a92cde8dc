//! Fixed-width row layout of a submitted interview.
//!
//! Main question keys come first in catalog order, then `Lat`, `Long` and
//! `Date_Enquete`, then `capacity` dependent slots of eleven columns each
//! (`Enfant_<n>_Nom` ... `Enfant_<n>_Orga`, `n` from 1). Unused slots are
//! written as empty cells so every row has the header's width.

use chrono::{DateTime, Utc};

use crate::catalog::dependents::{
    dependent_column, ASSISTANCE, DEPENDENT_COLUMNS, EDUCATION, GRADE, HEALTH, ILLNESS,
    OCCUPATION, SEX,
};
use crate::catalog::{Choice, ChoiceSet, Locale, QuestionCatalog};
use crate::error::{SurveyError, SurveyResult};
use crate::interview::child_loop::Visibility;
use crate::interview::{Conditional, DependentRecord, InterviewRecord};
use crate::storage::FieldMap;

use super::cells::{
    answer_cell, choice_cell, conditional_choice_cell, conditional_text_cell,
    parse_answer, NOT_APPLICABLE,
};

pub const LATITUDE_COLUMN: &str = "Lat";
pub const LONGITUDE_COLUMN: &str = "Long";
pub const DATE_COLUMN: &str = "Date_Enquete";
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Maps an [`InterviewRecord`] to the stored row and back.
#[derive(Debug, Clone, Copy)]
pub struct RecordFlattener<'a> {
    catalog: &'a QuestionCatalog,
    capacity: usize,
    locale: Locale,
}

impl<'a> RecordFlattener<'a> {
    /// `locale` selects the labels written into choice cells.
    pub fn new(catalog: &'a QuestionCatalog, capacity: usize, locale: Locale) -> Self {
        Self {
            catalog,
            capacity,
            locale,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = self.catalog.keys().map(str::to_string).collect();
        headers.extend([LATITUDE_COLUMN, LONGITUDE_COLUMN, DATE_COLUMN].map(str::to_string));
        for slot in 1..=self.capacity {
            headers.extend(
                DEPENDENT_COLUMNS
                    .iter()
                    .map(|column| dependent_column(slot, column)),
            );
        }
        headers
    }

    pub fn column_count(&self) -> usize {
        self.catalog.len() + 3 + self.capacity * DEPENDENT_COLUMNS.len()
    }

    /// Builds the stored row. A record holding more dependents than the
    /// layout reserves is refused rather than truncated.
    pub fn flatten(
        &self,
        record: &InterviewRecord,
        submitted_at: DateTime<Utc>,
    ) -> SurveyResult<Vec<String>> {
        let dependents = record.dependents();
        if dependents.len() > self.capacity {
            return Err(SurveyError::CapacityExceeded {
                requested: dependents.len(),
                capacity: self.capacity,
            });
        }
        let mut row = Vec::with_capacity(self.column_count());
        for question in self.catalog.ordered() {
            row.push(answer_cell(record.answer(question.key), self.locale));
        }
        row.push(record.latitude.clone());
        row.push(record.longitude.clone());
        row.push(submitted_at.format(DATE_FORMAT).to_string());
        for dependent in dependents {
            row.extend(self.dependent_cells(dependent));
        }
        let padding = (self.capacity - dependents.len()) * DEPENDENT_COLUMNS.len();
        row.extend(std::iter::repeat(String::new()).take(padding));
        Ok(row)
    }

    /// Rebuilds a record from a stored row keyed by header name.
    ///
    /// Dependent slots are read in order until the first one whose cells are
    /// all empty; the declared count becomes the number of slots read.
    pub fn unflatten(&self, fields: &FieldMap) -> InterviewRecord {
        let mut record = InterviewRecord::new();
        for question in self.catalog.ordered() {
            if let Some(value) = parse_answer(question.kind, cell(fields, question.key)) {
                record.set_answer(question.key, value);
            }
        }
        record.latitude = cell(fields, LATITUDE_COLUMN).to_string();
        record.longitude = cell(fields, LONGITUDE_COLUMN).to_string();

        let mut count = 0;
        for slot in 1..=self.capacity {
            let cells: Vec<&str> = DEPENDENT_COLUMNS
                .iter()
                .map(|column| cell(fields, &dependent_column(slot, column)))
                .collect();
            if cells.iter().all(|value| value.trim().is_empty()) {
                break;
            }
            record.store_dependent(count, parse_dependent(&cells));
            count += 1;
        }
        record.declare_dependents(count);
        tracing::debug!(dependents = count, "record rebuilt from stored row");
        record
    }

    fn dependent_cells(&self, dependent: &DependentRecord) -> [String; 11] {
        let locale = self.locale;
        [
            dependent.name.clone(),
            dependent.sex.label(locale).to_string(),
            dependent.mother.clone(),
            dependent.education.label(locale).to_string(),
            dependent.occupation.label(locale).to_string(),
            conditional_choice_cell(&dependent.grade, locale),
            conditional_text_cell(&dependent.female_activity),
            dependent.health.label(locale).to_string(),
            conditional_choice_cell(&dependent.illness, locale),
            dependent.assistance.label(locale).to_string(),
            conditional_text_cell(&dependent.provider),
        ]
    }
}

fn cell<'f>(fields: &'f FieldMap, column: &str) -> &'f str {
    fields.get(column).map(String::as_str).unwrap_or("")
}

/// `cells` follows [`DEPENDENT_COLUMNS`]. Conditional fields are re-derived
/// from their governing cells so a reloaded record keeps its invariants.
fn parse_dependent(cells: &[&str]) -> DependentRecord {
    let sex = choice_cell(&SEX, cells[1]);
    let occupation = choice_cell(&OCCUPATION, cells[4]);
    let health = choice_cell(&HEALTH, cells[7]);
    let assistance = choice_cell(&ASSISTANCE, cells[9]);
    let visible = Visibility::from_choices(sex, occupation, health, assistance);

    let conditional_choice = |applies: bool, set: &'static ChoiceSet, cell: &str| {
        if !applies {
            Conditional::NotApplicable
        } else if cell.trim() == NOT_APPLICABLE {
            Conditional::Applicable(Choice::first(set))
        } else {
            Conditional::Applicable(choice_cell(set, cell))
        }
    };
    let conditional_text = |applies: bool, cell: &str| {
        if applies {
            Conditional::Applicable(cell.to_string())
        } else {
            Conditional::NotApplicable
        }
    };

    DependentRecord {
        name: cells[0].to_string(),
        sex,
        mother: cells[2].to_string(),
        education: choice_cell(&EDUCATION, cells[3]),
        occupation,
        grade: conditional_choice(visible.grade, &GRADE, cells[5]),
        female_activity: conditional_text(visible.activity, cells[6]),
        health,
        illness: conditional_choice(visible.illness, &ILLNESS, cells[8]),
        assistance,
        provider: conditional_text(visible.provider, cells[10]),
    }
}
