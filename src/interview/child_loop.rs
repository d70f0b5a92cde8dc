//! Repeating sub-interview, one pass per declared dependent.

use crate::catalog::dependents::{
    dependent_intro, ASSISTANCE, ASSISTED, EDUCATION, FEMALE, GRADE, HEALTH, ILLNESS, OCCUPATION,
    OFFICIAL, SEX, SICK,
};
use crate::catalog::{Choice, Locale, QuestionCatalog, DEPENDENT_COUNT_ID, PHOTO_ID};
use crate::error::{SurveyError, SurveyResult};

use super::record::{Conditional, DependentRecord, InterviewRecord};
use super::session::{Cursor, FlowState, InterviewSession};

/// Raw sub-form values as entered, choice fields given as displayed labels.
///
/// Conditional fields are read only when their governing field calls for
/// them; whatever a renderer sends otherwise is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependentForm {
    pub name: String,
    pub sex: String,
    pub mother: String,
    pub education: String,
    pub occupation: String,
    pub grade: Option<String>,
    pub female_activity: Option<String>,
    pub health: String,
    pub illness: Option<String>,
    pub assistance: String,
    pub provider: Option<String>,
}

impl DependentForm {
    /// The form as it would be pre-filled for `dependent`.
    pub fn from_record(dependent: &DependentRecord, locale: Locale) -> Self {
        Self {
            name: dependent.name.clone(),
            sex: dependent.sex.label(locale).to_string(),
            mother: dependent.mother.clone(),
            education: dependent.education.label(locale).to_string(),
            occupation: dependent.occupation.label(locale).to_string(),
            grade: dependent
                .grade
                .as_applicable()
                .map(|choice| choice.label(locale).to_string()),
            female_activity: dependent.female_activity.as_applicable().cloned(),
            health: dependent.health.label(locale).to_string(),
            illness: dependent
                .illness
                .as_applicable()
                .map(|choice| choice.label(locale).to_string()),
            assistance: dependent.assistance.label(locale).to_string(),
            provider: dependent.provider.as_applicable().cloned(),
        }
    }

    /// Which conditional fields the governing answers call for.
    pub fn visibility(&self, locale: Locale) -> Visibility {
        Visibility::from_choices(
            SEX.resolve(locale, &self.sex),
            OCCUPATION.resolve(locale, &self.occupation),
            HEALTH.resolve(locale, &self.health),
            ASSISTANCE.resolve(locale, &self.assistance),
        )
    }

    /// Coerces the form, writing "not applicable" into every conditional
    /// field its governing field does not call for.
    pub fn into_record(self, locale: Locale) -> DependentRecord {
        let sex = SEX.resolve(locale, &self.sex);
        let occupation = OCCUPATION.resolve(locale, &self.occupation);
        let health = HEALTH.resolve(locale, &self.health);
        let assistance = ASSISTANCE.resolve(locale, &self.assistance);
        let visible = Visibility::from_choices(sex, occupation, health, assistance);

        DependentRecord {
            name: self.name.trim().to_string(),
            sex,
            mother: self.mother.trim().to_string(),
            education: EDUCATION.resolve(locale, &self.education),
            occupation,
            grade: conditional(visible.grade, || {
                GRADE.resolve(locale, self.grade.as_deref().unwrap_or_default())
            }),
            female_activity: conditional(visible.activity, || {
                self.female_activity.unwrap_or_default().trim().to_string()
            }),
            health,
            illness: conditional(visible.illness, || {
                ILLNESS.resolve(locale, self.illness.as_deref().unwrap_or_default())
            }),
            assistance,
            provider: conditional(visible.provider, || {
                self.provider.unwrap_or_default().trim().to_string()
            }),
        }
    }
}

fn conditional<T>(applies: bool, value: impl FnOnce() -> T) -> Conditional<T> {
    if applies {
        Conditional::Applicable(value())
    } else {
        Conditional::NotApplicable
    }
}

/// Conditional sub-fields required by the current governing answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility {
    pub grade: bool,
    pub activity: bool,
    pub illness: bool,
    pub provider: bool,
}

impl Visibility {
    pub fn from_choices(
        sex: Choice,
        occupation: Choice,
        health: Choice,
        assistance: Choice,
    ) -> Self {
        Self {
            grade: occupation.is(OFFICIAL),
            activity: sex.is(FEMALE),
            illness: health.is(SICK),
            provider: assistance.is(ASSISTED),
        }
    }

    pub fn of(dependent: &DependentRecord) -> Self {
        Self::from_choices(
            dependent.sex,
            dependent.occupation,
            dependent.health,
            dependent.assistance,
        )
    }
}

/// What a renderer needs to show one dependent's sub-form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentPrompt {
    pub index: usize,
    pub total: usize,
    pub heading: String,
    pub form: DependentForm,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Copy)]
pub struct ChildLoopController<'a> {
    catalog: &'a QuestionCatalog,
}

impl<'a> ChildLoopController<'a> {
    pub fn new(catalog: &'a QuestionCatalog) -> Self {
        Self { catalog }
    }

    /// Number of passes the loop makes: the declared count, which may be
    /// smaller than the stored list after the respondent lowered it.
    pub fn total(&self, record: &InterviewRecord) -> usize {
        record
            .declared_dependents()
            .unwrap_or(record.dependents().len())
    }

    pub fn prompt(
        &self,
        session: &InterviewSession,
        record: &InterviewRecord,
    ) -> SurveyResult<DependentPrompt> {
        let index = loop_index(session, "show a dependent")?;
        let stored = record.dependent(index).cloned().unwrap_or_default();
        Ok(DependentPrompt {
            index,
            total: self.total(record),
            heading: dependent_intro(session.locale, index),
            visibility: Visibility::of(&stored),
            form: DependentForm::from_record(&stored, session.locale),
        })
    }

    /// Saves the sub-form and moves to the next dependent, leaving the loop
    /// for the photo question after the last one.
    pub fn next(
        &self,
        session: &mut InterviewSession,
        record: &mut InterviewRecord,
        form: DependentForm,
    ) -> SurveyResult<FlowState> {
        let index = loop_index(session, "move to the next dependent")?;
        let photo = self.catalog.index_of(PHOTO_ID)?;
        record.store_dependent(index, form.into_record(session.locale));
        if index + 1 < self.total(record) {
            session.child_index = Some(index + 1);
        } else {
            tracing::info!(completed = index + 1, "leaving dependents loop");
            session.child_index = None;
            session.cursor = Cursor::At(photo);
        }
        Ok(session.state())
    }

    /// Saves the sub-form and steps back, leaving the loop for the count
    /// question when already on the first dependent.
    pub fn previous(
        &self,
        session: &mut InterviewSession,
        record: &mut InterviewRecord,
        form: DependentForm,
    ) -> SurveyResult<FlowState> {
        let index = loop_index(session, "move to the previous dependent")?;
        let count_question = self.catalog.index_of(DEPENDENT_COUNT_ID)?;
        record.store_dependent(index, form.into_record(session.locale));
        if index > 0 {
            session.child_index = Some(index - 1);
        } else {
            session.child_index = None;
            session.cursor = Cursor::At(count_question);
        }
        Ok(session.state())
    }
}

fn loop_index(session: &InterviewSession, action: &'static str) -> SurveyResult<usize> {
    match session.state() {
        FlowState::InChildLoop(index) => Ok(index),
        other => Err(SurveyError::InvalidTransition {
            action,
            state: other.describe(),
        }),
    }
}
