//! Guided interview flow over the main questionnaire.
//!
//! The controller is stateless apart from the catalog and capacity it was
//! built with: callers own an [`InterviewSession`] and an [`InterviewRecord`]
//! and pass both by reference to every transition. A transition either
//! completes or returns an error without touching either value.

use crate::catalog::{Question, QuestionCatalog, DEPENDENT_COUNT_ID};
use crate::error::{SurveyError, SurveyResult};

use super::coerce::{coerce, prefill, Prefill, RawAnswer};
use super::record::{AnswerValue, InterviewRecord};
use super::session::{Cursor, FlowState, InterviewSession};

/// Everything a renderer needs to show the current main question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPrompt {
    pub question: &'static Question,
    pub text: &'static str,
    pub options: Vec<&'static str>,
    pub prefill: Prefill,
    pub position: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct FlowController<'a> {
    catalog: &'a QuestionCatalog,
    capacity: usize,
}

impl<'a> FlowController<'a> {
    /// `capacity` is the maximum number of dependents the stored layout holds.
    pub fn new(catalog: &'a QuestionCatalog, capacity: usize) -> Self {
        Self { catalog, capacity }
    }

    pub fn catalog(&self) -> &'a QuestionCatalog {
        self.catalog
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Leaves the intro screen for the first question.
    pub fn start(&self, session: &mut InterviewSession) -> SurveyResult<FlowState> {
        expect_state(session, "start the interview", |s| matches!(s, FlowState::Intro))?;
        session.cursor = Cursor::At(0);
        tracing::debug!(locale = session.locale.code(), "interview started");
        Ok(session.state())
    }

    pub fn current_question(&self, session: &InterviewSession) -> Option<&'static Question> {
        match session.state() {
            FlowState::Asking(position) => self.catalog.get(position),
            _ => None,
        }
    }

    pub fn prompt(
        &self,
        session: &InterviewSession,
        record: &InterviewRecord,
    ) -> Option<QuestionPrompt> {
        let FlowState::Asking(position) = session.state() else {
            return None;
        };
        let question = self.catalog.get(position)?;
        Some(QuestionPrompt {
            question,
            text: question.prompt(session.locale),
            options: question
                .kind
                .choices()
                .map(|set| set.labels(session.locale))
                .unwrap_or_default(),
            prefill: prefill(question, record),
            position,
            total: self.catalog.len(),
        })
    }

    /// Fraction of the questionnaire behind the respondent.
    pub fn progress(&self, session: &InterviewSession) -> f32 {
        let total = self.catalog.len() as f32 + 1.0;
        match session.cursor {
            Cursor::BeforeStart => 0.0,
            Cursor::At(position) => (position as f32 + 1.0) / total,
            Cursor::AfterEnd => 1.0,
        }
    }

    /// Stores the answer to the current question and moves on.
    ///
    /// Next position, in priority order: jump rules, entry into the
    /// dependents loop, the end of an edit detour, then the next question.
    pub fn submit(
        &self,
        session: &mut InterviewSession,
        record: &mut InterviewRecord,
        raw: RawAnswer,
    ) -> SurveyResult<FlowState> {
        let position = asking_position(session, "submit an answer")?;
        let question = self
            .catalog
            .get(position)
            .ok_or_else(|| SurveyError::UnknownQuestion(format!("#{position}")))?;
        let coerced = coerce(question, session.locale, raw, record.answer(question.key));

        let declared = match (&coerced.value, question.id == DEPENDENT_COUNT_ID) {
            (AnswerValue::Number(n), true) => {
                let count = usize::try_from(*n).unwrap_or(0);
                if count > self.capacity {
                    return Err(SurveyError::CapacityExceeded {
                        requested: count,
                        capacity: self.capacity,
                    });
                }
                Some(count)
            }
            _ => None,
        };
        let jump = match &coerced.value {
            AnswerValue::Choice(choice) => self
                .catalog
                .jump_target(question.id, choice.code())
                .map(|target| self.catalog.index_of(target))
                .transpose()?,
            _ => None,
        };

        record.set_answer(question.key, coerced.value);
        if let Some((latitude, longitude)) = coerced.coordinates {
            record.latitude = latitude;
            record.longitude = longitude;
        }

        if let Some(target) = jump {
            tracing::info!(from = question.id, to = target, "jump rule applied");
            session.cursor = Cursor::At(target);
            return Ok(session.state());
        }

        if let Some(count) = declared {
            record.declare_dependents(count);
            if count > 0 {
                tracing::info!(count, "entering dependents loop");
                session.child_index = Some(0);
                return Ok(session.state());
            }
        }

        if session.edit_mode {
            session.edit_mode = false;
            session.cursor = Cursor::AfterEnd;
            return Ok(session.state());
        }

        session.cursor = self.after(position);
        tracing::debug!(from = question.id, state = ?session.state(), "advanced");
        Ok(session.state())
    }

    /// Steps back one question; an edit detour returns straight to the recap.
    pub fn back(&self, session: &mut InterviewSession) -> SurveyResult<FlowState> {
        let position = asking_position(session, "go back")?;
        if session.edit_mode {
            session.edit_mode = false;
            session.cursor = Cursor::AfterEnd;
        } else if position > 0 {
            session.cursor = Cursor::At(position - 1);
        }
        Ok(session.state())
    }

    /// Opens a single question from the recap screen for correction.
    pub fn edit_question(
        &self,
        session: &mut InterviewSession,
        question_id: &str,
    ) -> SurveyResult<FlowState> {
        expect_state(session, "edit a question", |s| matches!(s, FlowState::Recap))?;
        let position = self.catalog.index_of(question_id)?;
        session.cursor = Cursor::At(position);
        session.edit_mode = true;
        Ok(session.state())
    }

    /// Re-enters the dependents loop from the recap screen.
    pub fn edit_dependents(
        &self,
        session: &mut InterviewSession,
        record: &InterviewRecord,
    ) -> SurveyResult<FlowState> {
        expect_state(session, "edit dependents", |s| matches!(s, FlowState::Recap))?;
        if record.dependents().is_empty() {
            return Err(SurveyError::InvalidTransition {
                action: "edit dependents",
                state: "no dependents are recorded",
            });
        }
        session.child_index = Some(0);
        Ok(session.state())
    }

    /// Discards the interview and returns to the intro screen.
    pub fn cancel(&self, session: &mut InterviewSession, record: &mut InterviewRecord) {
        tracing::info!(update = session.is_update(), "interview cancelled");
        record.clear();
        session.reset();
    }

    fn after(&self, position: usize) -> Cursor {
        if position + 1 >= self.catalog.len() {
            Cursor::AfterEnd
        } else {
            Cursor::At(position + 1)
        }
    }
}

fn asking_position(session: &InterviewSession, action: &'static str) -> SurveyResult<usize> {
    match session.state() {
        FlowState::Asking(position) => Ok(position),
        other => Err(SurveyError::InvalidTransition {
            action,
            state: other.describe(),
        }),
    }
}

fn expect_state(
    session: &InterviewSession,
    action: &'static str,
    allowed: impl Fn(FlowState) -> bool,
) -> SurveyResult<()> {
    let state = session.state();
    if allowed(state) {
        Ok(())
    } else {
        Err(SurveyError::InvalidTransition {
            action,
            state: state.describe(),
        })
    }
}
