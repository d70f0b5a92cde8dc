//! Static question catalog and branching metadata.
//!
//! The catalog is fixed at compile time. [`QuestionCatalog::standard`] checks
//! its integrity once (unique ids and keys, resolvable jump targets, choice
//! sets usable by their question type) so the flow controller can treat a
//! missing question id as a configuration bug rather than an input error.

pub mod dependents;
pub mod model;
pub mod questions;

use std::collections::HashSet;

pub use model::{
    Choice, ChoiceOption, ChoiceSet, JumpRule, Locale, Localized, Question, QuestionKind,
    OTHER_CODE,
};
pub use questions::{
    DEPENDENT_COUNT_ID, FAMILY_NAME_KEY, HAS_DEPENDENTS_ID, HEAD_ALIVE_ID, HEAD_NAME_KEY, NO,
    PHOTO_ID, YES,
};

use crate::error::{SurveyError, SurveyResult};

/// Ordered view over the hard-coded questions plus their jump table.
#[derive(Debug, Clone, Copy)]
pub struct QuestionCatalog {
    questions: &'static [Question],
    jumps: &'static [JumpRule],
}

impl QuestionCatalog {
    /// The household questionnaire, integrity-checked.
    pub fn standard() -> SurveyResult<Self> {
        let catalog = Self {
            questions: &questions::MAIN_QUESTIONS,
            jumps: &questions::JUMP_RULES,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn ordered(&self) -> &'static [Question] {
        self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&'static Question> {
        self.questions.get(position)
    }

    pub fn index_of(&self, id: &str) -> SurveyResult<usize> {
        self.questions
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| SurveyError::UnknownQuestion(id.to_string()))
    }

    pub fn by_id(&self, id: &str) -> SurveyResult<&'static Question> {
        self.index_of(id).map(|idx| &self.questions[idx])
    }

    pub fn by_key(&self, key: &str) -> Option<&'static Question> {
        self.questions.iter().find(|q| q.key == key)
    }

    /// Record keys in catalog order; these lead the persisted row.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.questions.iter().map(|q| q.key)
    }

    /// Target question id when `question` answered with option `code` skips ahead.
    pub fn jump_target(&self, question: &str, code: &str) -> Option<&'static str> {
        self.jumps
            .iter()
            .find(|rule| rule.from == question && rule.when == code)
            .map(|rule| rule.to)
    }

    pub fn validate(&self) -> SurveyResult<()> {
        let mut ids = HashSet::new();
        let mut keys = HashSet::new();
        for question in self.questions {
            if !ids.insert(question.id) {
                return Err(invalid(format!("duplicate question id {}", question.id)));
            }
            if !keys.insert(question.key) {
                return Err(invalid(format!("duplicate record key {}", question.key)));
            }
            match question.kind {
                QuestionKind::SingleChoice(set) if set.is_empty() => {
                    return Err(invalid(format!("{} has no options", question.id)));
                }
                QuestionKind::SingleChoiceWithOther(set) if set.other_index().is_none() => {
                    return Err(invalid(format!(
                        "{} accepts free text but has no '{OTHER_CODE}' option",
                        question.id
                    )));
                }
                _ => {}
            }
        }
        for rule in self.jumps {
            let from = self.by_id(rule.from)?;
            let to = self.index_of(rule.to)?;
            if to <= self.index_of(rule.from)? {
                return Err(invalid(format!("jump {} -> {} goes backwards", rule.from, rule.to)));
            }
            let answers_match = from
                .kind
                .choices()
                .map(|set| set.position(rule.when).is_some())
                .unwrap_or(false);
            if !answers_match {
                return Err(invalid(format!(
                    "jump from {} keyed on unknown answer '{}'",
                    rule.from, rule.when
                )));
            }
        }
        for id in [HEAD_ALIVE_ID, HAS_DEPENDENTS_ID, DEPENDENT_COUNT_ID, PHOTO_ID] {
            self.index_of(id)?;
        }
        if self.by_id(DEPENDENT_COUNT_ID)?.kind != QuestionKind::Number {
            return Err(invalid(format!("{DEPENDENT_COUNT_ID} must be numeric")));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> SurveyError {
    SurveyError::InvalidCatalog(reason)
}
