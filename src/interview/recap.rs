//! Summary shown once the last question is answered.

use crate::catalog::{Locale, QuestionCatalog};

use super::record::InterviewRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecapLine {
    pub question_id: &'static str,
    pub prompt: &'static str,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recap {
    pub lines: Vec<RecapLine>,
    pub dependent_count: usize,
}

impl Recap {
    /// Answered main questions in catalog order. Skipped questions are left
    /// out, so they are also absent from the edit picker.
    pub fn build(catalog: &QuestionCatalog, record: &InterviewRecord, locale: Locale) -> Self {
        let lines = catalog
            .ordered()
            .iter()
            .filter_map(|question| {
                record.answer(question.key).map(|answer| RecapLine {
                    question_id: question.id,
                    prompt: question.prompt(locale),
                    answer: answer.display(locale),
                })
            })
            .collect();
        Self {
            lines,
            dependent_count: record.dependents().len(),
        }
    }

    /// The dependents section (and its edit action) only shows when there
    /// is something to edit.
    pub fn offers_dependent_edit(&self) -> bool {
        self.dependent_count > 0
    }

    pub fn editable_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.lines.iter().map(|line| line.question_id)
    }
}

pub fn completion_message(locale: Locale) -> &'static str {
    match locale {
        Locale::French => {
            "Félicitations ! Le questionnaire a été rempli sans erreur et envoyé avec succès."
        }
        Locale::Arabic => "مبروك! تم ملء الاستبيان بنجاح وإرساله.",
    }
}
