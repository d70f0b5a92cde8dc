//! Cell-level codecs between typed answers and stored strings.
//!
//! Stored rows hold display labels of the configured storage locale. When
//! reading, labels of any locale are accepted so rows written by an older
//! install in another language still load.

use crate::catalog::{Choice, ChoiceSet, Locale, Localized, QuestionKind};
use crate::interview::coerce::parse_count;
use crate::interview::{AnswerValue, Conditional, PhotoStatus};

/// Cell written for a conditional field that does not apply.
pub const NOT_APPLICABLE: &str = "N/A";
pub const PHOTO_RECEIVED: &str = "Photo_Recue";
pub const PHOTO_MISSING: &str = "Non";
pub const GEO_OK: &str = "GPS_OK";

const OTHER_MARKER: Localized = Localized::new("Autre", "أخرى");
const OTHER_UNSPECIFIED: Localized = Localized::new("Autre (Non précisé)", "أخرى (غير محدد)");
const OTHER_SEPARATOR: char = ':';

/// Composite text stored for an "other" answer.
pub fn other_text(locale: Locale, free_text: &str) -> String {
    if free_text.is_empty() {
        OTHER_UNSPECIFIED.get(locale).to_string()
    } else {
        format!("{}{OTHER_SEPARATOR} {free_text}", OTHER_MARKER.get(locale))
    }
}

/// Recovers the free text of a composite "other" cell.
pub fn parse_other(cell: &str) -> Option<String> {
    let cell = cell.trim();
    for locale in Locale::ALL {
        if cell == OTHER_UNSPECIFIED.get(locale) || cell == OTHER_MARKER.get(locale) {
            return Some(String::new());
        }
        if let Some(rest) = cell
            .strip_prefix(OTHER_MARKER.get(locale))
            .and_then(|rest| rest.trim_start().strip_prefix(OTHER_SEPARATOR))
        {
            return Some(rest.trim().to_string());
        }
    }
    None
}

pub fn answer_cell(value: Option<&AnswerValue>, locale: Locale) -> String {
    value.map(|value| value.display(locale)).unwrap_or_default()
}

/// Decodes a main-question cell; an empty cell means "not answered".
/// Text cells are kept verbatim, so a blank-but-nonempty answer survives.
pub fn parse_answer(kind: QuestionKind, cell: &str) -> Option<AnswerValue> {
    let trimmed = cell.trim();
    let blank = match kind {
        QuestionKind::Text => cell.is_empty(),
        _ => trimmed.is_empty(),
    };
    if blank {
        return None;
    }
    let value = match kind {
        QuestionKind::Text => AnswerValue::Text(cell.to_string()),
        QuestionKind::Number => AnswerValue::Number(parse_count(trimmed)),
        QuestionKind::SingleChoice(set) => AnswerValue::Choice(choice_cell(set, trimmed)),
        QuestionKind::SingleChoiceWithOther(set) => match set.index_of_any_label(trimmed) {
            Some(index) if Some(index) != set.other_index() => {
                AnswerValue::Choice(Choice::new(set, index))
            }
            _ => match parse_other(trimmed) {
                Some(free_text) => AnswerValue::Other(free_text),
                None => AnswerValue::Choice(choice_cell(set, trimmed)),
            },
        },
        QuestionKind::Photo if trimmed == PHOTO_RECEIVED => {
            AnswerValue::Photo(PhotoStatus::Received)
        }
        QuestionKind::Photo => AnswerValue::Photo(PhotoStatus::NotProvided),
        QuestionKind::GeoCoordinates => AnswerValue::GeoAcknowledged,
    };
    Some(value)
}

/// Resolves a stored label to a choice. Bilingual legacy cells such as
/// `"Bon / جيدة"` are matched part by part; anything else unknown selects
/// the first option.
pub fn choice_cell(set: &'static ChoiceSet, cell: &str) -> Choice {
    let cell = cell.trim();
    let index = set.index_of_any_label(cell).or_else(|| {
        cell.split(" / ")
            .find_map(|part| set.index_of_any_label(part))
    });
    match index {
        Some(index) => Choice::new(set, index),
        None => {
            tracing::warn!(choice_set = set.name, cell, "stored label not recognised");
            Choice::first(set)
        }
    }
}

pub fn conditional_choice_cell(value: &Conditional<Choice>, locale: Locale) -> String {
    match value {
        Conditional::Applicable(choice) => choice.label(locale).to_string(),
        Conditional::NotApplicable => NOT_APPLICABLE.to_string(),
    }
}

pub fn conditional_text_cell(value: &Conditional<String>) -> String {
    match value {
        Conditional::Applicable(text) => text.clone(),
        Conditional::NotApplicable => NOT_APPLICABLE.to_string(),
    }
}
