//! Turning raw renderer input into typed answers, and typed answers back
//! into widget defaults.
//!
//! Every recovery rule lives here, once per question type: unparsable
//! numbers become zero, unknown choice labels select the first option, and
//! a photo keeps its previous status unless a new capture happened.

use crate::catalog::{Choice, ChoiceSet, Locale, Question, QuestionKind};

use super::record::{AnswerValue, InterviewRecord, PhotoStatus};

/// Raw value handed over by a renderer for one main question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawAnswer {
    Text(String),
    Number(String),
    /// Displayed label of the selected option, in the active locale.
    Choice(String),
    ChoiceWithOther {
        selected: String,
        free_text: String,
    },
    Photo {
        captured: bool,
    },
    Coordinates {
        latitude: String,
        longitude: String,
    },
}

impl RawAnswer {
    fn text(&self) -> &str {
        match self {
            RawAnswer::Text(text) | RawAnswer::Number(text) | RawAnswer::Choice(text) => text,
            RawAnswer::ChoiceWithOther { selected, .. } => selected,
            RawAnswer::Photo { .. } | RawAnswer::Coordinates { .. } => "",
        }
    }
}

/// Result of coercing a raw answer against its question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coerced {
    pub value: AnswerValue,
    /// Latitude/longitude captured by a coordinates question.
    pub coordinates: Option<(String, String)>,
}

impl Coerced {
    fn value(value: AnswerValue) -> Self {
        Self {
            value,
            coordinates: None,
        }
    }
}

/// Coerces `raw` according to the question's type.
pub fn coerce(
    question: &Question,
    locale: Locale,
    raw: RawAnswer,
    previous: Option<&AnswerValue>,
) -> Coerced {
    match question.kind {
        QuestionKind::Text => Coerced::value(AnswerValue::Text(raw.text().to_string())),
        QuestionKind::Number => Coerced::value(AnswerValue::Number(parse_count(raw.text()))),
        QuestionKind::SingleChoice(set) => {
            Coerced::value(AnswerValue::Choice(set.resolve(locale, raw.text())))
        }
        QuestionKind::SingleChoiceWithOther(set) => {
            let (selected, free_text) = match raw {
                RawAnswer::ChoiceWithOther {
                    selected,
                    free_text,
                } => (selected, free_text),
                other => (other.text().to_string(), String::new()),
            };
            let choice = set.resolve(locale, &selected);
            if choice.is(crate::catalog::OTHER_CODE) {
                Coerced::value(AnswerValue::Other(free_text.trim().to_string()))
            } else {
                Coerced::value(AnswerValue::Choice(choice))
            }
        }
        QuestionKind::Photo => {
            let captured = matches!(raw, RawAnswer::Photo { captured: true });
            let status = match (captured, previous) {
                (true, _) => PhotoStatus::Received,
                (false, Some(AnswerValue::Photo(status))) => *status,
                (false, _) => PhotoStatus::NotProvided,
            };
            Coerced::value(AnswerValue::Photo(status))
        }
        QuestionKind::GeoCoordinates => {
            let coordinates = match raw {
                RawAnswer::Coordinates {
                    latitude,
                    longitude,
                } => Some((latitude.trim().to_string(), longitude.trim().to_string())),
                _ => None,
            };
            Coerced {
                value: AnswerValue::GeoAcknowledged,
                coordinates,
            }
        }
    }
}

/// Parses a non-negative integer, falling back to zero.
pub fn parse_count(text: &str) -> i64 {
    match text.trim().parse::<i64>() {
        Ok(value) if value >= 0 => value,
        Ok(value) => {
            tracing::warn!(value, "negative number entered; using 0");
            0
        }
        Err(_) if text.trim().is_empty() => 0,
        Err(_) => {
            tracing::warn!(input = text, "number could not be parsed; using 0");
            0
        }
    }
}

/// Widget default shown when a question is (re)displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prefill {
    Text(String),
    Number(i64),
    Choice {
        selected: usize,
    },
    ChoiceWithOther {
        selected: usize,
        free_text: String,
    },
    Photo {
        previous: Option<PhotoStatus>,
    },
    Coordinates {
        latitude: String,
        longitude: String,
    },
}

/// Computes the default for `question` from what the record already holds.
pub fn prefill(question: &Question, record: &InterviewRecord) -> Prefill {
    let stored = record.answer(question.key);
    match question.kind {
        QuestionKind::Text => Prefill::Text(match stored {
            Some(AnswerValue::Text(text)) => text.clone(),
            _ => String::new(),
        }),
        QuestionKind::Number => Prefill::Number(match stored {
            Some(AnswerValue::Number(n)) => *n,
            Some(AnswerValue::Text(text)) => parse_count(text),
            _ => 0,
        }),
        QuestionKind::SingleChoice(set) => Prefill::Choice {
            selected: selected_index(set, stored),
        },
        QuestionKind::SingleChoiceWithOther(set) => match stored {
            Some(AnswerValue::Other(text)) => Prefill::ChoiceWithOther {
                selected: set.other_index().unwrap_or(0),
                free_text: text.clone(),
            },
            other => Prefill::ChoiceWithOther {
                selected: selected_index(set, other),
                free_text: String::new(),
            },
        },
        QuestionKind::Photo => Prefill::Photo {
            previous: match stored {
                Some(AnswerValue::Photo(status)) => Some(*status),
                _ => None,
            },
        },
        QuestionKind::GeoCoordinates => Prefill::Coordinates {
            latitude: record.latitude.clone(),
            longitude: record.longitude.clone(),
        },
    }
}

fn selected_index(set: &'static ChoiceSet, stored: Option<&AnswerValue>) -> usize {
    match stored {
        Some(AnswerValue::Choice(choice)) => same_set(set, choice).unwrap_or(0),
        _ => 0,
    }
}

fn same_set(set: &'static ChoiceSet, choice: &Choice) -> Option<usize> {
    std::ptr::eq(set, choice.set())
        .then_some(choice.index())
        .or_else(|| set.position(choice.code()))
}
