//! Building blocks of the question catalog: locales, localized text, choice
//! sets and the question descriptor itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Locales the interview can be conducted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "ar")]
    Arabic,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::French, Locale::Arabic];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::French => "fr",
            Locale::Arabic => "ar",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::French => "Français",
            Locale::Arabic => "العربية",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fr" | "french" | "français" => Ok(Locale::French),
            "ar" | "arabic" | "العربية" => Ok(Locale::Arabic),
            other => Err(anyhow::anyhow!("Unsupported locale '{other}' (expected fr or ar)")),
        }
    }
}

/// A piece of text available in every supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localized {
    pub fr: &'static str,
    pub ar: &'static str,
}

impl Localized {
    pub const fn new(fr: &'static str, ar: &'static str) -> Self {
        Self { fr, ar }
    }

    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::French => self.fr,
            Locale::Arabic => self.ar,
        }
    }
}

/// One selectable option: a language-independent code plus its labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub code: &'static str,
    pub label: Localized,
}

impl ChoiceOption {
    pub const fn new(code: &'static str, fr: &'static str, ar: &'static str) -> Self {
        Self {
            code,
            label: Localized::new(fr, ar),
        }
    }
}

/// Option code reserved for the free-text "other" option.
pub const OTHER_CODE: &str = "other";

/// Ordered option list. Positional correspondence across locales holds by
/// construction since each option carries all of its labels.
#[derive(Debug, PartialEq, Eq)]
pub struct ChoiceSet {
    pub name: &'static str,
    pub options: &'static [ChoiceOption],
}

impl ChoiceSet {
    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn labels(&self, locale: Locale) -> Vec<&'static str> {
        self.options.iter().map(|opt| opt.label.get(locale)).collect()
    }

    pub fn position(&self, code: &str) -> Option<usize> {
        self.options.iter().position(|opt| opt.code == code)
    }

    pub fn other_index(&self) -> Option<usize> {
        self.position(OTHER_CODE)
    }

    /// Finds the option whose label matches `label` in the given locale.
    pub fn index_of_label(&self, locale: Locale, label: &str) -> Option<usize> {
        let label = label.trim();
        self.options
            .iter()
            .position(|opt| opt.label.get(locale) == label)
    }

    /// Like [`ChoiceSet::index_of_label`] but accepts a label from any locale.
    pub fn index_of_any_label(&self, label: &str) -> Option<usize> {
        Locale::ALL
            .iter()
            .find_map(|locale| self.index_of_label(*locale, label))
    }

    /// Resolves a displayed label to a choice, falling back to the first
    /// option when the label is not part of the active locale's list.
    pub fn resolve(&'static self, locale: Locale, label: &str) -> Choice {
        match self.index_of_label(locale, label) {
            Some(index) => Choice::new(self, index),
            None => {
                tracing::warn!(
                    choice_set = self.name,
                    locale = locale.code(),
                    label,
                    "label not among options; selecting first option"
                );
                Choice::first(self)
            }
        }
    }

    pub fn choice(&'static self, code: &str) -> Option<Choice> {
        self.position(code).map(|index| Choice::new(self, index))
    }
}

/// A selected option inside a [`ChoiceSet`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    set: &'static ChoiceSet,
    index: usize,
}

impl Choice {
    /// Builds a choice, clamping out-of-range indices to the first option.
    pub fn new(set: &'static ChoiceSet, index: usize) -> Self {
        let index = if index < set.len() { index } else { 0 };
        Self { set, index }
    }

    pub fn first(set: &'static ChoiceSet) -> Self {
        Self { set, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set(&self) -> &'static ChoiceSet {
        self.set
    }

    pub fn code(&self) -> &'static str {
        self.set.options[self.index].code
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        self.set.options[self.index].label.get(locale)
    }

    pub fn is(&self, code: &str) -> bool {
        self.code() == code
    }
}

impl fmt::Debug for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Choice({}:{})", self.set.name, self.code())
    }
}

/// Input type of a main question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Text,
    Number,
    SingleChoice(&'static ChoiceSet),
    SingleChoiceWithOther(&'static ChoiceSet),
    Photo,
    GeoCoordinates,
}

impl QuestionKind {
    pub fn choices(&self) -> Option<&'static ChoiceSet> {
        match *self {
            QuestionKind::SingleChoice(set) | QuestionKind::SingleChoiceWithOther(set) => {
                Some(set)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Text => "text",
            QuestionKind::Number => "number",
            QuestionKind::SingleChoice(_) => "single_choice",
            QuestionKind::SingleChoiceWithOther(_) => "single_choice_with_other",
            QuestionKind::Photo => "photo",
            QuestionKind::GeoCoordinates => "geo_coordinates",
        }
    }
}

/// Immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub key: &'static str,
    pub kind: QuestionKind,
    pub prompt: Localized,
}

impl Question {
    pub fn prompt(&self, locale: Locale) -> &'static str {
        self.prompt.get(locale)
    }
}

/// Branching rule: answering `from` with option `when` skips ahead to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpRule {
    pub from: &'static str,
    pub when: &'static str,
    pub to: &'static str,
}
