//! Transient navigation state of one interview.

use crate::catalog::Locale;
use crate::storage::RowLocator;

/// Main-question pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    BeforeStart,
    At(usize),
    AfterEnd,
}

/// Externally visible state of the flow state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Intro,
    Asking(usize),
    InChildLoop(usize),
    Recap,
}

impl FlowState {
    pub fn describe(&self) -> &'static str {
        match self {
            FlowState::Intro => "on the intro screen",
            FlowState::Asking(_) => "asking a main question",
            FlowState::InChildLoop(_) => "inside the dependents loop",
            FlowState::Recap => "on the recap screen",
        }
    }
}

/// What was narrated last, so prompts are spoken once per visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Narrated {
    Question(&'static str),
    Dependent(usize),
}

#[derive(Debug, Clone, Default)]
pub struct InterviewSession {
    pub(crate) cursor: Cursor,
    pub(crate) locale: Locale,
    pub(crate) child_index: Option<usize>,
    pub(crate) edit_mode: bool,
    pub(crate) update_target: Option<RowLocator>,
    pub(crate) last_narrated: Option<Narrated>,
}

impl InterviewSession {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    pub fn state(&self) -> FlowState {
        if let Some(index) = self.child_index {
            return FlowState::InChildLoop(index);
        }
        match self.cursor {
            Cursor::BeforeStart => FlowState::Intro,
            Cursor::At(position) => FlowState::Asking(position),
            Cursor::AfterEnd => FlowState::Recap,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn in_child_loop(&self) -> bool {
        self.child_index.is_some()
    }

    pub fn child_index(&self) -> Option<usize> {
        self.child_index
    }

    pub fn is_editing(&self) -> bool {
        self.edit_mode
    }

    /// Row being overwritten when the interview was resumed from storage.
    pub fn update_target(&self) -> Option<RowLocator> {
        self.update_target
    }

    pub fn is_update(&self) -> bool {
        self.update_target.is_some()
    }

    /// Back to the intro screen, keeping only the chosen locale.
    pub fn reset(&mut self) {
        *self = Self::new(self.locale);
    }
}
