use std::collections::VecDeque;

use anyhow::{anyhow, Result};
use householdsurvey::interview::{
    AudioNarrator, ChildLoopController, DependentAction, DependentForm, DependentPrompt,
    FlowController, FlowState, InterviewRecord, InterviewSession, IntroAction, QuestionAction,
    QuestionPrompt, RawAnswer, Recap, RecapAction, Renderer,
};
use householdsurvey::resume::SearchMatch;
use householdsurvey::storage::{FieldMap, RecordStore, RowLocator, SheetHandle};
use householdsurvey::{Locale, StoreError};

/// Submits `raw` after checking the flow is on question `id`.
pub fn answer(
    flow: &FlowController<'_>,
    session: &mut InterviewSession,
    record: &mut InterviewRecord,
    id: &str,
    raw: RawAnswer,
) -> FlowState {
    assert_eq!(
        flow.current_question(session).map(|q| q.id),
        Some(id),
        "expected to be asked {id}"
    );
    flow.submit(session, record, raw)
        .unwrap_or_else(|err| panic!("answer to {id} rejected: {err}"))
}

pub fn text(value: &str) -> RawAnswer {
    RawAnswer::Text(value.to_string())
}

pub fn choice(label: &str) -> RawAnswer {
    RawAnswer::Choice(label.to_string())
}

/// Answers for Q1..Q14 of a living head of family, in French.
pub fn household_answers(
    head: &str,
    family: &str,
    dependents: usize,
) -> Vec<(&'static str, RawAnswer)> {
    vec![
        ("Q1", text(family)),
        ("Q2", text("Ahl Cheikh")),
        ("Q3", text(head)),
        ("Q4", text("Mariem")),
        ("Q5", choice("Oui")),
        ("Q6", RawAnswer::Number("52".into())),
        ("Q7", choice("Homme")),
        ("Q8", choice("Marié(e)")),
        ("Q9", text("22 33 44 55")),
        ("Q10", text("1234567890")),
        (
            "Q11",
            RawAnswer::ChoiceWithOther {
                selected: "Hassi El Bekay".into(),
                free_text: String::new(),
            },
        ),
        (
            "Q12",
            RawAnswer::ChoiceWithOther {
                selected: "Autre".into(),
                free_text: "Renter pending paperwork".into(),
            },
        ),
        ("Q13", choice("Oui")),
        ("Q14", RawAnswer::Number(dependents.to_string())),
    ]
}

pub fn answer_all(
    flow: &FlowController<'_>,
    session: &mut InterviewSession,
    record: &mut InterviewRecord,
    answers: Vec<(&'static str, RawAnswer)>,
) -> FlowState {
    let mut state = session.state();
    for (id, raw) in answers {
        state = answer(flow, session, record, id, raw);
    }
    state
}

/// Photo and GPS, ending on the recap.
pub fn finish(
    flow: &FlowController<'_>,
    session: &mut InterviewSession,
    record: &mut InterviewRecord,
) -> FlowState {
    answer(flow, session, record, "Q26", RawAnswer::Photo { captured: true });
    answer(
        flow,
        session,
        record,
        "Q27",
        RawAnswer::Coordinates {
            latitude: "18.0735".into(),
            longitude: "-15.9582".into(),
        },
    )
}

pub fn dependent_form(name: &str, sex: &str) -> DependentForm {
    DependentForm {
        name: name.to_string(),
        sex: sex.to_string(),
        mother: "Mariem".into(),
        education: "Primaire".into(),
        occupation: "Étudiant".into(),
        female_activity: Some("Couture".into()),
        health: "Bon".into(),
        assistance: "Non".into(),
        ..DependentForm::default()
    }
}

/// Walks the dependents loop forward, one form per dependent.
pub fn fill_dependents(
    children: &ChildLoopController<'_>,
    session: &mut InterviewSession,
    record: &mut InterviewRecord,
    names: &[&str],
) -> FlowState {
    let mut state = session.state();
    for (idx, name) in names.iter().enumerate() {
        assert_eq!(state, FlowState::InChildLoop(idx));
        state = children
            .next(session, record, dependent_form(name, "Femme"))
            .expect("dependent accepted");
    }
    state
}

/// Store whose sheet can never be reached.
pub struct UnreachableStore;

pub struct NoSheet;

impl RecordStore for UnreachableStore {
    type Sheet = NoSheet;

    fn connect(&self) -> Result<NoSheet, StoreError> {
        Err(StoreError::Connection("network is down".into()))
    }
}

impl SheetHandle for NoSheet {
    fn ensure_headers(&mut self, _headers: &[String]) -> Result<(), StoreError> {
        unreachable!("never connected")
    }

    fn append(&mut self, _row: &[String]) -> Result<RowLocator, StoreError> {
        unreachable!("never connected")
    }

    fn update(&mut self, _locator: RowLocator, _row: &[String]) -> Result<(), StoreError> {
        unreachable!("never connected")
    }

    fn search_rows(
        &self,
        _predicate: &dyn Fn(&FieldMap) -> bool,
    ) -> Result<Vec<(RowLocator, FieldMap)>, StoreError> {
        unreachable!("never connected")
    }
}

/// Narrator whose speech engine is never available.
#[derive(Debug, Default)]
pub struct BrokenNarrator {
    pub attempts: usize,
}

impl AudioNarrator for BrokenNarrator {
    fn speak(&mut self, _text: &str, _locale: Locale) -> Result<()> {
        self.attempts += 1;
        Err(anyhow!("speech engine unavailable"))
    }
}

/// Scripted step of a [`ScriptedRenderer`].
pub enum Step {
    Intro(IntroAction),
    Pick(Option<usize>),
    Ask(QuestionAction),
    Dependent(DependentAction),
    Recap(RecapAction),
}

/// Renderer replaying a fixed script and recording what it was shown.
#[derive(Default)]
pub struct ScriptedRenderer {
    pub script: VecDeque<Step>,
    pub asked: Vec<String>,
    pub dependents_shown: Vec<usize>,
    pub recaps: Vec<Recap>,
    pub notices: Vec<String>,
}

impl ScriptedRenderer {
    pub fn new(script: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    fn next_step(&mut self, expected: &str) -> Result<Step> {
        self.script
            .pop_front()
            .ok_or_else(|| anyhow!("script exhausted while expecting {expected}"))
    }
}

impl Renderer for ScriptedRenderer {
    fn intro(&mut self, _locale: Locale) -> Result<IntroAction> {
        match self.next_step("intro")? {
            Step::Intro(action) => Ok(action),
            _ => Err(anyhow!("intro shown out of script order")),
        }
    }

    fn choose_match(&mut self, _matches: &[SearchMatch], _locale: Locale) -> Result<Option<usize>> {
        match self.next_step("match selection")? {
            Step::Pick(choice) => Ok(choice),
            _ => Err(anyhow!("match list shown out of script order")),
        }
    }

    fn ask(
        &mut self,
        prompt: &QuestionPrompt,
        _progress: f32,
        _locale: Locale,
    ) -> Result<QuestionAction> {
        self.asked.push(prompt.question.id.to_string());
        match self.next_step(prompt.question.id)? {
            Step::Ask(action) => Ok(action),
            _ => Err(anyhow!("question {} shown out of script order", prompt.question.id)),
        }
    }

    fn dependent(&mut self, prompt: &DependentPrompt, _locale: Locale) -> Result<DependentAction> {
        self.dependents_shown.push(prompt.index);
        match self.next_step("dependent")? {
            Step::Dependent(action) => Ok(action),
            _ => Err(anyhow!("dependent {} shown out of script order", prompt.index)),
        }
    }

    fn recap(&mut self, recap: &Recap, _locale: Locale) -> Result<RecapAction> {
        self.recaps.push(recap.clone());
        match self.next_step("recap")? {
            Step::Recap(action) => Ok(action),
            _ => Err(anyhow!("recap shown out of script order")),
        }
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
