//! Event loop tying a [`Renderer`] to the controllers.
//!
//! The driver performs exactly one transition per renderer action. Errors a
//! respondent can act on (capacity, store outage, bad edit target) are shown
//! through [`Renderer::notify`] and the loop carries on from the same state.

use anyhow::Result;
use chrono::Utc;
use serde_json::json;

use crate::catalog::{Locale, QuestionCatalog};
use crate::error::SurveyError;
use crate::export::RecordFlattener;
use crate::orchestration::{EventType, SurveyLog};
use crate::resume::{ResumeSession, SearchMatch};
use crate::storage::RecordStore;

use super::child_loop::{ChildLoopController, DependentForm, DependentPrompt};
use super::coerce::RawAnswer;
use super::flow::{FlowController, QuestionPrompt};
use super::narration::{announce, say, AudioNarrator};
use super::recap::{completion_message, Recap};
use super::record::InterviewRecord;
use super::session::{FlowState, InterviewSession, Narrated};
use super::submission::{submit, SubmissionReceipt};

pub enum IntroAction {
    Start(Locale),
    /// Search stored interviews by name.
    Resume(String),
    Quit,
}

pub enum QuestionAction {
    Submit(RawAnswer),
    Back,
    Cancel,
}

pub enum DependentAction {
    Next(DependentForm),
    Previous(DependentForm),
    Cancel,
}

pub enum RecapAction {
    Submit,
    EditQuestion(String),
    EditDependents,
    Cancel,
}

/// Presentation layer. Implementations collect raw input only; every
/// conversion and navigation decision stays in the controllers.
pub trait Renderer {
    fn intro(&mut self, locale: Locale) -> Result<IntroAction>;
    /// Picks one of the search results, or `None` to go back to the intro.
    fn choose_match(&mut self, matches: &[SearchMatch], locale: Locale) -> Result<Option<usize>>;
    fn ask(&mut self, prompt: &QuestionPrompt, progress: f32, locale: Locale)
        -> Result<QuestionAction>;
    fn dependent(&mut self, prompt: &DependentPrompt, locale: Locale) -> Result<DependentAction>;
    fn recap(&mut self, recap: &Recap, locale: Locale) -> Result<RecapAction>;
    fn notify(&mut self, message: &str);
}

pub struct InterviewDriver<'a, S: RecordStore> {
    flow: FlowController<'a>,
    children: ChildLoopController<'a>,
    flattener: RecordFlattener<'a>,
    store: &'a S,
    log: &'a SurveyLog,
    narrator: &'a mut dyn AudioNarrator,
    session: InterviewSession,
    record: InterviewRecord,
}

impl<'a, S: RecordStore> InterviewDriver<'a, S> {
    pub fn new(
        catalog: &'a QuestionCatalog,
        flattener: RecordFlattener<'a>,
        store: &'a S,
        log: &'a SurveyLog,
        narrator: &'a mut dyn AudioNarrator,
        locale: Locale,
    ) -> Self {
        Self {
            flow: FlowController::new(catalog, flattener.capacity()),
            children: ChildLoopController::new(catalog),
            flattener,
            store,
            log,
            narrator,
            session: InterviewSession::new(locale),
            record: InterviewRecord::new(),
        }
    }

    pub fn session(&self) -> &InterviewSession {
        &self.session
    }

    pub fn record(&self) -> &InterviewRecord {
        &self.record
    }

    /// Runs until the renderer quits from the intro screen.
    pub fn run(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        while self.step(renderer)? {}
        Ok(())
    }

    /// Handles one renderer action. Returns `false` once the renderer quit.
    pub fn step(&mut self, renderer: &mut dyn Renderer) -> Result<bool> {
        let locale = self.session.locale();
        let outcome = match self.session.state() {
            FlowState::Intro => match renderer.intro(locale)? {
                IntroAction::Quit => return Ok(false),
                IntroAction::Start(chosen) => {
                    self.session.set_locale(chosen);
                    self.log.record_quietly(
                        EventType::InterviewStarted,
                        json!({ "locale": chosen.code() }),
                    );
                    self.flow.start(&mut self.session).map(drop)
                }
                IntroAction::Resume(term) => {
                    self.resume(renderer, &term)?;
                    Ok(())
                }
            },
            FlowState::Asking(_) => {
                let Some(prompt) = self.flow.prompt(&self.session, &self.record) else {
                    return Ok(true);
                };
                announce(
                    self.narrator,
                    &mut self.session,
                    Narrated::Question(prompt.question.id),
                    prompt.text,
                );
                let progress = self.flow.progress(&self.session);
                match renderer.ask(&prompt, progress, locale)? {
                    QuestionAction::Submit(raw) => self
                        .flow
                        .submit(&mut self.session, &mut self.record, raw)
                        .map(drop),
                    QuestionAction::Back => self.flow.back(&mut self.session).map(drop),
                    QuestionAction::Cancel => {
                        self.cancel();
                        Ok(())
                    }
                }
            }
            FlowState::InChildLoop(_) => {
                let prompt = self.children.prompt(&self.session, &self.record)?;
                announce(
                    self.narrator,
                    &mut self.session,
                    Narrated::Dependent(prompt.index),
                    &prompt.heading,
                );
                match renderer.dependent(&prompt, locale)? {
                    DependentAction::Next(form) => self
                        .children
                        .next(&mut self.session, &mut self.record, form)
                        .map(drop),
                    DependentAction::Previous(form) => self
                        .children
                        .previous(&mut self.session, &mut self.record, form)
                        .map(drop),
                    DependentAction::Cancel => {
                        self.cancel();
                        Ok(())
                    }
                }
            }
            FlowState::Recap => {
                let recap = Recap::build(self.flow.catalog(), &self.record, locale);
                match renderer.recap(&recap, locale)? {
                    RecapAction::Submit => self.submit(renderer),
                    RecapAction::EditQuestion(id) => {
                        self.flow.edit_question(&mut self.session, &id).map(drop)
                    }
                    RecapAction::EditDependents => self
                        .flow
                        .edit_dependents(&mut self.session, &self.record)
                        .map(drop),
                    RecapAction::Cancel => {
                        self.cancel();
                        Ok(())
                    }
                }
            }
        };
        if let Err(err) = outcome {
            renderer.notify(&err.to_string());
        }
        Ok(true)
    }

    fn resume(&mut self, renderer: &mut dyn Renderer, term: &str) -> Result<()> {
        let locale = self.session.locale();
        let resume = ResumeSession::new(self.store, self.flattener);
        let matches = match resume.search(term) {
            Ok(matches) => matches,
            Err(err) => {
                renderer.notify(&err.to_string());
                return Ok(());
            }
        };
        if matches.is_empty() {
            renderer.notify(no_match_message(locale));
            return Ok(());
        }
        let picked = renderer.choose_match(&matches, locale)?;
        if let Some(found) = picked.and_then(|idx| matches.get(idx)) {
            self.record = resume.load(found, &mut self.session);
            self.log.record_quietly(
                EventType::ResumeLoaded,
                json!({ "row": found.locator, "dependents": self.record.dependents().len() }),
            );
        }
        Ok(())
    }

    fn submit(&mut self, renderer: &mut dyn Renderer) -> Result<(), SurveyError> {
        let locale = self.session.locale();
        let SubmissionReceipt { locator, .. } = submit(
            self.store,
            &self.flattener,
            &mut self.session,
            &mut self.record,
            self.log,
            Utc::now(),
        )?;
        tracing::debug!(row = %locator, "submission acknowledged");
        renderer.notify(completion_message(locale));
        say(self.narrator, completion_message(locale), locale);
        Ok(())
    }

    fn cancel(&mut self) {
        self.log.record_quietly(
            EventType::InterviewCancelled,
            json!({ "update": self.session.is_update() }),
        );
        self.flow.cancel(&mut self.session, &mut self.record);
    }
}

fn no_match_message(locale: Locale) -> &'static str {
    match locale {
        Locale::French => "Aucun questionnaire ne correspond à cette recherche.",
        Locale::Arabic => "لا يوجد استبيان مطابق لهذا البحث.",
    }
}
