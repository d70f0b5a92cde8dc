//! Spoken prompts.
//!
//! Narration is best effort: a narrator reports failures through its
//! return value, and the gate below logs and drops them.

use crate::catalog::Locale;

use super::session::{InterviewSession, Narrated};

pub trait AudioNarrator {
    fn speak(&mut self, text: &str, locale: Locale) -> anyhow::Result<()>;
}

/// Narrator used when speech is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNarrator;

impl AudioNarrator for SilentNarrator {
    fn speak(&mut self, _text: &str, _locale: Locale) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Keeps every utterance in memory; handy for transcripts and tests.
#[derive(Debug, Default, Clone)]
pub struct TranscriptNarrator {
    pub spoken: Vec<(Locale, String)>,
}

impl AudioNarrator for TranscriptNarrator {
    fn speak(&mut self, text: &str, locale: Locale) -> anyhow::Result<()> {
        self.spoken.push((locale, text.to_string()));
        Ok(())
    }
}

/// Speaks `text` unless the same prompt was already narrated on this visit.
pub(crate) fn announce(
    narrator: &mut dyn AudioNarrator,
    session: &mut InterviewSession,
    subject: Narrated,
    text: &str,
) {
    if session.last_narrated.as_ref() == Some(&subject) {
        return;
    }
    session.last_narrated = Some(subject);
    say(narrator, text, session.locale);
}

/// Fire-and-forget narration.
pub fn say(narrator: &mut dyn AudioNarrator, text: &str, locale: Locale) {
    if let Err(err) = narrator.speak(text, locale) {
        tracing::debug!(error = %err, "narration failed; continuing silently");
    }
}
