use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use householdsurvey::catalog::{ChoiceSet, Locale, Localized};
use householdsurvey::export::RecordFlattener;
use householdsurvey::interview::{
    AudioNarrator, DependentAction, DependentForm, DependentPrompt, InterviewDriver, IntroAction,
    Prefill, QuestionAction, QuestionPrompt, RawAnswer, Recap, RecapAction, Renderer,
    SilentNarrator,
};
use householdsurvey::resume::SearchMatch;
use householdsurvey::workspace::Workspace;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let workspace = Workspace::open()?;
    let catalog = workspace.catalog()?;
    let store = workspace.sheet_store();
    let log = workspace.log();
    let config = &workspace.config;
    tracing::info!(
        sheet = %store.path().display(),
        capacity = config.dependent_capacity,
        "survey workspace ready"
    );

    let flattener =
        RecordFlattener::new(&catalog, config.dependent_capacity, config.storage_locale);
    let mut narrator: Box<dyn AudioNarrator> = if config.narration_enabled {
        Box::new(ConsoleNarrator)
    } else {
        Box::new(SilentNarrator)
    };
    let mut driver = InterviewDriver::new(
        &catalog,
        flattener,
        &store,
        &log,
        narrator.as_mut(),
        config.default_locale,
    );
    let mut renderer = TerminalRenderer::new(io::stdin().lock());
    driver.run(&mut renderer)
}

/// Prints prompts as spoken lines on stderr.
struct ConsoleNarrator;

impl AudioNarrator for ConsoleNarrator {
    fn speak(&mut self, text: &str, _locale: Locale) -> Result<()> {
        let mut err = io::stderr().lock();
        writeln!(err, "~ {text}")?;
        Ok(())
    }
}

struct TerminalRenderer<R> {
    input: R,
}

impl<R: BufRead> TerminalRenderer<R> {
    fn new(input: R) -> Self {
        Self { input }
    }

    fn read_line(&mut self, label: &str) -> Result<String> {
        print!("{label} ");
        io::stdout().flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("Failed to read stdin")?;
        if read == 0 {
            anyhow::bail!("input closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Empty input keeps `default`.
    fn read_or(&mut self, label: &str, default: &str) -> Result<String> {
        let label = if default.is_empty() {
            format!("{label}:")
        } else {
            format!("{label} [{default}]:")
        };
        let value = self.read_line(&label)?;
        Ok(if value.is_empty() {
            default.to_string()
        } else {
            value
        })
    }

    /// Lists `options` and returns the chosen label. Accepts a number or a label.
    fn pick(&mut self, label: &str, options: &[&str], selected: usize) -> Result<String> {
        for (idx, option) in options.iter().enumerate() {
            println!("  {}. {option}", idx + 1);
        }
        let default = options.get(selected).copied().unwrap_or_default();
        let value = self.read_or(label, default)?;
        Ok(value
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| options.get(idx))
            .map(|option| option.to_string())
            .unwrap_or(value))
    }
}

impl<R: BufRead> Renderer for TerminalRenderer<R> {
    fn intro(&mut self, locale: Locale) -> Result<IntroAction> {
        println!();
        println!("== Recensement des ménages / إحصاء الأسر ==");
        println!("  fr | ar      start in that language");
        println!("  s <name>     search a stored interview");
        println!("  q            quit");
        let line = self.read_or(">", locale.code())?;
        Ok(match line.split_once(' ') {
            Some(("s", term)) => IntroAction::Resume(term.to_string()),
            _ if line == "q" => IntroAction::Quit,
            _ => IntroAction::Start(line.parse().unwrap_or(locale)),
        })
    }

    fn choose_match(
        &mut self,
        matches: &[SearchMatch],
        _locale: Locale,
    ) -> Result<Option<usize>> {
        for (idx, found) in matches.iter().enumerate() {
            println!("  {}. {} [{}]", idx + 1, found.label(), found.locator);
        }
        let line = self.read_line("# (empty to go back):")?;
        Ok(line.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1)))
    }

    fn ask(
        &mut self,
        prompt: &QuestionPrompt,
        progress: f32,
        _locale: Locale,
    ) -> Result<QuestionAction> {
        println!();
        println!(
            "[{}/{} {:>3.0}%] {}",
            prompt.position + 1,
            prompt.total,
            progress * 100.0,
            prompt.text
        );
        println!("  (< back, x cancel)");
        let raw = match (&prompt.prefill, prompt.question.kind) {
            (Prefill::Text(text), _) => {
                let value = self.read_or(">", text)?;
                if let Some(action) = navigation(&value) {
                    return Ok(action);
                }
                RawAnswer::Text(value)
            }
            (Prefill::Number(n), _) => {
                let value = self.read_or(">", &n.to_string())?;
                if let Some(action) = navigation(&value) {
                    return Ok(action);
                }
                RawAnswer::Number(value)
            }
            (Prefill::ChoiceWithOther { selected, free_text }, kind) => {
                let chosen = self.pick(">", &prompt.options, *selected)?;
                if let Some(action) = navigation(&chosen) {
                    return Ok(action);
                }
                let other = kind
                    .choices()
                    .and_then(|set| set.other_index())
                    .and_then(|idx| prompt.options.get(idx))
                    .is_some_and(|label| *label == chosen);
                let free_text = if other {
                    let value = self.read_or("  ...", free_text)?;
                    if let Some(action) = navigation(&value) {
                        return Ok(action);
                    }
                    value
                } else {
                    String::new()
                };
                RawAnswer::ChoiceWithOther {
                    selected: chosen,
                    free_text,
                }
            }
            (Prefill::Choice { selected }, _) => {
                let chosen = self.pick(">", &prompt.options, *selected)?;
                if let Some(action) = navigation(&chosen) {
                    return Ok(action);
                }
                RawAnswer::Choice(chosen)
            }
            (Prefill::Photo { previous }, _) => {
                let hint = if previous.is_some() { "y/N, kept" } else { "y/N" };
                let answer = self.read_line(&format!("photo taken? ({hint})"))?;
                if let Some(action) = navigation(&answer) {
                    return Ok(action);
                }
                RawAnswer::Photo {
                    captured: answer.eq_ignore_ascii_case("y"),
                }
            }
            (Prefill::Coordinates { latitude, longitude }, _) => {
                let latitude = self.read_or("lat", latitude)?;
                if let Some(action) = navigation(&latitude) {
                    return Ok(action);
                }
                let longitude = self.read_or("long", longitude)?;
                if let Some(action) = navigation(&longitude) {
                    return Ok(action);
                }
                RawAnswer::Coordinates {
                    latitude,
                    longitude,
                }
            }
        };
        Ok(QuestionAction::Submit(raw))
    }

    fn dependent(&mut self, prompt: &DependentPrompt, locale: Locale) -> Result<DependentAction> {
        use householdsurvey::catalog::dependents::{
            ACTIVITY_LABEL, ASSISTANCE, ASSISTANCE_LABEL, EDUCATION, EDUCATION_LABEL, GRADE,
            GRADE_LABEL, HEALTH, HEALTH_LABEL, ILLNESS, ILLNESS_LABEL, MOTHER_LABEL, NAME_LABEL,
            OCCUPATION, OCCUPATION_LABEL, PROVIDER_LABEL, SEX, SEX_LABEL,
        };

        println!();
        println!("-- {} ({}/{}) --", prompt.heading, prompt.index + 1, prompt.total);
        let stored = &prompt.form;
        let mut form = DependentForm {
            name: self.read_or(NAME_LABEL.get(locale), &stored.name)?,
            ..DependentForm::default()
        };
        match form.name.as_str() {
            "<" => return Ok(DependentAction::Previous(stored.clone())),
            "x" => return Ok(DependentAction::Cancel),
            _ => {}
        }
        form.sex = self.pick_field(SEX_LABEL, &SEX, locale, &stored.sex)?;
        form.mother = self.read_or(MOTHER_LABEL.get(locale), &stored.mother)?;
        form.education = self.pick_field(EDUCATION_LABEL, &EDUCATION, locale, &stored.education)?;
        form.occupation =
            self.pick_field(OCCUPATION_LABEL, &OCCUPATION, locale, &stored.occupation)?;
        form.health = self.pick_field(HEALTH_LABEL, &HEALTH, locale, &stored.health)?;
        form.assistance =
            self.pick_field(ASSISTANCE_LABEL, &ASSISTANCE, locale, &stored.assistance)?;

        // Conditional fields depend on the answers just given.
        let visible = form.visibility(locale);
        if visible.grade {
            let current = stored.grade.clone().unwrap_or_default();
            form.grade = Some(self.pick_field(GRADE_LABEL, &GRADE, locale, &current)?);
        }
        if visible.activity {
            let current = stored.female_activity.clone().unwrap_or_default();
            form.female_activity = Some(self.read_or(ACTIVITY_LABEL.get(locale), &current)?);
        }
        if visible.illness {
            let current = stored.illness.clone().unwrap_or_default();
            form.illness = Some(self.pick_field(ILLNESS_LABEL, &ILLNESS, locale, &current)?);
        }
        if visible.provider {
            let current = stored.provider.clone().unwrap_or_default();
            form.provider = Some(self.read_or(PROVIDER_LABEL.get(locale), &current)?);
        }
        Ok(DependentAction::Next(form))
    }

    fn recap(&mut self, recap: &Recap, _locale: Locale) -> Result<RecapAction> {
        println!();
        println!("== Recap ==");
        for line in &recap.lines {
            println!("  {:<4} {}: {}", line.question_id, line.prompt, line.answer);
        }
        if recap.offers_dependent_edit() {
            println!("  dependents: {}  (d to edit)", recap.dependent_count);
        }
        let line = self.read_line("send (s), edit <id>, x cancel:")?;
        Ok(match line.trim() {
            "s" => RecapAction::Submit,
            "d" => RecapAction::EditDependents,
            "x" => RecapAction::Cancel,
            other => RecapAction::EditQuestion(other.to_string()),
        })
    }

    fn notify(&mut self, message: &str) {
        println!("! {message}");
    }
}

impl<R: BufRead> TerminalRenderer<R> {
    /// Picks from `set`, preselecting the option labelled `current`.
    fn pick_field(
        &mut self,
        label: Localized,
        set: &ChoiceSet,
        locale: Locale,
        current: &str,
    ) -> Result<String> {
        let options = set.labels(locale);
        let selected = options.iter().position(|o| *o == current).unwrap_or(0);
        self.pick(label.get(locale), &options, selected)
    }
}

/// `<` steps back and `x` cancels, whatever the question type.
fn navigation(value: &str) -> Option<QuestionAction> {
    match value.trim() {
        "<" => Some(QuestionAction::Back),
        "x" => Some(QuestionAction::Cancel),
        _ => None,
    }
}
