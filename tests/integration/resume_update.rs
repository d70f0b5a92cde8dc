use chrono::{TimeZone, Utc};

use super::support::{answer, answer_all, fill_dependents, finish, household_answers, text};
use super::IntegrationHarness;
use householdsurvey::interview::{
    submit, ChildLoopController, Cursor, FlowController, FlowState, InterviewRecord,
    InterviewSession, RawAnswer,
};
use householdsurvey::orchestration::EventType;
use householdsurvey::resume::ResumeSession;
use householdsurvey::storage::{FileSheet, RecordStore, RowLocator, SheetHandle};
use householdsurvey::Locale;

fn submit_household(
    harness: &IntegrationHarness,
    head: &str,
    family: &str,
    names: &[&str],
) -> RowLocator {
    let catalog = &harness.catalog;
    let flow = FlowController::new(catalog, harness.config.dependent_capacity);
    let children = ChildLoopController::new(catalog);
    let mut session = InterviewSession::new(Locale::French);
    let mut record = InterviewRecord::new();
    flow.start(&mut session).unwrap();
    answer_all(
        &flow,
        &mut session,
        &mut record,
        household_answers(head, family, names.len()),
    );
    fill_dependents(&children, &mut session, &mut record, names);
    assert_eq!(finish(&flow, &mut session, &mut record), FlowState::Recap);

    let at = Utc.with_ymd_and_hms(2024, 3, 9, 10, 30, 0).unwrap();
    let receipt = submit(
        &harness.store(),
        &harness.flattener(),
        &mut session,
        &mut record,
        &harness.log(),
        at,
    )
    .unwrap();
    assert!(!receipt.updated);
    assert_eq!(session.state(), FlowState::Intro);
    assert!(record.is_empty());
    receipt.locator
}

fn sheet(harness: &IntegrationHarness) -> FileSheet {
    harness.store().connect().unwrap()
}

#[test]
fn submissions_append_rows_after_the_header() {
    let harness = IntegrationHarness::new();
    assert_eq!(submit_household(&harness, "Sidi", "Ould Ahmed", &["Aicha"]), RowLocator(2));
    assert_eq!(submit_household(&harness, "Brahim", "Ahl Bah", &[]), RowLocator(3));

    let sheet = sheet(&harness);
    assert_eq!(sheet.header(), harness.flattener().headers().as_slice());
    assert_eq!(sheet.row_count(), 2);
    let first = sheet.row(RowLocator(2)).unwrap();
    assert_eq!(first.len(), harness.flattener().column_count());
    assert_eq!(first[0], "Ould Ahmed");

    let events = harness.log().load_events().unwrap();
    assert_eq!(events.len(), 2);
    assert!(events
        .iter()
        .all(|e| e.event_type == EventType::InterviewSubmitted));
}

#[test]
fn search_matches_either_name_without_case() {
    let harness = IntegrationHarness::new();
    submit_household(&harness, "Sidi Mohamed", "Ould Ahmed", &[]);
    submit_household(&harness, "Brahim", "Ahl Bah", &[]);
    let store = harness.store();
    let resume = ResumeSession::new(&store, harness.flattener());

    let found = resume.search("MOHAMED").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].locator, RowLocator(2));

    let found = resume.search("ah").unwrap();
    assert_eq!(found.len(), 2);

    assert!(resume.search("Zeinebou").unwrap().is_empty());
    assert!(resume.search("   ").unwrap().is_empty());
}

#[test]
fn resumed_interview_overwrites_its_row() {
    let harness = IntegrationHarness::new();
    submit_household(&harness, "Sidi", "Ould Ahmed", &["Aicha", "Khadija"]);
    submit_household(&harness, "Brahim", "Ahl Bah", &[]);
    let original = sheet(&harness).row(RowLocator(2)).unwrap().to_vec();

    let store = harness.store();
    let resume = ResumeSession::new(&store, harness.flattener());
    let found = resume.search("sidi").unwrap();
    let mut session = InterviewSession::new(Locale::French);
    let mut record = resume.load(&found[0], &mut session);
    assert_eq!(session.update_target(), Some(RowLocator(2)));
    assert_eq!(session.cursor(), Cursor::At(0));
    assert_eq!(record.dependents().len(), 2);
    assert_eq!(record.declared_dependents(), Some(2));

    // Re-submitting unchanged produces the identical row apart from the date.
    let catalog = &harness.catalog;
    let flow = FlowController::new(catalog, harness.config.dependent_capacity);
    let prompt = flow.prompt(&session, &record).unwrap();
    assert_eq!(prompt.prefill, householdsurvey::interview::Prefill::Text("Ould Ahmed".into()));
    answer(&flow, &mut session, &mut record, "Q1", text("Ould Ahmed Salem"));
    session_to_recap(&flow, &mut session, &mut record);

    let at = Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap();
    let receipt = submit(
        &store,
        &harness.flattener(),
        &mut session,
        &mut record,
        &harness.log(),
        at,
    )
    .unwrap();
    assert!(receipt.updated);
    assert_eq!(receipt.locator, RowLocator(2));

    let sheet = sheet(&harness);
    assert_eq!(sheet.row_count(), 2);
    let updated = sheet.row(RowLocator(2)).unwrap();
    assert_eq!(updated[0], "Ould Ahmed Salem");
    let date = harness.catalog.len() + 2;
    assert_eq!(updated[date], "2024-04-01 08:00:00");
    assert_eq!(updated[1..date], original[1..date]);
    assert_eq!(updated[date + 1..], original[date + 1..]);
    assert_eq!(sheet.row(RowLocator(3)).unwrap()[0], "Ahl Bah");

    let last = harness.log().load_events().unwrap().pop().unwrap();
    assert_eq!(last.event_type, EventType::InterviewUpdated);
}

#[test]
fn cancelling_a_resume_drops_the_update_target() {
    let harness = IntegrationHarness::new();
    submit_household(&harness, "Sidi", "Ould Ahmed", &[]);
    let store = harness.store();
    let resume = ResumeSession::new(&store, harness.flattener());
    let found = resume.search("ould").unwrap();
    let mut session = InterviewSession::new(Locale::Arabic);
    let mut record = resume.load(&found[0], &mut session);

    resume.cancel(&mut session, &mut record);
    assert!(record.is_empty());
    assert!(!session.is_update());
    assert_eq!(session.state(), FlowState::Intro);
    assert_eq!(session.locale(), Locale::Arabic);
}

/// Re-submits every remaining answer as it is pre-filled until the recap.
fn session_to_recap(
    flow: &FlowController<'_>,
    session: &mut InterviewSession,
    record: &mut InterviewRecord,
) {
    let children = ChildLoopController::new(flow.catalog());
    loop {
        match session.state() {
            FlowState::Recap => return,
            FlowState::InChildLoop(_) => {
                let prompt = children.prompt(session, record).unwrap();
                children.next(session, record, prompt.form).unwrap();
            }
            FlowState::Asking(_) => {
                let prompt = flow.prompt(session, record).unwrap();
                let raw = unchanged(&prompt.prefill, &prompt.options);
                flow.submit(session, record, raw).unwrap();
            }
            FlowState::Intro => panic!("resumed session fell back to the intro"),
        }
    }
}

fn unchanged(prefill: &householdsurvey::interview::Prefill, options: &[&str]) -> RawAnswer {
    use householdsurvey::interview::Prefill;
    match prefill {
        Prefill::Text(value) => RawAnswer::Text(value.clone()),
        Prefill::Number(n) => RawAnswer::Number(n.to_string()),
        Prefill::Choice { selected } => RawAnswer::Choice(options[*selected].to_string()),
        Prefill::ChoiceWithOther {
            selected,
            free_text,
        } => RawAnswer::ChoiceWithOther {
            selected: options[*selected].to_string(),
            free_text: free_text.clone(),
        },
        Prefill::Photo { .. } => RawAnswer::Photo { captured: false },
        Prefill::Coordinates {
            latitude,
            longitude,
        } => RawAnswer::Coordinates {
            latitude: latitude.clone(),
            longitude: longitude.clone(),
        },
    }
}
