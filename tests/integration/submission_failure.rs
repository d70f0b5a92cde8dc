use chrono::Utc;

use super::support::{answer_all, fill_dependents, finish, household_answers, UnreachableStore};
use super::IntegrationHarness;
use householdsurvey::interview::{
    submit, ChildLoopController, FlowController, FlowState, InterviewRecord, InterviewSession,
};
use householdsurvey::orchestration::EventType;
use householdsurvey::resume::ResumeSession;
use householdsurvey::storage::{FileSheetStore, RowLocator, SheetDocument};
use householdsurvey::{Locale, StoreError, SurveyError};

fn completed(harness: &IntegrationHarness) -> (InterviewSession, InterviewRecord) {
    let flow = FlowController::new(&harness.catalog, 15);
    let children = ChildLoopController::new(&harness.catalog);
    let mut session = InterviewSession::new(Locale::French);
    let mut record = InterviewRecord::new();
    flow.start(&mut session).unwrap();
    answer_all(
        &flow,
        &mut session,
        &mut record,
        household_answers("Sidi", "Ould Ahmed", 1),
    );
    fill_dependents(&children, &mut session, &mut record, &["Aicha"]);
    finish(&flow, &mut session, &mut record);
    (session, record)
}

#[test]
fn unreachable_store_keeps_the_interview_for_a_retry() {
    let harness = IntegrationHarness::new();
    let (mut session, mut record) = completed(&harness);
    let before = record.clone();

    let err = submit(
        &UnreachableStore,
        &harness.flattener(),
        &mut session,
        &mut record,
        &harness.log(),
        Utc::now(),
    )
    .unwrap_err();
    assert!(matches!(err, SurveyError::Store(StoreError::Connection(_))));
    assert!(err.is_retryable());
    assert_eq!(session.state(), FlowState::Recap);
    assert_eq!(record, before);

    let events = harness.log().load_events().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, EventType::SubmissionFailed);
    assert_eq!(events[0].details["dependents"], 1);

    let receipt = submit(
        &harness.store(),
        &harness.flattener(),
        &mut session,
        &mut record,
        &harness.log(),
        Utc::now(),
    )
    .unwrap();
    assert_eq!(receipt.locator, RowLocator(2));
    assert_eq!(session.state(), FlowState::Intro);
}

#[test]
fn sheet_with_a_foreign_layout_is_left_alone() {
    let harness = IntegrationHarness::new();
    let path = harness.paths().sheet_path(&harness.config.sheet_name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let foreign = SheetDocument {
        header: vec!["Nom".into(), "Prenom".into()],
        rows: vec![vec!["a".into(), "b".into()]],
    };
    std::fs::write(&path, serde_json::to_vec(&foreign).unwrap()).unwrap();

    let (mut session, mut record) = completed(&harness);
    let err = submit(
        &FileSheetStore::new(path.clone()),
        &harness.flattener(),
        &mut session,
        &mut record,
        &harness.log(),
        Utc::now(),
    )
    .unwrap_err();
    assert!(matches!(err, SurveyError::Store(StoreError::Rejected(_))));
    assert!(!err.is_retryable());
    assert_eq!(session.state(), FlowState::Recap);
    let on_disk: SheetDocument =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(on_disk, foreign);
}

#[test]
fn submitting_before_the_recap_is_refused() {
    let harness = IntegrationHarness::new();
    let mut session = InterviewSession::new(Locale::French);
    let mut record = InterviewRecord::new();
    let err = submit(
        &harness.store(),
        &harness.flattener(),
        &mut session,
        &mut record,
        &harness.log(),
        Utc::now(),
    )
    .unwrap_err();
    assert!(matches!(err, SurveyError::InvalidTransition { .. }));
    assert!(!harness.store().path().exists());
}

#[test]
fn failed_search_reports_the_outage() {
    let harness = IntegrationHarness::new();
    let resume = ResumeSession::new(&UnreachableStore, harness.flattener());
    let err = resume.search("sidi").unwrap_err();
    assert!(matches!(err, SurveyError::Store(StoreError::Connection(_))));
}
