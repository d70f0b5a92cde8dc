use super::support::{
    answer, answer_all, choice, dependent_form, fill_dependents, finish, household_answers, text,
};
use super::IntegrationHarness;
use householdsurvey::catalog::{DEPENDENT_COUNT_ID, HAS_DEPENDENTS_ID, PHOTO_ID};
use householdsurvey::interview::{
    ChildLoopController, Conditional, FlowController, FlowState, InterviewRecord,
    InterviewSession, RawAnswer, Recap,
};
use householdsurvey::{Locale, SurveyError};

#[test]
fn head_not_alive_skips_to_dependents_question() {
    let harness = IntegrationHarness::new();
    let catalog = &harness.catalog;
    let flow = FlowController::new(catalog, 15);
    let mut session = InterviewSession::new(Locale::French);
    let mut record = InterviewRecord::new();
    flow.start(&mut session).unwrap();

    let answers: Vec<_> = household_answers("Sidi", "Ould Ahmed", 0)
        .into_iter()
        .take(4)
        .collect();
    answer_all(&flow, &mut session, &mut record, answers);
    let state = answer(&flow, &mut session, &mut record, "Q5", choice("Non"));
    assert_eq!(
        state,
        FlowState::Asking(catalog.index_of(HAS_DEPENDENTS_ID).unwrap())
    );

    let state = answer(&flow, &mut session, &mut record, "Q13", choice("Non"));
    assert_eq!(state, FlowState::Asking(catalog.index_of(PHOTO_ID).unwrap()));
    assert_eq!(finish(&flow, &mut session, &mut record), FlowState::Recap);

    let recap = Recap::build(catalog, &record, Locale::French);
    let ids: Vec<_> = recap.editable_ids().collect();
    assert_eq!(ids, ["Q1", "Q2", "Q3", "Q4", "Q5", "Q13", "Q26", "Q27"]);
    assert!(!recap.offers_dependent_edit());
}

#[test]
fn arabic_answers_follow_the_same_jumps() {
    let harness = IntegrationHarness::new();
    let flow = FlowController::new(&harness.catalog, 15);
    let mut session = InterviewSession::new(Locale::Arabic);
    let mut record = InterviewRecord::new();
    flow.start(&mut session).unwrap();
    for id in ["Q1", "Q2", "Q3", "Q4"] {
        answer(&flow, &mut session, &mut record, id, text("اسم"));
    }
    let state = answer(&flow, &mut session, &mut record, "Q5", choice("لا"));
    assert_eq!(
        state,
        FlowState::Asking(harness.catalog.index_of(HAS_DEPENDENTS_ID).unwrap())
    );
}

#[test]
fn two_dependents_are_each_visited_once_before_the_photo() {
    let harness = IntegrationHarness::new();
    let catalog = &harness.catalog;
    let flow = FlowController::new(catalog, 15);
    let children = ChildLoopController::new(catalog);
    let mut session = InterviewSession::new(Locale::French);
    let mut record = InterviewRecord::new();
    flow.start(&mut session).unwrap();

    let state = answer_all(
        &flow,
        &mut session,
        &mut record,
        household_answers("Sidi", "Ould Ahmed", 2),
    );
    assert_eq!(state, FlowState::InChildLoop(0));
    assert_eq!(record.declared_dependents(), Some(2));
    assert_eq!(record.dependents().len(), 2);

    let state = fill_dependents(&children, &mut session, &mut record, &["Aicha", "Khadija"]);
    assert_eq!(state, FlowState::Asking(catalog.index_of(PHOTO_ID).unwrap()));
    let names: Vec<_> = record.dependents().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Aicha", "Khadija"]);
    assert_eq!(
        record.dependents()[0].female_activity,
        Conditional::Applicable("Couture".into())
    );
}

#[test]
fn previous_saves_the_form_and_walks_back_to_the_count_question() {
    let harness = IntegrationHarness::new();
    let catalog = &harness.catalog;
    let flow = FlowController::new(catalog, 15);
    let children = ChildLoopController::new(catalog);
    let mut session = InterviewSession::new(Locale::French);
    let mut record = InterviewRecord::new();
    flow.start(&mut session).unwrap();
    answer_all(
        &flow,
        &mut session,
        &mut record,
        household_answers("Sidi", "Ould Ahmed", 2),
    );

    children
        .next(&mut session, &mut record, dependent_form("Aicha", "Femme"))
        .unwrap();
    let state = children
        .previous(&mut session, &mut record, dependent_form("Brahim", "Homme"))
        .unwrap();
    assert_eq!(state, FlowState::InChildLoop(0));
    assert_eq!(record.dependents()[1].name, "Brahim");
    assert_eq!(record.dependents()[1].female_activity, Conditional::NotApplicable);

    let prompt = children.prompt(&session, &record).unwrap();
    assert_eq!(prompt.form.name, "Aicha");

    let state = children
        .previous(&mut session, &mut record, prompt.form)
        .unwrap();
    assert_eq!(
        state,
        FlowState::Asking(catalog.index_of(DEPENDENT_COUNT_ID).unwrap())
    );
}

#[test]
fn lowering_the_count_shortens_the_loop_but_keeps_entries() {
    let harness = IntegrationHarness::new();
    let catalog = &harness.catalog;
    let flow = FlowController::new(catalog, 15);
    let children = ChildLoopController::new(catalog);
    let mut session = InterviewSession::new(Locale::French);
    let mut record = InterviewRecord::new();
    flow.start(&mut session).unwrap();
    answer_all(
        &flow,
        &mut session,
        &mut record,
        household_answers("Sidi", "Ould Ahmed", 3),
    );
    fill_dependents(&children, &mut session, &mut record, &["A", "B", "C"]);

    flow.back(&mut session).unwrap();
    let state = answer(
        &flow,
        &mut session,
        &mut record,
        DEPENDENT_COUNT_ID,
        RawAnswer::Number("1".into()),
    );
    assert_eq!(state, FlowState::InChildLoop(0));
    let state = fill_dependents(&children, &mut session, &mut record, &["A"]);
    assert_eq!(state, FlowState::Asking(catalog.index_of(PHOTO_ID).unwrap()));
    assert_eq!(record.declared_dependents(), Some(1));
    assert_eq!(record.dependents().len(), 3);
}

#[test]
fn count_above_capacity_is_refused_in_place() {
    let harness = IntegrationHarness::new();
    let flow = FlowController::new(&harness.catalog, 4);
    let mut session = InterviewSession::new(Locale::French);
    let mut record = InterviewRecord::new();
    flow.start(&mut session).unwrap();
    let mut answers = household_answers("Sidi", "Ould Ahmed", 5);
    let (_, over) = answers.pop().unwrap();
    answer_all(&flow, &mut session, &mut record, answers);

    let before = (session.state(), record.clone());
    let err = flow.submit(&mut session, &mut record, over).unwrap_err();
    assert!(matches!(err, SurveyError::CapacityExceeded { requested: 5, capacity: 4 }));
    assert_eq!((session.state(), record), before);
}

#[test]
fn editing_one_answer_returns_straight_to_the_recap() {
    let harness = IntegrationHarness::new();
    let catalog = &harness.catalog;
    let flow = FlowController::new(catalog, 15);
    let children = ChildLoopController::new(catalog);
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
    assert_eq!(finish(&flow, &mut session, &mut record), FlowState::Recap);

    flow.edit_question(&mut session, "Q6").unwrap();
    assert!(session.is_editing());
    let state = answer(
        &flow,
        &mut session,
        &mut record,
        "Q6",
        RawAnswer::Number("61".into()),
    );
    assert_eq!(state, FlowState::Recap);
    assert!(!session.is_editing());

    flow.edit_question(&mut session, "Q9").unwrap();
    assert_eq!(flow.back(&mut session).unwrap(), FlowState::Recap);

    let err = flow.edit_question(&mut session, "Q99").unwrap_err();
    assert!(matches!(err, SurveyError::UnknownQuestion(_)));
    assert_eq!(session.state(), FlowState::Recap);
}

#[test]
fn jump_rules_win_over_an_edit_detour() {
    let harness = IntegrationHarness::new();
    let catalog = &harness.catalog;
    let flow = FlowController::new(catalog, 15);
    let mut session = InterviewSession::new(Locale::French);
    let mut record = InterviewRecord::new();
    flow.start(&mut session).unwrap();
    answer_all(
        &flow,
        &mut session,
        &mut record,
        household_answers("Sidi", "Ould Ahmed", 0),
    );
    finish(&flow, &mut session, &mut record);

    flow.edit_question(&mut session, "Q5").unwrap();
    let state = answer(&flow, &mut session, &mut record, "Q5", choice("Non"));
    assert_eq!(
        state,
        FlowState::Asking(catalog.index_of(HAS_DEPENDENTS_ID).unwrap())
    );
    assert!(session.is_editing());
    let state = answer(&flow, &mut session, &mut record, "Q13", choice("Oui"));
    assert_eq!(state, FlowState::Recap);
}

#[test]
fn dependents_can_be_reopened_from_the_recap() {
    let harness = IntegrationHarness::new();
    let catalog = &harness.catalog;
    let flow = FlowController::new(catalog, 15);
    let children = ChildLoopController::new(catalog);
    let mut session = InterviewSession::new(Locale::French);
    let mut record = InterviewRecord::new();
    flow.start(&mut session).unwrap();
    answer_all(
        &flow,
        &mut session,
        &mut record,
        household_answers("Sidi", "Ould Ahmed", 0),
    );
    finish(&flow, &mut session, &mut record);
    let err = flow.edit_dependents(&mut session, &record).unwrap_err();
    assert!(matches!(err, SurveyError::InvalidTransition { .. }));

    let mut with_children = InterviewRecord::new();
    with_children.declare_dependents(1);
    assert_eq!(
        flow.edit_dependents(&mut session, &with_children).unwrap(),
        FlowState::InChildLoop(0)
    );
    let prompt = children.prompt(&session, &with_children).unwrap();
    assert_eq!(prompt.total, 1);
}
