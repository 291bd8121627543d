use std::sync::Arc;

use community_core::{
    domain::{Donation, Event, MemberRecord, Message, MessageType},
    errors::CommunityError,
    forms::{
        DonationForm, EventForm, FieldInput, MemberForm, MessageForm, NoticeLevel, RecordMapping,
        StepOutcome, SubmitOutcome, WizardController, WizardEffect,
    },
    storage::{InMemoryStore, RecordStore},
    sync::RecordSync,
};

fn text(value: &str) -> FieldInput {
    FieldInput::Text(value.to_string())
}

fn fill(wizard: &mut WizardController, values: &[(&str, &str)]) {
    for (field, value) in values {
        wizard.apply(field, text(value)).expect("field accepts text");
    }
}

fn personal_details(wizard: &mut WizardController) {
    fill(
        wizard,
        &[
            ("firstName", "Grace"),
            ("lastName", "Hopper"),
            ("emailAddress", "grace@example.com"),
            ("primaryPhone", "(555) 010-2020"),
            ("residingAddress", "1 Navy Way"),
        ],
    );
}

#[test]
fn blank_first_step_blocks_with_every_missing_field() {
    let mut wizard = WizardController::new(MemberForm::definition(), MemberForm::defaults());

    let outcome = wizard.next().unwrap();
    let StepOutcome::Blocked { focus, notice } = &outcome else {
        panic!("expected a blocked step, got {outcome:?}");
    };
    assert_eq!(focus, "firstName");
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.title, "Missing required fields");
    assert_eq!(wizard.current_step(), 1);
    assert_eq!(wizard.errors().get("firstName"), Some("First name is required"));
    assert_eq!(wizard.errors().len(), 5);
    assert!(outcome
        .effects()
        .contains(&WizardEffect::Focus("firstName".to_string())));
}

#[test]
fn editing_a_field_clears_only_its_error() {
    let mut wizard = WizardController::new(MemberForm::definition(), MemberForm::defaults());
    wizard.next().unwrap();

    wizard.apply("firstName", text("Grace")).unwrap();
    assert_eq!(wizard.errors().get("firstName"), None);
    assert_eq!(wizard.errors().get("lastName"), Some("Last name is required"));
}

#[test]
fn moving_back_never_validates() {
    let mut wizard = WizardController::new(MemberForm::definition(), MemberForm::defaults());
    personal_details(&mut wizard);
    assert_eq!(wizard.next().unwrap(), StepOutcome::Moved { step: 2 });

    assert_eq!(wizard.previous().unwrap(), StepOutcome::Moved { step: 1 });
    assert!(wizard.errors().is_empty());
    assert_eq!(wizard.previous().unwrap(), StepOutcome::Stayed);
    assert_eq!(wizard.record().text("firstName"), "Grace");
}

#[test]
fn next_on_the_last_step_stays_put() {
    let mut wizard = WizardController::new(MemberForm::definition(), MemberForm::defaults());
    personal_details(&mut wizard);
    assert_eq!(wizard.next().unwrap(), StepOutcome::Moved { step: 2 });
    fill(
        &mut wizard,
        &[
            ("emergencyContact", "Vincent Hopper"),
            ("emergencyContactRelationship", "Spouse"),
        ],
    );
    assert_eq!(wizard.next().unwrap(), StepOutcome::Moved { step: 3 });
    assert_eq!(wizard.next().unwrap(), StepOutcome::Moved { step: 4 });

    assert_eq!(wizard.next().unwrap(), StepOutcome::Stayed);
    assert_eq!(wizard.current_step(), 4);
    assert!(wizard.is_final_step());
    assert!(wizard.errors().is_empty());
}

#[test]
fn submit_is_refused_before_the_last_step() {
    let mut wizard = WizardController::new(MemberForm::definition(), MemberForm::defaults());
    assert!(matches!(
        wizard.begin_submit(),
        Err(CommunityError::InvalidState(_))
    ));
}

#[tokio::test]
async fn new_member_is_created_and_listed() {
    let store = Arc::new(InMemoryStore::<MemberRecord>::seeded(Default::default()));
    let sync = RecordSync::<MemberForm>::for_create(store.clone());
    let mut wizard = WizardController::new(MemberForm::definition(), MemberForm::defaults());

    personal_details(&mut wizard);
    wizard.next().unwrap();
    fill(
        &mut wizard,
        &[
            ("emergencyContact", "Vincent Hopper"),
            ("emergencyContactRelationship", "Spouse"),
        ],
    );
    wizard.next().unwrap();
    wizard.apply("baptizedWithHolySpirit", FieldInput::Flag(true)).unwrap();
    wizard.next().unwrap();
    wizard
        .apply(
            "ministriesOfInterest",
            FieldInput::Toggle {
                item: "Teaching/Education".into(),
                present: true,
            },
        )
        .unwrap();
    assert!(wizard.is_final_step());

    let outcome = wizard.submit(&sync).await.unwrap();
    let effects = outcome.effects();
    let SubmitOutcome::Completed { output, notice, navigate_to } = outcome else {
        panic!("expected completion");
    };
    assert_eq!(navigate_to, "/members");
    assert_eq!(notice.title, "Member added");
    assert_eq!(
        notice.description,
        "Grace Hopper has been added to your community."
    );
    assert_eq!(output.id.as_deref(), Some("6"));
    assert!(output.baptized);
    assert_eq!(
        output.ministries_of_interest,
        Some(vec!["Teaching/Education".to_string()])
    );
    assert_eq!(effects.last(), Some(&WizardEffect::NavigateTo("/members")));
    assert!(wizard.is_finished());
    assert!(wizard.apply("firstName", text("again")).is_err());

    let stored = store.get("6").await.unwrap();
    assert_eq!(stored.email_address, "grace@example.com");
    assert_eq!(store.len().await, 6);
}

#[tokio::test]
async fn blocked_submit_reports_the_final_step() {
    let store = Arc::new(InMemoryStore::<Event>::empty());
    let sync = RecordSync::<EventForm>::for_create(store.clone());
    let mut wizard = WizardController::new(EventForm::definition(), EventForm::defaults());
    fill(&mut wizard, &[("name", "Harvest Supper")]);

    let outcome = wizard.submit(&sync).await.unwrap();
    let SubmitOutcome::Blocked { focus, notice } = outcome else {
        panic!("expected the submit to be blocked");
    };
    assert_eq!(focus, "description");
    assert_eq!(
        notice.description,
        "Please fill in all required fields before submitting."
    );
    assert_eq!(store.len().await, 0);
    assert!(!wizard.is_submitting());
}

#[tokio::test]
async fn event_with_capacity_is_saved_upcoming() {
    let store = Arc::new(InMemoryStore::<Event>::empty());
    let sync = RecordSync::<EventForm>::for_create(store.clone());
    let mut wizard = WizardController::new(EventForm::definition(), EventForm::defaults());
    fill(
        &mut wizard,
        &[
            ("name", "Harvest Supper"),
            ("description", "Shared meal after the service"),
            ("date", "2024-10-05"),
            ("location", "Fellowship Hall"),
            ("time", "6:00 PM"),
            ("endTime", "8:00 PM"),
        ],
    );
    wizard.apply("capacity", FieldInput::Numeric("80".into())).unwrap();

    let SubmitOutcome::Completed { output, notice, .. } = wizard.submit(&sync).await.unwrap() else {
        panic!("expected completion");
    };
    assert_eq!(notice.title, "Event created");
    assert_eq!(output.capacity, Some(80));
    assert_eq!(output.time_range(), "6:00 PM - 8:00 PM");
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn invalid_amount_keeps_the_donation_form_open() {
    let store = Arc::new(InMemoryStore::<Donation>::empty());
    let sync = RecordSync::<DonationForm>::for_create(store.clone());
    let mut wizard = WizardController::new(DonationForm::definition(), DonationForm::defaults());
    fill(&mut wizard, &[("donor", "Naomi Ruth"), ("amount", "a lot")]);

    let SubmitOutcome::Failed { error, notice } = wizard.submit(&sync).await.unwrap() else {
        panic!("expected a failed submit");
    };
    assert!(matches!(error, CommunityError::Validation(_)));
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.description.contains("a lot"));
    assert!(!wizard.is_finished());

    wizard.apply("amount", text("$1,200")).unwrap();
    let SubmitOutcome::Completed { output, .. } = wizard.submit(&sync).await.unwrap() else {
        panic!("expected completion on retry");
    };
    assert_eq!(output.formatted_amount(), "$1,200.00");
    assert_eq!(output.method, "Credit Card");
}

#[tokio::test]
async fn composed_message_carries_the_sender() {
    let store = Arc::new(InMemoryStore::<Message>::empty());
    let sync = RecordSync::<MessageForm>::for_create(store.clone());
    let mut wizard = WizardController::new(
        MessageForm::definition(),
        MessageForm::defaults_from("Pastor Mike"),
    );
    fill(
        &mut wizard,
        &[
            ("type", "prayer"),
            ("subject", "Pray for the Smiths"),
            ("content", "Bob is in hospital this week."),
        ],
    );

    let SubmitOutcome::Completed { output, notice, navigate_to } =
        wizard.submit(&sync).await.unwrap()
    else {
        panic!("expected completion");
    };
    assert_eq!(navigate_to, "/messages");
    assert_eq!(notice.title, "Message sent");
    assert_eq!(output.sender, "Pastor Mike");
    assert_eq!(output.message_type, MessageType::Prayer);
    assert_eq!(output.recipients, vec!["All Members".to_string()]);
}
