use serde_json::json;

use dtc_onboard::{dialog::Step, records::RecordKind};

use super::{action, authenticated_state, chips, engine, fixed_services, replay, text};

const PILOT_OPTIONS: [&str; 5] = [
    "Private Pilot (PPL)",
    "Commercial Pilot (CPL)",
    "Airline Transport Pilot (ATP)",
    "Certified Flight Instructor (CFI)",
    "Student Pilot",
];

fn at_credential_name() -> dtc_onboard::SessionState {
    let mut state = authenticated_state();
    state.step = Step::CredentialName;
    state
}

#[tokio::test]
async fn given_credential_name_when_pilot_license_mentioned_then_five_pilot_options() {
    let response = engine(fixed_services())
        .process_message(text(&at_credential_name(), "i have my pilot license"))
        .await;

    assert_eq!(response.state.step, Step::CredentialDisambiguation);
    assert_eq!(chips(&response), PILOT_OPTIONS.to_vec());
    assert_eq!(response.state.credential_data.get("track"), Some("pilot"));
}

#[tokio::test]
async fn given_hub_when_pilot_license_mentioned_then_same_disambiguation() {
    let response = engine(fixed_services())
        .process_message(text(&authenticated_state(), "i have my pilot license"))
        .await;

    assert_eq!(response.state.step, Step::CredentialDisambiguation);
    assert_eq!(chips(&response).len(), 5);
}

#[tokio::test]
async fn given_nursing_track_when_option_picked_by_index_then_issuer_is_asked() {
    let engine = engine(fixed_services());
    let response = replay(&engine, at_credential_name(), &["I'm a nurse", "1"]).await;

    assert_eq!(response.state.step, Step::CredentialIssuer);
    assert_eq!(
        response.state.credential_data.get("name"),
        Some("Registered Nurse (RN)")
    );
}

#[tokio::test]
async fn given_disambiguation_when_reply_matches_nothing_then_question_repeats() {
    let engine = engine(fixed_services());
    let response = replay(&engine, at_credential_name(), &["real estate", "astronaut"]).await;

    assert_eq!(response.state.step, Step::CredentialDisambiguation);
    assert_eq!(chips(&response).len(), 3);
}

#[tokio::test]
async fn given_untracked_credential_when_flow_completes_then_credential_dtc() {
    let engine = engine(fixed_services());
    let confirmed = replay(
        &engine,
        at_credential_name(),
        &["pmp", "PMI", "PMP-123456", "never", "yes", "no"],
    )
    .await;

    assert_eq!(confirmed.state.step, Step::CredentialAttestation);
    let draft = &confirmed.state.credential_data;
    assert_eq!(draft.get("name"), Some("Project Management Professional (PMP)"));
    assert_eq!(draft.get("expiration"), Some("No expiration"));

    let minted = engine
        .process_message(action(&confirmed.state, "attestation_confirmed", None))
        .await;
    let record = minted.state.records.last().expect("record");
    assert_eq!(record.kind, RecordKind::Credential);
    assert_eq!(record.field("licenseNumber"), Some("PMP-123456"));
}

#[tokio::test]
async fn given_credential_confirm_when_denied_then_back_to_name() {
    let engine = engine(fixed_services());
    let response = replay(
        &engine,
        at_credential_name(),
        &["pmp", "PMI", "123", "2030-01-01", "wrong"],
    )
    .await;

    assert_eq!(response.state.step, Step::CredentialName);
    assert!(response.state.credential_data.fields.is_empty());
}

#[tokio::test]
async fn given_financial_track_when_option_selected_by_action_then_name_is_option() {
    let engine = engine(fixed_services());
    let asked = replay(&engine, at_credential_name(), &["my CPA license"]).await;
    assert_eq!(asked.state.step, Step::CredentialDisambiguation);

    let response = engine
        .process_message(action(
            &asked.state,
            "select_option",
            Some(json!({ "value": "Certified Public Accountant (CPA)" })),
        ))
        .await;
    assert_eq!(response.state.step, Step::CredentialIssuer);
    assert_eq!(
        response.state.credential_data.get("name"),
        Some("Certified Public Accountant (CPA)")
    );
}
