use dtc_onboard::dialog::{AudienceType, Card, DashboardView, Step};

use super::{action, authenticated_state, chips, engine, fixed_services, replay, text};

async fn state_with_two_records() -> dtc_onboard::SessionState {
    let engine = engine(fixed_services());
    let mut state = authenticated_state();
    state.step = Step::StudentSchool;
    let first = replay(&engine, state, &["yale", "ba", "history", "2010", "yes", "skip", "yes"]).await;
    assert_eq!(first.state.records.len(), 1);

    let mut state = first.state;
    state.step = Step::CredentialName;
    let second = replay(&engine, state, &["pmp", "PMI", "123", "2030", "yes", "skip", "yes"]).await;
    assert_eq!(second.state.records.len(), 2);
    second.state
}

#[tokio::test]
async fn given_empty_vault_when_viewed_then_add_record_chips() {
    let response = engine(fixed_services())
        .process_message(action(&authenticated_state(), "view_vault", None))
        .await;

    assert!(response.message.contains("empty"));
    assert!(!response.has_card("vault"));
    assert_eq!(chips(&response).len(), 4);
}

#[tokio::test]
async fn given_records_when_vault_viewed_by_text_then_rows_match_records() {
    let state = state_with_two_records().await;
    let response = engine(fixed_services())
        .process_message(text(&state, "show me my vault"))
        .await;

    let Some(Card::Vault { rows }) = response.cards.first() else {
        panic!("expected vault card, got {:?}", response.cards);
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].record_id, state.records[0].id);
    assert!(rows.iter().all(|row| row.recent_entries.len() <= 3));
    assert_eq!(response.state.records, state.records);
}

#[tokio::test]
async fn given_records_when_logbook_viewed_then_entries_keep_record_order() {
    let state = state_with_two_records().await;
    let response = engine(fixed_services())
        .process_message(action(&state, "view_logbook", None))
        .await;

    let Some(Card::Logbook { entries }) = response.cards.first() else {
        panic!("expected logbook card, got {:?}", response.cards);
    };
    let total: usize = state.records.iter().map(|record| record.logbook.len()).sum();
    assert_eq!(entries.len(), total);
    assert_eq!(entries[0].record_id, state.records[0].id);
    assert_eq!(
        entries.last().map(|row| row.record_id.as_str()),
        Some(state.records[1].id.as_str())
    );
}

#[tokio::test]
async fn given_hub_when_add_record_then_four_record_types_offered() {
    let response = engine(fixed_services())
        .process_message(text(&authenticated_state(), "Add another record"))
        .await;

    assert_eq!(
        chips(&response),
        vec![
            "Add a vehicle",
            "Add a diploma",
            "Add a license",
            "Add a pilot certificate"
        ]
    );
}

#[tokio::test]
async fn given_hub_chips_when_each_sent_as_text_then_matching_flow_starts() {
    let engine = engine(fixed_services());
    let cases = [
        ("Add a vehicle", Step::VehicleVin),
        ("Add a diploma", Step::StudentSchool),
        ("Add a license", Step::CredentialName),
        ("Add a pilot certificate", Step::CredentialDisambiguation),
    ];
    for (input, expected) in cases {
        let response = engine
            .process_message(text(&authenticated_state(), input))
            .await;
        assert_eq!(response.state.step, expected, "input {input:?}");
    }
}

#[tokio::test]
async fn given_consumer_hub_when_unmatched_then_ai_handoff() {
    let response = engine(fixed_services())
        .process_message(text(&authenticated_state(), "what's the weather like"))
        .await;

    assert!(response.use_ai);
    assert!(response.message.is_empty());
    assert_eq!(response.state.step, Step::Authenticated);
}

#[tokio::test]
async fn given_business_hub_when_inventory_requested_then_dashboard_view() {
    let mut state = authenticated_state();
    state.audience_type = Some(AudienceType::Business);
    state.company_name = Some("Acme Motors".to_string());

    let response = engine(fixed_services())
        .process_message(text(&state, "show our inventory"))
        .await;

    assert!(matches!(
        response.cards.first(),
        Some(Card::BusinessDashboard {
            view: DashboardView::Inventory,
            ..
        })
    ));
    assert!(!response.use_ai);
}

#[tokio::test]
async fn given_business_hub_when_unmatched_then_ai_handoff() {
    let mut state = authenticated_state();
    state.audience_type = Some(AudienceType::Business);

    let response = engine(fixed_services())
        .process_message(text(&state, "draft a press release"))
        .await;
    assert!(response.use_ai);
}
