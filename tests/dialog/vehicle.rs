use std::sync::Arc;

use serde_json::json;

use dtc_onboard::{
    dialog::{Card, SideEffect, Step},
    records::{RecordKind, is_record_id},
};

use super::{
    FailingVinDecoder, StaticVinDecoder, action, authenticated_state, engine, fixed_services,
    replay, text,
};

#[tokio::test]
async fn given_decoder_when_full_vehicle_flow_then_dtc_is_minted() {
    let engine = engine(fixed_services().with_vin_decoder(Arc::new(StaticVinDecoder)));
    let state = authenticated_state();
    let records_before = state.records.len();

    let started = engine
        .process_message(action(&state, "start_vehicle", None))
        .await;
    assert_eq!(started.state.step, Step::VehicleVin);

    let decoded = engine
        .process_message(text(&started.state, "1HGCM82633A004352"))
        .await;
    assert_eq!(decoded.state.step, Step::VehicleConfirmDecoded);
    assert!(decoded.message.contains("2003 Honda Accord"));

    let colored = replay(&engine, decoded.state, &["yes", "32k", "black"]).await;
    assert_eq!(colored.state.step, Step::VehicleOwnership);
    assert_eq!(colored.state.car_data.get("mileage"), Some("32000"));
    assert!(colored.has_card("ownership"));

    let owned = engine
        .process_message(action(
            &colored.state,
            "select_option",
            Some(json!({ "value": "owned" })),
        ))
        .await;
    assert_eq!(owned.state.step, Step::VehicleDocuments);

    let attest = engine.process_message(text(&owned.state, "skip")).await;
    assert_eq!(attest.state.step, Step::VehicleAttestation);
    assert!(attest.has_card("attestation"));
    assert_eq!(attest.state.records.len(), records_before);

    let minted = engine
        .process_message(action(&attest.state, "attestation_confirmed", None))
        .await;

    assert_eq!(minted.state.step, Step::Authenticated);
    assert_eq!(minted.state.records.len(), records_before + 1);
    let Some(Card::Dtc {
        record_id,
        record_type,
        hash,
        ..
    }) = minted.cards.iter().find(|card| card.kind() == "dtc")
    else {
        panic!("expected a dtc card, got {:?}", minted.cards);
    };
    assert!(is_record_id(record_id), "bad record id {record_id}");
    assert_eq!(*record_type, RecordKind::Vehicle);
    assert!(hash.starts_with("0x") && hash.len() == 66);

    let record = minted.state.records.last().expect("minted record");
    assert_eq!(record.field("vin"), Some("1HGCM82633A004352"));
    assert_eq!(record.field("ownership"), Some("owned"));
    assert_eq!(record.field("color"), Some("Black"));
    assert!(record.logbook.len() >= 2);
    assert!(
        minted
            .side_effects
            .iter()
            .any(|effect| matches!(effect, SideEffect::CreateDtc { record_type: RecordKind::Vehicle, .. }))
    );
}

#[tokio::test]
async fn given_vin_prompt_when_vin_too_short_then_length_message_and_no_advance() {
    let mut state = authenticated_state();
    state.step = Step::VehicleVin;
    let response = engine(fixed_services())
        .process_message(text(&state, "1HGCM826"))
        .await;

    assert_eq!(response.state.step, Step::VehicleVin);
    assert!(response.message.contains("17 characters"));
}

#[tokio::test]
async fn given_vin_prompt_when_vin_contains_letter_o_then_invalid_characters_message() {
    let mut state = authenticated_state();
    state.step = Step::VehicleVin;
    let response = engine(fixed_services())
        .process_message(text(&state, "1HGCM82633AOO4352"))
        .await;

    assert_eq!(response.state.step, Step::VehicleVin);
    assert!(response.message.contains("invalid characters"));
}

#[tokio::test]
async fn given_vin_prompt_when_skip_then_manual_entry_path() {
    let mut state = authenticated_state();
    state.step = Step::VehicleVin;
    let engine = engine(fixed_services());

    let response = replay(&engine, state, &["skip", "'98", "toyota", "Corolla"]).await;
    assert_eq!(response.state.step, Step::VehicleConfirmManual);
    assert_eq!(response.state.car_data.get("year"), Some("1998"));
    assert_eq!(response.state.car_data.get("make"), Some("Toyota"));
    assert!(response.state.car_data.get("vin").is_none());

    let denied = engine.process_message(text(&response.state, "no")).await;
    assert_eq!(denied.state.step, Step::VehicleYear);
    assert!(denied.state.car_data.get("year").is_none());
}

#[tokio::test]
async fn given_vin_prompt_when_user_says_they_lack_it_then_manual_entry_path() {
    let engine = engine(fixed_services());
    for input in ["I don't have it", "i dont have the vin", "sorry, I do not have it on me"] {
        let mut state = authenticated_state();
        state.step = Step::VehicleVin;
        let response = engine.process_message(text(&state, input)).await;

        assert_eq!(response.state.step, Step::VehicleYear, "input {input:?}");
        assert!(!response.message.contains("17 characters"), "input {input:?}");
    }
}

#[tokio::test]
async fn given_failing_decoder_when_valid_vin_then_falls_back_to_manual_year() {
    let mut state = authenticated_state();
    state.step = Step::VehicleVin;
    let response = engine(fixed_services().with_vin_decoder(Arc::new(FailingVinDecoder)))
        .process_message(text(&state, "1hgcm8-2633a004352"))
        .await;

    assert_eq!(response.state.step, Step::VehicleYear);
    assert_eq!(response.state.car_data.get("vin"), Some("1HGCM82633A004352"));
}

#[tokio::test]
async fn given_decoded_vehicle_when_user_denies_then_returns_to_vin() {
    let engine = engine(fixed_services().with_vin_decoder(Arc::new(StaticVinDecoder)));
    let mut state = authenticated_state();
    state.step = Step::VehicleVin;

    let response = replay(&engine, state, &["1HGCM82633A004352", "nope"]).await;
    assert_eq!(response.state.step, Step::VehicleVin);
    assert!(response.state.car_data.get("make").is_none());
}

#[tokio::test]
async fn given_confirmation_when_reply_is_ambiguous_then_step_is_unchanged() {
    let engine = engine(fixed_services().with_vin_decoder(Arc::new(StaticVinDecoder)));
    let mut state = authenticated_state();
    state.step = Step::VehicleVin;

    let response = replay(&engine, state, &["1HGCM82633A004352", "maybe later"]).await;
    assert_eq!(response.state.step, Step::VehicleConfirmDecoded);
}

#[tokio::test]
async fn given_mileage_prompt_when_out_of_range_then_reprompted() {
    let mut state = authenticated_state();
    state.step = Step::VehicleMileage;
    let engine = engine(fixed_services());

    let response = engine.process_message(text(&state, "500,001")).await;
    assert_eq!(response.state.step, Step::VehicleMileage);
    assert!(response.state.car_data.get("mileage").is_none());

    let accepted = engine.process_message(text(&state, "0")).await;
    assert_eq!(accepted.state.step, Step::VehicleColor);
}

#[tokio::test]
async fn given_documents_step_when_upload_is_refused_then_attestation_follows() {
    let engine = engine(fixed_services());
    for input in [
        "skip upload",
        "no, skip the upload",
        "I don't want to upload anything",
    ] {
        let mut state = authenticated_state();
        state.step = Step::VehicleDocuments;
        let response = engine.process_message(text(&state, input)).await;

        assert_eq!(response.state.step, Step::VehicleAttestation, "input {input:?}");
        assert!(response.has_card("attestation"), "input {input:?}");
    }
}

#[tokio::test]
async fn given_documents_step_when_uploading_files_then_they_are_counted_on_the_record() {
    let mut state = authenticated_state();
    state.step = Step::VehicleDocuments;
    state.car_data.set("vin", "1HGCM82633A004352");
    let engine = engine(fixed_services());

    let picker = engine.process_message(text(&state, "yes")).await;
    assert_eq!(picker.state.step, Step::VehicleUpload);
    assert!(picker.has_card("fileUpload"));

    let mut upload = text(&picker.state, "");
    upload.file_name = Some("title.pdf".to_string());
    upload.file_data = Some("JVBERi0xLjQK".to_string());
    let uploaded = engine.process_message(upload).await;
    assert_eq!(uploaded.state.step, Step::VehicleUpload);
    assert_eq!(uploaded.state.car_data.uploaded_files.len(), 1);

    let done = engine
        .process_message(action(&uploaded.state, "upload_done", None))
        .await;
    assert_eq!(done.state.step, Step::VehicleAttestation);

    let minted = engine.process_message(text(&done.state, "I confirm")).await;
    let record = minted.state.records.last().expect("record");
    assert_eq!(record.uploaded_files.len(), 1);
    assert!(
        record
            .logbook
            .iter()
            .any(|entry| entry.entry.contains("1 supporting document"))
    );
}

#[tokio::test]
async fn given_attestation_when_declined_then_draft_is_discarded_and_flow_restarts() {
    let mut state = authenticated_state();
    state.step = Step::VehicleAttestation;
    state.car_data.set("vin", "1HGCM82633A004352");

    let response = engine(fixed_services())
        .process_message(action(&state, "attestation_declined", None))
        .await;

    assert_eq!(response.state.step, Step::VehicleVin);
    assert!(response.state.car_data.fields.is_empty());
    assert!(response.state.records.is_empty());
}
