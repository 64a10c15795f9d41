use std::collections::BTreeMap;

use regex::Regex;
use time::OffsetDateTime;

use dtc_onboard::{
    dialog::{DialogErrorKind, SessionState, Step, invariants::assert_append_only},
    records::{
        MintContext, RecordKind, content_hash, generate_record_id, is_record_id, logbook_rows,
        mint_from_attestation, vault_rows,
    },
};

fn mint_context() -> MintContext<'static> {
    MintContext {
        now: OffsetDateTime::from_unix_timestamp(1_767_225_600).expect("valid timestamp"),
        anonymous_attester: "Account holder",
    }
}

fn vehicle_at_attestation(state: SessionState) -> SessionState {
    let mut state = state;
    state.step = Step::VehicleAttestation;
    state.car_data.set("vin", "1HGCM82633A004352");
    state.car_data.set("year", "2003");
    state.car_data.set("make", "Honda");
    state.car_data.set("model", "Accord");
    state.car_data.set("mileage", "32000");
    state
}

#[test]
fn given_generated_ids_when_checked_then_match_dtc_pattern() {
    let pattern = Regex::new(r"^dtc_[a-z0-9]{6}$").expect("pattern");
    for _ in 0..500 {
        let id = generate_record_id();
        assert!(pattern.is_match(&id), "bad id {id}");
        assert!(is_record_id(&id));
    }
    assert!(!is_record_id("dtc_ABCDEF"));
    assert!(!is_record_id("rec_abcdef"));
}

#[test]
fn given_non_attestation_step_when_minting_then_request_is_rejected() {
    let mut state = vehicle_at_attestation(SessionState::default());
    state.step = Step::VehicleDocuments;

    let err = mint_from_attestation(state, &mint_context()).expect_err("gate must hold");
    assert_eq!(err.kind, DialogErrorKind::InvalidRequest);
}

#[test]
fn given_attestation_step_when_minting_then_record_and_logbook_are_seeded() {
    let state = SessionState {
        name: Some("Jane Doe".to_string()),
        ..vehicle_at_attestation(SessionState::default())
    };
    let response = mint_from_attestation(state, &mint_context()).expect("mint");

    assert_eq!(response.state.step, Step::Authenticated);
    let record = &response.state.records[0];
    assert_eq!(record.kind, RecordKind::Vehicle);
    assert_eq!(record.created_at, "2026-01-01T00:00:00Z");
    assert_eq!(record.field("attester"), Some("Jane Doe"));
    assert_eq!(record.title(), "2003 Honda Accord");
    assert_eq!(record.logbook[0].date, "2026-01-01");
    assert_eq!(record.logbook[0].time, "00:00");
    assert!(record.logbook.iter().any(|entry| entry.entry == "Attested by Jane Doe"));
    assert_eq!(
        record.hash,
        content_hash(record.kind, &record.id, &record.created_at, &record.fields)
    );
}

#[test]
fn given_anonymous_session_when_minting_then_fallback_attester_is_used() {
    let state = vehicle_at_attestation(SessionState::default());
    let response = mint_from_attestation(state, &mint_context()).expect("mint");
    assert_eq!(
        response.state.records[0].field("attester"),
        Some("Account holder")
    );
}

#[test]
fn given_n_mints_when_complete_then_records_only_grow() {
    let mut state = SessionState::default();
    let mut snapshots = Vec::new();

    for round in 1..=5 {
        let before = state.records.clone();
        let response =
            mint_from_attestation(vehicle_at_attestation(state), &mint_context()).expect("mint");
        state = response.state;

        assert_eq!(state.records.len(), round);
        assert!(assert_append_only(&before, &state.records).is_ok());
        snapshots.push(before);
    }

    for snapshot in &snapshots {
        for (prior, current) in snapshot.iter().zip(&state.records) {
            assert_eq!(prior, current);
        }
    }
    assert!(state.assert_invariants().is_ok());
}

#[test]
fn given_records_when_shrunk_then_append_only_check_fails() {
    let state = mint_from_attestation(
        vehicle_at_attestation(SessionState::default()),
        &mint_context(),
    )
    .expect("mint")
    .state;

    let err = assert_append_only(&state.records, &[]).expect_err("shrink must fail");
    assert_eq!(err.kind, DialogErrorKind::InvariantViolation);

    let mut rewritten = state.records.clone();
    rewritten[0].logbook.pop();
    assert!(assert_append_only(&state.records, &rewritten).is_err());
}

#[test]
fn given_equal_fields_when_hashed_then_hash_is_stable() {
    let mut fields = BTreeMap::new();
    fields.insert("make".to_string(), "Honda".to_string());
    fields.insert("vin".to_string(), "1HGCM82633A004352".to_string());

    let a = content_hash(RecordKind::Vehicle, "dtc_abc123", "2026-01-01T00:00:00Z", &fields);
    let b = content_hash(RecordKind::Vehicle, "dtc_abc123", "2026-01-01T00:00:00Z", &fields);
    let other = content_hash(RecordKind::Vehicle, "dtc_abc124", "2026-01-01T00:00:00Z", &fields);

    assert_eq!(a, b);
    assert_ne!(a, other);
    assert!(a.starts_with("0x"));
    assert_eq!(a.len(), 66);
}

#[test]
fn given_records_when_projected_then_vault_and_logbook_mirror_them() {
    let mut state = SessionState::default();
    for _ in 0..2 {
        state = mint_from_attestation(vehicle_at_attestation(state), &mint_context())
            .expect("mint")
            .state;
    }

    let rows = vault_rows(&state.records);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].record_id, state.records[1].id);
    assert_eq!(rows[0].subtitle, "VIN 1HGCM82633A004352 · 32000 mi");
    assert_eq!(rows[0].recent_entries.len(), 3);
    assert_eq!(rows[0].log_count, state.records[0].logbook.len());

    let entries = logbook_rows(&state.records);
    let total: usize = state.records.iter().map(|record| record.logbook.len()).sum();
    assert_eq!(entries.len(), total);
    assert_eq!(entries[0].entry, state.records[0].logbook[0].entry);
    assert_eq!(entries[0].record_title, "2003 Honda Accord");
}
