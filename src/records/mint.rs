//! Attestation and record minting.
//!
//! A draft becomes a `Record` only here, and only when the session sits on one
//! of the four `*_attestation` steps. Minting appends; nothing in this module
//! edits or removes an existing record or logbook entry.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use uuid::Uuid;

use crate::{
    dialog::{
        error::{DialogError, invalid_request},
        types::{Card, Response, SessionState, SideEffect, Step},
    },
    records::types::{
        Draft, LogbookEntry, RECORD_ID_PREFIX, RECORD_ID_SUFFIX_LEN, Record, RecordKind,
    },
};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const MAX_ID_ATTEMPTS: usize = 8;

pub struct MintContext<'a> {
    pub now: OffsetDateTime,
    pub anonymous_attester: &'a str,
}

/// Finalizes the draft behind the current attestation step.
///
/// Returns `InvalidRequest` when the session is not on an attestation step;
/// callers treat that as "stay put and re-prompt".
pub fn mint_from_attestation(
    mut state: SessionState,
    ctx: &MintContext<'_>,
) -> Result<Response, DialogError> {
    let step = state.step;
    let kind = step.attestation_kind().ok_or_else(|| {
        invalid_request(format!("step '{step}' is not an attestation step"))
    })?;

    let attester = state
        .name
        .clone()
        .or_else(|| state.email.clone())
        .unwrap_or_else(|| ctx.anonymous_attester.to_string());
    let created_at = rfc3339(ctx.now);

    let draft = state.draft_mut(kind);
    draft.set("attestedAt", created_at.clone());
    draft.set("attester", attester.clone());
    let draft = draft.clone();

    let id = unique_record_id(&state.records);
    let hash = content_hash(kind, &id, &created_at, &draft.fields);
    let logbook = seed_logbook(kind, &draft, &attester, ctx.now);

    let record = Record {
        id: id.clone(),
        kind,
        hash: hash.clone(),
        created_at: created_at.clone(),
        uploaded_files: draft.uploaded_files.clone(),
        logbook,
        fields: draft.fields.clone(),
    };
    let title = record.title();
    let logbook_count = record.logbook.len();

    let mut metadata = draft.fields.clone();
    metadata.insert("recordId".to_string(), id.clone());
    metadata.insert("hash".to_string(), hash.clone());
    metadata.insert("createdAt".to_string(), created_at.clone());
    metadata.insert(
        "uploadedFileCount".to_string(),
        draft.uploaded_files.len().to_string(),
    );

    state.records.push(record);
    state.step = Step::Authenticated;

    tracing::info!(
        target: "records",
        record_id = %id,
        record_type = kind.as_str(),
        logbook_entries = logbook_count,
        "dtc_minted"
    );

    Ok(Response::new(
        state,
        format!("Done! Your {} is now a Digital Title Certificate.", kind.label()),
    )
    .with_card(Card::Dtc {
        record_id: id,
        record_type: kind,
        title,
        hash,
        created_at,
        logbook_count,
    })
    .with_follow_up("It's in your vault. Want to add another record?")
    .with_chips(["Add another record", "View vault", "View logbook"])
    .with_side_effect(SideEffect::CreateDtc {
        record_type: kind,
        metadata,
    }))
}

/// `dtc_` followed by six lowercase base36 characters drawn from a v4 UUID.
pub fn generate_record_id() -> String {
    let mut value = Uuid::new_v4().as_u128();
    let mut suffix = [b'0'; RECORD_ID_SUFFIX_LEN];
    for slot in suffix.iter_mut().rev() {
        *slot = BASE36[(value % 36) as usize];
        value /= 36;
    }
    format!(
        "{RECORD_ID_PREFIX}{}",
        String::from_utf8_lossy(&suffix)
    )
}

pub fn is_record_id(candidate: &str) -> bool {
    candidate
        .strip_prefix(RECORD_ID_PREFIX)
        .is_some_and(|suffix| {
            suffix.len() == RECORD_ID_SUFFIX_LEN
                && suffix
                    .bytes()
                    .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
        })
}

fn unique_record_id(existing: &[Record]) -> String {
    let mut candidate = generate_record_id();
    for _ in 1..MAX_ID_ATTEMPTS {
        if existing.iter().all(|record| record.id != candidate) {
            break;
        }
        candidate = generate_record_id();
    }
    candidate
}

/// SHA-256 over the canonical JSON of the finalized fields. BTreeMap keeps
/// key order stable, so equal records hash equally.
pub fn content_hash(
    kind: RecordKind,
    id: &str,
    created_at: &str,
    fields: &BTreeMap<String, String>,
) -> String {
    let canonical = serde_json::json!({
        "createdAt": created_at,
        "fields": fields,
        "id": id,
        "type": kind.as_str(),
    });
    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string().as_bytes());
    format!("0x{:x}", hasher.finalize())
}

pub fn rfc3339(instant: OffsetDateTime) -> String {
    instant
        .format(&Rfc3339)
        .unwrap_or_else(|_| instant.unix_timestamp().to_string())
}

fn stamp(instant: OffsetDateTime, entry: impl Into<String>) -> LogbookEntry {
    LogbookEntry {
        entry: entry.into(),
        date: format!(
            "{:04}-{:02}-{:02}",
            instant.year(),
            u8::from(instant.month()),
            instant.day()
        ),
        time: format!("{:02}:{:02}", instant.hour(), instant.minute()),
    }
}

fn seed_logbook(
    kind: RecordKind,
    draft: &Draft,
    attester: &str,
    now: OffsetDateTime,
) -> Vec<LogbookEntry> {
    let mut facts = vec![
        format!("DTC created for {}", kind.label()),
        format!("Attested by {attester}"),
    ];

    match kind {
        RecordKind::Vehicle => {
            if let Some(vin) = draft.get("vin") {
                facts.push(format!("VIN {vin} recorded"));
            }
            if let Some(miles) = draft.get("mileage") {
                facts.push(format!("Odometer reading: {miles} miles"));
            }
            if let Some(ownership) = draft.get("ownership") {
                facts.push(format!("Ownership status: {ownership}"));
            }
        }
        RecordKind::Student => {
            facts.push(format!(
                "{} from {}",
                draft.display("degree"),
                draft.display("school")
            ));
            if let Some(year) = draft.get("graduationYear") {
                facts.push(format!("Graduated {year}"));
            }
        }
        RecordKind::Credential => {
            facts.push(format!(
                "{} issued by {}",
                draft.display("name"),
                draft.display("issuer")
            ));
            if let Some(expiration) = draft.get("expiration") {
                facts.push(format!("Expiration: {expiration}"));
            }
        }
        RecordKind::PilotCredential => {
            facts.push(format!(
                "{} certificate #{}",
                draft.display("certificateType"),
                draft.display("certificateNumber")
            ));
            if let Some(ratings) = draft.get("ratings") {
                facts.push(format!("Ratings: {ratings}"));
            }
            if let Some(hours) = draft.get("totalHours") {
                facts.push(format!("Total flight time: {hours} hours"));
            }
        }
    }

    let uploads = draft.uploaded_files.len();
    if uploads > 0 {
        let noun = if uploads == 1 { "document" } else { "documents" };
        facts.push(format!("{uploads} supporting {noun} uploaded"));
    }

    facts.into_iter().map(|fact| stamp(now, fact)).collect()
}
