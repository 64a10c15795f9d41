//! Per-flow step handlers and the steps every record flow shares: the
//! optional document upload and the attestation gate.

pub mod credential;
pub mod hub;
pub mod identity;
pub mod idle;
pub mod pilot;
pub mod student;
pub mod vehicle;

use time::OffsetDateTime;

use crate::{
    config::DialogConfig,
    dialog::{
        ports::Services,
        types::{Action, Card, InputEvent, Response, SessionState, Step},
    },
    normalize::{
        Confirmation, classify_confirmation, is_affirmative, is_done, is_negative,
        text::contains_phrase,
    },
    records::{
        mint::{MintContext, mint_from_attestation},
        types::{Draft, RecordKind, UploadedFile},
    },
};

pub const CONFIRM_CHIPS: [&str; 2] = ["Yes, that's right", "No, let me fix it"];
pub const DOCUMENT_CHIPS: [&str; 2] = ["Upload documents", "Skip"];
pub const UPLOAD_CHIPS: [&str; 1] = ["Done"];
pub const ATTESTATION_CHIPS: [&str; 2] = ["I confirm", "That's not right"];

const UPLOAD_ACCEPT: [&str; 3] = ["image/*", "application/pdf", ".heic"];

/// Read-only inputs shared by every handler for one call.
pub struct FlowContext<'a> {
    pub services: &'a Services,
    pub config: &'a DialogConfig,
    pub now: OffsetDateTime,
}

/// Stay on the current step with a clarifying message.
pub fn reprompt(state: SessionState, message: impl Into<String>) -> Response {
    Response::new(state, message)
}

pub fn confirm_prompt(state: SessionState, message: impl Into<String>) -> Response {
    Response::new(state, message).with_chips(CONFIRM_CHIPS)
}

/// Steps that belong to a record flow, keyed by the record they build.
struct FlowSteps {
    documents: Step,
    upload: Step,
    attestation: Step,
}

fn flow_steps(kind: RecordKind) -> FlowSteps {
    match kind {
        RecordKind::Vehicle => FlowSteps {
            documents: Step::VehicleDocuments,
            upload: Step::VehicleUpload,
            attestation: Step::VehicleAttestation,
        },
        RecordKind::Student => FlowSteps {
            documents: Step::StudentDocuments,
            upload: Step::StudentUpload,
            attestation: Step::StudentAttestation,
        },
        RecordKind::Credential => FlowSteps {
            documents: Step::CredentialDocuments,
            upload: Step::CredentialUpload,
            attestation: Step::CredentialAttestation,
        },
        RecordKind::PilotCredential => FlowSteps {
            documents: Step::PilotDocuments,
            upload: Step::PilotUpload,
            attestation: Step::PilotAttestation,
        },
    }
}

pub fn documents_prompt(
    mut state: SessionState,
    kind: RecordKind,
    message: impl Into<String>,
) -> Response {
    state.step = flow_steps(kind).documents;
    Response::new(state, message).with_chips(DOCUMENT_CHIPS)
}

const UPLOAD_REFUSALS: &[&str] = &["skip", "no", "don't", "dont", "do not", "not now", "nothing"];

fn wants_upload(event: &InputEvent) -> bool {
    if event.is_action(Action::FileUploaded) || event.file_name.is_some() {
        return true;
    }
    let text = event.text();
    if is_negative(text) || UPLOAD_REFUSALS.iter().any(|phrase| contains_phrase(text, phrase)) {
        return false;
    }
    contains_phrase(text, "upload") || is_affirmative(text)
}

/// `*_documents`: "yes"/"upload" opens the picker, anything else goes
/// straight to attestation. Refusals win over a mention of "upload".
pub fn documents(
    mut state: SessionState,
    event: &InputEvent,
    ctx: &FlowContext<'_>,
    kind: RecordKind,
) -> Response {
    if !wants_upload(event) {
        return attestation_prompt(state, kind, "No problem. Let's review before I create it.");
    }

    state.step = flow_steps(kind).upload;
    if event.file_name.is_some() || event.file_data.is_some() {
        return upload(state, event, ctx, kind);
    }

    Response::new(state, "Go ahead and upload your files. Say \"done\" when you're finished.")
        .with_card(upload_card(kind, ctx.config.max_uploads_per_record))
        .with_chips(UPLOAD_CHIPS)
}

fn upload_card(kind: RecordKind, max_files: usize) -> Card {
    Card::FileUpload {
        record_type: kind,
        accept: UPLOAD_ACCEPT.iter().map(|s| s.to_string()).collect(),
        max_files,
    }
}

fn uploaded_file(event: &InputEvent, ordinal: usize) -> UploadedFile {
    let name = event
        .file_name
        .clone()
        .or_else(|| event.data_str("fileName").map(str::to_string))
        .or_else(|| event.data_str("name").map(str::to_string))
        .unwrap_or_else(|| format!("document-{ordinal}"));
    UploadedFile {
        name,
        size_bytes: event.file_data.as_ref().map(String::len),
    }
}

/// `*_upload`: append one file per event until the user is done or the
/// per-record limit is reached.
pub fn upload(
    mut state: SessionState,
    event: &InputEvent,
    ctx: &FlowContext<'_>,
    kind: RecordKind,
) -> Response {
    let max_files = ctx.config.max_uploads_per_record;
    let has_file = event.is_action(Action::FileUploaded)
        || event.file_name.is_some()
        || event.file_data.is_some();

    if has_file {
        let draft = state.draft_mut(kind);
        if draft.uploaded_files.len() >= max_files {
            return attestation_prompt(
                state,
                kind,
                format!("You've reached the limit of {max_files} documents. Let's review."),
            );
        }
        let file = uploaded_file(event, draft.uploaded_files.len() + 1);
        let name = file.name.clone();
        draft.uploaded_files.push(file);
        let count = draft.uploaded_files.len();

        if count >= max_files {
            return attestation_prompt(
                state,
                kind,
                format!("Got {name}. That's the limit of {max_files} documents, so let's review."),
            );
        }
        let noun = if count == 1 { "file" } else { "files" };
        return Response::new(
            state,
            format!("Got {name} ({count} {noun} so far). Upload another, or say \"done\"."),
        )
        .with_chips(UPLOAD_CHIPS);
    }

    if event.is_action(Action::UploadDone) || is_done(event.text()) {
        let count = state.draft(kind).uploaded_files.len();
        let message = if count == 0 {
            "No files attached. Let's review.".to_string()
        } else {
            format!("Thanks, {count} attached. Let's review.")
        };
        return attestation_prompt(state, kind, message);
    }

    Response::new(state, "Upload a file, or say \"done\" to continue.")
        .with_card(upload_card(kind, max_files))
        .with_chips(UPLOAD_CHIPS)
}

fn attestation_statement(kind: RecordKind) -> String {
    format!(
        "I confirm the information above is accurate and that I am the rightful holder of this {}.",
        kind.label()
    )
}

fn attestation_card(draft: &Draft, kind: RecordKind) -> Card {
    Card::Attestation {
        record_type: kind,
        summary: draft.fields.clone(),
        statement: attestation_statement(kind),
    }
}

pub fn attestation_prompt(
    mut state: SessionState,
    kind: RecordKind,
    message: impl Into<String>,
) -> Response {
    state.step = flow_steps(kind).attestation;
    let card = attestation_card(state.draft(kind), kind);
    Response::new(state, message)
        .with_card(card)
        .with_follow_up("Please confirm the details are correct to create your DTC.")
        .with_chips(ATTESTATION_CHIPS)
}

/// `*_attestation`: the only place a draft turns into a record.
pub fn attestation(state: SessionState, event: &InputEvent, ctx: &FlowContext<'_>) -> Response {
    let Some(kind) = state.step.attestation_kind() else {
        return reprompt(state, "There's nothing waiting for confirmation.");
    };

    let decision = if event.is_action(Action::AttestationConfirmed) {
        Confirmation::Affirm
    } else if event.is_action(Action::AttestationDeclined) {
        Confirmation::Deny
    } else {
        classify_confirmation(event.text())
    };

    match decision {
        Confirmation::Affirm => {
            let mint_ctx = MintContext {
                now: ctx.now,
                anonymous_attester: &ctx.config.anonymous_attester,
            };
            match mint_from_attestation(state.clone(), &mint_ctx) {
                Ok(response) => response,
                Err(err) => {
                    tracing::error!(target: "records", error = %err, "mint_rejected");
                    attestation_prompt(state, kind, "Something went wrong. Please confirm again.")
                }
            }
        }
        Confirmation::Deny => restart_flow(state, kind),
        Confirmation::Unclear => attestation_prompt(
            state,
            kind,
            "Please confirm the details below, or tell me they're not right.",
        ),
    }
}

/// Declined attestation: drop the draft and start the flow over.
fn restart_flow(mut state: SessionState, kind: RecordKind) -> Response {
    *state.draft_mut(kind) = Draft::default();
    let mut response = match kind {
        RecordKind::Vehicle => vehicle::start(state),
        RecordKind::Student => student::start(state),
        RecordKind::Credential => credential::start(state),
        RecordKind::PilotCredential => pilot::restart(state),
    };
    response.message = format!("No problem, I discarded that draft. {}", response.message);
    response
}
