//! Professional licenses and certifications. A keyword track match asks a
//! closed-option question before the generic name capture runs.

use crate::{
    dialog::{
        flows::{confirm_prompt, documents_prompt, pilot, reprompt},
        types::{InputEvent, Response, SessionState, Step},
    },
    normalize::{
        Confirmation, CredentialTrack, classify_confirmation, clean_credential, detect_track,
        match_option, text::clean_reply,
    },
    records::types::{Draft, RecordKind},
};

const NO_EXPIRATION: &str = "No expiration";
const NO_EXPIRATION_REPLIES: &[&str] = &[
    "none",
    "never",
    "no",
    "n/a",
    "na",
    "no expiration",
    "doesn't expire",
    "does not expire",
];

fn ask_name(mut state: SessionState, message: &str) -> Response {
    state.credential_data = Draft::default();
    state.step = Step::CredentialName;
    Response::new(state, message)
}

pub fn start(state: SessionState) -> Response {
    ask_name(state, "Which license or certification would you like to add?")
}

/// Entry from free text that already names a credential ("add my nursing
/// license"): run disambiguation on that same text.
pub fn start_with(state: SessionState, text: &str) -> Response {
    match detect_track(text) {
        Some(definition) => start_track(state, definition.track),
        None => start(state),
    }
}

pub fn start_track(mut state: SessionState, track: CredentialTrack) -> Response {
    state.credential_data = Draft::default();
    ask_track_question(state, track)
}

fn ask_track_question(mut state: SessionState, track: CredentialTrack) -> Response {
    let definition = track.definition();
    state.credential_data.set("track", track.as_str());
    state.step = Step::CredentialDisambiguation;
    Response::new(state, definition.question).with_chips(definition.options.iter().copied())
}

pub fn name(mut state: SessionState, event: &InputEvent) -> Response {
    let text = event.text();
    if text.is_empty() {
        return reprompt(state, "Which license or certification is it?");
    }
    if let Some(definition) = detect_track(text) {
        return ask_track_question(state, definition.track);
    }
    state.credential_data.set("name", clean_credential(text));
    ask_issuer(state)
}

fn ask_issuer(mut state: SessionState) -> Response {
    state.step = Step::CredentialIssuer;
    let name = state.credential_data.display("name").to_string();
    Response::new(
        state,
        format!("Got it, {name}. Who issued it? A state board or agency, for example."),
    )
}

pub fn disambiguation(mut state: SessionState, event: &InputEvent) -> Response {
    let Some(track) = state
        .credential_data
        .get("track")
        .and_then(CredentialTrack::parse)
    else {
        return ask_name(state, "Which license or certification would you like to add?");
    };
    let definition = track.definition();

    let Some(option) = match_option(definition.options, event.choice()) else {
        return reprompt(state, format!("Please pick one: {}", definition.question))
            .with_chips(definition.options.iter().copied());
    };

    if track == CredentialTrack::Pilot {
        return pilot::start(state, option);
    }
    state.credential_data.set("name", option);
    ask_issuer(state)
}

pub fn issuer(mut state: SessionState, event: &InputEvent) -> Response {
    let issuer = event.text();
    if issuer.is_empty() {
        return reprompt(state, "Who issued the credential?");
    }
    state.credential_data.set("issuer", issuer);
    state.step = Step::CredentialNumber;
    Response::new(state, "What's the license or certificate number?")
}

pub fn number(mut state: SessionState, event: &InputEvent) -> Response {
    let number = event.text();
    if number.is_empty() {
        return reprompt(state, "What's the license or certificate number?");
    }
    state.credential_data.set("licenseNumber", number);
    state.step = Step::CredentialExpiration;
    Response::new(state, "When does it expire? Say \"none\" if it doesn't.").with_chips([NO_EXPIRATION])
}

fn summary(draft: &Draft) -> String {
    let expiration = match draft.get("expiration") {
        Some(NO_EXPIRATION) | None => "no expiration".to_string(),
        Some(date) => format!("expires {date}"),
    };
    format!(
        "{} from {}, #{}, {expiration}",
        draft.display("name"),
        draft.display("issuer"),
        draft.display("licenseNumber")
    )
}

pub fn expiration(mut state: SessionState, event: &InputEvent) -> Response {
    let text = event.text();
    if text.is_empty() {
        return reprompt(state, "When does it expire? Say \"none\" if it doesn't.")
            .with_chips([NO_EXPIRATION]);
    }
    let reply = clean_reply(text);
    let value = if NO_EXPIRATION_REPLIES.contains(&reply.as_str()) {
        NO_EXPIRATION.to_string()
    } else {
        text.to_string()
    };
    state.credential_data.set("expiration", value);
    state.step = Step::CredentialConfirm;
    let summary = summary(&state.credential_data);
    confirm_prompt(state, format!("{summary}. Correct?"))
}

pub fn confirm(state: SessionState, event: &InputEvent) -> Response {
    match classify_confirmation(event.text()) {
        Confirmation::Affirm => documents_prompt(
            state,
            RecordKind::Credential,
            "Want to attach a copy of the license or certificate?",
        ),
        Confirmation::Deny => ask_name(state, "Let's start over. Which license or certification is it?"),
        Confirmation::Unclear => {
            let summary = summary(&state.credential_data);
            confirm_prompt(state, format!("Is this right: {summary}?"))
        }
    }
}
