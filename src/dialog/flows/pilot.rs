use crate::{
    dialog::{
        flows::{confirm_prompt, credential, documents_prompt, reprompt},
        types::{InputEvent, Response, SessionState, Step},
    },
    normalize::{
        Confirmation, CredentialTrack, classify_confirmation, parse_flight_hours, parse_ratings,
        text::clean_reply,
    },
    records::types::{Draft, RecordKind},
};

const NO_RATINGS: &str = "None";

/// Enters the sub-flow once the certificate type is known.
pub fn start(mut state: SessionState, certificate_type: &str) -> Response {
    state.pilot_data = Draft::default();
    state.pilot_data.set("certificateType", certificate_type);
    ask_certificate_number(
        state,
        &format!("{certificate_type}, got it. What's your FAA certificate number?"),
    )
}

/// Declined attestation: back to the certificate-type question.
pub fn restart(mut state: SessionState) -> Response {
    state.pilot_data = Draft::default();
    credential::start_track(state, CredentialTrack::Pilot)
}

fn ask_certificate_number(mut state: SessionState, message: &str) -> Response {
    state.step = Step::PilotCertificateNumber;
    Response::new(state, message)
}

pub fn certificate_number(mut state: SessionState, event: &InputEvent) -> Response {
    let number: String = event.text().split_whitespace().collect();
    if number.is_empty() {
        return reprompt(state, "What's your certificate number?");
    }
    state.pilot_data.set("certificateNumber", number.to_uppercase());
    state.step = Step::PilotIssueDate;
    Response::new(state, "When was it issued?")
}

pub fn issue_date(mut state: SessionState, event: &InputEvent) -> Response {
    let date = event.text();
    if date.is_empty() {
        return reprompt(state, "When was the certificate issued?");
    }
    state.pilot_data.set("issueDate", date);
    state.step = Step::PilotRatings;
    Response::new(
        state,
        "Which ratings do you hold? For example: ASEL, Instrument. Say \"none\" if you have none.",
    )
}

pub fn ratings(mut state: SessionState, event: &InputEvent) -> Response {
    let text = event.text();
    let value = if matches!(clean_reply(text).as_str(), "none" | "no" | "n/a") {
        NO_RATINGS.to_string()
    } else {
        let ratings = parse_ratings(text);
        if ratings.is_empty() {
            return reprompt(state, "Which ratings do you hold? Say \"none\" if you have none.");
        }
        ratings.join(", ")
    };
    state.pilot_data.set("ratings", value);
    state.step = Step::PilotHours;
    Response::new(state, "How many total flight hours do you have?")
}

fn summary(draft: &Draft) -> String {
    format!(
        "{} #{}, issued {}, ratings: {}, {} hours",
        draft.display("certificateType"),
        draft.display("certificateNumber"),
        draft.display("issueDate"),
        draft.display("ratings"),
        draft.display("totalHours")
    )
}

pub fn hours(mut state: SessionState, event: &InputEvent) -> Response {
    match parse_flight_hours(event.text()) {
        Ok(hours) => {
            state.pilot_data.set("totalHours", hours.to_string());
            state.step = Step::PilotConfirm;
            let summary = summary(&state.pilot_data);
            confirm_prompt(state, format!("{summary}. Correct?"))
        }
        Err(err) => reprompt(state, err.to_string()),
    }
}

pub fn confirm(mut state: SessionState, event: &InputEvent) -> Response {
    match classify_confirmation(event.text()) {
        Confirmation::Affirm => documents_prompt(
            state,
            RecordKind::PilotCredential,
            "Want to attach a photo of your certificate or logbook pages?",
        ),
        Confirmation::Deny => {
            for key in ["certificateNumber", "issueDate", "ratings", "totalHours"] {
                state.pilot_data.remove(key);
            }
            ask_certificate_number(state, "Let's fix that. What's your certificate number?")
        }
        Confirmation::Unclear => {
            let summary = summary(&state.pilot_data);
            confirm_prompt(state, format!("Is this right: {summary}?"))
        }
    }
}
