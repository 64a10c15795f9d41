//! Unauthenticated landing: signup triggers, vertical pitches and the canned
//! demo responder. Never leaves the message empty.

use crate::{
    dialog::{
        flows::identity,
        types::{Action, AudienceType, InputEvent, Response, SessionState, Surface},
    },
    normalize::{demo_reply, detect_vertical, text::clean_reply, text::contains_phrase, vertical_pitch},
};

const START_PHRASES: &[&str] = &["get started", "sign up", "signup", "start free", "create account", "create an account"];
const BUSINESS_START_PHRASES: &[&str] = &["business workspace", "set up a business", "for my business"];
const CONSUMER_PITCH_CHIPS: [&str; 3] = ["Start free", "How does it work?", "What is a DTC?"];
const BUSINESS_PITCH_CHIPS: [&str; 2] = ["Set up a business workspace", "How does it work?"];

fn audience_for_start(state: &SessionState, event: &InputEvent) -> AudienceType {
    if event.is_action(Action::StartBusiness) || event.surface == Surface::Business {
        return AudienceType::Business;
    }
    match event.data_str("audienceType") {
        Some("business") => AudienceType::Business,
        Some(_) => AudienceType::Consumer,
        None => state.audience_type.unwrap_or(AudienceType::Consumer),
    }
}

pub fn handle(state: SessionState, event: &InputEvent) -> Response {
    if event.is_action(Action::StartFree) || event.is_action(Action::StartBusiness) {
        let audience = audience_for_start(&state, event);
        return identity::begin(state, audience);
    }

    let text = event.text();
    if BUSINESS_START_PHRASES.iter().any(|p| contains_phrase(text, p)) {
        return identity::begin(state, AudienceType::Business);
    }
    if clean_reply(text) == "start" || START_PHRASES.iter().any(|p| contains_phrase(text, p)) {
        let audience = if event.surface == Surface::Business {
            AudienceType::Business
        } else {
            AudienceType::Consumer
        };
        return identity::begin(state, audience);
    }

    if let Some(vertical) = detect_vertical(text) {
        let mut state = state;
        state.vertical = Some(vertical);
        let chips: &[&str] = if vertical.is_business() {
            &BUSINESS_PITCH_CHIPS
        } else {
            &CONSUMER_PITCH_CHIPS
        };
        return Response::new(state, vertical_pitch(vertical)).with_chips(chips.iter().copied());
    }

    let reply = demo_reply(text);
    Response::new(state, reply.message).with_chips(reply.prompt_chips.iter().copied())
}
