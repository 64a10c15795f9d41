use crate::{
    dialog::{
        flows::{FlowContext, confirm_prompt, documents_prompt, reprompt},
        ports::DecodedVehicle,
        types::{Card, InputEvent, Response, SessionState, Step},
    },
    normalize::{
        Confirmation, classify_confirmation, clean_vin, clean_year, is_vin_skip, match_option,
        parse_mileage, text::mentions, title_case, validate_vin,
    },
    records::types::{Draft, RecordKind},
};

const OWNERSHIP_OPTIONS: &[&str] = &["Owned", "Financed", "Leased"];
const VIN_CHIPS: [&str; 1] = ["Skip"];
const DECODED_FIELDS: [&str; 5] = ["vin", "year", "make", "model", "trim"];

pub fn start(mut state: SessionState) -> Response {
    state.car_data = Draft::default();
    state.step = Step::VehicleVin;
    Response::new(
        state,
        "Let's add your vehicle. What's the 17-character VIN? It's on your registration or the driver-side dashboard. Say \"skip\" if you don't have it handy.",
    )
    .with_chips(VIN_CHIPS)
}

fn ask_year(mut state: SessionState, message: &str) -> Response {
    state.step = Step::VehicleYear;
    Response::new(state, message)
}

fn describe(draft: &Draft) -> String {
    ["year", "make", "model", "trim"]
        .iter()
        .filter_map(|key| draft.get(key))
        .collect::<Vec<_>>()
        .join(" ")
}

fn apply_decoded(draft: &mut Draft, vehicle: DecodedVehicle) {
    draft.set("year", vehicle.year);
    draft.set("make", vehicle.make);
    draft.set("model", vehicle.model);
    match vehicle.trim.filter(|trim| !trim.trim().is_empty()) {
        Some(trim) => draft.set("trim", trim),
        None => draft.remove("trim"),
    }
}

pub async fn vin(mut state: SessionState, event: &InputEvent, ctx: &FlowContext<'_>) -> Response {
    let text = event.text();
    if is_vin_skip(text) {
        return ask_year(state, "No problem, we'll enter it by hand. What year is the vehicle?");
    }

    let vin = clean_vin(text);
    if let Err(err) = validate_vin(&vin) {
        return reprompt(state, err.to_string()).with_chips(VIN_CHIPS);
    }
    state.car_data.set("vin", vin.clone());

    let Some(decoder) = ctx.services.vin_decoder.as_ref() else {
        return ask_year(state, "Got it. What year is the vehicle?");
    };

    match decoder.decode_vin(&vin).await {
        Ok(decoding) if decoding.valid => match decoding.vehicle {
            Some(vehicle) => {
                apply_decoded(&mut state.car_data, vehicle);
                let summary = describe(&state.car_data);
                state.step = Step::VehicleConfirmDecoded;
                confirm_prompt(state, format!("I found a {summary}. Is that right?"))
            }
            None => {
                tracing::warn!(target: "dialog", vin = %vin, reason = "no vehicle in response", "vin_decode_failed");
                ask_year(state, "I couldn't decode that VIN, so let's enter the details. What year is it?")
            }
        },
        Ok(_) => {
            tracing::warn!(target: "dialog", vin = %vin, reason = "decoder marked vin invalid", "vin_decode_failed");
            ask_year(state, "I couldn't decode that VIN, so let's enter the details. What year is it?")
        }
        Err(err) => {
            tracing::warn!(target: "dialog", vin = %vin, error = %err, "vin_decode_failed");
            ask_year(state, "The VIN lookup isn't available right now, so let's enter the details. What year is it?")
        }
    }
}

fn ask_mileage(mut state: SessionState) -> Response {
    state.step = Step::VehicleMileage;
    Response::new(state, "Great. What's the current mileage? 45000 or 45k both work.")
}

pub fn confirm_decoded(mut state: SessionState, event: &InputEvent) -> Response {
    match classify_confirmation(event.text()) {
        Confirmation::Affirm => ask_mileage(state),
        Confirmation::Deny => {
            for key in DECODED_FIELDS {
                state.car_data.remove(key);
            }
            state.step = Step::VehicleVin;
            Response::new(state, "Let's try that again. What's the VIN?").with_chips(VIN_CHIPS)
        }
        Confirmation::Unclear => {
            let summary = describe(&state.car_data);
            confirm_prompt(state, format!("Is your vehicle a {summary}? Yes or no."))
        }
    }
}

pub fn year(mut state: SessionState, event: &InputEvent) -> Response {
    match clean_year(event.text()) {
        Ok(year) => {
            state.car_data.set("year", year);
            state.step = Step::VehicleMake;
            Response::new(state, "What's the make, like Toyota or Ford?")
        }
        Err(err) => reprompt(state, err.to_string()),
    }
}

pub fn make(mut state: SessionState, event: &InputEvent) -> Response {
    let make = event.text();
    if make.is_empty() {
        return reprompt(state, "What's the make of the vehicle?");
    }
    state.car_data.set("make", title_case(make));
    state.step = Step::VehicleModel;
    Response::new(state, "And the model?")
}

pub fn model(mut state: SessionState, event: &InputEvent) -> Response {
    let model = event.text();
    if model.is_empty() {
        return reprompt(state, "What's the model?");
    }
    state.car_data.set("model", model);
    state.step = Step::VehicleConfirmManual;
    let summary = describe(&state.car_data);
    confirm_prompt(state, format!("So it's a {summary}. Correct?"))
}

pub fn confirm_manual(mut state: SessionState, event: &InputEvent) -> Response {
    match classify_confirmation(event.text()) {
        Confirmation::Affirm => ask_mileage(state),
        Confirmation::Deny => {
            for key in ["year", "make", "model"] {
                state.car_data.remove(key);
            }
            ask_year(state, "Let's fix that. What year is it?")
        }
        Confirmation::Unclear => {
            let summary = describe(&state.car_data);
            confirm_prompt(state, format!("Is it a {summary}? Yes or no."))
        }
    }
}

pub fn mileage(mut state: SessionState, event: &InputEvent) -> Response {
    match parse_mileage(event.text()) {
        Ok(miles) => {
            state.car_data.set("mileage", miles.to_string());
            state.step = Step::VehicleColor;
            Response::new(state, "What color is it?")
        }
        Err(err) => reprompt(state, err.to_string()),
    }
}

fn ownership_prompt(state: SessionState, message: &str) -> Response {
    Response::new(state, message)
        .with_card(Card::Ownership {
            options: OWNERSHIP_OPTIONS.iter().map(|s| s.to_string()).collect(),
        })
        .with_chips(OWNERSHIP_OPTIONS.iter().copied())
}

pub fn color(mut state: SessionState, event: &InputEvent) -> Response {
    let color = event.text();
    if color.is_empty() {
        return reprompt(state, "What color is the vehicle?");
    }
    state.car_data.set("color", title_case(color));
    state.step = Step::VehicleOwnership;
    ownership_prompt(state, "Do you own it outright, or is it financed or leased?")
}

fn resolve_ownership(reply: &str) -> Option<&'static str> {
    if let Some(option) = match_option(OWNERSHIP_OPTIONS, reply) {
        return Some(option);
    }
    if mentions(reply, "financ") || mentions(reply, "loan") {
        Some("Financed")
    } else if mentions(reply, "leas") {
        Some("Leased")
    } else if mentions(reply, "own") || mentions(reply, "paid off") {
        Some("Owned")
    } else {
        None
    }
}

pub fn ownership(mut state: SessionState, event: &InputEvent) -> Response {
    let Some(status) = resolve_ownership(event.choice()) else {
        return ownership_prompt(state, "Is it owned, financed or leased?");
    };
    state.car_data.set("ownership", status.to_lowercase());
    documents_prompt(
        state,
        RecordKind::Vehicle,
        "Do you have documents to attach, like the title or registration?",
    )
}
