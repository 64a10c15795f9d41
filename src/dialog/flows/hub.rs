//! Authenticated hub. Consumers route to the vault, the logbook or a record
//! flow; businesses route to dashboard views. Unmatched text goes to the
//! external AI responder.

use crate::{
    dialog::{
        flows::{credential, student, vehicle},
        types::{Action, Card, DashboardView, InputEvent, Response, SessionState, Step},
    },
    normalize::{CredentialTrack, text::contains_phrase},
    records::vault::{logbook_rows, vault_rows},
};

pub const HUB_CHIPS: [&str; 5] = [
    "Add a vehicle",
    "Add a diploma",
    "Add a license",
    "Add a pilot certificate",
    "View vault",
];
pub const ADD_RECORD_CHIPS: [&str; 4] = [
    "Add a vehicle",
    "Add a diploma",
    "Add a license",
    "Add a pilot certificate",
];
pub const BUSINESS_CHIPS: [&str; 4] = ["Inventory", "Team", "Compliance", "Pipeline"];

const VAULT_PHRASES: &[&str] = &["vault", "my records", "my dtcs", "show my records"];
const LOGBOOK_PHRASES: &[&str] = &["logbook", "log book", "history", "activity"];
const ADD_RECORD_PHRASES: &[&str] = &["add record", "add a record", "add another", "new record", "another record"];
const PILOT_PHRASES: &[&str] = &["pilot", "faa", "flight", "airman"];
const VEHICLE_PHRASES: &[&str] = &["vehicle", "car", "truck", "vin", "motorcycle", "suv"];
const STUDENT_PHRASES: &[&str] = &["diploma", "degree", "school", "transcript", "student", "university", "college"];
const CREDENTIAL_PHRASES: &[&str] = &["license", "licence", "certification", "certificate", "credential"];

const BUSINESS_VIEWS: &[(DashboardView, &[&str])] = &[
    (DashboardView::Inventory, &["inventory", "stock", "listings"]),
    (DashboardView::Overview, &["dashboard", "overview", "home"]),
    (DashboardView::Team, &["team", "staff", "members", "employees"]),
    (DashboardView::Compliance, &["compliance", "audit", "audits"]),
    (DashboardView::Pipeline, &["pipeline", "deals", "leads", "sales"]),
];

fn any_phrase(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| contains_phrase(text, phrase))
}

pub fn handle(mut state: SessionState, event: &InputEvent) -> Response {
    state.step = Step::Authenticated;

    match event.action {
        Some(Action::StartVehicle) => return vehicle::start(state),
        Some(Action::StartStudent) => return student::start(state),
        Some(Action::StartCredential) => return credential::start(state),
        Some(Action::StartPilot) => return credential::start_track(state, CredentialTrack::Pilot),
        Some(Action::ViewVault) => return vault(state),
        Some(Action::ViewLogbook) => return logbook(state),
        Some(Action::AddRecord) => return add_record(state),
        _ => {}
    }

    let text = event.text();
    if text.is_empty() {
        return menu(state);
    }

    if state.is_business() {
        return business_intent(state, text);
    }
    consumer_intent(state, text)
}

fn consumer_intent(state: SessionState, text: &str) -> Response {
    if any_phrase(text, VAULT_PHRASES) {
        vault(state)
    } else if any_phrase(text, LOGBOOK_PHRASES) {
        logbook(state)
    } else if any_phrase(text, ADD_RECORD_PHRASES) {
        add_record(state)
    } else if any_phrase(text, PILOT_PHRASES) {
        credential::start_track(state, CredentialTrack::Pilot)
    } else if any_phrase(text, VEHICLE_PHRASES) {
        vehicle::start(state)
    } else if any_phrase(text, STUDENT_PHRASES) {
        student::start(state)
    } else if any_phrase(text, CREDENTIAL_PHRASES) {
        credential::start_with(state, text)
    } else {
        Response::ai_handoff(state)
    }
}

fn business_intent(state: SessionState, text: &str) -> Response {
    let view = BUSINESS_VIEWS
        .iter()
        .find(|(_, phrases)| any_phrase(text, phrases))
        .map(|(view, _)| *view);

    match view {
        Some(view) => {
            let company_name = state.company_name.clone();
            Response::new(state, format!("Here's your {} view.", view_label(view)))
                .with_card(Card::BusinessDashboard { view, company_name })
                .with_chips(BUSINESS_CHIPS)
        }
        None => Response::ai_handoff(state),
    }
}

fn view_label(view: DashboardView) -> &'static str {
    match view {
        DashboardView::Overview => "overview",
        DashboardView::Inventory => "inventory",
        DashboardView::Team => "team",
        DashboardView::Compliance => "compliance",
        DashboardView::Pipeline => "pipeline",
    }
}

fn menu(state: SessionState) -> Response {
    if state.is_business() {
        return Response::new(state, "What would you like to look at?").with_chips(BUSINESS_CHIPS);
    }
    Response::new(state, "What would you like to do next?").with_chips(HUB_CHIPS)
}

pub fn add_record(state: SessionState) -> Response {
    Response::new(state, "What would you like to add?").with_chips(ADD_RECORD_CHIPS)
}

pub fn vault(state: SessionState) -> Response {
    if state.records.is_empty() {
        return Response::new(state, "Your vault is empty. Want to add your first record?")
            .with_chips(ADD_RECORD_CHIPS);
    }
    let rows = vault_rows(&state.records);
    let count = rows.len();
    let noun = if count == 1 { "record" } else { "records" };
    Response::new(state, format!("You have {count} {noun} in your vault."))
        .with_card(Card::Vault { rows })
        .with_chips(["View logbook", "Add another record"])
}

pub fn logbook(state: SessionState) -> Response {
    if state.records.is_empty() {
        return Response::new(state, "Your logbook is empty. It fills in as you add records.")
            .with_chips(ADD_RECORD_CHIPS);
    }
    let entries = logbook_rows(&state.records);
    let count = entries.len();
    Response::new(state, format!("Here's your logbook ({count} entries)."))
        .with_card(Card::Logbook { entries })
        .with_chips(["View vault", "Add another record"])
}
