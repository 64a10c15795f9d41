use crate::{
    dialog::{
        flows::{confirm_prompt, documents_prompt, reprompt},
        types::{InputEvent, Response, SessionState, Step},
    },
    normalize::{Confirmation, classify_confirmation, clean_degree, clean_school, clean_year, title_case},
    records::types::{Draft, RecordKind},
};

const DEGREE_CHIPS: [&str; 4] = ["B.S.", "B.A.", "Master's", "PhD"];

fn ask_school(mut state: SessionState, message: &str) -> Response {
    state.student_data = Draft::default();
    state.step = Step::StudentSchool;
    Response::new(state, message)
}

pub fn start(state: SessionState) -> Response {
    ask_school(state, "Let's add your diploma. Which school did you graduate from?")
}

pub fn school(mut state: SessionState, event: &InputEvent) -> Response {
    let text = event.text();
    if text.is_empty() {
        return reprompt(state, "Which school did you graduate from?");
    }
    let school = clean_school(text);
    state.student_data.set("school", school.clone());
    state.step = Step::StudentDegree;
    Response::new(state, format!("{school}, nice. What degree did you earn?"))
        .with_chips(DEGREE_CHIPS)
}

pub fn degree(mut state: SessionState, event: &InputEvent) -> Response {
    let text = event.choice();
    if text.trim().is_empty() {
        return reprompt(state, "What degree did you earn?").with_chips(DEGREE_CHIPS);
    }
    state.student_data.set("degree", clean_degree(text));
    state.step = Step::StudentField;
    Response::new(state, "What was your field of study?")
}

pub fn field(mut state: SessionState, event: &InputEvent) -> Response {
    let text = event.text();
    if text.is_empty() {
        return reprompt(state, "What did you study?");
    }
    state.student_data.set("fieldOfStudy", title_case(text));
    state.step = Step::StudentGraduationYear;
    Response::new(state, "What year did you graduate?")
}

fn summary(draft: &Draft) -> String {
    format!(
        "{} in {} from {}, class of {}",
        draft.display("degree"),
        draft.display("fieldOfStudy"),
        draft.display("school"),
        draft.display("graduationYear")
    )
}

pub fn graduation_year(mut state: SessionState, event: &InputEvent) -> Response {
    match clean_year(event.text()) {
        Ok(year) => {
            state.student_data.set("graduationYear", year);
            state.step = Step::StudentConfirm;
            let summary = summary(&state.student_data);
            confirm_prompt(state, format!("So that's a {summary}. Correct?"))
        }
        Err(err) => reprompt(state, err.to_string()),
    }
}

pub fn confirm(state: SessionState, event: &InputEvent) -> Response {
    match classify_confirmation(event.text()) {
        Confirmation::Affirm => documents_prompt(
            state,
            RecordKind::Student,
            "Want to attach a copy of your diploma or transcript?",
        ),
        Confirmation::Deny => ask_school(state, "Let's start over. Which school did you attend?"),
        Confirmation::Unclear => {
            let summary = summary(&state.student_data);
            confirm_prompt(state, format!("Is this right: {summary}?"))
        }
    }
}
