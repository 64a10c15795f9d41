use uuid::Uuid;

use crate::{
    dialog::{
        flows::{FlowContext, credential, reprompt, student, vehicle},
        ports::SignupRequest,
        types::{
            Action, AudienceType, Card, DashboardView, InputEvent, Response, SessionState,
            SideEffect, Step,
        },
    },
    normalize::{
        Vertical, detect_vertical, extract_email, is_affirmative, is_negative, parse_name,
        text::contains_phrase,
    },
    records::mint::rfc3339,
};

const TERMS_CHIPS: [&str; 2] = ["I accept", "Decline"];
const VERIFY_CHIPS: [&str; 2] = ["Verify my ID", "Skip for now"];
const DECLINE_PHRASES: &[&str] = &["decline", "don't accept", "do not accept", "don't agree"];
const ACCEPT_PHRASES: &[&str] = &["accept", "agree", "i agree"];
const SKIP_PHRASES: &[&str] = &["skip", "later", "not now"];

pub fn begin(mut state: SessionState, audience: AudienceType) -> Response {
    state.audience_type = Some(audience);
    state.step = Step::CollectName;
    let message = match audience {
        AudienceType::Consumer => "Great, let's set up your free vault. What's your name?",
        AudienceType::Business => "Let's set up your business workspace. First, what's your name?",
    };
    Response::new(state, message)
}

pub fn collect_name(mut state: SessionState, event: &InputEvent) -> Response {
    let name = parse_name(event.text());
    if name.is_empty() {
        return reprompt(state, "What should I call you?");
    }
    state.name = Some(name);
    let first = state.first_name().unwrap_or_default().to_string();

    if state.is_business() {
        state.step = Step::CollectCompanyName;
        return Response::new(
            state,
            format!("Nice to meet you, {first}. What's your company called?"),
        );
    }

    state.step = Step::CollectEmail;
    Response::new(
        state,
        format!("Nice to meet you, {first}! What's your email? I'll send you a sign-in link."),
    )
}

pub fn collect_company_name(mut state: SessionState, event: &InputEvent) -> Response {
    let company = event.text();
    if company.is_empty() {
        return reprompt(state, "What's the name of your company?");
    }
    let message = format!("What does {company} do? A sentence is plenty.");
    state.company_name = Some(company.to_string());
    state.step = Step::CollectCompanyDescription;
    Response::new(state, message)
}

pub fn collect_company_description(mut state: SessionState, event: &InputEvent) -> Response {
    let description = event.text();
    if description.is_empty() {
        return reprompt(state, "Tell me a little about what your company does.");
    }
    if state.vertical.is_none() {
        state.vertical = detect_vertical(description);
    }
    state.company_description = Some(description.to_string());
    state.step = Step::CollectEmail;
    Response::new(
        state,
        "Got it. What's your work email? I'll send you a sign-in link.",
    )
}

pub fn collect_email(mut state: SessionState, event: &InputEvent, ctx: &FlowContext<'_>) -> Response {
    let email = match extract_email(event.text()) {
        Ok(email) => email,
        Err(err) => return reprompt(state, err.to_string()),
    };
    state.email = Some(email);
    state.step = Step::TermsAcceptance;
    terms_prompt(
        state,
        ctx,
        "Thanks! Before I create your account, please review and accept the terms of service.",
    )
}

fn terms_prompt(state: SessionState, ctx: &FlowContext<'_>, message: &str) -> Response {
    Response::new(state, message)
        .with_card(Card::Terms {
            version: ctx.config.terms_version.clone(),
        })
        .with_chips(TERMS_CHIPS)
}

fn any_phrase(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| contains_phrase(text, phrase))
}

pub async fn terms_acceptance(
    state: SessionState,
    event: &InputEvent,
    ctx: &FlowContext<'_>,
) -> Response {
    let text = event.text();
    if event.is_action(Action::DeclineTerms) || is_negative(text) || any_phrase(text, DECLINE_PHRASES)
    {
        return terms_prompt(
            state,
            ctx,
            "No problem. I can't create an account without the terms, but feel free to keep asking questions.",
        );
    }
    if event.is_action(Action::AcceptTerms) || is_affirmative(text) || any_phrase(text, ACCEPT_PHRASES)
    {
        return accept_terms(state, ctx).await;
    }
    terms_prompt(state, ctx, "Please accept the terms of service to continue.")
}

fn demo_user_id() -> String {
    format!("demo_{}", Uuid::new_v4().simple())
}

fn claim_tenant(state: &SessionState, ctx: &FlowContext<'_>) -> SideEffect {
    let tenant_name = state
        .company_name
        .clone()
        .or_else(|| state.name.clone())
        .unwrap_or_else(|| "My company".to_string());
    SideEffect::ClaimTenant {
        tenant_name,
        tenant_type: "business".to_string(),
        vertical: state
            .vertical
            .map(Vertical::as_str)
            .unwrap_or("business")
            .to_string(),
        jurisdiction: ctx.config.default_jurisdiction.clone(),
    }
}

async fn accept_terms(mut state: SessionState, ctx: &FlowContext<'_>) -> Response {
    state.terms_accepted_at = Some(rfc3339(ctx.now));
    let email = state.email.clone().unwrap_or_default();

    let signup_uid = match ctx.services.signup.as_ref() {
        Some(signup) => {
            let request = SignupRequest {
                name: state.name.clone().unwrap_or_default(),
                email: email.clone(),
                audience_type: state.audience_type.unwrap_or(AudienceType::Consumer),
                company_name: state.company_name.clone(),
            };
            match signup.signup(request).await {
                Ok(outcome) if outcome.ok => Some(outcome.uid.unwrap_or_else(demo_user_id)),
                Ok(_) => {
                    tracing::warn!(
                        target: "dialog",
                        reason = "signup returned not ok",
                        "signup_failed_demo_mode"
                    );
                    None
                }
                Err(err) => {
                    tracing::warn!(
                        target: "dialog",
                        error = %err,
                        "signup_failed_demo_mode"
                    );
                    None
                }
            }
        }
        None => {
            tracing::info!(target: "dialog", "signup_not_configured");
            None
        }
    };

    let mut response = match signup_uid {
        Some(uid) => {
            state.account_created = true;
            state.user_id = Some(uid);
            state.step = Step::IdVerification;
            Response::new(
                state,
                format!("You're in! I sent a sign-in link to {email} so you can get back anytime."),
            )
            .with_card(Card::MagicLink { email })
        }
        None => {
            state.account_created = false;
            state.user_id = Some(demo_user_id());
            state.step = Step::IdVerification;
            Response::new(
                state,
                "You're set up in demo mode. Your records stay in this session until we can finish creating your account.",
            )
        }
    };

    response = response.with_side_effect(SideEffect::AcceptTerms {});
    if response.state.is_business() {
        let effect = claim_tenant(&response.state, ctx);
        response = response.with_side_effect(effect);
    }

    response
        .with_card(Card::IdVerification { required: false })
        .with_follow_up("Want to verify your identity now? Verified records carry more weight, or you can skip for now.")
        .with_chips(VERIFY_CHIPS)
}

pub fn id_verification(mut state: SessionState, event: &InputEvent) -> Response {
    let text = event.text();
    if event.is_action(Action::SkipVerification) || is_negative(text) || any_phrase(text, SKIP_PHRASES)
    {
        state.id_verified = false;
        return enter_hub(state, "No problem, you can verify later.");
    }
    if event.is_action(Action::IdVerified) || is_affirmative(text) || contains_phrase(text, "verify")
    {
        state.id_verified = true;
        return enter_hub(state, "Thanks, your identity is verified.");
    }
    Response::new(state, "Would you like to verify your ID now, or skip for now?")
        .with_card(Card::IdVerification { required: false })
        .with_chips(VERIFY_CHIPS)
}

/// Lands a freshly signed-up session in the hub, or straight in the flow
/// matching the vertical picked up before signup.
fn enter_hub(mut state: SessionState, lead: &str) -> Response {
    state.step = Step::Authenticated;

    if state.is_business() {
        let company_name = state.company_name.clone();
        let message = match company_name.as_deref() {
            Some(company) => format!("{lead} Your workspace for {company} is ready."),
            None => format!("{lead} Your workspace is ready."),
        };
        return Response::new(state, message)
            .with_card(Card::BusinessDashboard {
                view: DashboardView::Overview,
                company_name,
            })
            .with_chips(super::hub::BUSINESS_CHIPS);
    }

    let welcome = Card::Welcome {
        name: state.name.clone(),
        audience_type: AudienceType::Consumer,
    };
    let greeting = match state.first_name() {
        Some(first) => format!("{lead} Welcome, {first}!"),
        None => format!("{lead} Welcome!"),
    };

    let mut response = match state.vertical {
        Some(Vertical::Auto) => vehicle::start(state),
        Some(Vertical::Education) => student::start(state),
        Some(Vertical::Credential) => credential::start(state),
        _ => {
            return Response::new(state, format!("{greeting} What would you like to add first?"))
                .with_card(welcome)
                .with_chips(super::hub::HUB_CHIPS);
        }
    };
    response.cards.insert(0, welcome);
    response.message = format!("{greeting} {}", response.message);
    response
}
