use crate::{
    config::DialogConfig,
    dialog::{
        flows::{
            self, FlowContext, credential, hub, identity, idle, pilot, student, vehicle,
        },
        invariants::assert_append_only,
        ports::Services,
        types::{Action, InputEvent, MessageInput, Response, SessionState, Step},
    },
    records::types::RecordKind,
};

/// Applies one input event to one session snapshot. Holds no session state of
/// its own; callers serialize calls per session.
#[derive(Clone, Default)]
pub struct DialogEngine {
    config: DialogConfig,
    services: Services,
}

impl DialogEngine {
    pub fn new(config: DialogConfig, services: Services) -> Self {
        Self { config, services }
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub async fn process_message(&self, input: MessageInput) -> Response {
        let MessageInput {
            state,
            user_input,
            action,
            action_data,
            file_data,
            file_name,
            surface,
        } = input;

        let parsed_action = action.as_deref().and_then(Action::parse);
        if let (Some(raw), None) = (action.as_deref(), parsed_action) {
            tracing::debug!(target: "dialog", action = raw, "unknown_action_ignored");
        }

        let event = InputEvent {
            text: user_input,
            action: parsed_action,
            action_data,
            file_data,
            file_name,
            surface,
        };

        let ctx = FlowContext {
            services: &self.services,
            config: &self.config,
            now: self.services.clock.now(),
        };

        let from_step = state.step;
        let previous_records = state.records.clone();
        let mut response = dispatch(state, &event, &ctx).await;

        if let Err(err) = assert_append_only(&previous_records, &response.state.records) {
            tracing::error!(
                target: "dialog",
                step = %from_step,
                error = %err,
                "append_only_violation"
            );
            response.state.records = previous_records;
        }
        if let Err(err) = response.state.assert_invariants() {
            tracing::error!(
                target: "dialog",
                step = %response.state.step,
                error = %err,
                "session_invariant_violation"
            );
        }

        tracing::info!(
            target: "dialog",
            from = %from_step,
            to = %response.state.step,
            cards = response.cards.len(),
            side_effects = response.side_effects.len(),
            use_ai = response.use_ai,
            "transition"
        );

        response
    }
}

/// Convenience entry point with default dialog settings.
pub async fn process_message(input: MessageInput, services: &Services) -> Response {
    DialogEngine::new(DialogConfig::default(), services.clone())
        .process_message(input)
        .await
}

/// Exhaustive over `Step`: adding a step without a handler does not compile.
async fn dispatch(state: SessionState, event: &InputEvent, ctx: &FlowContext<'_>) -> Response {
    match state.step {
        Step::Idle | Step::Unknown => {
            if state.is_authenticated() {
                hub::handle(state, event)
            } else {
                let mut state = state;
                state.step = Step::Idle;
                idle::handle(state, event)
            }
        }

        Step::CollectName => identity::collect_name(state, event),
        Step::CollectCompanyName => identity::collect_company_name(state, event),
        Step::CollectCompanyDescription => identity::collect_company_description(state, event),
        Step::CollectEmail => identity::collect_email(state, event, ctx),
        Step::TermsAcceptance => identity::terms_acceptance(state, event, ctx).await,
        Step::IdVerification => identity::id_verification(state, event),
        Step::Authenticated => hub::handle(state, event),

        Step::VehicleVin => vehicle::vin(state, event, ctx).await,
        Step::VehicleConfirmDecoded => vehicle::confirm_decoded(state, event),
        Step::VehicleYear => vehicle::year(state, event),
        Step::VehicleMake => vehicle::make(state, event),
        Step::VehicleModel => vehicle::model(state, event),
        Step::VehicleConfirmManual => vehicle::confirm_manual(state, event),
        Step::VehicleMileage => vehicle::mileage(state, event),
        Step::VehicleColor => vehicle::color(state, event),
        Step::VehicleOwnership => vehicle::ownership(state, event),
        Step::VehicleDocuments => flows::documents(state, event, ctx, RecordKind::Vehicle),
        Step::VehicleUpload => flows::upload(state, event, ctx, RecordKind::Vehicle),

        Step::StudentSchool => student::school(state, event),
        Step::StudentDegree => student::degree(state, event),
        Step::StudentField => student::field(state, event),
        Step::StudentGraduationYear => student::graduation_year(state, event),
        Step::StudentConfirm => student::confirm(state, event),
        Step::StudentDocuments => flows::documents(state, event, ctx, RecordKind::Student),
        Step::StudentUpload => flows::upload(state, event, ctx, RecordKind::Student),

        Step::CredentialName => credential::name(state, event),
        Step::CredentialDisambiguation => credential::disambiguation(state, event),
        Step::CredentialIssuer => credential::issuer(state, event),
        Step::CredentialNumber => credential::number(state, event),
        Step::CredentialExpiration => credential::expiration(state, event),
        Step::CredentialConfirm => credential::confirm(state, event),
        Step::CredentialDocuments => flows::documents(state, event, ctx, RecordKind::Credential),
        Step::CredentialUpload => flows::upload(state, event, ctx, RecordKind::Credential),

        Step::PilotCertificateNumber => pilot::certificate_number(state, event),
        Step::PilotIssueDate => pilot::issue_date(state, event),
        Step::PilotRatings => pilot::ratings(state, event),
        Step::PilotHours => pilot::hours(state, event),
        Step::PilotConfirm => pilot::confirm(state, event),
        Step::PilotDocuments => flows::documents(state, event, ctx, RecordKind::PilotCredential),
        Step::PilotUpload => flows::upload(state, event, ctx, RecordKind::PilotCredential),

        Step::VehicleAttestation
        | Step::StudentAttestation
        | Step::CredentialAttestation
        | Step::PilotAttestation => flows::attestation(state, event, ctx),
    }
}
