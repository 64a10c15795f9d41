use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    dialog::{error::DialogError, invariants::assert_session_invariants},
    normalize::Vertical,
    records::types::{Draft, LogbookEntry, Record, RecordKind},
};

macro_rules! steps {
    ($($variant:ident => $name:literal,)+) => {
        /// Every dialog point across all flows. Unrecognized names decode to
        /// `Unknown` and are routed like `Idle`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(from = "String", into = "&'static str")]
        pub enum Step {
            #[default]
            $($variant,)+
            Unknown,
        }

        impl Step {
            pub const ALL: &'static [Step] = &[$(Step::$variant,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Step::$variant => $name,)+
                    Step::Unknown => "unknown",
                }
            }

            pub fn parse(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Step::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

steps! {
    Idle => "idle",
    CollectName => "collect_name",
    CollectCompanyName => "collect_company_name",
    CollectCompanyDescription => "collect_company_description",
    CollectEmail => "collect_email",
    TermsAcceptance => "terms_acceptance",
    IdVerification => "id_verification",
    Authenticated => "authenticated",
    VehicleVin => "vehicle_vin",
    VehicleConfirmDecoded => "vehicle_confirm_decoded",
    VehicleYear => "vehicle_year",
    VehicleMake => "vehicle_make",
    VehicleModel => "vehicle_model",
    VehicleConfirmManual => "vehicle_confirm_manual",
    VehicleMileage => "vehicle_mileage",
    VehicleColor => "vehicle_color",
    VehicleOwnership => "vehicle_ownership",
    VehicleDocuments => "vehicle_documents",
    VehicleUpload => "vehicle_upload",
    VehicleAttestation => "vehicle_attestation",
    StudentSchool => "student_school",
    StudentDegree => "student_degree",
    StudentField => "student_field",
    StudentGraduationYear => "student_graduation_year",
    StudentConfirm => "student_confirm",
    StudentDocuments => "student_documents",
    StudentUpload => "student_upload",
    StudentAttestation => "student_attestation",
    CredentialName => "credential_name",
    CredentialDisambiguation => "credential_disambiguation",
    CredentialIssuer => "credential_issuer",
    CredentialNumber => "credential_number",
    CredentialExpiration => "credential_expiration",
    CredentialConfirm => "credential_confirm",
    CredentialDocuments => "credential_documents",
    CredentialUpload => "credential_upload",
    CredentialAttestation => "credential_attestation",
    PilotCertificateNumber => "pilot_certificate_number",
    PilotIssueDate => "pilot_issue_date",
    PilotRatings => "pilot_ratings",
    PilotHours => "pilot_hours",
    PilotConfirm => "pilot_confirm",
    PilotDocuments => "pilot_documents",
    PilotUpload => "pilot_upload",
    PilotAttestation => "pilot_attestation",
}

impl Step {
    /// The record type minted from this step, when it is an attestation gate.
    pub fn attestation_kind(self) -> Option<RecordKind> {
        match self {
            Step::VehicleAttestation => Some(RecordKind::Vehicle),
            Step::StudentAttestation => Some(RecordKind::Student),
            Step::CredentialAttestation => Some(RecordKind::Credential),
            Step::PilotAttestation => Some(RecordKind::PilotCredential),
            _ => None,
        }
    }
}

impl From<String> for Step {
    fn from(name: String) -> Self {
        Step::parse(&name).unwrap_or(Step::Unknown)
    }
}

impl From<Step> for &'static str {
    fn from(step: Step) -> Self {
        step.as_str()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudienceType {
    Consumer,
    Business,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    #[default]
    Landing,
    Chat,
    Dashboard,
    Business,
}

/// The externally owned snapshot of one user's progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub step: Step,
    #[serde(default)]
    pub vertical: Option<Vertical>,
    #[serde(default)]
    pub audience_type: Option<AudienceType>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_description: Option<String>,
    #[serde(default)]
    pub account_created: bool,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub id_verified: bool,
    #[serde(default)]
    pub terms_accepted_at: Option<String>,
    #[serde(default)]
    pub car_data: Draft,
    #[serde(default)]
    pub student_data: Draft,
    #[serde(default)]
    pub credential_data: Draft,
    #[serde(default)]
    pub pilot_data: Draft,
    #[serde(default)]
    pub records: Vec<Record>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn is_business(&self) -> bool {
        matches!(self.audience_type, Some(AudienceType::Business))
    }

    pub fn draft(&self, kind: RecordKind) -> &Draft {
        match kind {
            RecordKind::Vehicle => &self.car_data,
            RecordKind::Student => &self.student_data,
            RecordKind::Credential => &self.credential_data,
            RecordKind::PilotCredential => &self.pilot_data,
        }
    }

    pub fn draft_mut(&mut self, kind: RecordKind) -> &mut Draft {
        match kind {
            RecordKind::Vehicle => &mut self.car_data,
            RecordKind::Student => &mut self.student_data,
            RecordKind::Credential => &mut self.credential_data,
            RecordKind::PilotCredential => &mut self.pilot_data,
        }
    }

    /// Display name for greetings; first word of the captured name.
    pub fn first_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .and_then(|name| name.split_whitespace().next())
    }

    pub fn assert_invariants(&self) -> Result<(), DialogError> {
        assert_session_invariants(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartFree,
    StartBusiness,
    AcceptTerms,
    DeclineTerms,
    IdVerified,
    SkipVerification,
    SelectOption,
    FileUploaded,
    UploadDone,
    AttestationConfirmed,
    AttestationDeclined,
    StartVehicle,
    StartStudent,
    StartCredential,
    StartPilot,
    ViewVault,
    ViewLogbook,
    AddRecord,
}

impl Action {
    pub fn parse(name: &str) -> Option<Self> {
        let action = match name {
            "start_free" => Self::StartFree,
            "start_business" => Self::StartBusiness,
            "accept_terms" => Self::AcceptTerms,
            "decline_terms" => Self::DeclineTerms,
            "id_verified" => Self::IdVerified,
            "skip_verification" => Self::SkipVerification,
            "select_option" => Self::SelectOption,
            "file_uploaded" => Self::FileUploaded,
            "upload_done" => Self::UploadDone,
            "attestation_confirmed" => Self::AttestationConfirmed,
            "attestation_declined" => Self::AttestationDeclined,
            "start_vehicle" => Self::StartVehicle,
            "start_student" => Self::StartStudent,
            "start_credential" => Self::StartCredential,
            "start_pilot" => Self::StartPilot,
            "view_vault" => Self::ViewVault,
            "view_logbook" => Self::ViewLogbook,
            "add_record" => Self::AddRecord,
            _ => return None,
        };
        Some(action)
    }
}

/// One input event applied to one session snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageInput {
    #[serde(default)]
    pub state: SessionState,
    #[serde(default)]
    pub user_input: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub action_data: Option<serde_json::Value>,
    #[serde(default)]
    pub file_data: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub surface: Surface,
}

/// The event half of a `MessageInput`, with the action already parsed.
#[derive(Debug, Clone, Default)]
pub struct InputEvent {
    pub text: Option<String>,
    pub action: Option<Action>,
    pub action_data: Option<serde_json::Value>,
    pub file_data: Option<String>,
    pub file_name: Option<String>,
    pub surface: Surface,
}

impl InputEvent {
    pub fn text(&self) -> &str {
        self.text.as_deref().map(str::trim).unwrap_or_default()
    }

    pub fn is_action(&self, action: Action) -> bool {
        self.action == Some(action)
    }

    /// String field from `actionData`, e.g. `{"value": "owned"}`.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.action_data
            .as_ref()
            .and_then(|data| data.get(key))
            .and_then(|value| value.as_str())
    }

    /// Option label picked via `select_option`, or the free text otherwise.
    pub fn choice(&self) -> &str {
        self.data_str("value")
            .or_else(|| self.data_str("option"))
            .unwrap_or_else(|| self.text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultRow {
    pub record_id: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub title: String,
    pub subtitle: String,
    pub log_count: usize,
    pub doc_count: usize,
    pub recent_entries: Vec<LogbookEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogbookRow {
    pub record_id: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub record_title: String,
    pub entry: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardView {
    Overview,
    Inventory,
    Team,
    Compliance,
    Pipeline,
}

/// Display cards consumed by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Card {
    #[serde(rename_all = "camelCase")]
    Terms { version: String },
    #[serde(rename_all = "camelCase")]
    Welcome {
        name: Option<String>,
        audience_type: AudienceType,
    },
    #[serde(rename_all = "camelCase")]
    MagicLink { email: String },
    #[serde(rename_all = "camelCase")]
    Ownership { options: Vec<String> },
    #[serde(rename_all = "camelCase")]
    Attestation {
        record_type: RecordKind,
        summary: BTreeMap<String, String>,
        statement: String,
    },
    #[serde(rename_all = "camelCase")]
    FileUpload {
        record_type: RecordKind,
        accept: Vec<String>,
        max_files: usize,
    },
    #[serde(rename_all = "camelCase")]
    Dtc {
        record_id: String,
        record_type: RecordKind,
        title: String,
        hash: String,
        created_at: String,
        logbook_count: usize,
    },
    #[serde(rename_all = "camelCase")]
    Vault { rows: Vec<VaultRow> },
    #[serde(rename_all = "camelCase")]
    Logbook { entries: Vec<LogbookRow> },
    #[serde(rename_all = "camelCase")]
    IdVerification { required: bool },
    #[serde(rename_all = "camelCase")]
    BusinessDashboard {
        view: DashboardView,
        company_name: Option<String>,
    },
}

impl Card {
    pub fn kind(&self) -> &'static str {
        match self {
            Card::Terms { .. } => "terms",
            Card::Welcome { .. } => "welcome",
            Card::MagicLink { .. } => "magicLink",
            Card::Ownership { .. } => "ownership",
            Card::Attestation { .. } => "attestation",
            Card::FileUpload { .. } => "fileUpload",
            Card::Dtc { .. } => "dtc",
            Card::Vault { .. } => "vault",
            Card::Logbook { .. } => "logbook",
            Card::IdVerification { .. } => "idVerification",
            Card::BusinessDashboard { .. } => "businessDashboard",
        }
    }
}

/// Command objects the caller executes after the transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum SideEffect {
    AcceptTerms {},
    #[serde(rename_all = "camelCase")]
    ClaimTenant {
        tenant_name: String,
        tenant_type: String,
        vertical: String,
        jurisdiction: String,
    },
    #[serde(rename_all = "camelCase")]
    CreateDtc {
        #[serde(rename = "type")]
        record_type: RecordKind,
        metadata: BTreeMap<String, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub state: SessionState,
    pub message: String,
    pub cards: Vec<Card>,
    pub prompt_chips: Vec<String>,
    pub follow_up_message: Option<String>,
    pub side_effects: Vec<SideEffect>,
    #[serde(rename = "useAI")]
    pub use_ai: bool,
}

impl Response {
    pub fn new(state: SessionState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: message.into(),
            cards: Vec::new(),
            prompt_chips: Vec::new(),
            follow_up_message: None,
            side_effects: Vec::new(),
            use_ai: false,
        }
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }

    pub fn with_chips<I, S>(mut self, chips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prompt_chips = chips.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_follow_up(mut self, message: impl Into<String>) -> Self {
        self.follow_up_message = Some(message.into());
        self
    }

    pub fn with_side_effect(mut self, effect: SideEffect) -> Self {
        self.side_effects.push(effect);
        self
    }

    pub fn ai_handoff(state: SessionState) -> Self {
        Self {
            use_ai: true,
            ..Self::new(state, "")
        }
    }

    pub fn has_card(&self, kind: &str) -> bool {
        self.cards.iter().any(|card| card.kind() == kind)
    }
}
