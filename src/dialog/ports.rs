use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::dialog::{
    error::ServiceError,
    noop::SystemClock,
    types::AudienceType,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedVehicle {
    pub year: String,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub trim: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VinDecoding {
    pub valid: bool,
    #[serde(default)]
    pub vehicle: Option<DecodedVehicle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub audience_type: AudienceType,
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupOutcome {
    pub ok: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
}

#[async_trait]
pub trait VinDecoderPort: Send + Sync {
    async fn decode_vin(&self, vin: &str) -> Result<VinDecoding, ServiceError>;
}

#[async_trait]
pub trait SignupPort: Send + Sync {
    async fn signup(&self, req: SignupRequest) -> Result<SignupOutcome, ServiceError>;
}

pub trait ClockPort: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Collaborators injected per call. Absent services degrade to manual entry
/// (VIN) or demo-mode accounts (signup).
#[derive(Clone)]
pub struct Services {
    pub vin_decoder: Option<Arc<dyn VinDecoderPort>>,
    pub signup: Option<Arc<dyn SignupPort>>,
    pub clock: Arc<dyn ClockPort>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            vin_decoder: None,
            signup: None,
            clock: Arc::new(SystemClock),
        }
    }
}

impl Services {
    pub fn with_vin_decoder(mut self, decoder: Arc<dyn VinDecoderPort>) -> Self {
        self.vin_decoder = Some(decoder);
        self
    }

    pub fn with_signup(mut self, signup: Arc<dyn SignupPort>) -> Self {
        self.signup = Some(signup);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn ClockPort>) -> Self {
        self.clock = clock;
        self
    }
}
