pub mod engine;
pub mod error;
pub mod flows;
pub mod invariants;
pub mod noop;
pub mod ports;
pub mod types;

pub use engine::{DialogEngine, process_message};
pub use error::{DialogError, DialogErrorKind, ServiceError, ServiceErrorKind};
pub use noop::{FixedClock, SystemClock};
pub use ports::{
    ClockPort, DecodedVehicle, Services, SignupOutcome, SignupPort, SignupRequest, VinDecoderPort,
    VinDecoding,
};
pub use types::{
    Action, AudienceType, Card, DashboardView, InputEvent, LogbookRow, MessageInput, Response,
    SessionState, SideEffect, Step, Surface, VaultRow,
};
