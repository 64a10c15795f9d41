pub mod intent;
pub mod lookup;
pub mod text;
pub mod validators;

pub use intent::{DemoReply, DemoTopic, Vertical, demo_reply, detect_vertical, vertical_pitch};
pub use lookup::{
    CredentialTrack, TrackDefinition, clean_credential, clean_degree, clean_school, detect_track,
    match_option,
};
pub use text::title_case;
pub use validators::{
    Confirmation, EmailError, HoursError, MileageError, VinError, YearError,
    classify_confirmation, clean_vin, clean_year, extract_email, is_affirmative, is_done,
    is_negative, is_vin_skip, parse_flight_hours, parse_mileage, parse_name, parse_ratings,
    validate_vin,
};
