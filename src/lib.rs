pub mod cli;
pub mod config;
pub mod dialog;
pub mod logging;
pub mod normalize;
pub mod protocol;
pub mod records;

pub use dialog::{DialogEngine, MessageInput, Response, Services, SessionState, process_message};
