//! Line protocol of the stdin driver: one JSON object per line, either
//! `{"type":"exit"}` or `{"type":"message","input":{...MessageInput}}`.

use serde::{Deserialize, de::Error as _};

use crate::dialog::types::MessageInput;

#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    Exit,
    Message(Box<MessageInput>),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireMessage {
    #[serde(rename = "type")]
    kind: WireMessageType,
    #[serde(default)]
    input: Option<MessageInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum WireMessageType {
    Exit,
    Message,
}

pub fn parse_client_message(line: &str) -> Result<ClientMessage, serde_json::Error> {
    let wire: WireMessage = serde_json::from_str(line)?;
    let message = match (wire.kind, wire.input) {
        (WireMessageType::Exit, None) => ClientMessage::Exit,
        (WireMessageType::Exit, Some(_)) => {
            return Err(serde_json::Error::custom("exit message takes no input"));
        }
        (WireMessageType::Message, Some(input)) => ClientMessage::Message(Box::new(input)),
        (WireMessageType::Message, None) => {
            return Err(serde_json::Error::custom("message requires an input object"));
        }
    };
    Ok(message)
}
