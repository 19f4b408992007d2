use dash_proto::wire::WsMessage;
use serde_json::Value;

/// Text shown for an incoming frame: JSON re-rendered compactly, anything
/// else verbatim.
pub fn render_incoming(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(v) => v.to_string(),
        Err(_) => text.to_string(),
    }
}

/// Typed view of an incoming frame, if it is one of the known messages.
pub fn parse_incoming(text: &str) -> Option<WsMessage> {
    serde_json::from_str(text).ok()
}
