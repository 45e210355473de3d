use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type ConnectionId = uuid::Uuid;
pub type RoomId = String;

/// Username used for presence notices generated by the server itself.
pub const SYSTEM_USERNAME: &str = "System";

pub fn new_connection_id() -> ConnectionId {
    uuid::Uuid::new_v4()
}

/// One whiteboard stroke (`new_x`, `new_y`, `prev_x`, `prev_y`, `color`,
/// `size`), relayed exactly as the sender encoded it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawStroke(pub Value);
