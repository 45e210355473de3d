use crate::{ConnectionId, DrawStroke, RoomId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Microphone/camera toggles a member announces to its room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaAction {
    #[serde(rename = "mute")]
    Mute,
    #[serde(rename = "unmute")]
    Unmute,
    #[serde(rename = "videoon")]
    VideoOn,
    #[serde(rename = "videooff")]
    VideoOff,
}

/// Events sent by a client.
///
/// Disconnection is not part of this set; the transport reports it
/// separately through `Router::disconnect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum InboundEvent {
    #[serde(rename = "join room")]
    JoinRoom { room_id: RoomId, username: String },
    #[serde(rename = "action")]
    Action { action: MediaAction },
    #[serde(rename = "video-offer")]
    VideoOffer {
        offer: Value,
        target_id: ConnectionId,
    },
    #[serde(rename = "video-answer")]
    VideoAnswer {
        answer: Value,
        target_id: ConnectionId,
    },
    #[serde(rename = "new icecandidate")]
    NewIceCandidate {
        candidate: Value,
        target_id: ConnectionId,
    },
    #[serde(rename = "message")]
    Message {
        text: String,
        username: String,
        room_id: RoomId,
    },
    #[serde(rename = "getCanvas")]
    GetCanvas,
    #[serde(rename = "draw")]
    Draw(DrawStroke),
    #[serde(rename = "clearBoard")]
    ClearBoard,
    #[serde(rename = "store canvas")]
    StoreCanvas { payload: String },
}

impl InboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::JoinRoom { .. } => "join room",
            Self::Action { .. } => "action",
            Self::VideoOffer { .. } => "video-offer",
            Self::VideoAnswer { .. } => "video-answer",
            Self::NewIceCandidate { .. } => "new icecandidate",
            Self::Message { .. } => "message",
            Self::GetCanvas => "getCanvas",
            Self::Draw(_) => "draw",
            Self::ClearBoard => "clearBoard",
            Self::StoreCanvas { .. } => "store canvas",
        }
    }
}

/// Reply to `join room`. Every field is `None` when the room was just created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub members: Option<Vec<ConnectionId>>,
    pub names: Option<HashMap<ConnectionId, String>>,
    pub mics: Option<HashMap<ConnectionId, bool>>,
    pub cameras: Option<HashMap<ConnectionId, bool>>,
}

impl RoomSnapshot {
    pub fn empty() -> Self {
        Self {
            members: None,
            names: None,
            mics: None,
            cameras: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_none()
    }
}

/// Events sent to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum OutboundEvent {
    #[serde(rename = "connected")]
    Connected { connection_id: ConnectionId },
    #[serde(rename = "join room")]
    JoinRoom(RoomSnapshot),
    #[serde(rename = "message")]
    Message {
        text: String,
        username: String,
        timestamp: String,
    },
    #[serde(rename = "user count")]
    UserCount { count: usize },
    #[serde(rename = "action")]
    Action {
        action: MediaAction,
        from: ConnectionId,
    },
    #[serde(rename = "video-offer")]
    VideoOffer {
        offer: Value,
        from: ConnectionId,
        username: String,
        mic_on: bool,
        camera_on: bool,
    },
    #[serde(rename = "video-answer")]
    VideoAnswer { answer: Value, from: ConnectionId },
    #[serde(rename = "new icecandidate")]
    NewIceCandidate {
        candidate: Value,
        from: ConnectionId,
    },
    #[serde(rename = "getCanvas")]
    GetCanvas { payload: String },
    #[serde(rename = "draw")]
    Draw(DrawStroke),
    #[serde(rename = "clearBoard")]
    ClearBoard,
    #[serde(rename = "remove peer")]
    RemovePeer { peer: ConnectionId },
}

/// A single outbound event addressed to one connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub to: ConnectionId,
    pub event: OutboundEvent,
}
