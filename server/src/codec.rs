use relay_system::serde_json;
use relay_system::{InboundEvent, OutboundEvent};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("binary frames are not supported ({0} bytes)")]
    Binary(usize),
    #[error("invalid event frame: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn decode_text(text: &str) -> Result<InboundEvent, CodecError> {
    Ok(serde_json::from_str(text)?)
}

pub fn decode_binary(bin: &[u8]) -> Result<InboundEvent, CodecError> {
    Err(CodecError::Binary(bin.len()))
}

pub fn encode(event: &OutboundEvent) -> Result<String, CodecError> {
    Ok(serde_json::to_string(event)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_system::MediaAction;

    #[test]
    fn it_decodes_action_frame() {
        let event = decode_text(r#"{"event":"action","data":{"action":"videooff"}}"#).expect("");
        assert_eq!(
            event,
            InboundEvent::Action {
                action: MediaAction::VideoOff
            }
        );
    }

    #[test]
    fn it_rejects_malformed_frames() {
        assert!(decode_text("not json").is_err());
        assert!(decode_text(r#"{"event":"fly"}"#).is_err());
        assert!(decode_text(r#"{"event":"join room","data":{"room_id":"r1"}}"#).is_err());
        assert!(matches!(decode_binary(&[1, 2, 3]), Err(CodecError::Binary(3))));
    }

    #[test]
    fn it_encodes_user_count() {
        let text = encode(&OutboundEvent::UserCount { count: 2 }).expect("");
        assert_eq!(text, r#"{"event":"user count","data":{"count":2}}"#);
    }
}
