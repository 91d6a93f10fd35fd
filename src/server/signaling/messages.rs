use actix::prelude::*;
use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::error::ClientRequestError;
use crate::pairing::{ClientEvent, ClientId, Outbound};

// Frames sent by the client
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    #[serde(rename = "offer")]
    Offer { offer: Value, to: ClientId },
    #[serde(rename = "answer")]
    Answer { answer: Value, to: ClientId },
    #[serde(rename = "ice-candidate")]
    IceCandidate { candidate: Value, to: ClientId },
    #[serde(rename = "skip", alias = "next")]
    Skip,
    #[serde(rename = "ping")]
    Ping,
}

impl ClientWsMessage {
    pub fn parse(text: &str) -> Result<Self, ClientRequestError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Event to hand to the coordinator, if the frame carries one.
    pub fn into_event(self) -> Option<ClientEvent> {
        match self {
            Self::Offer { offer, to } => Some(ClientEvent::Offer { offer, to }),
            Self::Answer { answer, to } => Some(ClientEvent::Answer { answer, to }),
            Self::IceCandidate { candidate, to } => Some(ClientEvent::IceCandidate { candidate, to }),
            Self::Skip => Some(ClientEvent::Skip),
            Self::Ping => None,
        }
    }
}

// Notification pushed to a client session
#[derive(Message, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
pub struct Deliver(pub Outbound);

/// Message: a WebSocket connection was opened.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub id: ClientId,
    pub addr: Recipient<Deliver>,
}

/// Message: a WebSocket connection was closed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub id: ClientId,
}

/// Message: a parsed frame from a connected client.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ClientMessage {
    pub id: ClientId,
    pub event: ClientEvent,
}

/// Snapshot of the relay's counters.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stats {
    pub users: usize,
    pub waiting: usize,
    pub pairs: usize,
}

#[derive(Message)]
#[rtype(result = "Stats")]
pub struct GetStats;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_relay_frames() {
        let to = ClientId::new();
        let text = json!({"action": "offer", "data": {"offer": {"sdp": "v=0"}, "to": to}}).to_string();

        let msg = ClientWsMessage::parse(&text).unwrap();

        assert_eq!(
            msg.into_event(),
            Some(ClientEvent::Offer { offer: json!({"sdp": "v=0"}), to })
        );

        let text = json!({"action": "ice-candidate", "data": {"candidate": null, "to": to}}).to_string();
        assert_eq!(
            ClientWsMessage::parse(&text).unwrap(),
            ClientWsMessage::IceCandidate { candidate: Value::Null, to }
        );
    }

    #[test]
    fn next_is_an_alias_for_skip() {
        assert_eq!(ClientWsMessage::parse(r#"{"action":"skip"}"#).unwrap(), ClientWsMessage::Skip);
        assert_eq!(ClientWsMessage::parse(r#"{"action":"next"}"#).unwrap(), ClientWsMessage::Skip);
    }

    #[test]
    fn ping_carries_no_event() {
        let msg = ClientWsMessage::parse(r#"{"action":"ping"}"#).unwrap();
        assert_eq!(msg.into_event(), None);
    }

    #[test]
    fn rejects_malformed_frames() {
        assert!(matches!(
            ClientWsMessage::parse("not json"),
            Err(ClientRequestError::Json(_))
        ));
        assert!(ClientWsMessage::parse(r#"{"action":"offer","data":{"offer":1,"to":"nope"}}"#).is_err());
        assert!(ClientWsMessage::parse(r#"{"action":"dance"}"#).is_err());
    }
}
