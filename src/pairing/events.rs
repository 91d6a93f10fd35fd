//! Events flowing in and out of the session coordinator.
//!
//! Negotiation payloads are carried as raw JSON values and forwarded untouched.

use serde::{Serialize, Deserialize};
use serde_json::Value;

use super::types::ClientId;

/// Something that happened to a single client, as reported by the transport.
#[derive(Clone, Debug, PartialEq)]
pub enum ClientEvent {
    Connect,
    Offer { offer: Value, to: ClientId },
    Answer { answer: Value, to: ClientId },
    IceCandidate { candidate: Value, to: ClientId },
    Skip,
    Disconnect,
}

/// Message emitted towards one or all clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data")]
pub enum Outbound {
    #[serde(rename = "matched")]
    Matched {
        #[serde(rename = "peerId")]
        peer_id: ClientId,
    },
    #[serde(rename = "offer")]
    Offer { offer: Value, from: ClientId },
    #[serde(rename = "answer")]
    Answer { answer: Value },
    #[serde(rename = "ice-candidate")]
    IceCandidate { candidate: Value },
    #[serde(rename = "peer-disconnected")]
    PeerDisconnected,
    #[serde(rename = "userCount")]
    UserCount(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Client(ClientId),
    /// Every currently connected client.
    Everyone,
}

/// A single side effect produced by a transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Effect {
    pub to: Target,
    pub event: Outbound,
}

impl Effect {
    pub fn to_client(id: ClientId, event: Outbound) -> Self {
        Self { to: Target::Client(id), event }
    }

    pub fn broadcast(event: Outbound) -> Self {
        Self { to: Target::Everyone, event }
    }
}
