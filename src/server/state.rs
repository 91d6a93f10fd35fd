// src/server/state.rs

//! Application state for the relay server.
//!
//! Holds the address of the signaling server actor so HTTP/WebSocket handlers can reach it.

use actix::Addr;
use crate::server::signaling::server::SignalingServer;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the signaling server actor (owns the waiting queue and pairing table).
    pub signaling_addr: Addr<SignalingServer>,
}

impl AppState {
    pub fn new(signaling_addr: Addr<SignalingServer>) -> Self {
        AppState { signaling_addr }
    }
}
