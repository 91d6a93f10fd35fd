// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the transport side of the relay, including:
//! - Application state management
//! - HTTP/WebSocket routing
//! - Signaling (client sessions, the pairing server actor, wire messages)
//! - WebSocket error frames

pub mod state;
pub mod router;
pub mod signaling;
pub mod ws_error;
