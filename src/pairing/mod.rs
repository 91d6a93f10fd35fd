//! Pairing core: connection registry, waiting queue, pairing table, matchmaker and the
//! session coordinator that drives them.
//!
//! Independent of the actor system and the network; the server layer feeds it events
//! and delivers the effects it returns.

pub mod types;
pub mod events;
pub mod registry;
pub mod queue;
pub mod table;
pub mod matchmaker;
pub mod coordinator;

pub use coordinator::SessionCoordinator;
pub use events::{ClientEvent, Effect, Outbound, Target};
pub use types::{ClientId, ClientState};
