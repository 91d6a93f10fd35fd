/// Signaling module: client sessions, the pairing server actor and their messages.

pub mod server;
pub mod session;
pub mod messages;
