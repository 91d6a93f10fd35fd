/// Client session configuration constants.
///
/// Liveness of a WebSocket connection is checked at the transport level only; a silent
/// connection is closed and goes through the regular disconnect path.
pub const HEARTBEAT_INTERVAL_SECS: u64 = 5; // Interval between server pings (in seconds).

/// Time (in seconds) without any frame from the client before the connection is closed.
pub const CLIENT_TIMEOUT_SECS: u64 = 15;

/// Upper bound (in bytes) on a client message reassembled from fragmented frames.
pub const MAX_MESSAGE_BYTES: usize = 64 * 1024;
