use log::info;

use super::events::{Effect, Outbound};
use super::queue::WaitingQueue;
use super::table::PairingTable;

/// Drains the waiting queue into the pairing table until fewer than two clients remain.
///
/// Each new pair yields a `matched` notification to the older client first, then to the
/// newer one. This is the only place pairs are created.
pub fn try_match_all(queue: &mut WaitingQueue, table: &mut PairingTable) -> Vec<Effect> {
    let mut effects = Vec::new();
    while let Some((a, b)) = queue.dequeue_pair() {
        table.pair(a, b);
        info!("[Signaling] Matched: {} <--> {}", a, b);
        effects.push(Effect::to_client(a, Outbound::Matched { peer_id: b }));
        effects.push(Effect::to_client(b, Outbound::Matched { peer_id: a }));
    }
    effects
}
