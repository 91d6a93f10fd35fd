/// Session coordinator.
///
/// Owns the connection registry, waiting queue and pairing table, and applies one client
/// event at a time. Every transition returns the list of notifications it produced; the
/// caller is responsible for delivering them. Nothing here touches the network.
use log::{debug, info, warn};

use super::events::{ClientEvent, Effect, Outbound};
use super::matchmaker::try_match_all;
use super::queue::WaitingQueue;
use super::registry::ConnectionRegistry;
use super::table::PairingTable;
use super::types::{ClientId, ClientState};

#[derive(Debug)]
pub struct SessionCoordinator {
    registry: ConnectionRegistry,
    queue: WaitingQueue,
    table: PairingTable,
}

impl SessionCoordinator {
    pub fn new() -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            queue: WaitingQueue::new(),
            table: PairingTable::new(),
        }
    }

    /// Applies `event` reported for client `id` and returns the resulting notifications.
    pub fn handle(&mut self, id: ClientId, event: ClientEvent) -> Vec<Effect> {
        match event {
            ClientEvent::Connect => self.connect(id),
            ClientEvent::Offer { offer, to } => {
                self.relay(id, to, Outbound::Offer { offer, from: id })
            }
            ClientEvent::Answer { answer, to } => self.relay(id, to, Outbound::Answer { answer }),
            ClientEvent::IceCandidate { candidate, to } => {
                self.relay(id, to, Outbound::IceCandidate { candidate })
            }
            ClientEvent::Skip => self.skip(id),
            ClientEvent::Disconnect => self.disconnect(id),
        }
    }

    pub fn state_of(&self, id: &ClientId) -> ClientState {
        if !self.registry.contains(id) {
            return ClientState::Disconnected;
        }
        match self.partner_of(id) {
            Some(partner) => ClientState::Paired(partner),
            None => ClientState::Waiting,
        }
    }

    pub fn partner_of(&self, id: &ClientId) -> Option<ClientId> {
        self.table.partner_of(id)
    }

    pub fn user_count(&self) -> usize {
        self.registry.count()
    }

    pub fn waiting_len(&self) -> usize {
        self.queue.len()
    }

    pub fn pair_count(&self) -> usize {
        self.table.len()
    }

    #[cfg(test)]
    pub fn waiting(&self) -> impl Iterator<Item = &ClientId> {
        self.queue.iter()
    }

    pub fn connected(&self) -> impl Iterator<Item = &ClientId> {
        self.registry.iter()
    }

    fn user_count_effect(&self) -> Effect {
        Effect::broadcast(Outbound::UserCount(self.registry.count()))
    }

    fn connect(&mut self, id: ClientId) -> Vec<Effect> {
        if !self.registry.insert(id) {
            warn!("[Signaling] Duplicate connect for {} ignored", id);
            return Vec::new();
        }
        info!("[Signaling] User connected: {}", id);
        self.queue.enqueue(id);

        let mut effects = vec![self.user_count_effect()];
        effects.extend(try_match_all(&mut self.queue, &mut self.table));
        effects
    }

    /// Forwards a negotiation payload. Only the target's presence is checked.
    fn relay(&self, from: ClientId, to: ClientId, event: Outbound) -> Vec<Effect> {
        if to == from {
            debug!("[Signaling] Relay from {} to itself dropped", from);
            return Vec::new();
        }
        if !self.registry.contains(&to) {
            debug!("[Signaling] Relay from {} to unknown client {} dropped", from, to);
            return Vec::new();
        }
        debug!("[Signaling] Relay from {} to {}", from, to);
        vec![Effect::to_client(to, event)]
    }

    fn skip(&mut self, id: ClientId) -> Vec<Effect> {
        let Some(partner) = self.table.unpair(&id) else {
            debug!("[Signaling] Skip from unpaired client {} ignored", id);
            return Vec::new();
        };
        info!("[Signaling] Next: Unmatched {} & {}", id, partner);

        let mut effects = vec![Effect::to_client(partner, Outbound::PeerDisconnected)];
        self.queue.enqueue(id);
        self.queue.enqueue(partner);
        effects.extend(try_match_all(&mut self.queue, &mut self.table));
        effects
    }

    fn disconnect(&mut self, id: ClientId) -> Vec<Effect> {
        if !self.registry.remove(&id) {
            debug!("[Signaling] Disconnect for unknown client {} ignored", id);
            return Vec::new();
        }
        info!("[Signaling] User disconnected: {}", id);
        self.queue.remove(&id);

        let mut effects = vec![self.user_count_effect()];
        if let Some(partner) = self.table.unpair(&id) {
            effects.push(Effect::to_client(partner, Outbound::PeerDisconnected));
            self.queue.enqueue(partner);
            effects.extend(try_match_all(&mut self.queue, &mut self.table));
        }
        effects
    }
}
