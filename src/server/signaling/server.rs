/// Signaling server actor.
///
/// Single owner of the pairing state. Every connect, disconnect and client frame goes
/// through this actor's mailbox, so queue and table mutations never interleave.
/// Notifications returned by the coordinator are delivered with `do_send` and never awaited.

use actix::prelude::*;
use std::collections::HashMap;
use log::{debug, warn};

use super::messages::{ClientMessage, Connect, Deliver, Disconnect, GetStats, Stats};
use crate::pairing::{ClientEvent, ClientId, Effect, SessionCoordinator, Target};

/// Main signaling server actor.
pub struct SignalingServer {
    /// Pairing state machine.
    coordinator: SessionCoordinator,
    /// Outbound channel of every connected client.
    sessions: HashMap<ClientId, Recipient<Deliver>>,
}

impl SignalingServer {
    /// Create a new signaling server.
    pub fn new() -> Self {
        Self {
            coordinator: SessionCoordinator::new(),
            sessions: HashMap::new(),
        }
    }

    /// Deliver the effects of a transition to their recipients.
    fn dispatch(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect.to {
                Target::Client(id) => match self.sessions.get(&id) {
                    Some(addr) => addr.do_send(Deliver(effect.event)),
                    None => debug!("[Signaling] No session for {}, message dropped", id),
                },
                Target::Everyone => {
                    for addr in self.coordinator.connected().filter_map(|id| self.sessions.get(id)) {
                        addr.do_send(Deliver(effect.event.clone()));
                    }
                }
            }
        }
    }

    fn stats(&self) -> Stats {
        Stats {
            users: self.coordinator.user_count(),
            waiting: self.coordinator.waiting_len(),
            pairs: self.coordinator.pair_count(),
        }
    }
}

impl Actor for SignalingServer {
    type Context = Context<Self>;
}

impl Handler<Connect> for SignalingServer {
    type Result = ();

    /// Registers the session first so the new client also receives the count broadcast.
    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        if self.sessions.contains_key(&msg.id) {
            warn!("[Signaling] Session {} already registered, connect ignored", msg.id);
            return;
        }
        self.sessions.insert(msg.id, msg.addr);
        let effects = self.coordinator.handle(msg.id, ClientEvent::Connect);
        self.dispatch(effects);
    }
}

impl Handler<Disconnect> for SignalingServer {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        self.sessions.remove(&msg.id);
        let effects = self.coordinator.handle(msg.id, ClientEvent::Disconnect);
        self.dispatch(effects);
    }
}

impl Handler<ClientMessage> for SignalingServer {
    type Result = ();

    fn handle(&mut self, msg: ClientMessage, _ctx: &mut Self::Context) -> Self::Result {
        let effects = self.coordinator.handle(msg.id, msg.event);
        debug!("[Signaling] {} is now {:?}", msg.id, self.coordinator.state_of(&msg.id));
        self.dispatch(effects);
    }
}

impl Handler<GetStats> for SignalingServer {
    type Result = MessageResult<GetStats>;

    fn handle(&mut self, _msg: GetStats, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::Outbound;
    use serde_json::json;

    /// Stand-in for a WebSocket session that records what it receives.
    struct Collector {
        received: Vec<Outbound>,
    }

    impl Actor for Collector {
        type Context = Context<Self>;
    }

    impl Handler<Deliver> for Collector {
        type Result = ();

        fn handle(&mut self, msg: Deliver, _ctx: &mut Self::Context) {
            self.received.push(msg.0);
        }
    }

    #[derive(Message)]
    #[rtype(result = "Vec<Outbound>")]
    struct Drain;

    impl Handler<Drain> for Collector {
        type Result = MessageResult<Drain>;

        fn handle(&mut self, _msg: Drain, _ctx: &mut Self::Context) -> Self::Result {
            MessageResult(std::mem::take(&mut self.received))
        }
    }

    async fn connect(server: &Addr<SignalingServer>) -> (ClientId, Addr<Collector>) {
        let id = ClientId::new();
        let collector = Collector { received: Vec::new() }.start();
        server
            .send(Connect { id, addr: collector.clone().recipient() })
            .await
            .unwrap();
        (id, collector)
    }

    async fn drain(collector: &Addr<Collector>) -> Vec<Outbound> {
        collector.send(Drain).await.unwrap()
    }

    #[actix::test]
    async fn pairs_two_sessions_and_broadcasts_count() {
        let server = SignalingServer::new().start();
        let (a, a_inbox) = connect(&server).await;
        let (b, b_inbox) = connect(&server).await;

        assert_eq!(
            drain(&a_inbox).await,
            vec![
                Outbound::UserCount(1),
                Outbound::UserCount(2),
                Outbound::Matched { peer_id: b },
            ]
        );
        assert_eq!(
            drain(&b_inbox).await,
            vec![Outbound::UserCount(2), Outbound::Matched { peer_id: a }]
        );
        assert_eq!(
            server.send(GetStats).await.unwrap(),
            Stats { users: 2, waiting: 0, pairs: 1 }
        );
    }

    #[actix::test]
    async fn relays_offer_with_sender() {
        let server = SignalingServer::new().start();
        let (a, _a_inbox) = connect(&server).await;
        let (b, b_inbox) = connect(&server).await;
        drain(&b_inbox).await;

        let offer = json!({"type": "offer", "sdp": "v=0"});
        server
            .send(ClientMessage { id: a, event: ClientEvent::Offer { offer: offer.clone(), to: b } })
            .await
            .unwrap();

        assert_eq!(drain(&b_inbox).await, vec![Outbound::Offer { offer, from: a }]);
    }

    #[actix::test]
    async fn disconnect_notifies_partner_and_requeues() {
        let server = SignalingServer::new().start();
        let (a, _a_inbox) = connect(&server).await;
        let (_b, b_inbox) = connect(&server).await;
        drain(&b_inbox).await;

        server.send(Disconnect { id: a }).await.unwrap();

        assert_eq!(
            drain(&b_inbox).await,
            vec![Outbound::UserCount(1), Outbound::PeerDisconnected]
        );
        assert_eq!(
            server.send(GetStats).await.unwrap(),
            Stats { users: 1, waiting: 1, pairs: 0 }
        );
    }

    #[actix::test]
    async fn offer_to_self_is_not_echoed() {
        let server = SignalingServer::new().start();
        let (a, a_inbox) = connect(&server).await;
        drain(&a_inbox).await;

        server
            .send(ClientMessage { id: a, event: ClientEvent::Offer { offer: json!("sdp"), to: a } })
            .await
            .unwrap();

        assert!(drain(&a_inbox).await.is_empty());
    }

    #[actix::test]
    async fn relay_to_departed_client_is_dropped() {
        let server = SignalingServer::new().start();
        let (a, a_inbox) = connect(&server).await;
        let (b, b_inbox) = connect(&server).await;
        server.send(Disconnect { id: b }).await.unwrap();
        drain(&a_inbox).await;

        server
            .send(ClientMessage { id: a, event: ClientEvent::Answer { answer: json!("sdp"), to: b } })
            .await
            .unwrap();

        assert!(drain(&a_inbox).await.is_empty());
        assert_eq!(
            drain(&b_inbox).await,
            vec![Outbound::UserCount(2), Outbound::Matched { peer_id: a }]
        );
    }
}
