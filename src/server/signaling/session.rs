/// WebSocket session handler for a single relay client.
///
/// This actor owns one browser connection. It assigns the client its id on start, forwards
/// parsed frames to the signaling server, reports the disconnect when it stops, and writes
/// server notifications back to the socket as JSON text frames.
use actix::prelude::*;
use actix_http::ws::Item;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, info, warn};
use std::time::{Duration, Instant};

use super::messages::{ClientMessage, ClientWsMessage, Connect, Deliver, Disconnect};
use super::server::SignalingServer;
use crate::config::session::{CLIENT_TIMEOUT_SECS, HEARTBEAT_INTERVAL_SECS, MAX_MESSAGE_BYTES};
use crate::error::ClientRequestError;
use crate::pairing::{ClientEvent, ClientId};
use crate::server::ws_error::ws_error_message;

/// Turns a complete text message into the event it carries, if any.
pub fn decode_text(text: &str) -> Result<Option<ClientEvent>, ClientRequestError> {
    Ok(ClientWsMessage::parse(text)?.into_event())
}

/// Error frame sent back for a rejected client message.
pub fn error_frame(id: &ClientId, err: &ClientRequestError) -> String {
    ws_error_message("INVALID_MESSAGE", &err.to_string(), Some(id.to_string().as_str()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FragmentKind {
    Text,
    Binary,
    /// Message already rejected; remaining fragments are dropped.
    Discard,
}

/// A client message being rebuilt from continuation frames.
#[derive(Debug, Default)]
pub struct Fragments {
    kind: Option<FragmentKind>,
    buf: Vec<u8>,
}

impl Fragments {
    /// Feeds one continuation frame. Returns the full text once the last fragment arrives.
    pub fn push(&mut self, item: Item) -> Result<Option<String>, ClientRequestError> {
        let (start, chunk, last) = match item {
            Item::FirstText(chunk) => (Some(FragmentKind::Text), chunk, false),
            Item::FirstBinary(chunk) => (Some(FragmentKind::Binary), chunk, false),
            Item::Continue(chunk) => (None, chunk, false),
            Item::Last(chunk) => (None, chunk, true),
        };

        match (start, self.kind) {
            (Some(kind), _) => {
                self.kind = Some(kind);
                self.buf.clear();
            }
            (None, None) => return Err(ClientRequestError::UnexpectedContinuation),
            (None, Some(FragmentKind::Discard)) => {
                if last {
                    self.kind = None;
                }
                return Ok(None);
            }
            (None, Some(_)) => (),
        }

        if self.buf.len() + chunk.len() > MAX_MESSAGE_BYTES {
            self.buf.clear();
            self.kind = if last { None } else { Some(FragmentKind::Discard) };
            return Err(ClientRequestError::TooLarge(MAX_MESSAGE_BYTES));
        }
        self.buf.extend_from_slice(&chunk);
        if !last {
            return Ok(None);
        }

        let buf = std::mem::take(&mut self.buf);
        match self.kind.take() {
            Some(FragmentKind::Text) => Ok(Some(String::from_utf8(buf)?)),
            _ => Err(ClientRequestError::UnsupportedType),
        }
    }
}

/// Represents a client's WebSocket session.
pub struct ClientSession {
    pub id: ClientId,
    /// Last time any frame was received from the client.
    pub last_seen: Instant,
    pub server_addr: Addr<SignalingServer>,
    fragments: Fragments,
}

impl ClientSession {
    pub fn new(server_addr: Addr<SignalingServer>) -> Self {
        Self {
            id: ClientId::new(),
            last_seen: Instant::now(),
            server_addr,
            fragments: Fragments::default(),
        }
    }

    /// Pings the client periodically and drops it once it has been silent too long.
    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS), |act, ctx| {
            if act.last_seen.elapsed() > Duration::from_secs(CLIENT_TIMEOUT_SECS) {
                info!("[Session] Client {} timed out", act.id);
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    fn forward(
        &self,
        decoded: Result<Option<ClientEvent>, ClientRequestError>,
        ctx: &mut ws::WebsocketContext<Self>,
    ) {
        match decoded {
            Ok(Some(event)) => self.server_addr.do_send(ClientMessage { id: self.id, event }),
            Ok(None) => (),
            Err(e) => self.reject(e, ctx),
        }
    }

    /// Answers a bad message with an error; nothing is forwarded.
    fn reject(&self, err: ClientRequestError, ctx: &mut ws::WebsocketContext<Self>) {
        debug!("[Session] Rejected message from {}: {}", self.id, err);
        ctx.text(error_frame(&self.id, &err));
    }
}

impl Actor for ClientSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the session starts. Registers the client in the signaling server.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.start_heartbeat(ctx);
        self.server_addr.do_send(Connect {
            id: self.id,
            addr: ctx.address().recipient(),
        });
    }

    /// Called when the session stops. Removes the client from the signaling server.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.server_addr.do_send(Disconnect { id: self.id });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ClientSession {
    /// Handles incoming WebSocket frames from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                warn!("[Session] Protocol error for {}: {}", self.id, e);
                ctx.stop();
                return;
            }
        };
        self.last_seen = Instant::now();
        match msg {
            ws::Message::Text(text) => self.forward(decode_text(&text), ctx),
            ws::Message::Binary(_) => self.reject(ClientRequestError::UnsupportedType, ctx),
            ws::Message::Continuation(item) => match self.fragments.push(item) {
                Ok(Some(text)) => self.forward(decode_text(&text), ctx),
                Ok(None) => (),
                Err(e) => self.reject(e, ctx),
            },
            ws::Message::Ping(msg) => ctx.pong(&msg),
            ws::Message::Pong(_) => (),
            ws::Message::Close(reason) => {
                ctx.close(reason);
                ctx.stop();
            }
            ws::Message::Nop => (),
        }
    }
}

impl Handler<Deliver> for ClientSession {
    type Result = ();

    /// Handles notifications sent from the server to this session.
    fn handle(&mut self, msg: Deliver, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg.0) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: notify client and close connection.
                warn!("[Session] Failed to serialize message for {}: {}", self.id, e);
                ctx.text(ws_error_message("INTERNAL_ERROR", "Internal server error", None));
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

/// WebSocket endpoint for relay clients.
///
/// No parameters: every connection is anonymous and gets a fresh id.
pub async fn ws_signaling(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(ClientSession::new(data.signaling_addr.clone()), &req, stream)
}
