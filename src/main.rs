//! Main entry point for the signaling relay.
//!
//! Initializes logging, reads the configuration, starts the signaling server actor and
//! launches the HTTP server with the WebSocket endpoint clients connect to.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;
use server::signaling::server::SignalingServer;

use config::server::ServerConfig;

pub mod config;
mod error;
mod pairing;
mod server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    // Start the SignalingServer actor (owns the waiting queue and pairing table).
    let signaling_addr = SignalingServer::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(signaling_addr));

    info!("Server running at: http://{}:{}", config.host, config.port);

    // Start the HTTP server with the WebSocket endpoint.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
