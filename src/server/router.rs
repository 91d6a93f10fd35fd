//! HTTP and WebSocket routing configuration.
//!
//! `/ws` upgrades to a relay session; `/health` reports live counters.

use actix_web::{web, HttpResponse, error};
use crate::server::signaling::messages::GetStats;
use crate::server::signaling::session::ws_signaling;
use crate::server::state::AppState;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/ws")
            .route(web::get().to(ws_signaling))
    )
    .service(
        web::resource("/health")
            .route(web::get().to(health))
    );
}

/// Returns the number of connected, waiting and paired clients.
async fn health(data: web::Data<AppState>) -> Result<HttpResponse, actix_web::Error> {
    let stats = data.signaling_addr
        .send(GetStats)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix::Actor;
    use actix_web::{test, App};
    use crate::server::signaling::messages::Stats;
    use crate::server::signaling::server::SignalingServer;

    #[actix_web::test]
    async fn health_reports_empty_relay() {
        let state = web::Data::new(AppState::new(SignalingServer::new().start()));
        let app = test::init_service(App::new().app_data(state).configure(config)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let stats: Stats = test::call_and_read_body_json(&app, req).await;

        assert_eq!(stats, Stats { users: 0, waiting: 0, pairs: 0 });
    }

    #[actix_web::test]
    async fn ws_route_requires_upgrade() {
        let state = web::Data::new(AppState::new(SignalingServer::new().start()));
        let app = test::init_service(App::new().app_data(state).configure(config)).await;

        let req = test::TestRequest::get().uri("/ws").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_client_error());
    }
}
