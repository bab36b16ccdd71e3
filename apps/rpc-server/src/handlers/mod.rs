//! HTTP handlers and route configuration.

mod health;
mod rpc;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/rpc", web::post().to(rpc::rpc_call))
        .route("/api/health", web::get().to(health::health_check));
}
