//! # Scribe RPC Server
//!
//! The main entry point for the Actix-web server exposing the
//! MetaWeblog/WordPress-compatible RPC surface.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod codec;
mod config;
mod error;
mod handlers;
mod methods;
mod rpc;
mod state;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Scribe RPC Server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = AppState::new(config.database.as_ref(), config.base_url.clone()).await;

    // Stand-in subscriber until a real cache layer attaches.
    let logger_attached = state
        .signals
        .subscribe(Box::new(|event| {
            Box::pin(async move {
                tracing::info!(event = %event, "cache invalidation");
            })
        }))
        .await;
    if let Err(e) = logger_attached {
        tracing::warn!(error = %e, "cache event logger not attached");
    }

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rpc_server=debug,scribe_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
