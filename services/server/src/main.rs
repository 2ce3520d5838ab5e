use std::sync::Arc;
use std::time::Duration;

use sea_orm::Database;
use tracing::info;

use beacon_server::config::ServerConfig;
use beacon_server::qr::{CodeBroadcaster, CodeGenerator};
use beacon_server::router::build_router;
use beacon_server::state::AppState;
use beacon_server::telemetry::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ServerConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    // The rotation core: constructed here, started once, stopped on the
    // way out. Everything reaches it through AppState.
    let broadcaster = Arc::new(CodeBroadcaster::new());
    let generator = Arc::new(CodeGenerator::new(
        Duration::from_secs(config.rotation_period_secs),
        Arc::clone(&broadcaster),
    ));
    generator.start();

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        frontend_url: config.frontend_url,
        generator: Arc::clone(&generator),
        broadcaster,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("beacon server listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    generator.stop();
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
}
