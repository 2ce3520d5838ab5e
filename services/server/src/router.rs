use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    auth::{current_user, forgot_password, login, register, reset_password},
    health::{healthz, readyz},
    qr::{get_current, refresh},
};
use crate::state::AppState;
use crate::telemetry::request_id_layer;
use crate::ws::qr_live;

pub fn build_router(state: AppState) -> Router {
    // Permissive CORS: clients are mobile apps and the code display,
    // served from anywhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(current_user))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password/{reset_token}", post(reset_password))
        // Rotating code
        .route("/qr/current", get(get_current))
        .route("/qr/refresh", post(refresh))
        .route("/qr/live", get(qr_live))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
