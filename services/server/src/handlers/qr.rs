use axum::Json;
use axum::extract::State;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::gate::AuthedUser;
use crate::state::AppState;

/// Success envelope shared by the pull and refresh paths.
#[derive(Serialize)]
pub struct CodeResponse {
    pub status: &'static str,
    pub data: CodeData,
}

#[derive(Serialize)]
pub struct CodeData {
    pub uuid: Uuid,
}

fn success(uuid: Uuid) -> Json<CodeResponse> {
    Json(CodeResponse {
        status: "success",
        data: CodeData { uuid },
    })
}

// ── GET /qr/current ──────────────────────────────────────────────────────

pub async fn get_current(State(state): State<AppState>, caller: AuthedUser) -> Json<CodeResponse> {
    debug!(user = %caller.user_id, "current code read");
    success(state.generator.current())
}

// ── POST /qr/refresh ─────────────────────────────────────────────────────

pub async fn refresh(State(state): State<AppState>, caller: AuthedUser) -> Json<CodeResponse> {
    let code = state.generator.force_rotate();
    info!(user = %caller.user_id, "forced code rotation");
    success(code)
}
