use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::infra::db::DbUserRepository;
use crate::qr::{CodeBroadcaster, CodeGenerator};

/// Shared application state passed to every handler via axum `State`.
///
/// The generator and broadcaster are the process-wide rotation core:
/// constructed once in `main`, started there, and only ever reached
/// through this state (no module-level globals).
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub frontend_url: String,
    pub generator: Arc<CodeGenerator>,
    pub broadcaster: Arc<CodeBroadcaster>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }
}
