#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{OutboxEvent, User};
use crate::error::ServerError;

/// Repository for account records.
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), ServerError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServerError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ServerError>;

    /// Find the user holding an unexpired reset digest.
    async fn find_by_reset_token_hash(&self, token_hash: &str)
    -> Result<Option<User>, ServerError>;

    /// Store a reset digest + expiry and the notification outbox event
    /// atomically (same transaction).
    async fn save_reset_token_with_outbox(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
        event: &OutboxEvent,
    ) -> Result<(), ServerError>;

    /// Replace the password hash and clear any pending reset state.
    async fn update_password(&self, user_id: Uuid, password_hash: &str)
    -> Result<(), ServerError>;
}
