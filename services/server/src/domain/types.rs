use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account record as the domain sees it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    /// SHA-256 digest (hex) of the last issued reset token, if a reset is pending.
    pub reset_token_hash: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// True while the stored reset digest may still be redeemed.
    pub fn reset_token_valid(&self) -> bool {
        self.reset_token_hash.is_some()
            && matches!(self.reset_token_expires_at, Some(exp) if exp > Utc::now())
    }
}

/// Projection of [`User`] safe to serialize in responses — never carries
/// the password hash or reset-token state.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// Outbox event for async delivery (e.g. password-reset email).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
}

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Reset token length in hex characters (32 random bytes).
pub const RESET_TOKEN_LEN: usize = 64;

/// Reset token time-to-live in seconds.
pub const RESET_TOKEN_TTL_SECS: i64 = 600;
