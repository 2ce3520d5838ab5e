use chrono::{Duration, Utc};
use rand::RngExt;
use serde_json::json;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use beacon_auth_types::token::issue_access_token;

use crate::domain::repository::UserRepository;
use crate::domain::types::{OutboxEvent, RESET_TOKEN_LEN, RESET_TOKEN_TTL_SECS, User};
use crate::error::ServerError;
use crate::password::hash_password;
use crate::usecase::account::enforce_password_policy;

/// Charset for reset tokens (lowercase hex, 32 random bytes' worth).
const CHARSET: &[u8] = b"abcdef0123456789";

fn generate_reset_token() -> String {
    let mut rng = rand::rng();
    (0..RESET_TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// SHA-256 digest (hex) of a raw reset token. Only the digest is ever
/// persisted; the raw token travels in the emailed link.
pub fn digest_reset_token(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

// ── Forgot password ──────────────────────────────────────────────────────

pub struct ForgotPasswordInput {
    pub email: String,
}

pub struct ForgotPasswordUseCase<U: UserRepository> {
    pub users: U,
    /// Base URL the reset link points at.
    pub frontend_url: String,
}

impl<U: UserRepository> ForgotPasswordUseCase<U> {
    pub async fn execute(&self, input: ForgotPasswordInput) -> Result<(), ServerError> {
        if input.email.is_empty() {
            return Err(ServerError::Validation("please provide email".to_owned()));
        }

        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(ServerError::UserNotFound)?;

        let raw_token = generate_reset_token();
        let token_hash = digest_reset_token(&raw_token);
        let expires_at = Utc::now() + Duration::seconds(RESET_TOKEN_TTL_SECS);
        let reset_url = format!("{}/reset?token={}", self.frontend_url, raw_token);

        // Digest + notification are written in one transaction; a relay
        // owns the actual email transport and its retries.
        let event = OutboxEvent {
            id: Uuid::new_v4(),
            kind: "password_reset_requested".to_owned(),
            payload: json!({ "email": user.email, "reset_url": reset_url }),
            idempotency_key: format!("password_reset_requested:{token_hash}"),
        };
        self.users
            .save_reset_token_with_outbox(user.id, &token_hash, expires_at, &event)
            .await?;

        Ok(())
    }
}

// ── Reset password ───────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub reset_token: String,
    pub password: String,
}

#[derive(Debug)]
pub struct ResetPasswordOutput {
    pub user: User,
    pub token: String,
}

pub struct ResetPasswordUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> ResetPasswordUseCase<U> {
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<ResetPasswordOutput, ServerError> {
        if input.reset_token.is_empty() || input.password.is_empty() {
            return Err(ServerError::Validation(
                "please provide reset token and password".to_owned(),
            ));
        }

        let token_hash = digest_reset_token(&input.reset_token);
        let user = self
            .users
            .find_by_reset_token_hash(&token_hash)
            .await?
            .ok_or(ServerError::InvalidResetToken)?;

        enforce_password_policy(&input.password)?;

        let password_hash = hash_password(&input.password)?;
        self.users.update_password(user.id, &password_hash).await?;

        let (token, _exp) = issue_access_token(user.id, &user.email, &self.jwt_secret)
            .map_err(|e| ServerError::Internal(e.into()))?;

        Ok(ResetPasswordOutput { user, token })
    }
}
