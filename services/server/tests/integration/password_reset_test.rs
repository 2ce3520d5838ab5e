use chrono::{Duration, Utc};

use beacon_auth_types::token::validate_access_token;
use beacon_server::error::ServerError;
use beacon_server::password::verify_password;
use beacon_server::usecase::password_reset::{
    ForgotPasswordInput, ForgotPasswordUseCase, ResetPasswordInput, ResetPasswordUseCase,
    digest_reset_token,
};

use crate::helpers::{MockUserRepo, TEST_JWT_SECRET, test_user};

const FRONTEND_URL: &str = "http://localhost:8081";

/// Pull the raw token out of the reset URL written to the outbox payload.
fn token_from_reset_url(reset_url: &str) -> String {
    reset_url
        .split("token=")
        .nth(1)
        .expect("reset url carries a token")
        .to_owned()
}

// ── ForgotPasswordUseCase ────────────────────────────────────────────────

#[tokio::test]
async fn should_store_reset_digest_and_outbox_event() {
    let user = test_user("user@example.com", "old-password");
    let repo = MockUserRepo::new(vec![user.clone()]);
    let users_handle = repo.users_handle();
    let outbox_handle = repo.outbox_handle();

    let usecase = ForgotPasswordUseCase {
        users: repo,
        frontend_url: FRONTEND_URL.to_owned(),
    };
    usecase
        .execute(ForgotPasswordInput {
            email: "user@example.com".to_owned(),
        })
        .await
        .unwrap();

    let outbox = outbox_handle.lock().unwrap();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].kind, "password_reset_requested");
    assert_eq!(outbox[0].payload["email"], "user@example.com");

    let reset_url = outbox[0].payload["reset_url"].as_str().unwrap();
    assert!(reset_url.starts_with(FRONTEND_URL));
    let raw_token = token_from_reset_url(reset_url);

    // only the digest is stored, and it matches the emailed token
    let users = users_handle.lock().unwrap();
    let stored = users[0].reset_token_hash.as_deref().unwrap();
    assert_ne!(stored, raw_token);
    assert_eq!(stored, digest_reset_token(&raw_token));
    assert!(users[0].reset_token_valid());
}

#[tokio::test]
async fn should_reject_unknown_email_on_forgot() {
    let usecase = ForgotPasswordUseCase {
        users: MockUserRepo::empty(),
        frontend_url: FRONTEND_URL.to_owned(),
    };

    let result = usecase
        .execute(ForgotPasswordInput {
            email: "nobody@example.com".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ServerError::UserNotFound)));
}

// ── ResetPasswordUseCase ─────────────────────────────────────────────────

fn user_with_pending_reset(raw_token: &str) -> beacon_server::domain::types::User {
    let mut user = test_user("user@example.com", "old-password");
    user.reset_token_hash = Some(digest_reset_token(raw_token));
    user.reset_token_expires_at = Some(Utc::now() + Duration::seconds(600));
    user
}

#[tokio::test]
async fn should_reset_password_with_valid_token() {
    let raw_token = "a1b2c3d4e5f6a7b8";
    let user = user_with_pending_reset(raw_token);
    let repo = MockUserRepo::new(vec![user.clone()]);
    let users_handle = repo.users_handle();

    let usecase = ResetPasswordUseCase {
        users: repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let out = usecase
        .execute(ResetPasswordInput {
            reset_token: raw_token.to_owned(),
            password: "brand-new-password".to_owned(),
        })
        .await
        .unwrap();

    let info = validate_access_token(&out.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);

    let users = users_handle.lock().unwrap();
    assert!(verify_password("brand-new-password", &users[0].password_hash));
    assert!(!verify_password("old-password", &users[0].password_hash));
    // the digest is single-use
    assert!(users[0].reset_token_hash.is_none());
    assert!(users[0].reset_token_expires_at.is_none());
}

#[tokio::test]
async fn should_reject_expired_reset_token() {
    let raw_token = "a1b2c3d4e5f6a7b8";
    let mut user = user_with_pending_reset(raw_token);
    user.reset_token_expires_at = Some(Utc::now() - Duration::seconds(1));

    let usecase = ResetPasswordUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = usecase
        .execute(ResetPasswordInput {
            reset_token: raw_token.to_owned(),
            password: "brand-new-password".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ServerError::InvalidResetToken)));
}

#[tokio::test]
async fn should_reject_wrong_reset_token() {
    let user = user_with_pending_reset("the-real-token");

    let usecase = ResetPasswordUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = usecase
        .execute(ResetPasswordInput {
            reset_token: "some-other-token".to_owned(),
            password: "brand-new-password".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ServerError::InvalidResetToken)));
}

#[tokio::test]
async fn should_reject_short_password_on_reset() {
    let raw_token = "a1b2c3d4e5f6a7b8";
    let user = user_with_pending_reset(raw_token);

    let usecase = ResetPasswordUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = usecase
        .execute(ResetPasswordInput {
            reset_token: raw_token.to_owned(),
            password: "short".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ServerError::Validation(_))));
}

#[tokio::test]
async fn should_not_accept_token_twice() {
    let raw_token = "a1b2c3d4e5f6a7b8";
    let user = user_with_pending_reset(raw_token);

    let usecase = ResetPasswordUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    usecase
        .execute(ResetPasswordInput {
            reset_token: raw_token.to_owned(),
            password: "brand-new-password".to_owned(),
        })
        .await
        .unwrap();

    let result = usecase
        .execute(ResetPasswordInput {
            reset_token: raw_token.to_owned(),
            password: "another-password".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ServerError::InvalidResetToken)));
}
