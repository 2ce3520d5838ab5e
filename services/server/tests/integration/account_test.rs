use beacon_auth_types::token::validate_access_token;
use beacon_server::error::ServerError;
use beacon_server::password::verify_password;
use beacon_server::usecase::account::{
    CurrentUserUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};
use uuid::Uuid;

use crate::helpers::{MockUserRepo, TEST_JWT_SECRET, test_user};

// ── RegisterUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_new_user_and_issue_token() {
    let repo = MockUserRepo::empty();
    let users_handle = repo.users_handle();

    let usecase = RegisterUseCase {
        users: repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let out = usecase
        .execute(RegisterInput {
            email: "new@example.com".to_owned(),
            password: "hunter2hunter2".to_owned(),
        })
        .await
        .unwrap();

    let info = validate_access_token(&out.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, out.user.id);
    assert_eq!(info.email, "new@example.com");

    let users = users_handle.lock().unwrap();
    assert_eq!(users.len(), 1);
    // stored hash is a PHC string that verifies, never the raw password
    assert_ne!(users[0].password_hash, "hunter2hunter2");
    assert!(verify_password("hunter2hunter2", &users[0].password_hash));
}

#[tokio::test]
async fn should_reject_duplicate_email() {
    let usecase = RegisterUseCase {
        users: MockUserRepo::new(vec![test_user("taken@example.com", "password1")]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase
        .execute(RegisterInput {
            email: "taken@example.com".to_owned(),
            password: "password2password2".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ServerError::EmailTaken)));
}

#[tokio::test]
async fn should_reject_short_password() {
    let usecase = RegisterUseCase {
        users: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase
        .execute(RegisterInput {
            email: "new@example.com".to_owned(),
            password: "short".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ServerError::Validation(_))));
}

#[tokio::test]
async fn should_reject_missing_credentials() {
    let usecase = RegisterUseCase {
        users: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase
        .execute(RegisterInput {
            email: String::new(),
            password: "longenoughpassword".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ServerError::Validation(_))));
}

// ── LoginUseCase ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_with_valid_credentials() {
    let user = test_user("user@example.com", "correct-password");
    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let out = usecase
        .execute(LoginInput {
            email: "user@example.com".to_owned(),
            password: "correct-password".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(out.user.id, user.id);
    let info = validate_access_token(&out.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);
    assert_eq!(info.email, "user@example.com");
}

#[tokio::test]
async fn should_reject_unknown_email_on_login() {
    let usecase = LoginUseCase {
        users: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase
        .execute(LoginInput {
            email: "nobody@example.com".to_owned(),
            password: "irrelevant-password".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ServerError::UserNotFound)));
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let user = test_user("user@example.com", "correct-password");
    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase
        .execute(LoginInput {
            email: "user@example.com".to_owned(),
            password: "wrong-password".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ServerError::InvalidPassword)));
}

// ── CurrentUserUseCase ───────────────────────────────────────────────────

#[tokio::test]
async fn should_return_current_user() {
    let user = test_user("user@example.com", "correct-password");
    let usecase = CurrentUserUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let found = usecase.execute(user.id).await.unwrap();
    assert_eq!(found.email, "user@example.com");
}

#[tokio::test]
async fn should_reject_unknown_current_user() {
    let usecase = CurrentUserUseCase {
        users: MockUserRepo::empty(),
    };

    let result = usecase.execute(Uuid::new_v4()).await;
    assert!(matches!(result, Err(ServerError::UserNotFound)));
}
