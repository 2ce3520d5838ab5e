use chrono::Utc;
use uuid::Uuid;

use beacon_auth_types::token::issue_access_token;

use crate::domain::repository::UserRepository;
use crate::domain::types::{MIN_PASSWORD_LEN, User};
use crate::error::ServerError;
use crate::password::{hash_password, verify_password};

fn require_credentials(email: &str, password: &str) -> Result<(), ServerError> {
    if email.is_empty() || password.is_empty() {
        return Err(ServerError::Validation(
            "please provide email and password".to_owned(),
        ));
    }
    Ok(())
}

pub(crate) fn enforce_password_policy(password: &str) -> Result<(), ServerError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ServerError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

// ── Register ─────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct RegisterOutput {
    pub user: User,
    pub token: String,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<RegisterOutput, ServerError> {
        require_credentials(&input.email, &input.password)?;
        enforce_password_policy(&input.password)?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(ServerError::EmailTaken);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: input.email,
            password_hash: hash_password(&input.password)?,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;

        let (token, _exp) = issue_access_token(user.id, &user.email, &self.jwt_secret)
            .map_err(|e| ServerError::Internal(e.into()))?;

        Ok(RegisterOutput { user, token })
    }
}

// ── Login ────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub token: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ServerError> {
        require_credentials(&input.email, &input.password)?;

        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(ServerError::UserNotFound)?;

        if !verify_password(&input.password, &user.password_hash) {
            return Err(ServerError::InvalidPassword);
        }

        let (token, _exp) = issue_access_token(user.id, &user.email, &self.jwt_secret)
            .map_err(|e| ServerError::Internal(e.into()))?;

        Ok(LoginOutput { user, token })
    }
}

// ── Current user ─────────────────────────────────────────────────────────

pub struct CurrentUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> CurrentUserUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, ServerError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ServerError::UserNotFound)
    }
}
