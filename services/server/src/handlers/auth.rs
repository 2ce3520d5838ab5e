use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::types::PublicUser;
use crate::error::ServerError;
use crate::gate::AuthedUser;
use crate::state::AppState;
use crate::usecase::account::{
    CurrentUserUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};
use crate::usecase::password_reset::{
    ForgotPasswordInput, ForgotPasswordUseCase, ResetPasswordInput, ResetPasswordUseCase,
};

/// Envelope for endpoints that hand out an access token.
#[derive(Serialize)]
pub struct TokenResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub data: Option<()>,
    pub token: String,
}

/// Envelope for endpoints that only acknowledge.
#[derive(Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub data: Option<()>,
}

// ── POST /auth/register ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    // absent fields deserialize to empty strings and fail usecase validation
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(RegisterInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            status: "success",
            message: "user has registered successfully",
            data: None,
            token: out.token,
        }),
    ))
}

// ── POST /auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok((
        StatusCode::OK,
        Json(TokenResponse {
            status: "success",
            message: "user has logged in successfully",
            data: None,
            token: out.token,
        }),
    ))
}

// ── GET /auth/me ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CurrentUserResponse {
    pub status: &'static str,
    pub data: CurrentUserData,
}

#[derive(Serialize)]
pub struct CurrentUserData {
    pub user: PublicUser,
}

pub async fn current_user(
    State(state): State<AppState>,
    caller: AuthedUser,
) -> Result<Json<CurrentUserResponse>, ServerError> {
    let usecase = CurrentUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(caller.user_id).await?;

    Ok(Json(CurrentUserResponse {
        status: "success",
        data: CurrentUserData {
            user: PublicUser::from(&user),
        },
    }))
}

// ── POST /auth/forgot-password ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ServerError> {
    let usecase = ForgotPasswordUseCase {
        users: state.user_repo(),
        frontend_url: state.frontend_url.clone(),
    };
    usecase
        .execute(ForgotPasswordInput { email: body.email })
        .await?;

    Ok(Json(MessageResponse {
        status: "success",
        message: "reset instructions have been sent to your email",
        data: None,
    }))
}

// ── POST /auth/reset-password/{reset_token} ──────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Path(reset_token): Path<String>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(ResetPasswordInput {
            reset_token,
            password: body.password,
        })
        .await?;

    Ok((
        StatusCode::OK,
        Json(TokenResponse {
            status: "success",
            message: "password has been reset successfully",
            data: None,
            token: out.token,
        }),
    ))
}
