//! Bearer-token access gate.
//!
//! Every gated route extracts [`AuthedUser`]; extraction validates the
//! `Authorization: Bearer` credential before the handler (or a WebSocket
//! upgrade) runs, so rejected callers never reach the rotation core.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use uuid::Uuid;

use beacon_auth_types::token::validate_access_token;

use crate::error::ServerError;
use crate::state::AppState;

/// Caller identity admitted by the access gate.
///
/// Used for auditing and diagnostic logging only — no rotation or
/// delivery logic branches on it.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub user_id: Uuid,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthedUser {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ServerError::Unauthorized)?;

        let info = validate_access_token(bearer.token(), &state.jwt_secret)
            .map_err(|_| ServerError::Unauthorized)?;

        Ok(Self {
            user_id: info.user_id,
            email: info.email,
        })
    }
}
