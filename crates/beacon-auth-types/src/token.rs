//! JWT access-token issuing and validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_SERVER", test))]
use serde::Serialize;
use uuid::Uuid;

/// Access-token lifetime in seconds (24 hours, matching the deployed
/// `JWT_EXPIRES_IN` of the legacy backend).
pub const ACCESS_TOKEN_TTL_SECS: u64 = 60 * 60 * 24;

/// Caller identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub email: String,
    pub access_token_exp: u64,
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload shared by token issuing and validation.
///
/// `sub` carries the user ID (UUID string), `email` the account email —
/// the same payload the legacy backend signed. `exp` is seconds since
/// the UNIX epoch.
///
/// [`Deserialize`] is always available — all consumers validate tokens.
/// [`Serialize`] requires the **`USE_ONLY_IN_SERVER`** cargo feature:
/// the backend is the sole token issuer.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_SERVER", test), derive(Serialize))]
pub struct JwtClaims {
    /// User ID (UUID string).
    pub sub: String,
    /// Account email address.
    pub email: String,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

// ── Core decode (private) ────────────────────────────────────────────────

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s — tolerates clock skew between issuer and clients.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

// ── Public: all consumers ────────────────────────────────────────────────

/// Validate a bearer access token, returning the caller identity.
///
/// This is the primary public API of the gate: the server calls it for
/// every gated request to turn the `Authorization: Bearer` credential
/// into an accept/reject decision plus an identity used for logging.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        email: claims.email,
        access_token_exp: claims.exp,
    })
}

// ── Feature-gated: token issuer only ─────────────────────────────────────

/// Sign a fresh access token for `user_id`/`email`, returning the token
/// and its expiration timestamp.
///
/// Requires the `USE_ONLY_IN_SERVER` feature. Only the backend issues
/// tokens; every other consumer validates with [`validate_access_token`].
#[cfg(any(feature = "USE_ONLY_IN_SERVER", test))]
pub fn issue_access_token(
    user_id: Uuid,
    email: &str,
    secret: &str,
) -> Result<(String, u64), jsonwebtoken::errors::Error> {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let exp = now_secs() + ACCESS_TOKEN_TTL_SECS;
    let claims = JwtClaims {
        sub: user_id.to_string(),
        email: email.to_owned(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((token, exp))
}

#[cfg(any(feature = "USE_ONLY_IN_SERVER", test))]
fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}
