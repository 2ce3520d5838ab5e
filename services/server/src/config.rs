use crate::qr::DEFAULT_ROTATION_PERIOD_SECS;

/// Backend configuration loaded from environment variables.
#[derive(Debug)]
pub struct ServerConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing access tokens.
    pub jwt_secret: String,
    /// Base URL of the frontend, used to build password-reset links.
    pub frontend_url: String,
    /// TCP port to listen on (default 3000). Env var: `SERVER_PORT`.
    pub server_port: u16,
    /// Seconds between code rotations (default 60). Env var:
    /// `ROTATION_PERIOD_SECS`. The only knob the rotation core consumes.
    pub rotation_period_secs: u64,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            frontend_url: std::env::var("FRONTEND_URL").expect("FRONTEND_URL"),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            rotation_period_secs: std::env::var("ROTATION_PERIOD_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ROTATION_PERIOD_SECS),
        }
    }
}
