pub mod config;
pub mod domain;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod infra;
pub mod password;
pub mod qr;
pub mod router;
pub mod state;
pub mod telemetry;
pub mod usecase;
pub mod ws;
