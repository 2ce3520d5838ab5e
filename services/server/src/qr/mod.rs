//! The rotating-code core.
//!
//! One [`CodeGenerator`] owns the current code and rotates it on a fixed
//! period; one [`CodeBroadcaster`] fans each rotation out to every live
//! subscriber. Both are constructed once at startup and shared through
//! [`crate::state::AppState`].

pub mod broadcast;
pub mod generator;

pub use broadcast::{CodeBroadcaster, SubscriberId};
pub use generator::CodeGenerator;

/// Default seconds between rotations.
pub const DEFAULT_ROTATION_PERIOD_SECS: u64 = 60;
