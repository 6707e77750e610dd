//! Host abstraction traits so `stipple-core` stays environment-agnostic.
//!
//! The engines never talk to a windowing system directly. They are handed a
//! [`scheduler::FrameScheduler`] for their tick loops, a
//! [`random::RandomSource`] for burst/scramble draws, and
//! [`signal::SignalReceiver`]s for the externally owned suppression and
//! reduced-motion booleans. Hosts translate their own event types into the
//! plain values in [`input`].

use serde::{Deserialize, Serialize};

pub mod input;
pub mod random;
pub mod scheduler;
pub mod signal;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Host viewport size in logical pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Safe default when the host cannot measure itself yet.
    pub fn fallback() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Reads the user's reduced-motion preference from the environment.
///
/// Hosts with a native preference API should pass their own value instead;
/// this is the lowest common denominator for headless and demo runs.
pub fn reduced_motion_from_env() -> bool {
    match std::env::var("STIPPLE_REDUCED_MOTION") {
        Ok(v) => matches!(v.trim(), "1" | "true" | "yes"),
        Err(_) => false,
    }
}
