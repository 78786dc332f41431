//! Bridge Hop - A bridge-building platform hopper
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (bridge, platforms, character, orchestration)
//! - `settings`: Data-driven game tuning and difficulty table
//! - `scores`: Session score and best score
//! - `ui`: Score label and layer adapters fed by simulation events

pub mod scores;
pub mod settings;
pub mod sim;
pub mod ui;

pub use scores::ScoreBoard;
pub use settings::{ConfigError, GameConfig};

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Vertical velocity below which a moving character counts as falling.
    /// Slightly negative so a resting body reporting -0.0 is not a fall.
    pub const FALL_VELOCITY_THRESHOLD: f32 = -1.0;

    /// Gap between the character's right side and the platform's right edge
    pub const CHARACTER_EDGE_MARGIN: f32 = 10.0;

    /// Progress this close to completion snaps to done (absorbs f32 accumulation)
    pub const PROGRESS_SNAP: f32 = 1.0e-3;

    /// Bridge angle while standing upright (degrees)
    pub const BRIDGE_UPRIGHT_ANGLE: f32 = 90.0;
    /// Bridge angle once it has landed (degrees)
    pub const BRIDGE_DOWN_ANGLE: f32 = 0.0;
}

/// Clamp `value` into `[min, max]`
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Linear interpolation from `a` to `b` (alpha is not clamped)
#[inline]
pub fn lerp(a: f32, b: f32, alpha: f32) -> f32 {
    a * (1.0 - alpha) + b * alpha
}

/// Uniform integer-floored value in `[min, max)`.
///
/// Never panics: when `max < min` the result lies in `(max, min]`, and
/// `min == max` yields `min`. Callers that need a strict bound clamp afterwards.
#[inline]
pub fn rand_in_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    let t: f32 = rng.random();
    (t * (max - min) + min).floor()
}
