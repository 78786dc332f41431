//! Deterministic round simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Presentation (sound, animation, labels) leaves as queued `GameEvent`s

pub mod background;
pub mod bonus;
pub mod bridge;
pub mod character;
pub mod collision;
pub mod difficulty;
pub mod platform;
pub mod pool;
pub mod round;
pub mod state;
pub mod tick;

pub use background::Background;
pub use bonus::Bonus;
pub use bridge::{Bridge, BridgeEvent, BridgeMode};
pub use character::{Character, CharacterEvent};
pub use collision::{BoxCollider, Span};
pub use difficulty::{DEFAULT_DIFFICULTY, DifficultySetting, DifficultyTable};
pub use platform::{Placement, Platform, SpawnBounds, place_next, placement_range};
pub use pool::{Handle, Pool, Recycle};
pub use round::is_bridge_length_valid;
pub use state::{
    Animation, GameEvent, RoundOrchestrator, RoundState, SoundEffect, TransitionState, UiLayer,
};
pub use tick::{TickInput, auto_play_target, tick};
