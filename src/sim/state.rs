//! Round state and the orchestrator that owns every live entity
//!
//! Phase transitions live in `round.rs`; this file holds the data.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::background::Background;
use super::bonus::Bonus;
use super::bridge::Bridge;
use super::character::Character;
use super::difficulty::DifficultyTable;
use super::platform::Platform;
use super::pool::{Handle, Pool};
use crate::scores::ScoreBoard;
use crate::settings::GameConfig;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Title screen, waiting for the player to start
    Menu,
    /// Next platform is out, waiting for a touch
    Idle,
    /// Bridge grows while the touch is held
    BridgeBuilding,
    /// Bridge rotating down
    BridgeFalling,
    /// Character walking toward its target
    CharacterMoving,
    /// Camera slide to the next round
    Transition,
    /// Reserved terminal state. Death is an overlay tracked by `paused`.
    End,
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Bridge hit the ground
    BridgeLanded,
    /// Character stepped into the gap
    CharacterFall,
}

/// Character animation clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Animation {
    Idle,
    Run,
    Fall,
}

/// UI layers; exactly one is shown at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiLayer {
    MainMenu,
    Hud,
    ModalMenu,
}

/// Fire-and-forget presentation requests, drained by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    StateChanged(RoundState),
    PlaySound(SoundEffect),
    PlayAnimation(Animation),
    /// New value for every score display
    ScoreChanged(u32),
    LayerActivated(UiLayer),
    PlatformSpawned { x: f32, width: f32 },
    BonusSpawned { x: f32 },
    /// Bridge finished falling; `valid` says whether it spans the gap
    BridgeLanded { width: f32, valid: bool },
    BonusCollected,
    Died,
}

/// Camera slide bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransitionState {
    pub elapsed: f32,
    /// How far the world slides left
    pub distance: f32,
    pub character_origin: Vec2,
    pub platform_origin: Vec2,
}

/// Owns the round state machine and every live entity
#[derive(Debug, Clone)]
pub struct RoundOrchestrator {
    pub(super) config: GameConfig,
    pub(super) difficulty: DifficultyTable,
    /// Run seed for reproducibility
    pub(super) seed: u64,
    pub(super) rng: Pcg32,
    pub(super) state: RoundState,
    /// Set on death; freezes all ticking until restart
    pub(super) paused: bool,
    pub(super) scores: ScoreBoard,

    pub(super) platforms: Pool<Platform>,
    pub(super) bridges: Pool<Bridge>,
    pub(super) bonuses: Pool<Bonus>,

    pub(super) current_platform: Option<Handle>,
    pub(super) next_platform: Option<Handle>,
    pub(super) bridge: Option<Handle>,
    pub(super) bonus: Option<Handle>,
    pub(super) character: Character,

    pub(super) transition: TransitionState,
    pub(super) background: Background,
    pub(super) time_ticks: u64,
    pub(super) events: Vec<GameEvent>,
}

impl RoundOrchestrator {
    /// Create a session on the title screen
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let difficulty = config.difficulty_table();
        let background = Background::new(config.canvas_width, config.background_speed);
        let character = Character::new(&config.character, Vec2::ZERO);
        let mut game = Self {
            config,
            difficulty,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            state: RoundState::Menu,
            paused: false,
            scores: ScoreBoard::new(),
            platforms: Pool::new(),
            bridges: Pool::new(),
            bonuses: Pool::new(),
            current_platform: None,
            next_platform: None,
            bridge: None,
            bonus: None,
            character,
            transition: TransitionState::default(),
            background,
            time_ticks: 0,
            events: Vec::new(),
        };
        game.title_screen();
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    /// True after death until the next restart
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn best_score(&self) -> u32 {
        self.scores.best()
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn transition(&self) -> &TransitionState {
        &self.transition
    }

    pub fn current_platform(&self) -> Option<&Platform> {
        self.current_platform.and_then(|h| self.platforms.get_ref(h))
    }

    pub fn next_platform(&self) -> Option<&Platform> {
        self.next_platform.and_then(|h| self.platforms.get_ref(h))
    }

    pub fn next_platform_mut(&mut self) -> Option<&mut Platform> {
        self.next_platform.and_then(|h| self.platforms.get_mut(h))
    }

    pub fn bridge(&self) -> Option<&Bridge> {
        self.bridge.and_then(|h| self.bridges.get_ref(h))
    }

    pub fn bridge_mut(&mut self) -> Option<&mut Bridge> {
        self.bridge.and_then(|h| self.bridges.get_mut(h))
    }

    pub fn bonus(&self) -> Option<&Bonus> {
        self.bonus.and_then(|h| self.bonuses.get_ref(h))
    }

    pub fn bonus_mut(&mut self) -> Option<&mut Bonus> {
        self.bonus.and_then(|h| self.bonuses.get_mut(h))
    }

    /// Gap between the current platform's right edge and the next platform's left edge
    pub fn distance_between_platforms(&self) -> f32 {
        match (self.current_platform(), self.next_platform()) {
            (Some(current), Some(next)) => (current.right() - next.left()).abs(),
            _ => 0.0,
        }
    }

    /// Take every queued presentation event
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
