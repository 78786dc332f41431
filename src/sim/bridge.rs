//! Bridge state machine
//!
//! A bridge grows upright from the right edge of the current platform while the
//! player holds, then rotates down over `falling_time`. Phase completion is
//! reported through the [`BridgeEvent`] returned from [`Bridge::tick`] rather
//! than callbacks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{BoxCollider, Span};
use super::pool::Recycle;
use crate::consts::{BRIDGE_DOWN_ANGLE, BRIDGE_UPRIGHT_ANGLE, PROGRESS_SNAP};
use crate::settings::BridgeTuning;
use crate::{clamp, lerp};

/// Bridge lifecycle: None -> Build -> Fall -> None
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BridgeMode {
    #[default]
    None,
    Build,
    Fall,
}

/// What a bridge call produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BridgeEvent {
    None,
    BuildingStarted,
    /// Growth stopped (release or max length); carries the final width
    BuildingComplete { width: f32 },
    /// Bridge is flat
    FallingComplete,
}

/// A bridge entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bridge {
    /// Anchor: left end, at the current platform's right edge
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Degrees; 90 upright, 0 flat
    pub angle: f32,
    pub max_length: f32,
    pub building_speed: f32,
    pub falling_time: f32,
    pub collider: BoxCollider,
    mode: BridgeMode,
    falling_elapsed: f32,
}

impl Bridge {
    pub fn new(tuning: &BridgeTuning) -> Self {
        let mut bridge = Self {
            pos: Vec2::ZERO,
            width: 0.0,
            height: tuning.height,
            angle: BRIDGE_UPRIGHT_ANGLE,
            max_length: tuning.max_length,
            building_speed: tuning.building_speed,
            falling_time: tuning.falling_time,
            collider: BoxCollider::default(),
            mode: BridgeMode::None,
            falling_elapsed: 0.0,
        };
        bridge.apply_collider_changes();
        bridge
    }

    pub fn mode(&self) -> BridgeMode {
        self.mode
    }

    /// True once the bridge has finished falling and lies flat
    pub fn is_down(&self) -> bool {
        self.mode == BridgeMode::None && self.angle == BRIDGE_DOWN_ANGLE
    }

    /// Horizontal extent covered by the flat bridge
    pub fn span(&self) -> Span {
        Span::from_len(self.pos.x, self.width)
    }

    pub fn start_building(&mut self) -> BridgeEvent {
        self.mode = BridgeMode::Build;
        BridgeEvent::BuildingStarted
    }

    /// Release: Build -> Fall. No-op in any other mode.
    pub fn stop_building(&mut self) -> BridgeEvent {
        if self.mode != BridgeMode::Build {
            return BridgeEvent::None;
        }
        self.mode = BridgeMode::Fall;
        BridgeEvent::BuildingComplete { width: self.width }
    }

    /// Advance growth or fall by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> BridgeEvent {
        match self.mode {
            BridgeMode::Build => self.building_update(dt),
            BridgeMode::Fall => self.falling_update(dt),
            BridgeMode::None => BridgeEvent::None,
        }
    }

    fn building_update(&mut self, dt: f32) -> BridgeEvent {
        self.width = (self.width + self.building_speed * dt).min(self.max_length);
        self.apply_collider_changes();

        if self.width >= self.max_length {
            self.mode = BridgeMode::Fall;
            return BridgeEvent::BuildingComplete { width: self.width };
        }
        BridgeEvent::None
    }

    fn falling_update(&mut self, dt: f32) -> BridgeEvent {
        self.falling_elapsed += dt;

        let mut alpha = clamp(self.falling_elapsed / self.falling_time, 0.0, 1.0);
        if alpha >= 1.0 - PROGRESS_SNAP {
            alpha = 1.0;
        }
        self.angle = clamp(
            lerp(BRIDGE_UPRIGHT_ANGLE, BRIDGE_DOWN_ANGLE, alpha),
            BRIDGE_DOWN_ANGLE,
            BRIDGE_UPRIGHT_ANGLE,
        );

        if self.angle == BRIDGE_DOWN_ANGLE {
            self.mode = BridgeMode::None;
            self.falling_elapsed = 0.0;
            return BridgeEvent::FallingComplete;
        }
        BridgeEvent::None
    }

    fn apply_collider_changes(&mut self) {
        self.collider.apply(
            Vec2::new(self.width, self.height),
            Vec2::new(self.width / 2.0, 0.0),
        );
    }
}

impl Recycle for Bridge {
    fn recycle(&mut self) {
        self.angle = BRIDGE_UPRIGHT_ANGLE;
        self.width = 0.0;
        self.falling_elapsed = 0.0;
        self.mode = BridgeMode::None;
        self.collider.enabled = true;
        self.apply_collider_changes();
    }
}
