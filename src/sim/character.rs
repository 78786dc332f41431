//! Character motion controller
//!
//! Walks along +x toward a target and reports either arrival or the start of a
//! fall. Vertical motion comes from a minimal gravity model: the caller says
//! which surface (if any) lies under the character each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Span;
use crate::consts::FALL_VELOCITY_THRESHOLD;
use crate::settings::CharacterTuning;

/// Vertical slack when deciding whether the feet are on a surface
const GROUND_TOLERANCE: f32 = 1.0;

/// What a character tick produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterEvent {
    None,
    /// Lost footing while walking
    EnteredFalling,
    /// Arrived at the movement target
    ReachedTarget,
}

/// The player character. `pos` is the centre of its feet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    input: Vec2,
    target: Vec2,
}

impl Character {
    pub fn new(tuning: &CharacterTuning, pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            width: tuning.width,
            height: tuning.height,
            speed: tuning.speed,
            input: Vec2::ZERO,
            target: pos,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.input != Vec2::ZERO
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Horizontal extent of the feet
    pub fn footprint(&self) -> Span {
        Span::from_len(self.pos.x - self.width / 2.0, self.width)
    }

    /// Walk forward toward `target`. An infinite target x is never reached.
    pub fn start_movement(&mut self, target: Vec2) {
        self.input = Vec2::X;
        self.target = target;
    }

    /// Advance by `dt`. `ground_y` is the top of the surface under the
    /// character, if there is one.
    pub fn tick(&mut self, dt: f32, ground_y: Option<f32>, gravity: f32) -> CharacterEvent {
        self.pos += self.input * self.speed * dt;

        match ground_y {
            Some(ground) if self.vel.y <= 0.0 && (self.pos.y - ground).abs() <= GROUND_TOLERANCE => {
                self.pos.y = ground;
                self.vel.y = 0.0;
            }
            _ => {
                self.vel.y -= gravity * dt;
                self.pos.y += self.vel.y * dt;
            }
        }

        if !self.is_moving() {
            return CharacterEvent::None;
        }

        if self.vel.y < FALL_VELOCITY_THRESHOLD {
            self.input = Vec2::ZERO;
            return CharacterEvent::EnteredFalling;
        }

        if self.pos.x >= self.target.x {
            self.input = Vec2::ZERO;
            self.pos = self.target;
            return CharacterEvent::ReachedTarget;
        }

        CharacterEvent::None
    }
}
