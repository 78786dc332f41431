//! Bonus pickup placed on top of the next platform

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Span;
use super::platform::Platform;
use super::pool::Recycle;
use crate::rand_in_range;

/// A bonus entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    /// Left edge, on the platform's top surface
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Cleared once the bonus has paid out
    pub valid: bool,
}

impl Bonus {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            width,
            height,
            valid: true,
        }
    }

    pub fn span(&self) -> Span {
        Span::from_len(self.pos.x, self.width)
    }

    /// Place uniformly within the platform so the bonus never overhangs it
    pub fn place_on<R: Rng + ?Sized>(&mut self, rng: &mut R, platform: &Platform) {
        let min_x = platform.left();
        let max_x = platform.right() - self.width;
        let x = if max_x < min_x {
            min_x
        } else {
            rand_in_range(rng, min_x, max_x).max(min_x)
        };
        self.pos = Vec2::new(x, platform.pos.y);
    }

    /// Whether a bridge of `bridge_width` anchored at `anchor_x` ends on the bonus
    pub fn is_hit_by(&self, anchor_x: f32, bridge_width: f32) -> bool {
        if !self.valid {
            return false;
        }
        let distance_to_bonus = (self.pos.x - anchor_x).abs();
        Span::from_len(distance_to_bonus, self.width).contains_half_open(bridge_width)
    }

    pub fn consume(&mut self) {
        self.valid = false;
    }
}

impl Recycle for Bonus {
    fn recycle(&mut self) {
        self.valid = true;
    }
}
