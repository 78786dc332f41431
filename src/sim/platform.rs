//! Platforms and next-platform placement
//!
//! Platform positions are their top-left corner; the top surface is where
//! the character stands.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{BoxCollider, Span};
use super::difficulty::DifficultySetting;
use super::pool::Recycle;
use crate::rand_in_range;

/// A platform entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Roll a new width in `[min_width, max_width)` on activation
    pub randomizes_width: bool,
    pub min_width: f32,
    pub max_width: f32,
    pub collider: BoxCollider,
}

impl Platform {
    pub fn new(width: f32, height: f32) -> Self {
        let mut platform = Self {
            pos: Vec2::ZERO,
            width,
            height,
            randomizes_width: false,
            min_width: width,
            max_width: width,
            collider: BoxCollider::default(),
        };
        platform.apply_collider_changes();
        platform
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    /// Horizontal extent of the top surface
    pub fn span(&self) -> Span {
        Span::new(self.left(), self.right())
    }

    /// Where a character of `character_width` rests near the right edge
    pub fn rest_x(&self, character_width: f32, edge_margin: f32) -> f32 {
        self.right() - character_width / 2.0 - edge_margin
    }

    /// Bring the platform into play, rolling its width when it randomizes
    pub fn activate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.randomizes_width {
            self.width = rand_in_range(rng, self.min_width, self.max_width);
            self.apply_collider_changes();
        }
    }

    /// Fix the width, disabling randomization
    pub fn set_fixed_width(&mut self, width: f32) {
        self.randomizes_width = false;
        self.width = width;
        self.apply_collider_changes();
    }

    pub fn enable_collision(&mut self, enable: bool) {
        self.collider.enabled = enable;
    }

    pub fn collision_enabled(&self) -> bool {
        self.collider.enabled
    }

    fn apply_collider_changes(&mut self) {
        self.collider.apply(
            Vec2::new(self.width, self.height),
            Vec2::new(self.width / 2.0, -self.height / 2.0),
        );
    }
}

impl Recycle for Platform {
    fn recycle(&mut self) {
        self.pos = Vec2::ZERO;
        self.collider.enabled = true;
    }
}

/// Geometry of the screen a platform must fit inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnBounds {
    pub screen_right: f32,
    pub safe_zone_offset: f32,
}

/// Result of placing the next platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    /// Gap between the current platform's right edge and the next platform's left edge
    pub distance: f32,
    /// True when the allowed range was empty and `x` fell back to its lower bound
    pub degenerate: bool,
}

/// Allowed x range for a platform of `width` following `current_right`
pub fn placement_range(current_right: f32, width: f32, setting: &DifficultySetting, bounds: &SpawnBounds) -> Span {
    let min_x = current_right + setting.min_distance_between_platforms;
    let max_x = bounds.screen_right - bounds.safe_zone_offset - width;
    Span::new(min_x, max_x)
}

/// Pick the next platform's x. Narrow screens that leave no room place the
/// platform at the minimum distance rather than failing.
pub fn place_next<R: Rng + ?Sized>(
    rng: &mut R,
    current_right: f32,
    width: f32,
    setting: &DifficultySetting,
    bounds: &SpawnBounds,
) -> Placement {
    let range = placement_range(current_right, width, setting, bounds);
    let (x, degenerate) = if range.is_empty() {
        (range.start, true)
    } else {
        // Flooring can dip below a fractional lower bound
        let x = rand_in_range(rng, range.start, range.end).max(range.start);
        (x, false)
    };

    Placement {
        x,
        distance: (x - current_right).abs(),
        degenerate,
    }
}
