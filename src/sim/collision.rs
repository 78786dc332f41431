//! Collider geometry and 1D span tests
//!
//! The simulation never resolves contacts itself. Colliders only mirror the
//! size/offset a physics backend would be given, and spans answer the
//! "is this x over that surface" questions the round logic asks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box collider attached to an entity's anchor point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxCollider {
    pub size: Vec2,
    /// Box centre relative to the entity anchor
    pub offset: Vec2,
    /// Whether the backend should report contacts for this body
    pub enabled: bool,
    /// Number of times the geometry was committed
    #[serde(skip)]
    pub applied: u32,
}

impl Default for BoxCollider {
    fn default() -> Self {
        Self {
            size: Vec2::ZERO,
            offset: Vec2::ZERO,
            enabled: true,
            applied: 0,
        }
    }
}

impl BoxCollider {
    /// Commit new geometry
    pub fn apply(&mut self, size: Vec2, offset: Vec2) {
        self.size = size;
        self.offset = offset;
        self.applied = self.applied.wrapping_add(1);
    }
}

/// Closed horizontal interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: f32,
    pub end: f32,
}

impl Span {
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Span of `len` starting at `start`
    pub fn from_len(start: f32, len: f32) -> Self {
        Self::new(start, start + len)
    }

    pub fn len(&self) -> f32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Inclusive on both ends
    pub fn contains(&self, x: f32) -> bool {
        x >= self.start && x <= self.end
    }

    /// Inclusive start, exclusive end
    pub fn contains_half_open(&self, x: f32) -> bool {
        x >= self.start && x < self.end
    }

    /// Whether the two closed spans share at least one point
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
