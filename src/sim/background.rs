//! Endlessly scrolling background layers

use serde::{Deserialize, Serialize};

/// Horizontally wrapping background strip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Background {
    /// X of each layer's left edge
    pub layers: Vec<f32>,
    /// Drift speed (px/s)
    pub speed: f32,
    canvas_width: f32,
}

impl Background {
    /// Two canvas-wide layers side by side
    pub fn new(canvas_width: f32, speed: f32) -> Self {
        Self {
            layers: vec![0.0, canvas_width],
            speed,
            canvas_width,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        let step = self.speed * dt;
        for x in &mut self.layers {
            *x -= step;
            let diff = *x + self.canvas_width;
            if diff < 0.0 {
                *x = self.canvas_width + diff;
            }
        }
    }
}
