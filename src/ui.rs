//! HUD adapters
//!
//! Mirror simulation events into label text and the active UI layer. Nothing
//! here draws; a frontend reads `text()` and `active()`.

use crate::sim::{GameEvent, UiLayer};

/// Label showing the current score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLabel {
    score: u32,
    text: String,
}

impl Default for ScoreLabel {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreLabel {
    pub fn new() -> Self {
        Self {
            score: 0,
            text: "0".to_string(),
        }
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
        self.text = score.to_string();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Label showing the best score; ignores values that do not beat it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BestScoreLabel {
    inner: ScoreLabel,
}

impl BestScoreLabel {
    pub fn new() -> Self {
        Self {
            inner: ScoreLabel::new(),
        }
    }

    pub fn set_score(&mut self, score: u32) {
        if score > self.inner.score() {
            self.inner.set_score(score);
        }
    }

    pub fn score(&self) -> u32 {
        self.inner.score()
    }

    pub fn text(&self) -> &str {
        self.inner.text()
    }
}

/// Menu / HUD / modal switcher; exactly one layer is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerStack {
    active: UiLayer,
}

impl Default for LayerStack {
    fn default() -> Self {
        Self {
            active: UiLayer::MainMenu,
        }
    }
}

impl LayerStack {
    pub fn activate(&mut self, layer: UiLayer) {
        self.active = layer;
    }

    pub fn active(&self) -> UiLayer {
        self.active
    }

    pub fn is_active(&self, layer: UiLayer) -> bool {
        self.active == layer
    }
}

/// Every score display plus the layer switcher
#[derive(Debug, Clone)]
pub struct Hud {
    pub score: ScoreLabel,
    pub best: BestScoreLabel,
    pub layers: LayerStack,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            score: ScoreLabel::new(),
            best: BestScoreLabel::new(),
            layers: LayerStack::default(),
        }
    }

    /// Apply one simulation event; events the HUD does not show are ignored
    pub fn apply(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::ScoreChanged(score) => {
                self.score.set_score(score);
                self.best.set_score(score);
            }
            GameEvent::LayerActivated(layer) => self.layers.activate(layer),
            _ => {}
        }
    }

    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.apply(event);
        }
    }
}
