//! Game configuration
//!
//! Static tuning supplied at startup: screen geometry, bridge/character speeds,
//! and the difficulty table. Loadable from JSON; every field falls back to its
//! default when omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::difficulty::{DEFAULT_DIFFICULTY, DifficultySetting, DifficultyTable};

/// Configuration loading/validation failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("difficulty table is empty")]
    EmptyDifficulty,
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("difficulty tier {threshold}: min width {min} exceeds max width {max}")]
    InvertedWidthRange { threshold: u32, min: f32, max: f32 },
    #[error("difficulty tier {threshold}: negative distance {distance}")]
    NegativeDistance { threshold: u32, distance: f32 },
}

/// Bridge growth and fall tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeTuning {
    /// Longest bridge the player can build
    pub max_length: f32,
    /// Growth rate (px/s)
    pub building_speed: f32,
    /// Seconds to rotate from upright to flat
    pub falling_time: f32,
    /// Bridge thickness
    pub height: f32,
}

impl Default for BridgeTuning {
    fn default() -> Self {
        Self {
            max_length: 800.0,
            building_speed: 300.0,
            falling_time: 0.4,
            height: 6.0,
        }
    }
}

/// Character movement tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTuning {
    /// Walk speed (px/s)
    pub speed: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            speed: 250.0,
            width: 30.0,
            height: 40.0,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Margin from the screen's left/right edges that platforms must respect
    pub safe_zone_offset: f32,
    /// Seconds the camera slide between rounds takes
    pub transition_time: f32,

    // === Platforms ===
    /// Height of the platform tops above the screen bottom
    pub platform_level_offset: f32,
    pub platform_height: f32,
    /// Fixed width of the first platform of a run
    pub start_platform_width: f32,

    // === Entities ===
    pub bridge: BridgeTuning,
    pub character: CharacterTuning,
    pub bonus_width: f32,
    pub bonus_height: f32,

    // === World ===
    /// Downward acceleration for unsupported characters (px/s²)
    pub gravity: f32,
    /// Background drift speed (px/s)
    pub background_speed: f32,

    // === Difficulty ===
    pub difficulty: Vec<DifficultySetting>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            safe_zone_offset: 50.0,
            transition_time: 1.0,

            platform_level_offset: 200.0,
            platform_height: 200.0,
            start_platform_width: 100.0,

            bridge: BridgeTuning::default(),
            character: CharacterTuning::default(),
            bonus_width: 20.0,
            bonus_height: 10.0,

            gravity: 980.0,
            background_speed: 10.0,

            difficulty: DEFAULT_DIFFICULTY.to_vec(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot make sense of
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("transition_time", self.transition_time),
            ("start_platform_width", self.start_platform_width),
            ("bridge.max_length", self.bridge.max_length),
            ("bridge.building_speed", self.bridge.building_speed),
            ("bridge.falling_time", self.bridge.falling_time),
            ("character.speed", self.character.speed),
            ("gravity", self.gravity),
        ];
        for (field, value) in positives {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.difficulty.is_empty() {
            return Err(ConfigError::EmptyDifficulty);
        }
        for tier in &self.difficulty {
            if tier.min_platform_width > tier.max_platform_width {
                return Err(ConfigError::InvertedWidthRange {
                    threshold: tier.score_threshold,
                    min: tier.min_platform_width,
                    max: tier.max_platform_width,
                });
            }
            if tier.min_distance_between_platforms < 0.0 {
                return Err(ConfigError::NegativeDistance {
                    threshold: tier.score_threshold,
                    distance: tier.min_distance_between_platforms,
                });
            }
        }
        Ok(())
    }

    /// Difficulty tiers in evaluation order
    pub fn difficulty_table(&self) -> DifficultyTable {
        DifficultyTable::new(self.difficulty.clone())
    }

    /// Screen left edge in world coordinates (origin at screen centre)
    pub fn screen_left(&self) -> f32 {
        -self.canvas_width / 2.0
    }

    /// Screen right edge in world coordinates
    pub fn screen_right(&self) -> f32 {
        self.canvas_width / 2.0
    }

    /// Y of every platform's top surface
    pub fn platform_level_y(&self) -> f32 {
        -self.canvas_height / 2.0 + self.platform_level_offset
    }

    /// Killing volume: characters below this line are dead
    pub fn kill_plane_y(&self) -> f32 {
        -self.canvas_height / 2.0
    }
}
