//! Score-driven difficulty tiers
//!
//! A tier applies once the player's score reaches its threshold. Tiers are kept
//! sorted by descending threshold so the active tier is the first whose
//! threshold is at or below the score.

use serde::{Deserialize, Serialize};

/// One row of the difficulty table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultySetting {
    /// Score at which this tier becomes active
    pub score_threshold: u32,
    /// Smallest width a spawned platform may roll
    pub min_platform_width: f32,
    /// Upper (exclusive) width a spawned platform may roll
    pub max_platform_width: f32,
    /// Minimum gap between the current platform's right edge and the next platform
    pub min_distance_between_platforms: f32,
}

impl DifficultySetting {
    pub const fn new(
        score_threshold: u32,
        min_platform_width: f32,
        max_platform_width: f32,
        min_distance_between_platforms: f32,
    ) -> Self {
        Self {
            score_threshold,
            min_platform_width,
            max_platform_width,
            min_distance_between_platforms,
        }
    }
}

/// Built-in tiers used when the configuration does not provide any
pub const DEFAULT_DIFFICULTY: [DifficultySetting; 4] = [
    DifficultySetting::new(0, 80.0, 150.0, 40.0),
    DifficultySetting::new(5, 60.0, 120.0, 60.0),
    DifficultySetting::new(10, 40.0, 90.0, 80.0),
    DifficultySetting::new(20, 20.0, 60.0, 100.0),
];

/// Difficulty tiers sorted by descending score threshold. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyTable {
    tiers: Vec<DifficultySetting>,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY.to_vec())
    }
}

impl DifficultyTable {
    /// Build a table from unordered tiers. An empty list falls back to the
    /// built-in tiers.
    pub fn new(mut tiers: Vec<DifficultySetting>) -> Self {
        if tiers.is_empty() {
            log::warn!("Empty difficulty table, using built-in tiers");
            tiers = DEFAULT_DIFFICULTY.to_vec();
        }
        tiers.sort_by(|a, b| b.score_threshold.cmp(&a.score_threshold));
        Self { tiers }
    }

    /// Tier active at `score`.
    ///
    /// Scores below every threshold use the lowest tier.
    pub fn setting_for(&self, score: u32) -> DifficultySetting {
        self.tiers
            .iter()
            .find(|tier| score >= tier.score_threshold)
            .or_else(|| self.tiers.last())
            .copied()
            .unwrap_or(DEFAULT_DIFFICULTY[0])
    }

    /// Tiers in evaluation order (descending threshold)
    pub fn tiers(&self) -> &[DifficultySetting] {
        &self.tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DifficultyTable {
        DifficultyTable::new(vec![
            DifficultySetting::new(10, 20.0, 40.0, 30.0),
            DifficultySetting::new(0, 50.0, 100.0, 10.0),
            DifficultySetting::new(5, 30.0, 60.0, 20.0),
        ])
    }

    #[test]
    fn test_sorted_descending() {
        let thresholds: Vec<u32> = table().tiers().iter().map(|t| t.score_threshold).collect();
        assert_eq!(thresholds, vec![10, 5, 0]);
    }

    #[test]
    fn test_setting_for_picks_highest_reached_tier() {
        let table = table();
        assert_eq!(table.setting_for(0).score_threshold, 0);
        assert_eq!(table.setting_for(4).score_threshold, 0);
        assert_eq!(table.setting_for(5).score_threshold, 5);
        assert_eq!(table.setting_for(9).score_threshold, 5);
        assert_eq!(table.setting_for(10).score_threshold, 10);
        assert_eq!(table.setting_for(500).score_threshold, 10);
    }

    #[test]
    fn test_below_all_thresholds_uses_lowest_tier() {
        let table = DifficultyTable::new(vec![
            DifficultySetting::new(3, 20.0, 40.0, 30.0),
            DifficultySetting::new(8, 10.0, 20.0, 50.0),
        ]);
        let setting = table.setting_for(1);
        assert_eq!(setting.score_threshold, 3);
        assert_eq!(setting.min_platform_width, 20.0);
    }

    #[test]
    fn test_empty_table_uses_defaults() {
        let table = DifficultyTable::new(Vec::new());
        assert_eq!(table.tiers().len(), DEFAULT_DIFFICULTY.len());
        assert_eq!(table.setting_for(0), DEFAULT_DIFFICULTY[0]);
    }
}
