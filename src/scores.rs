//! Session score tracking
//!
//! The best score survives restarts for the lifetime of the process but is
//! never written to storage.

use serde::{Deserialize, Serialize};

/// Current and best score for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    score: u32,
    best: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Add points; returns true when a new best was set
    pub fn add(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score > self.best {
            self.best = self.score;
            return true;
        }
        false
    }

    /// Zero the current score, keeping the best
    pub fn reset(&mut self) {
        self.score = 0;
    }

    pub fn is_odd(&self) -> bool {
        self.score % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_tracks_best() {
        let mut board = ScoreBoard::new();
        assert!(board.add(1));
        assert!(board.add(2));
        assert_eq!((board.score(), board.best()), (3, 3));

        board.reset();
        assert_eq!((board.score(), board.best()), (0, 3));
        assert!(!board.add(2));
        assert_eq!(board.best(), 3);
        assert!(board.add(2));
        assert_eq!(board.best(), 4);
    }

    #[test]
    fn test_parity() {
        let mut board = ScoreBoard::new();
        assert!(!board.is_odd());
        board.add(1);
        assert!(board.is_odd());
        board.add(2);
        assert!(board.is_odd());
        board.add(1);
        assert!(!board.is_odd());
    }

    proptest! {
        #[test]
        fn prop_best_never_decreases(ops in prop::collection::vec(prop::option::of(1u32..3), 0..100)) {
            let mut board = ScoreBoard::new();
            let mut last_best = 0;
            for op in ops {
                let before = board.score();
                match op {
                    Some(points) => {
                        board.add(points);
                        prop_assert!(board.score() > before);
                    }
                    None => {
                        board.reset();
                        prop_assert_eq!(board.score(), 0);
                    }
                }
                prop_assert!(board.best() >= last_best);
                prop_assert!(board.best() >= board.score());
                last_best = board.best();
            }
        }
    }
}
