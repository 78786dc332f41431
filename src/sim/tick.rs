//! Fixed timestep simulation tick
//!
//! Applies one frame of input to the orchestrator and advances it.

use super::state::{RoundOrchestrator, RoundState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Touch/click went down this frame
    pub touch_start: bool,
    /// Touch/click was released this frame
    pub touch_end: bool,
    /// Idle/demo mode - the simulation plays itself
    pub auto_play: bool,
}

/// Advance the game by one fixed timestep
pub fn tick(game: &mut RoundOrchestrator, input: &TickInput, dt: f32) {
    let mut input = input.clone();
    if input.auto_play {
        auto_play_input(game, &mut input);
    }

    if input.touch_start {
        game.on_touch_start();
    }
    if input.touch_end {
        game.on_touch_end();
    }

    game.update(dt);
}

/// Bridge length the demo player aims for: the bonus centre when one is out,
/// otherwise the middle of the next platform.
pub fn auto_play_target(game: &RoundOrchestrator) -> Option<f32> {
    let current = game.current_platform()?;
    let next = game.next_platform()?;
    let anchor = current.right();

    let target = match game.bonus().filter(|b| b.valid) {
        Some(bonus) => bonus.pos.x + bonus.width / 2.0 - anchor,
        None => next.left() + next.width / 2.0 - anchor,
    };
    Some(target)
}

fn auto_play_input(game: &mut RoundOrchestrator, input: &mut TickInput) {
    match game.state() {
        RoundState::Menu => game.start_game(),
        RoundState::Idle => input.touch_start = true,
        RoundState::BridgeBuilding => {
            let width = game.bridge().map(|b| b.width).unwrap_or_default();
            if auto_play_target(game).is_some_and(|target| width >= target) {
                input.touch_end = true;
            }
        }
        _ => {}
    }
}
