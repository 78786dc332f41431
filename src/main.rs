//! Bridge Hop entry point
//!
//! Headless native driver: runs auto-played rounds through the fixed-step loop
//! and logs the scores.
//!
//! Usage: `bridge-hop [config.json] [seed] [runs]`

use bridge_hop::GameConfig;
use bridge_hop::consts::*;
use bridge_hop::sim::{GameEvent, RoundOrchestrator, RoundState, TickInput, tick};
use bridge_hop::ui::Hud;

/// Frame delta fed to the loop; deliberately off the sim step so substeps vary
const FRAME_DT: f32 = 1.0 / 45.0;
/// Give up on a run that has not died after this many frames
const MAX_FRAMES_PER_RUN: u32 = 60 * 60 * 5;

/// Game instance holding all state
struct Game {
    state: RoundOrchestrator,
    hud: Hud,
    accumulator: f32,
    input: TickInput,
    deaths: u32,
}

impl Game {
    fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            state: RoundOrchestrator::new(config, seed),
            hud: Hud::new(),
            accumulator: 0.0,
            input: TickInput {
                auto_play: true,
                ..Default::default()
            },
            deaths: 0,
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            self.input.touch_start = false;
            self.input.touch_end = false;
        }

        for event in self.state.drain_events() {
            self.hud.apply(&event);
            match event {
                GameEvent::Died => self.deaths += 1,
                GameEvent::BonusCollected => log::debug!("Bonus collected"),
                GameEvent::StateChanged(RoundState::Transition) => {
                    log::debug!("Round cleared, score {}", self.hud.score.text())
                }
                _ => {}
            }
        }
    }

    /// Run one auto-played session until the character dies or the frame cap hits
    fn run_once(&mut self) -> bool {
        let deaths = self.deaths;
        for _ in 0..MAX_FRAMES_PER_RUN {
            self.update(FRAME_DT);
            if self.deaths > deaths {
                return true;
            }
        }
        false
    }

    fn restart(&mut self) {
        self.state.restart();
        self.accumulator = 0.0;
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bridge Hop (headless) starting...");

    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}; using default config");
                GameConfig::default()
            }
        },
        None => GameConfig::default(),
    };
    let seed = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(12345);
    let runs = args.next().and_then(|s| s.parse::<u32>().ok()).unwrap_or(3);

    let mut game = Game::new(config, seed);
    log::info!("Game initialized with seed: {}", seed);

    for run in 1..=runs {
        let died = game.run_once();
        log::info!(
            "Run {}: score {} best {}{}",
            run,
            game.state.score(),
            game.hud.best.text(),
            if died { "" } else { " (frame cap)" }
        );
        if run < runs {
            game.restart();
        }
    }

    println!(
        "best score after {} runs: {}",
        runs,
        game.state.best_score()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser frontend; the library is the wasm-facing surface
}
