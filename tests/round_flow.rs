//! Whole-session scenarios driven through the public API

use bridge_hop::GameConfig;
use bridge_hop::consts::SIM_DT;
use bridge_hop::sim::{GameEvent, RoundOrchestrator, RoundState, TickInput, UiLayer, tick};
use bridge_hop::ui::Hud;

fn auto() -> TickInput {
    TickInput {
        auto_play: true,
        ..Default::default()
    }
}

/// Tap and immediately release: the bridge is far too short and the character dies
fn die_quickly(game: &mut RoundOrchestrator) {
    let tap = TickInput {
        touch_start: true,
        ..Default::default()
    };
    let release = TickInput {
        touch_end: true,
        ..Default::default()
    };
    tick(game, &tap, SIM_DT);
    tick(game, &release, SIM_DT);
    for _ in 0..(60 * 30) {
        if game.is_paused() {
            return;
        }
        tick(game, &TickInput::default(), SIM_DT);
    }
    panic!("character never died, state {:?}", game.state());
}

fn play_until_score(game: &mut RoundOrchestrator, score: u32) {
    for _ in 0..(60 * 120) {
        if game.score() >= score && game.state() == RoundState::Idle {
            return;
        }
        tick(game, &auto(), SIM_DT);
    }
    panic!("never reached score {score}, got {}", game.score());
}

#[test]
fn test_auto_play_session_feeds_hud() {
    let mut game = RoundOrchestrator::new(GameConfig::default(), 7);
    let mut hud = Hud::new();
    hud.apply_all(&game.drain_events());
    assert!(hud.layers.is_active(UiLayer::MainMenu));

    play_until_score(&mut game, 4);
    let events = game.drain_events();
    hud.apply_all(&events);

    assert!(hud.layers.is_active(UiLayer::Hud));
    assert_eq!(hud.score.text(), game.score().to_string());
    assert!(events.iter().any(|e| matches!(e, GameEvent::PlatformSpawned { .. })));
    assert!(!events.contains(&GameEvent::Died));
}

#[test]
fn test_best_score_survives_restarts() {
    let mut game = RoundOrchestrator::new(GameConfig::default(), 2024);
    let mut hud = Hud::new();

    game.start_game();
    play_until_score(&mut game, 3);
    let first = game.score();
    die_quickly(&mut game);
    hud.apply_all(&game.drain_events());
    assert!(hud.layers.is_active(UiLayer::ModalMenu));
    assert_eq!(game.best_score(), first);

    // Frozen while the modal is up
    let ticks = game.time_ticks();
    tick(&mut game, &auto(), SIM_DT);
    assert_eq!(game.time_ticks(), ticks);

    game.restart();
    hud.apply_all(&game.drain_events());
    assert_eq!(game.score(), 0);
    assert_eq!(game.state(), RoundState::Idle);
    assert!(!game.is_paused());
    assert_eq!(hud.score.text(), "0");
    assert_eq!(hud.best.score(), first);

    die_quickly(&mut game);
    assert_eq!(game.best_score(), first);
}

#[test]
fn test_restart_reuses_entities() {
    let mut game = RoundOrchestrator::new(GameConfig::default(), 99);
    game.start_game();
    for _ in 0..5 {
        die_quickly(&mut game);
        game.restart();
        let current = game.current_platform().map(|p| p.width);
        assert_eq!(current, Some(game.config().start_platform_width));
        assert!(game.next_platform().is_some());
        assert!(game.bridge().is_none());
    }
}

#[test]
fn test_narrow_screen_does_not_panic() {
    let config = GameConfig {
        canvas_width: 160.0,
        safe_zone_offset: 60.0,
        ..GameConfig::default()
    };
    let mut game = RoundOrchestrator::new(config, 3);
    for _ in 0..(60 * 60) {
        tick(&mut game, &auto(), SIM_DT);
        if game.is_paused() {
            game.restart();
        }
    }
    assert!(game.current_platform().is_some());
}
