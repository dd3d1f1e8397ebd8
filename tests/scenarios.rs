//! End-to-end session scenarios driven through the public API

use air_dodger::audio::{Cue, RecordingAudio};
use air_dodger::consts::FRAME_MS;
use air_dodger::highscores::MemoryStore;
use air_dodger::input::TickInput;
use air_dodger::sim::{
    CurrencyTier, Enemy, EnemyKind, GameEvent, GameState, Pickup, PickupKind, SessionPhase, tick,
};
use air_dodger::{BestRecords, Game, Settings, Tuning, Viewport};
use glam::Vec2;

fn running_state(seed: u64) -> GameState {
    let mut state = GameState::new(seed, Tuning::default(), Viewport::new(1280.0, 720.0));
    state.start(0.0);
    state.drain_events();
    state
}

/// Push every entity spawner far into the future
fn park_spawners(state: &mut GameState) {
    let t = &mut state.timers;
    for timer in [
        &mut t.enemy,
        &mut t.heart,
        &mut t.shield,
        &mut t.white,
        &mut t.gold,
        &mut t.platinum,
    ] {
        *timer = f64::MAX;
    }
}

fn enemy_at(state: &mut GameState, pos: Vec2, hp: u8, kind: EnemyKind) {
    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos,
        vel: Vec2::ZERO,
        size: 96.0,
        hp,
        kind,
    });
}

#[test]
fn twenty_seconds_reaches_wave_two() {
    let mut state = running_state(1);
    park_spawners(&mut state);
    let input = TickInput::default();

    let mut now = 0.0;
    while now <= 20_000.0 {
        now += FRAME_MS;
        tick(&mut state, &input, now);
    }

    assert_eq!(state.wave, 2);
    assert_eq!(state.next_wave_at, 40_000.0);
    assert_eq!(state.lives, 3);
    assert!(state.events.contains(&GameEvent::WaveReached(2)));
}

#[test]
fn paused_time_does_not_count_toward_waves() {
    let mut state = running_state(1);
    park_spawners(&mut state);
    let input = TickInput::default();

    tick(&mut state, &input, 10_000.0);
    state.pause(10_000.0);
    tick(&mut state, &input, 25_000.0);
    state.resume(25_000.0);

    tick(&mut state, &input, 34_000.0);
    assert_eq!(state.time_ms, 19_000.0);
    assert_eq!(state.wave, 1);

    tick(&mut state, &input, 35_500.0);
    assert_eq!(state.wave, 2);
}

#[test]
fn last_life_ends_run_and_records_bests() {
    let mut game = Game::new(
        5,
        Tuning::default(),
        Viewport::new(1280.0, 720.0),
        RecordingAudio::default(),
        MemoryStore {
            records: Some(BestRecords {
                best_time_secs: 10,
                best_score: 100,
            }),
            read_only: false,
        },
        Settings::default(),
    );
    game.start(0.0);
    let state = game.state_mut();
    park_spawners(state);
    state.lives = 1;
    state.score = 4;
    let pos = state.player.pos;
    enemy_at(state, pos, 1, EnemyKind::Normal);

    game.frame(15_000.0);

    assert_eq!(game.phase(), SessionPhase::Ended);
    assert_eq!(game.state().lives, 0);
    let result = game.last_result().copied().unwrap();
    assert_eq!(result.time_secs, 15);
    assert_eq!(result.score, 4);
    // Time beat the record, score did not
    assert_eq!(
        *game.bests(),
        BestRecords {
            best_time_secs: 15,
            best_score: 100,
        }
    );
    assert!(game.new_bests().time && !game.new_bests().score);
    assert!(game.audio().played.contains(&Cue::Hit));
    assert!(game.audio().played.contains(&Cue::GameOverStinger));

    // Nothing moves once the run is over
    let before = game.state().time_ms;
    game.frame(30_000.0);
    assert_eq!(game.state().time_ms, before);
}

#[test]
fn shield_absorbs_one_hit() {
    let mut state = running_state(2);
    park_spawners(&mut state);
    state.shield_until = Some(8_000.0);
    let pos = state.player.pos;
    enemy_at(&mut state, pos, 1, EnemyKind::Normal);

    tick(&mut state, &TickInput::default(), 100.0);

    assert!(state.enemies.is_empty());
    assert!(!state.shield_active());
    assert_eq!(state.lives, 3);
    assert!(state.events.contains(&GameEvent::Cue(Cue::ShieldBreak)));
}

#[test]
fn platinum_token_scores_ten_with_notice() {
    let mut state = running_state(3);
    park_spawners(&mut state);
    let id = state.next_entity_id();
    let pos = state.player.pos;
    state.pickups.push(Pickup {
        id,
        kind: PickupKind::Currency(CurrencyTier::Platinum),
        pos,
        size: 40.0,
        created_at: 0.0,
    });

    tick(&mut state, &TickInput::default(), 50.0);

    assert_eq!(state.score, 10);
    assert!(state.pickups.is_empty());
    assert_eq!(state.notices.len(), 1);
    assert_eq!(state.notices[0].value, 10);
    assert_eq!(state.notices[0].pos, state.player.pos);
}

#[test]
fn pausing_mid_run_changes_nothing_but_wall_time() {
    let input = TickInput {
        autopilot: true,
        ..TickInput::default()
    };
    let mut straight = running_state(77);
    let mut paused = running_state(77);

    let ticks = 2_400;
    let pause_at = 900;
    let pause_len = 7_000.0;

    // Whole-millisecond steps keep the shifted timestamps exact
    for i in 1..=ticks {
        let now = i as f64 * 16.0;
        tick(&mut straight, &input, now);

        if i == pause_at {
            tick(&mut paused, &input, now);
            paused.pause(now);
            tick(&mut paused, &input, now + pause_len / 2.0);
            paused.resume(now + pause_len);
        } else if i < pause_at {
            tick(&mut paused, &input, now);
        } else {
            tick(&mut paused, &input, now + pause_len);
        }
    }

    assert_eq!(straight.phase, paused.phase);
    assert_eq!(straight.time_ms, paused.time_ms);
    assert_eq!(straight.wave, paused.wave);
    assert_eq!(straight.score, paused.score);
    assert_eq!(straight.lives, paused.lives);
    assert_eq!(straight.player.pos, paused.player.pos);
    let layout = |s: &GameState| s.enemies.iter().map(|e| (e.id, e.pos)).collect::<Vec<_>>();
    assert_eq!(layout(&straight), layout(&paused));
}

#[test]
fn same_seed_same_run() {
    let input = TickInput {
        autopilot: true,
        ..TickInput::default()
    };
    let mut a = running_state(2024);
    let mut b = running_state(2024);
    for i in 1..=1_800 {
        let now = i as f64 * FRAME_MS;
        tick(&mut a, &input, now);
        tick(&mut b, &input, now);
    }
    assert_eq!(a.score, b.score);
    assert_eq!(a.lives, b.lives);
    assert_eq!(a.enemies.len(), b.enemies.len());
    assert_eq!(a.pickups.len(), b.pickups.len());
    assert_eq!(a.drain_events(), b.drain_events());
}
