//! Spawn scheduling
//!
//! Each category keeps its own next-spawn time in game time. Once a timer
//! is passed one entity is created and the timer is pushed out by a fresh
//! delay drawn from that category's window.

use glam::Vec2;
use rand::Rng;

use super::state::{CurrencyTier, Enemy, EnemyKind, GameEvent, GameState, Pickup, PickupKind};
use crate::Viewport;
use crate::tuning::Tuning;

/// Enemy variant before per-type parameters are rolled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Normal,
    Fast,
    Tank,
    Zigzag,
    Seeker,
}

/// Roll the enemy variant for `wave`.
///
/// Each gated trial is independent and evaluated in a fixed order; a later
/// success overwrites an earlier one, so the last unlocked variant wins
/// ties. Trials whose wave gate is closed do not consume randomness.
pub fn roll_variant(rng: &mut impl Rng, wave: u32, tuning: &Tuning) -> Variant {
    let trials = [
        (tuning.fast, Variant::Fast),
        (tuning.tank, Variant::Tank),
        (tuning.zigzag, Variant::Zigzag),
        (tuning.seeker, Variant::Seeker),
    ];

    let mut variant = Variant::Normal;
    for (gate, candidate) in trials {
        if wave >= gate.min_wave && rng.random::<f64>() < gate.chance {
            variant = candidate;
        }
    }
    variant
}

/// Pick a point just outside a random screen edge
fn edge_point(rng: &mut impl Rng, viewport: &Viewport, offset: f32) -> Vec2 {
    let edge = rng.random_range(0..4u8);
    let along: f32 = rng.random();
    match edge {
        0 => Vec2::new(-offset, along * viewport.height),
        1 => Vec2::new(viewport.width + offset, along * viewport.height),
        2 => Vec2::new(along * viewport.width, -offset),
        _ => Vec2::new(along * viewport.width, viewport.height + offset),
    }
}

/// Build an enemy at a random edge aimed at the player
pub fn spawn_enemy(state: &mut GameState) {
    let tuning = &state.tuning;
    let survived_secs = (state.time_ms / 1000.0) as f32;
    let speed = tuning.enemy_speed(survived_secs);

    let pos = edge_point(&mut state.rng, &state.viewport, tuning.enemy_spawn_offset);
    let to_player = state.player.pos - pos;
    let heading = to_player.y.atan2(to_player.x);
    let mut vel = Vec2::new(heading.cos(), heading.sin()) * speed;

    let mut size = tuning.enemy_size;
    let mut hp = 1;
    let kind = match roll_variant(&mut state.rng, state.wave, tuning) {
        Variant::Normal => EnemyKind::Normal,
        Variant::Fast => {
            size = tuning.fast_size;
            vel *= tuning.fast_speed_mult;
            EnemyKind::Fast
        }
        Variant::Tank => {
            size = tuning.tank_size;
            vel *= tuning.tank_speed_mult;
            hp = tuning.tank_hp;
            EnemyKind::Tank
        }
        Variant::Zigzag => {
            let rng = &mut state.rng;
            let phase = rng.random::<f32>() * tuning.zigzag_phase_max;
            let (amp_min, amp_spread) = tuning.zigzag_amplitude;
            let (freq_min, freq_spread) = tuning.zigzag_frequency;
            EnemyKind::Zigzag {
                base_y: pos.y,
                phase,
                amplitude: amp_min + rng.random::<f32>() * amp_spread,
                frequency: freq_min + rng.random::<f32>() * freq_spread,
            }
        }
        Variant::Seeker => EnemyKind::Seeker,
    };

    let id = state.next_entity_id();
    log::debug!("Spawned {} enemy #{} at ({:.0}, {:.0})", kind.label(), id, pos.x, pos.y);
    state.enemies.push(Enemy {
        id,
        pos,
        vel,
        size,
        hp,
        kind,
    });
}

/// Drop a pickup at a uniformly random on-screen position
pub fn spawn_pickup(state: &mut GameState, kind: PickupKind) {
    let size = kind.size(&state.tuning);
    let max_x = (state.viewport.width - size).max(0.0);
    let max_y = (state.viewport.height - size).max(0.0);
    let pos = Vec2::new(
        state.rng.random::<f32>() * max_x,
        state.rng.random::<f32>() * max_y,
    );
    let id = state.next_entity_id();
    log::debug!("Spawned {:?} #{} at ({:.0}, {:.0})", kind, id, pos.x, pos.y);
    state.pickups.push(Pickup {
        id,
        kind,
        pos,
        size,
        created_at: state.time_ms,
    });
}

/// Fire every expired timer and advance the wave counter.
///
/// `state.time_ms` must already hold the current game time.
pub fn run_spawners(state: &mut GameState) {
    let now = state.time_ms;

    if now > state.timers.heart {
        spawn_pickup(state, PickupKind::Heart);
        let u: f64 = state.rng.random();
        state.timers.heart = now + state.tuning.heart_delay.sample(u);
    }

    if now > state.timers.shield {
        spawn_pickup(state, PickupKind::Shield);
        let u: f64 = state.rng.random();
        state.timers.shield = now + state.tuning.shield_delay.sample(u);
    }

    if now > state.timers.enemy {
        spawn_enemy(state);
        state.timers.enemy = now + state.tuning.enemy_delay(now / 1000.0);
    }

    if now > state.next_wave_at {
        state.wave += 1;
        state.next_wave_at += state.tuning.wave_interval_ms;
        state.events.push(GameEvent::WaveReached(state.wave));
        log::info!("Wave {} reached", state.wave);
    }

    if now > state.timers.white {
        spawn_pickup(state, PickupKind::Currency(CurrencyTier::White));
        let u: f64 = state.rng.random();
        state.timers.white = now + state.tuning.white_delay.sample(u);
    }

    if state.wave >= state.tuning.gold_min_wave && now > state.timers.gold {
        spawn_pickup(state, PickupKind::Currency(CurrencyTier::Gold));
        let u: f64 = state.rng.random();
        state.timers.gold = now + state.tuning.gold_delay.sample(u);
    }

    if state.wave >= state.tuning.platinum_min_wave && now > state.timers.platinum {
        spawn_pickup(state, PickupKind::Currency(CurrencyTier::Platinum));
        let u: f64 = state.rng.random();
        state.timers.platinum = now + state.tuning.platinum_delay.sample(u);
    }
}
