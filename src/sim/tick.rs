//! Per-frame simulation tick
//!
//! Order within a tick: input, player, spawners, enemies, pickups, shield
//! expiry, notices. Rendering is a separate pass over the resulting state.

use super::collision::{collides, outside_bounds};
use super::spawn::run_spawners;
use super::state::{EnemyKind, FloatingScore, GameEvent, GameState, PickupKind, SessionPhase};
use crate::audio::Cue;
use crate::autopilot;
use crate::consts::*;
use crate::input::{TickInput, apply_motion};

/// Advance the session to wall-clock time `now` (milliseconds).
///
/// Does nothing unless the session is running.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    if state.phase != SessionPhase::Running {
        return;
    }

    state.time_ms = state.clock.elapsed(now);

    if input.autopilot {
        state.target = autopilot::steer(state);
    } else {
        for motion in &input.motions {
            state.target = apply_motion(state.target, *motion, &state.viewport);
        }
    }

    state.player.ease_toward(state.target, &state.viewport);
    state.game_speed = state.tuning.game_speed((state.time_ms / 1000.0) as f32);

    run_spawners(state);

    update_enemies(state);
    if state.phase == SessionPhase::Ended {
        return;
    }
    update_pickups(state);
    update_shield(state);
    update_notices(state);
}

/// Move enemies, drop strays, and resolve contact with the player
pub fn update_enemies(state: &mut GameState) {
    let time_ms = state.time_ms;
    let seeker_speed = state.tuning.seeker_base_speed + state.game_speed / 2.0;

    let enemies = std::mem::take(&mut state.enemies);
    let mut kept = Vec::with_capacity(enemies.len());
    let mut remaining = enemies.into_iter();

    for mut enemy in remaining.by_ref() {
        enemy.advance(state.player.pos, time_ms, seeker_speed);

        if outside_bounds(enemy.pos, &state.viewport) {
            log::debug!("Enemy #{} left the arena", enemy.id);
            continue;
        }

        if !collides(&enemy, &state.player) {
            kept.push(enemy);
            continue;
        }

        if state.shield_until.take().is_some() {
            log::debug!("Shield absorbed enemy #{}", enemy.id);
            state.events.push(GameEvent::Cue(Cue::ShieldBreak));
            continue;
        }

        if enemy.hp > 1 {
            enemy.hp -= 1;
            kept.push(enemy);
        } else if enemy.kind == EnemyKind::Tank {
            let bonus = state.tuning.tank_bonus;
            award(state, bonus);
        }

        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::LivesChanged(state.lives));
        state.events.push(GameEvent::Cue(Cue::Hit));
        log::debug!("Hit! {} lives left", state.lives);

        if state.lives == 0 {
            state.end();
            break;
        }
    }

    kept.extend(remaining);
    state.enemies = kept;
}

/// Expire old pickups and apply the ones the player touches
pub fn update_pickups(state: &mut GameState) {
    let time_ms = state.time_ms;
    let pickups = std::mem::take(&mut state.pickups);
    let mut kept = Vec::with_capacity(pickups.len());

    for pickup in pickups {
        if pickup.age(time_ms) > pickup.kind.ttl_ms(&state.tuning) {
            continue;
        }
        if collides(&pickup, &state.player) {
            collect(state, pickup.kind);
            continue;
        }
        kept.push(pickup);
    }

    state.pickups = kept;
}

/// Apply a touched pickup
fn collect(state: &mut GameState, kind: PickupKind) {
    match kind {
        PickupKind::Heart => {
            if state.lives < MAX_LIVES {
                state.lives += 1;
                state.events.push(GameEvent::LivesChanged(state.lives));
            }
            // Plays even at full health
            state.events.push(GameEvent::Cue(Cue::Heal));
        }
        PickupKind::Shield => {
            state.shield_until = Some(state.time_ms + state.tuning.shield_duration_ms);
            state.events.push(GameEvent::Cue(Cue::ShieldOn));
        }
        PickupKind::Currency(tier) => {
            award(state, tier.value());
            state.events.push(GameEvent::Cue(Cue::Score));
        }
    }
}

/// Add score and float a notice from the player's position
fn award(state: &mut GameState, value: u64) {
    state.score += value;
    state.notices.push(FloatingScore {
        pos: state.player.pos,
        value,
        created_at: state.time_ms,
    });
}

/// Drop the shield once its time is up
pub fn update_shield(state: &mut GameState) {
    if matches!(state.shield_until, Some(until) if state.time_ms > until) {
        state.shield_until = None;
        log::debug!("Shield expired");
    }
}

/// Retire notices that have fully faded
pub fn update_notices(state: &mut GameState) {
    let time_ms = state.time_ms;
    state
        .notices
        .retain(|n| time_ms - n.created_at <= NOTICE_LIFETIME_MS);
}
