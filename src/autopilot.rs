//! Idle/demo mode - a simple steering policy that plays the game
//!
//! Produces a pointer target each tick: flee the closest threatening enemy,
//! otherwise go grab the nearest useful pickup, otherwise drift to center.

use glam::Vec2;

use crate::consts::MAX_LIVES;
use crate::sim::{Circle, GameState, PickupKind};

/// Enemies closer than this (edge to edge) are treated as threats
const THREAT_RANGE: f32 = 160.0;
/// How far ahead of the player the flee target is placed
const FLEE_REACH: f32 = 240.0;

pub fn steer(state: &GameState) -> Vec2 {
    let me = state.player.center();
    let my_radius = state.player.radius();

    // Find the most dangerous enemy (closest edge-to-edge)
    let threat = state
        .enemies
        .iter()
        .map(|e| (e, e.center().distance(me) - e.radius() - my_radius))
        .filter(|(_, gap)| *gap < THREAT_RANGE)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    if let Some((enemy, _)) = threat.filter(|_| !state.shield_active()) {
        let away = (me - enemy.center()).normalize_or_zero();
        // Sidestep if the threat sits exactly on top of us
        let away = if away == Vec2::ZERO { Vec2::X } else { away };
        // Bias toward the middle so we don't get pinned in a corner
        let to_center = (state.viewport.center() - me).normalize_or_zero() * 0.35;
        let dir = (away + to_center).normalize_or_zero();
        return state.viewport.clamp_point(me + dir * FLEE_REACH);
    }

    let wanted = |kind: PickupKind| match kind {
        PickupKind::Heart => state.lives < MAX_LIVES,
        PickupKind::Shield => !state.shield_active(),
        PickupKind::Currency(_) => true,
    };

    state
        .pickups
        .iter()
        .filter(|p| wanted(p.kind))
        .map(|p| p.center())
        .min_by(|a, b| {
            a.distance(me)
                .partial_cmp(&b.distance(me))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or_else(|| state.viewport.center())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::sim::{CurrencyTier, Enemy, EnemyKind, Pickup};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        let mut s = GameState::new(3, Tuning::default(), Viewport::new(1000.0, 800.0));
        s.start(0.0);
        s
    }

    #[test]
    fn test_idle_drifts_to_center() {
        let s = state();
        assert_eq!(steer(&s), Vec2::new(500.0, 400.0));
    }

    #[test]
    fn test_flees_nearby_enemy() {
        let mut s = state();
        let me = s.player.center();
        s.enemies.push(Enemy {
            id: 1,
            pos: s.player.pos + Vec2::new(150.0, 0.0),
            vel: Vec2::ZERO,
            size: 96.0,
            hp: 1,
            kind: EnemyKind::Normal,
        });
        let target = steer(&s);
        assert!(target.x < me.x, "should move away from an enemy on the right");
    }

    #[test]
    fn test_ignores_enemy_when_shielded() {
        let mut s = state();
        s.shield_until = Some(5_000.0);
        s.enemies.push(Enemy {
            id: 1,
            pos: s.player.pos + Vec2::new(150.0, 0.0),
            vel: Vec2::ZERO,
            size: 96.0,
            hp: 1,
            kind: EnemyKind::Normal,
        });
        assert_eq!(steer(&s), s.viewport.center());
    }

    #[test]
    fn test_skips_heart_at_full_health() {
        let mut s = state();
        s.pickups.push(Pickup {
            id: 1,
            kind: PickupKind::Heart,
            pos: Vec2::new(100.0, 100.0),
            size: 30.0,
            created_at: 0.0,
        });
        s.pickups.push(Pickup {
            id: 2,
            kind: PickupKind::Currency(CurrencyTier::White),
            pos: Vec2::new(850.0, 750.0),
            size: 40.0,
            created_at: 0.0,
        });
        assert_eq!(steer(&s), Vec2::new(870.0, 770.0));

        s.lives = 2;
        assert_eq!(steer(&s), Vec2::new(115.0, 115.0));
    }
}
