//! Data-driven game balance
//!
//! Every knob the spawner and updaters read lives here so a balance pass
//! can be done from JSON without touching simulation code.

use serde::{Deserialize, Serialize};

use crate::error::PersistError;

/// A uniform delay window `[min, min + spread)` in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayWindow {
    pub min_ms: f64,
    pub spread_ms: f64,
}

impl DelayWindow {
    pub const fn new(min_ms: f64, spread_ms: f64) -> Self {
        Self { min_ms, spread_ms }
    }

    /// Map a unit sample `u` in `[0, 1)` into the window
    #[inline]
    pub fn sample(&self, u: f64) -> f64 {
        self.min_ms + u * self.spread_ms
    }
}

/// One step of the enemy spawn-rate ramp: once survival exceeds
/// `after_secs`, enemies spawn every `delay_ms`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyDelayStep {
    pub after_secs: f64,
    pub delay_ms: f64,
}

/// Wave-gated chance of an enemy spawning as a special variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariantChance {
    pub min_wave: u32,
    pub chance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_size: f32,

    // === Waves ===
    /// Unpaused milliseconds per wave
    pub wave_interval_ms: f64,

    // === Enemies ===
    pub enemy_size: f32,
    /// Spawn distance beyond the screen edge
    pub enemy_spawn_offset: f32,
    /// Base speed in px/tick at t = 0
    pub enemy_base_speed: f32,
    /// Seconds of survival per +1 px/tick of base speed
    pub enemy_speed_ramp_secs: f32,
    pub enemy_initial_delay_ms: f64,
    /// Ordered from the longest survival threshold down
    pub enemy_delay_steps: Vec<EnemyDelayStep>,
    pub fast: VariantChance,
    pub tank: VariantChance,
    pub zigzag: VariantChance,
    pub seeker: VariantChance,
    pub fast_size: f32,
    pub fast_speed_mult: f32,
    pub tank_size: f32,
    pub tank_speed_mult: f32,
    pub tank_hp: u8,
    pub tank_bonus: u64,
    pub zigzag_phase_max: f32,
    /// `(min, spread)` pixels
    pub zigzag_amplitude: (f32, f32),
    /// `(min, spread)` radians per millisecond
    pub zigzag_frequency: (f32, f32),
    pub seeker_base_speed: f32,
    /// Seconds of survival per +1 of the global game speed
    pub game_speed_ramp_secs: f32,

    // === Pickups ===
    pub heart_size: f32,
    pub heart_ttl_ms: f64,
    pub heart_delay: DelayWindow,
    pub shield_size: f32,
    pub shield_ttl_ms: f64,
    pub shield_delay: DelayWindow,
    pub shield_duration_ms: f64,
    pub currency_size: f32,
    pub currency_ttl_ms: f64,
    pub white_delay: DelayWindow,
    pub gold_delay: DelayWindow,
    pub gold_min_wave: u32,
    pub platinum_delay: DelayWindow,
    pub platinum_min_wave: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: 96.0,

            wave_interval_ms: 20_000.0,

            enemy_size: 96.0,
            enemy_spawn_offset: 100.0,
            enemy_base_speed: 1.5,
            enemy_speed_ramp_secs: 30.0,
            enemy_initial_delay_ms: 1800.0,
            enemy_delay_steps: vec![
                EnemyDelayStep { after_secs: 90.0, delay_ms: 500.0 },
                EnemyDelayStep { after_secs: 60.0, delay_ms: 800.0 },
                EnemyDelayStep { after_secs: 40.0, delay_ms: 1100.0 },
                EnemyDelayStep { after_secs: 20.0, delay_ms: 1400.0 },
            ],
            fast: VariantChance { min_wave: 3, chance: 0.3 },
            tank: VariantChance { min_wave: 5, chance: 0.25 },
            zigzag: VariantChance { min_wave: 7, chance: 0.2 },
            seeker: VariantChance { min_wave: 10, chance: 0.2 },
            fast_size: 70.0,
            fast_speed_mult: 2.0,
            tank_size: 130.0,
            tank_speed_mult: 0.5,
            tank_hp: 2,
            tank_bonus: 3,
            zigzag_phase_max: 100.0,
            zigzag_amplitude: (50.0, 30.0),
            zigzag_frequency: (0.05, 0.03),
            seeker_base_speed: 2.5,
            game_speed_ramp_secs: 20.0,

            heart_size: 30.0,
            heart_ttl_ms: 5000.0,
            heart_delay: DelayWindow::new(8000.0, 7000.0),
            shield_size: 36.0,
            shield_ttl_ms: 10_000.0,
            shield_delay: DelayWindow::new(25_000.0, 15_000.0),
            shield_duration_ms: 10_000.0,
            currency_size: 40.0,
            currency_ttl_ms: 5000.0,
            white_delay: DelayWindow::new(1000.0, 2000.0),
            gold_delay: DelayWindow::new(6000.0, 4000.0),
            gold_min_wave: 3,
            platinum_delay: DelayWindow::new(10_000.0, 10_000.0),
            platinum_min_wave: 7,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Enemy spawn delay for a given survival time in seconds
    pub fn enemy_delay(&self, survived_secs: f64) -> f64 {
        self.enemy_delay_steps
            .iter()
            .find(|step| survived_secs > step.after_secs)
            .map(|step| step.delay_ms)
            .unwrap_or(self.enemy_initial_delay_ms)
    }

    /// Enemy base speed (px/tick) after `survived_secs`
    pub fn enemy_speed(&self, survived_secs: f32) -> f32 {
        self.enemy_base_speed + survived_secs / self.enemy_speed_ramp_secs
    }

    /// Global game speed after `survived_secs`
    pub fn game_speed(&self, survived_secs: f32) -> f32 {
        1.0 + survived_secs / self.game_speed_ramp_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_delay_steps() {
        let t = Tuning::default();
        assert_eq!(t.enemy_delay(0.0), 1800.0);
        assert_eq!(t.enemy_delay(20.0), 1800.0);
        assert_eq!(t.enemy_delay(20.5), 1400.0);
        assert_eq!(t.enemy_delay(41.0), 1100.0);
        assert_eq!(t.enemy_delay(61.0), 800.0);
        assert_eq!(t.enemy_delay(90.0), 800.0);
        assert_eq!(t.enemy_delay(120.0), 500.0);
    }

    #[test]
    fn test_delay_window_bounds() {
        let w = DelayWindow::new(8000.0, 7000.0);
        assert_eq!(w.sample(0.0), 8000.0);
        assert!(w.sample(0.9999) < 15_000.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "wave_interval_ms": 5000.0, "tank_hp": 4 }"#).unwrap();
        assert_eq!(t.wave_interval_ms, 5000.0);
        assert_eq!(t.tank_hp, 4);
        assert_eq!(t.player_size, 96.0);
        assert_eq!(t.enemy_delay_steps.len(), 4);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Tuning::from_json("{ nope").unwrap_err();
        assert!(matches!(err, PersistError::Parse(_)));
    }
}
