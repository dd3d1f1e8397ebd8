//! Heads-up display values

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LIVES;
use crate::sim::GameState;

/// Snapshot of everything the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub lives: u8,
    pub max_lives: u8,
    pub time_secs: u64,
    pub score: u64,
    pub wave: u32,
    pub shield_active: bool,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            lives: state.lives,
            max_lives: MAX_LIVES,
            time_secs: state.survival_secs(),
            score: state.score,
            wave: state.wave,
            shield_active: state.shield_active(),
        }
    }

    /// One flag per life slot, filled slots first
    pub fn life_slots(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.max_lives).map(|slot| slot < self.lives)
    }

    pub fn time_label(&self) -> String {
        format!("TIME: {}s", self.time_secs)
    }

    pub fn score_label(&self) -> String {
        format!("SCORE: {}", self.score)
    }

    pub fn wave_label(&self) -> String {
        format!("WAVE {}", self.wave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::tuning::Tuning;

    #[test]
    fn test_hud_reads_state() {
        let mut state = GameState::new(1, Tuning::default(), Viewport::default());
        state.start(0.0);
        state.lives = 2;
        state.score = 15;
        state.time_ms = 12_900.0;
        state.shield_until = Some(20_000.0);

        let hud = Hud::from_state(&state);
        assert_eq!(hud.time_label(), "TIME: 12s");
        assert_eq!(hud.score_label(), "SCORE: 15");
        assert_eq!(hud.wave_label(), "WAVE 1");
        assert!(hud.shield_active);
        assert_eq!(hud.life_slots().collect::<Vec<_>>(), vec![true, true, false]);
    }
}
