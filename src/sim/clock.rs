//! Pause-aware session clock
//!
//! Converts host wall-clock timestamps (milliseconds) into game time: the
//! unpaused milliseconds since the session started. Every timer in the
//! simulation reads game time, so a pause never advances anything.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionClock {
    /// Wall-clock time the session started
    started_at: f64,
    /// Wall-clock time of the pause in progress, if any
    paused_at: Option<f64>,
    /// Sum of all completed pauses
    paused_total: f64,
}

impl SessionClock {
    /// Start counting from `now`
    pub fn started(now: f64) -> Self {
        Self {
            started_at: now,
            paused_at: None,
            paused_total: 0.0,
        }
    }

    /// Freeze game time at `now`. No-op if already paused.
    pub fn pause(&mut self, now: f64) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Resume; the pause length is folded into `paused_total`
    pub fn resume(&mut self, now: f64) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += (now - paused_at).max(0.0);
        }
    }

    /// Total paused duration as of `now`, including a pause in progress
    pub fn paused_duration(&self, now: f64) -> f64 {
        let current = self.paused_at.map(|p| (now - p).max(0.0)).unwrap_or(0.0);
        self.paused_total + current
    }

    /// Unpaused milliseconds since start
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.started_at - self.paused_duration(now)).max(0.0)
    }
}
