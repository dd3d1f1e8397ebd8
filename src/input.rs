//! Pointer input tracking
//!
//! Hosts report either relative deltas (pointer lock) or absolute positions.
//! Both end up as a target point clamped to the viewport.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Viewport;

/// One pointer report from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerMotion {
    /// Movement delta while the pointer is locked
    Relative { dx: f32, dy: f32 },
    /// Position in viewport coordinates
    Absolute { x: f32, y: f32 },
}

/// Fold a motion report into the current target
pub fn apply_motion(target: Vec2, motion: PointerMotion, viewport: &Viewport) -> Vec2 {
    let raw = match motion {
        PointerMotion::Relative { dx, dy } => target + Vec2::new(dx, dy),
        PointerMotion::Absolute { x, y } => Vec2::new(x, y),
    };
    viewport.clamp_point(raw)
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer reports received since the last tick, oldest first
    pub motions: Vec<PointerMotion>,
    /// Autopilot override; replaces pointer input when set
    pub autopilot: bool,
}

impl TickInput {
    pub fn push(&mut self, motion: PointerMotion) {
        self.motions.push(motion);
    }

    /// Drop consumed one-shot reports, keep sticky flags
    pub fn clear_motions(&mut self) {
        self.motions.clear();
    }
}
