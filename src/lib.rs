//! Air Dodger - a single-screen arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, session state)
//! - `renderer`: Draw-list generation, independent of any graphics API
//! - `game`: Host glue driving the simulation, audio cues and best records
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod autopilot;
pub mod error;
pub mod game;
pub mod highscores;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::PersistError;
pub use game::Game;
pub use highscores::{BestRecords, BestStore};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Lives at session start, also the cap for heart pickups
    pub const MAX_LIVES: u8 = 3;

    /// Fraction of the remaining distance the player covers each tick
    pub const PLAYER_EASE: f32 = 0.08;

    /// Entities further than this outside the viewport are discarded
    pub const BOUNDS_MARGIN: f32 = 200.0;

    /// Floating score notices fade out over this many milliseconds
    pub const NOTICE_LIFETIME_MS: f64 = 1000.0;
    /// Vertical offset of a notice above its anchor
    pub const NOTICE_OFFSET_Y: f32 = 10.0;
    /// Pixels a notice rises over its lifetime
    pub const NOTICE_RISE: f32 = 30.0;

    /// Fallback frame duration for headless drivers (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}

/// Visible play area in pixels
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a point into `[0, width] x [0, height]`
    #[inline]
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(0.0, self.width.max(0.0)), p.y.clamp(0.0, self.height.max(0.0)))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Center of a square sprite whose top-left corner is `pos`
#[inline]
pub fn square_center(pos: Vec2, size: f32) -> Vec2 {
    pos + Vec2::splat(size / 2.0)
}
