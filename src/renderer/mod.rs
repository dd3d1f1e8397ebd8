//! Rendering module
//!
//! Produces a backend-agnostic [`Frame`] from game state. Painters (the web
//! canvas, headless drivers) replay it.

pub mod frame;
pub mod hud;
pub mod scene;

pub use frame::{Color, DrawCommand, Frame, Sprite, TextAlign};
pub use hud::Hud;
pub use scene::{overlay, render};

/// Which optional HUD layers to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub wave_banner: bool,
    pub floating_scores: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wave_banner: true,
            floating_scores: true,
        }
    }
}
