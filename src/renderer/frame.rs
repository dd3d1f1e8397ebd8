//! Draw list primitives
//!
//! A [`Frame`] is an ordered list of commands a painter replays onto its
//! surface. Coordinates are viewport pixels, origin top-left.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color, components in 0-1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GOLD: Color = Color::rgb(255, 215, 0);
    pub const EMERALD: Color = Color::rgb(0x50, 0xc8, 0x78);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const TEAL: Color = Color::rgb(0x00, 0xff, 0xcc);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const RED: Color = Color::rgb(255, 64, 64);

    /// CSS color string for canvas painters
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            self.a
        )
    }
}

/// Bitmap sprites the painter must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Player,
    Enemy,
    Heart,
    Shield,
}

impl Sprite {
    pub const ALL: [Sprite; 4] = [Sprite::Player, Sprite::Enemy, Sprite::Heart, Sprite::Shield];

    /// Asset path relative to the page
    pub fn asset_path(self) -> &'static str {
        match self {
            Sprite::Player => "assets/player.png",
            Sprite::Enemy => "assets/enemy.png",
            Sprite::Heart => "assets/heart.png",
            Sprite::Shield => "assets/shield.png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Wipe the surface
    Clear,
    /// Blit a square sprite with its top-left at `pos`
    Sprite {
        sprite: Sprite,
        pos: Vec2,
        size: f32,
        alpha: f32,
    },
    /// Stroked circle
    Ring {
        center: Vec2,
        radius: f32,
        line_width: f32,
        color: Color,
    },
    /// Single line of text; `pos` is the baseline anchor
    Text {
        text: String,
        pos: Vec2,
        font_px: f32,
        color: Color,
        align: TextAlign,
    },
    /// Dim the whole surface (menus)
    Veil { alpha: f32 },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::with_capacity(64),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Fully opaque sprite
    pub fn sprite(&mut self, sprite: Sprite, pos: Vec2, size: f32) {
        self.push(DrawCommand::Sprite {
            sprite,
            pos,
            size,
            alpha: 1.0,
        });
    }

    pub fn text(
        &mut self,
        text: impl Into<String>,
        pos: Vec2,
        font_px: f32,
        color: Color,
        align: TextAlign,
    ) {
        self.push(DrawCommand::Text {
            text: text.into(),
            pos,
            font_px,
            color,
            align,
        });
    }

    /// All text lines in draw order (tests and headless logging)
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn count_sprites(&self, sprite: Sprite) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { sprite: s, .. } if *s == sprite))
            .count()
    }
}
