//! Browser backends: canvas painter and Web Audio cue player
//!
//! Sound effects are generated procedurally, no audio files needed.

use std::collections::HashMap;
use std::f64::consts::TAU;

use web_sys::{
    AudioContext, CanvasRenderingContext2d, GainNode, HtmlImageElement, OscillatorNode,
    OscillatorType,
};

use crate::audio::{AudioSink, Cue, Mix};
use crate::renderer::{DrawCommand, Frame, Sprite, TextAlign};

const FONT_FAMILY: &str = "'Press Start 2P', monospace";
const BACKGROUND: &str = "#0b0f1a";

/// Replays [`Frame`]s onto a 2D canvas context
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    sprites: HashMap<Sprite, HtmlImageElement>,
}

impl CanvasPainter {
    /// Start loading every sprite; missing images draw as placeholders
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        let mut sprites = HashMap::new();
        for sprite in Sprite::ALL {
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(sprite.asset_path());
                    sprites.insert(sprite, img);
                }
                Err(_) => log::warn!("Could not create image for {:?}", sprite),
            }
        }
        Self { ctx, sprites }
    }

    pub fn paint(&self, frame: &Frame) {
        let ctx = &self.ctx;
        for command in &frame.commands {
            match command {
                DrawCommand::Clear => {
                    ctx.set_global_alpha(1.0);
                    ctx.set_fill_style_str(BACKGROUND);
                    ctx.fill_rect(0.0, 0.0, frame.width as f64, frame.height as f64);
                }
                DrawCommand::Sprite {
                    sprite,
                    pos,
                    size,
                    alpha,
                } => {
                    let (x, y, s) = (pos.x as f64, pos.y as f64, *size as f64);
                    ctx.set_global_alpha(*alpha as f64);
                    match self.sprites.get(sprite).filter(|img| img.complete()) {
                        Some(img) => {
                            ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, y, s, s)
                                .ok();
                        }
                        None => {
                            ctx.set_fill_style_str(placeholder_color(*sprite));
                            ctx.fill_rect(x, y, s, s);
                        }
                    }
                    ctx.set_global_alpha(1.0);
                }
                DrawCommand::Ring {
                    center,
                    radius,
                    line_width,
                    color,
                } => {
                    ctx.set_global_alpha(color.a as f64);
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(*line_width as f64);
                    ctx.begin_path();
                    ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                        .ok();
                    ctx.stroke();
                    ctx.set_global_alpha(1.0);
                }
                DrawCommand::Text {
                    text,
                    pos,
                    font_px,
                    color,
                    align,
                } => {
                    ctx.set_global_alpha(color.a.clamp(0.0, 1.0) as f64);
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.set_font(&format!("{}px {}", font_px, FONT_FAMILY));
                    ctx.set_text_align(match align {
                        TextAlign::Left => "left",
                        TextAlign::Center => "center",
                    });
                    ctx.fill_text(text, pos.x as f64, pos.y as f64).ok();
                    ctx.set_global_alpha(1.0);
                }
                DrawCommand::Veil { alpha } => {
                    ctx.set_global_alpha(*alpha as f64);
                    ctx.set_fill_style_str("#000");
                    ctx.fill_rect(0.0, 0.0, frame.width as f64, frame.height as f64);
                    ctx.set_global_alpha(1.0);
                }
            }
        }
    }
}

fn placeholder_color(sprite: Sprite) -> &'static str {
    match sprite {
        Sprite::Player => "#00ffcc",
        Sprite::Enemy => "#ff4040",
        Sprite::Heart => "#ff6fa8",
        Sprite::Shield => "#00ffff",
    }
}

/// Web Audio cue player
pub struct WebAudio {
    ctx: Option<AudioContext>,
    mix: Mix,
    /// Oscillators of the running intro loop
    music: Vec<OscillatorNode>,
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudio {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            mix: Mix::default(),
            music: Vec::new(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Short enveloped notes, `step` seconds apart
    fn notes(
        ctx: &AudioContext,
        freqs: &[f32],
        step: f64,
        len: f64,
        osc_type: OscillatorType,
        vol: f32,
    ) {
        for (i, freq) in freqs.iter().enumerate() {
            let Some((osc, gain)) = Self::create_osc(ctx, *freq, osc_type) else {
                continue;
            };
            let t = ctx.current_time() + i as f64 * step;
            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, t + len).ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + len + 0.05).ok();
        }
    }

    /// Frequency sweep on a single oscillator
    fn sweep(ctx: &AudioContext, from: f32, to: f32, len: f64, osc_type: OscillatorType, vol: f32) {
        let Some((osc, gain)) = Self::create_osc(ctx, from, osc_type) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.01, t + len).ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency().exponential_ramp_to_value_at_time(to, t + len).ok();
        osc.start().ok();
        osc.stop_with_when(t + len + 0.05).ok();
    }

    /// Slow arpeggio scheduled far ahead; cut short by `stop_music`
    fn start_intro(&mut self, ctx: &AudioContext, vol: f32) {
        const PATTERN: [f32; 8] = [220.0, 277.2, 329.6, 440.0, 329.6, 277.2, 246.9, 293.7];
        const STEP: f64 = 0.4;
        const BARS: usize = 40;

        let Some((osc, gain)) = Self::create_osc(ctx, PATTERN[0], OscillatorType::Triangle) else {
            return;
        };
        let t0 = ctx.current_time();
        gain.gain().set_value_at_time(vol * 0.15, t0).ok();
        for (i, freq) in PATTERN.iter().cycle().take(PATTERN.len() * BARS).enumerate() {
            osc.frequency().set_value_at_time(*freq, t0 + i as f64 * STEP).ok();
        }
        osc.start().ok();
        self.music.push(osc);
    }
}

impl AudioSink for WebAudio {
    fn play(&mut self, cue: Cue) {
        let vol = self.mix.gain(cue);
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.ctx.clone() else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        use OscillatorType::{Sawtooth, Sine, Square, Triangle};
        match cue {
            Cue::Start => Self::sweep(&ctx, 200.0, 600.0, 0.2, Triangle, vol * 0.3),
            Cue::Hit => Self::sweep(&ctx, 180.0, 50.0, 0.25, Sawtooth, vol * 0.4),
            Cue::Heal => Self::notes(&ctx, &[523.3, 659.3, 784.0], 0.07, 0.15, Sine, vol * 0.3),
            Cue::Score => Self::notes(&ctx, &[600.0, 800.0, 1000.0], 0.08, 0.15, Sine, vol * 0.25),
            Cue::ShieldOn => Self::sweep(&ctx, 300.0, 900.0, 0.3, Square, vol * 0.15),
            Cue::ShieldBreak => {
                Self::notes(&ctx, &[1200.0, 900.0, 600.0], 0.05, 0.12, Square, vol * 0.2)
            }
            Cue::IntroLoop => {
                if self.music.is_empty() {
                    self.start_intro(&ctx, vol);
                }
            }
            Cue::GameOverStinger => {
                let freqs = [400.0, 350.0, 300.0, 200.0];
                Self::notes(&ctx, &freqs, 0.2, 0.3, Sine, vol * 0.3)
            }
        }
    }

    fn stop_music(&mut self) {
        for osc in self.music.drain(..) {
            osc.stop().ok();
        }
    }

    fn set_mix(&mut self, mix: Mix) {
        self.mix = mix;
    }
}
