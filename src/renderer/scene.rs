//! Scene assembly: game state in, draw list out

use glam::Vec2;

use super::frame::{Color, DrawCommand, Frame, Sprite, TextAlign};
use super::hud::Hud;
use super::RenderOptions;
use crate::consts::*;
use crate::highscores::BestRecords;
use crate::sim::{CurrencyTier, GameState, PickupKind, SessionPhase, SessionResult};
use crate::square_center;

const HUD_FONT_PX: f32 = 20.0;
const NOTICE_FONT_PX: f32 = 18.0;
const LIFE_ICON_SIZE: f32 = 28.0;
const LOST_LIFE_ALPHA: f32 = 0.25;
const SHIELD_RING_PAD: f32 = 6.0;
const SHIELD_RING_WIDTH: f32 = 4.0;

fn currency_color(tier: CurrencyTier) -> Color {
    match tier {
        CurrencyTier::White => Color::WHITE,
        CurrencyTier::Gold => Color::GOLD,
        CurrencyTier::Platinum => Color::EMERALD,
    }
}

/// Build the gameplay frame for the current state
pub fn render(state: &GameState, options: &RenderOptions) -> Frame {
    let vp = state.viewport;
    let mut frame = Frame::new(vp.width, vp.height);
    frame.push(DrawCommand::Clear);

    // Tokens first so everything else draws over them
    for pickup in &state.pickups {
        if let PickupKind::Currency(tier) = pickup.kind {
            let center = square_center(pickup.pos, pickup.size);
            frame.text(
                "$AIR",
                center,
                pickup.size * 0.45,
                currency_color(tier),
                TextAlign::Center,
            );
        }
    }
    let sprite_pickups = [
        (PickupKind::Heart, Sprite::Heart),
        (PickupKind::Shield, Sprite::Shield),
    ];
    for (kind, sprite) in sprite_pickups {
        for pickup in state.pickups.iter().filter(|p| p.kind == kind) {
            frame.sprite(sprite, pickup.pos, pickup.size);
        }
    }

    for enemy in &state.enemies {
        frame.sprite(Sprite::Enemy, enemy.pos, enemy.size);
    }

    let player = &state.player;
    frame.sprite(Sprite::Player, player.pos, player.size);
    if state.shield_active() {
        frame.push(DrawCommand::Ring {
            center: square_center(player.pos, player.size),
            radius: player.size / 2.0 + SHIELD_RING_PAD,
            line_width: SHIELD_RING_WIDTH,
            color: Color::CYAN,
        });
    }

    draw_hud(&mut frame, &Hud::from_state(state), options);

    if options.floating_scores {
        for notice in &state.notices {
            let age = notice.progress(state.time_ms);
            let pos = notice.pos - Vec2::new(0.0, NOTICE_OFFSET_Y + age * NOTICE_RISE);
            let color = Color {
                a: 1.0 - age,
                ..Color::YELLOW
            };
            frame.text(format!("+{}", notice.value), pos, NOTICE_FONT_PX, color, TextAlign::Left);
        }
    }

    frame
}

fn draw_hud(frame: &mut Frame, hud: &Hud, options: &RenderOptions) {
    let left = |y: f32| Vec2::new(40.0, y);
    frame.text(hud.time_label(), left(40.0), HUD_FONT_PX, Color::WHITE, TextAlign::Left);
    frame.text(hud.score_label(), left(70.0), HUD_FONT_PX, Color::WHITE, TextAlign::Left);
    if options.wave_banner {
        frame.text(
            hud.wave_label(),
            Vec2::new(frame.width / 2.0, 60.0),
            HUD_FONT_PX,
            Color::TEAL,
            TextAlign::Center,
        );
    }

    // One heart per life slot, top-right; lost lives are dimmed
    let mut x = frame.width - 40.0 - LIFE_ICON_SIZE * hud.max_lives as f32;
    for filled in hud.life_slots() {
        frame.push(DrawCommand::Sprite {
            sprite: Sprite::Heart,
            pos: Vec2::new(x, 24.0),
            size: LIFE_ICON_SIZE,
            alpha: if filled { 1.0 } else { LOST_LIFE_ALPHA },
        });
        x += LIFE_ICON_SIZE;
    }
}

/// Menu text drawn over the scene for non-running phases
pub fn overlay(
    frame: &mut Frame,
    phase: SessionPhase,
    last_result: Option<&SessionResult>,
    bests: &BestRecords,
) {
    let mid = Vec2::new(frame.width / 2.0, frame.height / 2.0);
    let line = |n: f32| mid + Vec2::new(0.0, n * 36.0);

    match phase {
        SessionPhase::Running => {}
        SessionPhase::NotStarted => {
            frame.push(DrawCommand::Veil { alpha: 0.6 });
            frame.text("AIR DODGER", line(-2.0), 40.0, Color::TEAL, TextAlign::Center);
            frame.text("CLICK TO START", line(0.0), 20.0, Color::WHITE, TextAlign::Center);
            frame.text(
                format!("BEST TIME: {}s   BEST SCORE: {}", bests.best_time_secs, bests.best_score),
                line(1.5),
                16.0,
                Color::WHITE,
                TextAlign::Center,
            );
        }
        SessionPhase::Paused => {
            frame.push(DrawCommand::Veil { alpha: 0.5 });
            frame.text("PAUSED", line(-0.5), 32.0, Color::WHITE, TextAlign::Center);
            frame.text("PRESS ESC TO RESUME", line(0.75), 16.0, Color::WHITE, TextAlign::Center);
        }
        SessionPhase::Ended => {
            frame.push(DrawCommand::Veil { alpha: 0.7 });
            frame.text("GAME OVER", line(-2.0), 40.0, Color::RED, TextAlign::Center);
            if let Some(result) = last_result {
                frame.text(
                    format!("TIME: {}s   SCORE: {}", result.time_secs, result.score),
                    line(-0.5),
                    20.0,
                    Color::WHITE,
                    TextAlign::Center,
                );
            }
            frame.text(
                format!("BEST TIME: {}s   BEST SCORE: {}", bests.best_time_secs, bests.best_score),
                line(0.5),
                16.0,
                Color::GOLD,
                TextAlign::Center,
            );
            frame.text("CLICK TO PLAY AGAIN", line(2.0), 20.0, Color::WHITE, TextAlign::Center);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::sim::{FloatingScore, Pickup};
    use crate::tuning::Tuning;

    fn running() -> GameState {
        let mut state = GameState::new(3, Tuning::default(), Viewport::new(800.0, 600.0));
        state.start(0.0);
        state.drain_events();
        state
    }

    fn pickup(state: &mut GameState, kind: PickupKind, pos: Vec2) {
        let id = state.next_entity_id();
        let size = kind.size(&state.tuning);
        state.pickups.push(Pickup {
            id,
            kind,
            pos,
            size,
            created_at: 0.0,
        });
    }

    #[test]
    fn test_draw_order_tokens_then_hearts_then_player() {
        let mut state = running();
        pickup(&mut state, PickupKind::Heart, Vec2::new(10.0, 10.0));
        pickup(&mut state, PickupKind::Currency(CurrencyTier::Gold), Vec2::new(50.0, 50.0));
        let frame = render(&state, &RenderOptions::default());

        let index_of = |pred: &dyn Fn(&DrawCommand) -> bool| frame.commands.iter().position(pred);
        let token = index_of(&|c| matches!(c, DrawCommand::Text { text, .. } if text == "$AIR"));
        let heart = index_of(&|c| matches!(c, DrawCommand::Sprite { sprite: Sprite::Heart, .. }));
        let player = index_of(&|c| matches!(c, DrawCommand::Sprite { sprite: Sprite::Player, .. }));
        assert!(token < heart && heart < player);
        assert!(matches!(frame.commands[0], DrawCommand::Clear));
    }

    #[test]
    fn test_token_colors_by_tier() {
        let mut state = running();
        pickup(&mut state, PickupKind::Currency(CurrencyTier::Platinum), Vec2::ZERO);
        let frame = render(&state, &RenderOptions::default());
        let color = frame.commands.iter().find_map(|c| match c {
            DrawCommand::Text { text, color, .. } if text == "$AIR" => Some(*color),
            _ => None,
        });
        assert_eq!(color, Some(Color::EMERALD));
    }

    #[test]
    fn test_shield_ring_only_when_active() {
        let mut state = running();
        let has_ring = |f: &Frame| f.commands.iter().any(|c| matches!(c, DrawCommand::Ring { .. }));
        assert!(!has_ring(&render(&state, &RenderOptions::default())));

        state.shield_until = Some(5_000.0);
        let frame = render(&state, &RenderOptions::default());
        let ring = frame.commands.iter().find_map(|c| match c {
            DrawCommand::Ring { radius, line_width, .. } => Some((*radius, *line_width)),
            _ => None,
        });
        assert_eq!(ring, Some((state.player.size / 2.0 + 6.0, 4.0)));
    }

    #[test]
    fn test_hud_text_and_wave_banner_toggle() {
        let mut state = running();
        state.score = 9;
        state.time_ms = 4_200.0;
        let frame = render(&state, &RenderOptions::default());
        let texts: Vec<_> = frame.texts().collect();
        assert!(texts.contains(&"TIME: 4s"));
        assert!(texts.contains(&"SCORE: 9"));
        assert!(texts.contains(&"WAVE 1"));

        let quiet = RenderOptions {
            wave_banner: false,
            ..RenderOptions::default()
        };
        assert!(!render(&state, &quiet).texts().any(|t| t.starts_with("WAVE")));
    }

    #[test]
    fn test_lives_drawn_as_hearts() {
        let mut state = running();
        state.lives = 2;
        let frame = render(&state, &RenderOptions::default());
        assert_eq!(frame.count_sprites(Sprite::Heart), 3);

        let alphas: Vec<f32> = frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite {
                    sprite: Sprite::Heart,
                    alpha,
                    ..
                } => Some(*alpha),
                _ => None,
            })
            .collect();
        assert_eq!(alphas, vec![1.0, 1.0, LOST_LIFE_ALPHA]);
    }

    #[test]
    fn test_notice_rises_and_fades() {
        let mut state = running();
        state.time_ms = 500.0;
        state.notices.push(FloatingScore {
            pos: Vec2::new(100.0, 200.0),
            value: 10,
            created_at: 0.0,
        });
        let frame = render(&state, &RenderOptions::default());
        let notice = frame.commands.iter().find_map(|c| match c {
            DrawCommand::Text { text, pos, color, .. } if text == "+10" => Some((*pos, color.a)),
            _ => None,
        });
        let (pos, alpha) = notice.unwrap();
        assert_eq!(pos, Vec2::new(100.0, 200.0 - 10.0 - 15.0));
        assert!((alpha - 0.5).abs() < 1e-6);

        let off = RenderOptions {
            floating_scores: false,
            ..RenderOptions::default()
        };
        assert!(!render(&state, &off).texts().any(|t| t == "+10"));
    }

    #[test]
    fn test_overlay_per_phase() {
        let bests = BestRecords {
            best_time_secs: 61,
            best_score: 33,
        };
        let mut frame = Frame::new(800.0, 600.0);
        overlay(&mut frame, SessionPhase::Running, None, &bests);
        assert!(frame.commands.is_empty());

        let result = SessionResult {
            score: 12,
            time_secs: 40,
            wave: 2,
        };
        overlay(&mut frame, SessionPhase::Ended, Some(&result), &bests);
        let texts: Vec<_> = frame.texts().collect();
        assert!(texts.contains(&"GAME OVER"));
        assert!(texts.contains(&"TIME: 40s   SCORE: 12"));
        assert!(texts.contains(&"BEST TIME: 61s   BEST SCORE: 33"));
    }
}
