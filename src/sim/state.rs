//! Game state and core simulation types
//!
//! Everything a session needs lives in [`GameState`], passed by `&mut` into
//! the update functions. No globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::SessionClock;
use super::collision::Circle;
use crate::audio::Cue;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{Viewport, square_center};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title screen, nothing simulated yet
    NotStarted,
    /// Active gameplay
    Running,
    /// Frozen; game time does not advance
    Paused,
    /// Lives ran out. Terminal for this state; a new run needs a fresh state.
    Ended,
}

/// The player's avatar. `pos` is the top-left corner of its square sprite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
}

impl Player {
    pub fn new(size: f32, viewport: &Viewport) -> Self {
        Self {
            pos: viewport.center() - Vec2::splat(size / 2.0),
            size,
        }
    }

    /// Ease toward `target` by a fixed fraction of the remaining distance,
    /// then clamp into the viewport minus the sprite size
    pub fn ease_toward(&mut self, target: Vec2, viewport: &Viewport) {
        let delta = target - square_center(self.pos, self.size);
        self.pos += delta * PLAYER_EASE;
        self.pos.x = self.pos.x.min(viewport.width - self.size).max(0.0);
        self.pos.y = self.pos.y.min(viewport.height - self.size).max(0.0);
    }
}

impl Circle for Player {
    fn center(&self) -> Vec2 {
        square_center(self.pos, self.size)
    }

    fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// Enemy behaviour variants. A type is fixed for the enemy's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    /// Smaller, double speed
    Fast,
    /// Larger, half speed, takes two hits
    Tank,
    /// Drifts horizontally while oscillating around `base_y`
    Zigzag {
        base_y: f32,
        phase: f32,
        amplitude: f32,
        /// Radians per millisecond of game time
        frequency: f32,
    },
    /// Re-aims at the player every tick
    Seeker,
}

impl EnemyKind {
    pub fn label(&self) -> &'static str {
        match self {
            EnemyKind::Normal => "normal",
            EnemyKind::Fast => "fast",
            EnemyKind::Tank => "tank",
            EnemyKind::Zigzag { .. } => "zigzag",
            EnemyKind::Seeker => "seeker",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub size: f32,
    pub hp: u8,
    pub kind: EnemyKind,
}

impl Enemy {
    /// Move one tick. `target` is the player's top-left corner, `time_ms` is
    /// game time, `seeker_speed` the current pursuit speed.
    pub fn advance(&mut self, target: Vec2, time_ms: f64, seeker_speed: f32) {
        match self.kind {
            EnemyKind::Normal | EnemyKind::Fast | EnemyKind::Tank => {
                self.pos += self.vel;
            }
            EnemyKind::Zigzag {
                base_y,
                phase,
                amplitude,
                frequency,
            } => {
                self.pos.x += self.vel.x;
                let angle = time_ms * frequency as f64 + phase as f64;
                self.pos.y = base_y + angle.sin() as f32 * amplitude;
            }
            EnemyKind::Seeker => {
                let to_target = target - self.pos;
                let heading = to_target.y.atan2(to_target.x);
                self.pos += Vec2::new(heading.cos(), heading.sin()) * seeker_speed;
            }
        }
    }
}

impl Circle for Enemy {
    fn center(&self) -> Vec2 {
        square_center(self.pos, self.size)
    }

    fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// $AIR token tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencyTier {
    White,
    Gold,
    Platinum,
}

impl CurrencyTier {
    /// Score awarded on pickup
    pub fn value(self) -> u64 {
        match self {
            CurrencyTier::White => 1,
            CurrencyTier::Gold => 5,
            CurrencyTier::Platinum => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Restores a life, up to the cap
    Heart,
    /// Timed invulnerability against one hit
    Shield,
    Currency(CurrencyTier),
}

impl PickupKind {
    /// Time-to-live before the pickup expires unclaimed
    pub fn ttl_ms(self, tuning: &Tuning) -> f64 {
        match self {
            PickupKind::Heart => tuning.heart_ttl_ms,
            PickupKind::Shield => tuning.shield_ttl_ms,
            PickupKind::Currency(_) => tuning.currency_ttl_ms,
        }
    }

    pub fn size(self, tuning: &Tuning) -> f32 {
        match self {
            PickupKind::Heart => tuning.heart_size,
            PickupKind::Shield => tuning.shield_size,
            PickupKind::Currency(_) => tuning.currency_size,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub size: f32,
    /// Game time of creation
    pub created_at: f64,
}

impl Pickup {
    pub fn age(&self, time_ms: f64) -> f64 {
        time_ms - self.created_at
    }
}

impl Circle for Pickup {
    fn center(&self) -> Vec2 {
        square_center(self.pos, self.size)
    }

    fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// Cosmetic "+N" label that fades out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingScore {
    /// Anchor (the player's top-left at the time of the award)
    pub pos: Vec2,
    pub value: u64,
    pub created_at: f64,
}

impl FloatingScore {
    /// Fade progress in `[0, 1]`
    pub fn progress(&self, time_ms: f64) -> f32 {
        ((time_ms - self.created_at) / NOTICE_LIFETIME_MS).clamp(0.0, 1.0) as f32
    }
}

/// Next spawn time (game time) per category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub enemy: f64,
    pub heart: f64,
    pub shield: f64,
    pub white: f64,
    pub gold: f64,
    pub platinum: f64,
}

/// Final tally of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub score: u64,
    pub time_secs: u64,
    pub wave: u32,
}

/// Side effects produced by the simulation, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Fire-and-forget audio cue
    Cue(Cue),
    /// Stop the looping intro track
    StopMusic,
    LivesChanged(u8),
    WaveReached(u32),
    Paused,
    Resumed,
    GameOver(SessionResult),
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: SessionPhase,
    pub clock: SessionClock,
    /// Game time of the most recent tick
    pub time_ms: f64,
    pub lives: u8,
    /// 1-based wave number
    pub wave: u32,
    /// Game time at which the next wave starts
    pub next_wave_at: f64,
    /// Game time the shield expires; `Some` means the shield is up
    pub shield_until: Option<f64>,
    /// Score from tokens and tank kills
    pub score: u64,
    /// Global speed ramp, drives seeker pursuit
    pub game_speed: f32,
    /// Where the pointer wants the player to go
    pub target: Vec2,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<Pickup>,
    pub notices: Vec<FloatingScore>,
    pub timers: SpawnTimers,
    pub rng: Pcg32,
    /// Pending side effects, oldest first
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a title-screen state with the given seed
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        let player = Player::new(tuning.player_size, &viewport);
        Self {
            seed,
            viewport,
            phase: SessionPhase::NotStarted,
            clock: SessionClock::default(),
            time_ms: 0.0,
            lives: MAX_LIVES,
            wave: 1,
            next_wave_at: tuning.wave_interval_ms,
            shield_until: None,
            score: 0,
            game_speed: 1.0,
            target: viewport.center(),
            player,
            enemies: Vec::new(),
            pickups: Vec::new(),
            notices: Vec::new(),
            timers: SpawnTimers::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn shield_active(&self) -> bool {
        self.shield_until.is_some()
    }

    /// Whole seconds survived as of the last tick
    pub fn survival_secs(&self) -> u64 {
        (self.time_ms / 1000.0).floor() as u64
    }

    /// Begin a session. Only valid from the title screen.
    pub fn start(&mut self, now: f64) -> bool {
        if self.phase != SessionPhase::NotStarted {
            return false;
        }

        self.clock = SessionClock::started(now);
        self.time_ms = 0.0;
        self.lives = MAX_LIVES;
        self.wave = 1;
        self.next_wave_at = self.tuning.wave_interval_ms;
        self.shield_until = None;
        self.score = 0;
        self.game_speed = 1.0;
        self.target = self.viewport.center();
        self.player = Player::new(self.tuning.player_size, &self.viewport);
        self.enemies.clear();
        self.pickups.clear();
        self.notices.clear();
        self.timers = SpawnTimers::default();
        self.phase = SessionPhase::Running;

        self.events.push(GameEvent::StopMusic);
        self.events.push(GameEvent::Cue(Cue::Start));
        self.events.push(GameEvent::LivesChanged(self.lives));
        log::info!("Session started (seed {})", self.seed);
        true
    }

    /// Freeze the session. Only valid while running.
    pub fn pause(&mut self, now: f64) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.clock.pause(now);
        self.phase = SessionPhase::Paused;
        self.events.push(GameEvent::Paused);
        log::info!("Paused at {:.0}ms game time", self.clock.elapsed(now));
        true
    }

    /// Unfreeze the session. Only valid while paused.
    pub fn resume(&mut self, now: f64) -> bool {
        if self.phase != SessionPhase::Paused {
            return false;
        }
        self.clock.resume(now);
        self.phase = SessionPhase::Running;
        self.events.push(GameEvent::Resumed);
        log::info!(
            "Resumed ({:.0}ms paused in total)",
            self.clock.paused_duration(now)
        );
        true
    }

    /// Pause if running, resume if paused
    pub fn toggle_pause(&mut self, now: f64) -> bool {
        match self.phase {
            SessionPhase::Running => self.pause(now),
            SessionPhase::Paused => self.resume(now),
            _ => false,
        }
    }

    /// Lives ran out: compute the result and stop for good
    pub(crate) fn end(&mut self) {
        let result = SessionResult {
            score: self.score,
            time_secs: self.survival_secs(),
            wave: self.wave,
        };
        self.phase = SessionPhase::Ended;
        self.events.push(GameEvent::StopMusic);
        self.events.push(GameEvent::Cue(Cue::GameOverStinger));
        self.events.push(GameEvent::GameOver(result));
        log::info!(
            "Game over: score {}, survived {}s, wave {}",
            result.score,
            result.time_secs,
            result.wave
        );
    }

    /// Apply a new viewport; read by the next tick
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.target = viewport.clamp_point(self.target);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
