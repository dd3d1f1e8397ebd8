//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in from the host as a plain timestamp
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies; side effects leave as events

pub mod clock;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::SessionClock;
pub use collision::{Circle, circles_overlap, collides, outside_bounds};
pub use spawn::{Variant, roll_variant, run_spawners, spawn_enemy, spawn_pickup};
pub use state::{
    CurrencyTier, Enemy, EnemyKind, FloatingScore, GameEvent, GameState, Pickup, PickupKind,
    Player, SessionPhase, SessionResult, SpawnTimers,
};
pub use tick::tick;
