//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, tracking or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod paddle;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{ScoreRules, overlaps, take_contacts};
pub use difficulty::{fall_speed, level_for_score};
pub use paddle::{MovementZone, Paddle};
pub use spawner::{advance, remove_off_field, roll_spawn};
pub use state::{FallingObject, ObjectKind, Session};
pub use tick::{EndReason, GameEvent, TickInput, TickOutcome, tick};
