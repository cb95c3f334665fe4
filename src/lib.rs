//! Handcatch - a hand-tracked catch-the-gold arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, falling objects, scoring, difficulty)
//! - `tracking`: Hand-landmark capability contract and field-space transform
//! - `game`: Session state machine and the per-frame loop driver
//! - `sinks`: Observational render/HUD collaborator contracts
//! - `settings`: Data-driven game balance

pub mod game;
pub mod settings;
pub mod sim;
pub mod sinks;
pub mod tracking;

pub use game::{Control, FrameStatus, Game, GameState, SessionError, Transition};
pub use settings::{ConfigError, Settings};

/// Default tuning constants (overridable through `Settings`)
pub mod consts {
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 640.0;
    pub const FIELD_HEIGHT: f32 = 480.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 18.0;
    /// Fraction of the remaining distance covered per frame
    pub const PADDLE_SMOOTHING: f32 = 0.35;
    /// Paddle starts this far above the field bottom
    pub const PADDLE_START_OFFSET: f32 = 40.0;

    /// Movement zone: bottom band of the field
    pub const ZONE_HEIGHT_FRACTION: f32 = 0.30;
    pub const ZONE_SIDE_MARGIN: f32 = 10.0;
    pub const ZONE_BOTTOM_MARGIN: f32 = 5.0;

    /// Spawning
    pub const SPAWN_CHANCE: f64 = 0.12;
    pub const REWARD_CHANCE: f64 = 0.85;
    pub const REWARD_RADIUS: f32 = 12.0;
    pub const HAZARD_RADIUS: f32 = 15.0;
    /// Fall speed in pixels per frame: base + level * per_level
    pub const BASE_FALL_SPEED: f32 = 1.5;
    pub const FALL_SPEED_PER_LEVEL: f32 = 0.8;

    /// Scoring
    pub const REWARD_POINTS: u32 = 5;
    pub const HAZARD_PENALTY: u32 = 10;
    pub const STARTING_LIVES: u32 = 5;
    pub const MAX_MISSED_REWARDS: u32 = 5;
    /// Score at which levels 2, 3 and 4 begin
    pub const LEVEL_THRESHOLDS: [u32; 3] = [50, 150, 300];

    /// Tracking
    pub const MAX_HANDS: usize = 1;
    pub const WRIST_LANDMARK: &str = "wrist";
}
