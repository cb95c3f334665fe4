//! Session state and core simulation types
//!
//! A `Session` is everything that changes while a game is being played. It is
//! created on start, frozen while paused and dropped when the game ends.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::level_for_score;
use super::paddle::Paddle;
use super::tick::EndReason;
use crate::settings::{ConfigError, Settings};

/// What a falling object does when it reaches the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Gold: adds to the score when caught, counts as missed when dropped
    Reward,
    /// Red: costs score and a life when caught
    Hazard,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Reward => "reward",
            ObjectKind::Hazard => "hazard",
        }
    }
}

/// A falling circle. Only its position changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    kind: ObjectKind,
    pos: Vec2,
    radius: f32,
    /// Pixels per frame
    speed: f32,
}

impl FallingObject {
    pub fn new(kind: ObjectKind, pos: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            kind,
            pos,
            radius,
            speed,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Advance one frame straight down
    pub fn fall(&mut self) {
        self.pos.y += self.speed;
    }
}

/// One play session (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct Session {
    /// Never negative; penalties saturate at zero
    pub score: u32,
    pub lives: u32,
    /// Rewards that fell past the bottom edge
    pub missed_rewards: u32,
    pub paddle: Paddle,
    /// Live objects in spawn order
    pub objects: Vec<FallingObject>,
    /// Frames simulated so far
    pub time_ticks: u64,
    seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) settings: Settings,
}

impl Session {
    /// Fresh session: full lives, empty field, paddle at its start position.
    ///
    /// Fails on settings that `Settings::validate` rejects.
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            score: 0,
            lives: settings.starting_lives,
            missed_rewards: 0,
            paddle: Paddle::new(&settings),
            objects: Vec::new(),
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Difficulty level, always derived from the current score
    pub fn level(&self) -> u32 {
        level_for_score(self.score, &self.settings.level_thresholds)
    }

    /// Which loss condition (if any) the session has reached
    pub fn loss_reason(&self) -> Option<EndReason> {
        if self.lives == 0 {
            Some(EndReason::OutOfLives)
        } else if self.missed_rewards >= self.settings.max_missed_rewards {
            Some(EndReason::MissedRewards)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(Settings::default(), 42).unwrap();
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 5);
        assert_eq!(session.missed_rewards, 0);
        assert_eq!(session.level(), 1);
        assert!(session.objects.is_empty());
        assert_eq!(session.loss_reason(), None);
    }

    #[test]
    fn test_level_tracks_score() {
        let mut session = Session::new(Settings::default(), 42).unwrap();
        session.score = 149;
        assert_eq!(session.level(), 2);
        session.score = 150;
        assert_eq!(session.level(), 3);
    }

    #[test]
    fn test_loss_reasons() {
        let mut session = Session::new(Settings::default(), 1).unwrap();
        session.missed_rewards = 5;
        assert_eq!(session.loss_reason(), Some(EndReason::MissedRewards));
        session.lives = 0;
        assert_eq!(session.loss_reason(), Some(EndReason::OutOfLives));
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let settings = Settings {
            reward_chance: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(settings, 1),
            Err(ConfigError::Invalid {
                field: "reward_chance",
                ..
            })
        ));
    }

    #[test]
    fn test_fall_only_moves_down() {
        let mut obj = FallingObject::new(ObjectKind::Hazard, Vec2::new(50.0, -15.0), 15.0, 2.3);
        obj.fall();
        obj.fall();
        assert!(obj.pos().abs_diff_eq(Vec2::new(50.0, -10.4), 1e-5));
        assert_eq!(obj.radius(), 15.0);
        assert_eq!(obj.kind(), ObjectKind::Hazard);
    }
}
