//! Paddle controller
//!
//! The paddle chases the tracked wrist through an exponential smoothing
//! filter, then gets clamped into the movement zone at the bottom of the
//! field. Raw landmark estimates jitter by several pixels per frame, so the
//! filter is always applied.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Allowed range for the paddle's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementZone {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl MovementZone {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            left: settings.zone_side_margin,
            right: settings.field_width - settings.paddle_width - settings.zone_side_margin,
            top: settings.field_height * (1.0 - settings.zone_height_fraction),
            bottom: settings.field_height - settings.paddle_height - settings.zone_bottom_margin,
        }
    }

    /// Clamp horizontally, then vertically.
    ///
    /// `max`/`min` rather than `f32::clamp` so a NaN coordinate lands on an
    /// edge instead of propagating.
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        let x = pos.x.max(self.left).min(self.right);
        let y = pos.y.max(self.top).min(self.bottom);
        Vec2::new(x, y)
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        (self.left..=self.right).contains(&pos.x) && (self.top..=self.bottom).contains(&pos.y)
    }
}

/// The player's paddle (axis-aligned rectangle, `pos` is the top-left corner)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pos: Vec2,
    size: Vec2,
    zone: MovementZone,
    smoothing: f32,
}

impl Paddle {
    /// Centered horizontally near the bottom of the field
    pub fn new(settings: &Settings) -> Self {
        let zone = MovementZone::from_settings(settings);
        let start = Vec2::new(
            settings.field_width / 2.0 - settings.paddle_width / 2.0,
            settings.field_height - settings.paddle_start_offset,
        );
        Self {
            pos: zone.clamp(start),
            size: Vec2::new(settings.paddle_width, settings.paddle_height),
            zone,
            smoothing: settings.paddle_smoothing,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn zone(&self) -> &MovementZone {
        &self.zone
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Move toward a wrist position (field space). `None` holds position.
    pub fn follow(&mut self, wrist: Option<Vec2>) {
        let Some(wrist) = wrist else {
            return;
        };

        let target = wrist - self.size / 2.0;
        let smoothed = self.pos + (target - self.pos) * self.smoothing;
        self.pos = self.zone.clamp(smoothed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_zone_geometry() {
        let zone = MovementZone::from_settings(&Settings::default());
        assert_eq!(zone.left, 10.0);
        assert_eq!(zone.right, 640.0 - 120.0 - 10.0);
        assert!((zone.top - 336.0).abs() < 1e-3);
        assert_eq!(zone.bottom, 480.0 - 18.0 - 5.0);
    }

    #[test]
    fn test_starts_centered_in_zone() {
        let paddle = Paddle::new(&Settings::default());
        assert_eq!(paddle.pos(), Vec2::new(260.0, 440.0));
        assert!(paddle.zone().contains(paddle.pos()));
    }

    #[test]
    fn test_follow_smooths_toward_wrist() {
        let mut paddle = Paddle::new(&Settings::default());
        let start = paddle.pos();
        // Wrist centered 100px right of the paddle center, same height
        let wrist = start + paddle.size() / 2.0 + Vec2::new(100.0, 0.0);
        paddle.follow(Some(wrist));
        assert!((paddle.pos().x - (start.x + 35.0)).abs() < 1e-3);
        assert!((paddle.pos().y - start.y).abs() < 1e-3);
    }

    #[test]
    fn test_missing_wrist_holds_position() {
        let mut paddle = Paddle::new(&Settings::default());
        paddle.follow(Some(Vec2::new(500.0, 400.0)));
        let held = paddle.pos();
        paddle.follow(None);
        assert_eq!(paddle.pos(), held);
    }

    #[test]
    fn test_clamps_above_zone() {
        let mut paddle = Paddle::new(&Settings::default());
        for _ in 0..50 {
            paddle.follow(Some(Vec2::new(320.0, 0.0)));
        }
        assert!((paddle.pos().y - paddle.zone().top).abs() < 1e-3);
    }

    #[test]
    fn test_nan_wrist_stays_in_zone() {
        let mut paddle = Paddle::new(&Settings::default());
        paddle.follow(Some(Vec2::new(f32::NAN, f32::NAN)));
        assert!(paddle.zone().contains(paddle.pos()));
    }

    proptest! {
        #[test]
        fn prop_paddle_always_in_zone(
            wrists in prop::collection::vec((-5000.0f32..5000.0, -5000.0f32..5000.0), 1..40)
        ) {
            let mut paddle = Paddle::new(&Settings::default());
            for (x, y) in wrists {
                paddle.follow(Some(Vec2::new(x, y)));
                prop_assert!(paddle.zone().contains(paddle.pos()));
            }
        }
    }
}
