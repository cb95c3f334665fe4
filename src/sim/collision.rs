//! Paddle/object contact and scoring
//!
//! The overlap test uses the object's radius on the vertical axis only: the
//! object's center x must be over the paddle and its vertical extent must
//! touch the paddle's span. Cheaper than an exact circle-rectangle test and
//! close enough at these sizes.

use super::paddle::Paddle;
use super::state::{FallingObject, ObjectKind};
use crate::settings::Settings;

/// Whether `obj` touches the paddle this frame
pub fn overlaps(paddle: &Paddle, obj: &FallingObject) -> bool {
    let (min, max) = (paddle.pos(), paddle.max());
    let pos = obj.pos();
    let r = obj.radius();

    pos.y + r >= min.y && pos.y - r <= max.y && pos.x >= min.x && pos.x <= max.x
}

/// Remove every object touching the paddle and return them in spawn order.
///
/// Removal is immediate, so an object can score at most once.
pub fn take_contacts(paddle: &Paddle, objects: &mut Vec<FallingObject>) -> Vec<FallingObject> {
    let hit: Vec<bool> = objects.iter().map(|obj| overlaps(paddle, obj)).collect();
    if !hit.contains(&true) {
        return Vec::new();
    }

    let mut caught = Vec::new();
    let mut live = Vec::with_capacity(objects.len());
    for (obj, hit) in objects.drain(..).zip(hit) {
        if hit {
            caught.push(obj);
        } else {
            live.push(obj);
        }
    }
    *objects = live;
    caught
}

/// Score and life deltas for a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRules {
    pub reward_points: u32,
    pub hazard_penalty: u32,
}

impl ScoreRules {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            reward_points: settings.reward_points,
            hazard_penalty: settings.hazard_penalty,
        }
    }

    /// Apply one contact. Score and lives both floor at zero.
    pub fn apply(&self, kind: ObjectKind, score: &mut u32, lives: &mut u32) {
        match kind {
            ObjectKind::Reward => {
                *score = score.saturating_add(self.reward_points);
            }
            ObjectKind::Hazard => {
                *score = score.saturating_sub(self.hazard_penalty);
                *lives = lives.saturating_sub(1);
            }
        }
    }
}
