//! Falling object spawning and movement
//!
//! At most one object spawns per frame. Objects fall at a constant speed
//! fixed at spawn time and are removed once their center passes the bottom
//! edge of the field.

use glam::Vec2;
use rand::Rng;

use super::difficulty::fall_speed;
use super::state::{FallingObject, ObjectKind};
use crate::settings::Settings;

/// Roll this frame's spawn. Draws spawn, kind and x in that order.
pub fn roll_spawn<R: Rng>(rng: &mut R, settings: &Settings, level: u32) -> Option<FallingObject> {
    if !rng.random_bool(settings.spawn_chance) {
        return None;
    }

    let (kind, radius) = if rng.random_bool(settings.reward_chance) {
        (ObjectKind::Reward, settings.reward_radius)
    } else {
        (ObjectKind::Hazard, settings.hazard_radius)
    };

    // Fully inside the field horizontally, just above the top edge
    let x = rng.random_range(radius..=settings.field_width - radius);
    let speed = fall_speed(level, settings.base_fall_speed, settings.fall_speed_per_level);

    Some(FallingObject::new(kind, Vec2::new(x, -radius), radius, speed))
}

/// Move every object down by its speed
pub fn advance(objects: &mut [FallingObject]) {
    for obj in objects.iter_mut() {
        obj.fall();
    }
}

/// Remove objects below the field and return them.
///
/// Partitions into a removal set and a rebuilt live collection rather than
/// deleting in place.
pub fn remove_off_field(objects: &mut Vec<FallingObject>, field_height: f32) -> Vec<FallingObject> {
    let (exited, live): (Vec<_>, Vec<_>) = objects
        .drain(..)
        .partition(|obj| obj.pos().y > field_height);
    *objects = live;
    exited
}
