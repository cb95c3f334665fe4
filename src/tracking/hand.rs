//! Hand landmark data
//!
//! Landmarks follow the 21-point MediaPipe hand layout. Detectors report them
//! by name; the skeleton connections index into the same ordering.

use glam::Vec2;
use serde::{Deserialize, Serialize};

// ============================================================================
// HAND LANDMARK LAYOUT
// ============================================================================

pub const WRIST: usize = 0;

/// Landmark names in detector order
pub const HAND_LANDMARK_NAMES: [&str; 21] = [
    "wrist",
    "thumb_cmc",
    "thumb_mcp",
    "thumb_ip",
    "thumb_tip",
    "index_finger_mcp",
    "index_finger_pip",
    "index_finger_dip",
    "index_finger_tip",
    "middle_finger_mcp",
    "middle_finger_pip",
    "middle_finger_dip",
    "middle_finger_tip",
    "ring_finger_mcp",
    "ring_finger_pip",
    "ring_finger_dip",
    "ring_finger_tip",
    "pinky_finger_mcp",
    "pinky_finger_pip",
    "pinky_finger_dip",
    "pinky_finger_tip",
];

/// Hand skeleton connections for overlay rendering
#[rustfmt::skip]
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (17, 18), (18, 19), (19, 20),
    (0, 17),
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A named 2D landmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

impl Keypoint {
    pub fn new(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A hand as reported by the detector (detector pixel space)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub keypoints: Vec<Keypoint>,
}

impl Hand {
    /// A hand with only the wrist visible
    pub fn wrist_only(x: f32, y: f32) -> Self {
        Self {
            keypoints: vec![Keypoint::new(HAND_LANDMARK_NAMES[WRIST], x, y)],
        }
    }

    /// Full 21-point hand fanned upward from the wrist (synthetic input)
    pub fn open_palm(wrist: Vec2, span: f32) -> Self {
        let keypoints = HAND_LANDMARK_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                if i == WRIST {
                    return Keypoint::new(*name, wrist.x, wrist.y);
                }
                // Five fingers of four joints each
                let finger = ((i - 1) / 4) as f32;
                let joint = ((i - 1) % 4 + 1) as f32;
                let angle = std::f32::consts::PI * (0.15 + 0.175 * finger);
                let reach = span * joint / 4.0;
                Keypoint::new(
                    *name,
                    wrist.x - angle.cos() * reach,
                    wrist.y - angle.sin() * reach,
                )
            })
            .collect();
        Self { keypoints }
    }
}

/// A hand transformed into play-field space
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackedHand {
    pub keypoints: Vec<Keypoint>,
}

impl TrackedHand {
    /// Position of the landmark with `name`, if the detector reported it
    pub fn landmark(&self, name: &str) -> Option<Vec2> {
        self.keypoints
            .iter()
            .find(|k| k.name == name)
            .map(Keypoint::pos)
    }

    /// Skeleton segments whose endpoints are both present
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        HAND_CONNECTIONS.iter().filter_map(|&(a, b)| {
            let a = self.keypoints.get(a)?;
            let b = self.keypoints.get(b)?;
            Some((a.pos(), b.pos()))
        })
    }
}
