//! Tracking capability contract
//!
//! The detector is a black box: given a video frame it eventually yields zero
//! or more hands in its own pixel space. The game mirrors and rescales those
//! into play-field space and degrades any per-frame failure to "no hands".

use std::fmt;
use std::future::Future;

use glam::Vec2;

use super::hand::{Hand, Keypoint, TrackedHand};
use crate::settings::Settings;

/// Per-frame detector failure (never fatal)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackingError {
    #[error("Hand detector unavailable")]
    Unavailable,

    #[error("Hand inference failed: {0}")]
    Inference(String),
}

/// Failure acquiring the camera or detector at session start
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error("Camera permission denied")]
    PermissionDenied,

    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("Hand detector failed to initialize: {0}")]
    DetectorInit(String),
}

/// A video frame handed to the detector
pub trait VideoFrame {
    /// Native resolution in pixels (width, height)
    fn resolution(&self) -> Vec2;
}

/// The hand-landmark capability
pub trait HandTracker {
    type Frame: VideoFrame;

    /// Detect hands in `frame`. This is the only suspension point of a frame.
    fn estimate(
        &mut self,
        frame: &Self::Frame,
    ) -> impl Future<Output = Result<Vec<Hand>, TrackingError>>;
}

/// Acquires a tracker (camera + detector) when a session starts
pub trait TrackingSetup {
    type Tracker: HandTracker;

    fn acquire(&mut self) -> impl Future<Output = Result<Self::Tracker, SetupError>>;
}

/// Frame type consumed by a setup's tracker
pub type FrameOf<S> = <<S as TrackingSetup>::Tracker as HandTracker>::Frame;

/// Detector pixel space -> play-field space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldTransform {
    scale: Vec2,
    field_width: f32,
    mirror: bool,
}

impl FieldTransform {
    /// `None` when the video resolution is degenerate
    pub fn new(video: Vec2, field: Vec2, mirror: bool) -> Option<Self> {
        if !(video.x > 0.0 && video.y > 0.0) {
            return None;
        }
        Some(Self {
            scale: field / video,
            field_width: field.x,
            mirror,
        })
    }

    pub fn from_settings(video: Vec2, settings: &Settings) -> Option<Self> {
        let field = Vec2::new(settings.field_width, settings.field_height);
        Self::new(video, field, settings.mirror)
    }

    pub fn apply_point(&self, point: Vec2) -> Vec2 {
        let scaled = point * self.scale;
        if self.mirror {
            Vec2::new(self.field_width - scaled.x, scaled.y)
        } else {
            scaled
        }
    }

    pub fn apply(&self, hand: &Hand) -> TrackedHand {
        let keypoints = hand
            .keypoints
            .iter()
            .map(|k| {
                let p = self.apply_point(k.pos());
                Keypoint::new(k.name.clone(), p.x, p.y)
            })
            .collect();
        TrackedHand { keypoints }
    }
}

/// Run of consecutive frames without usable tracking.
///
/// The first failure in a run is logged at `warn`, repeats at `debug`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackingHealth {
    failed_frames: u32,
}

impl TrackingHealth {
    pub fn failed_frames(&self) -> u32 {
        self.failed_frames
    }

    pub fn reset(&mut self) {
        self.failed_frames = 0;
    }

    fn failure(&mut self, reason: &dyn fmt::Display) {
        if self.failed_frames == 0 {
            log::warn!("Skipping paddle update: {reason}");
        } else {
            log::debug!("Skipping paddle update: {reason}");
        }
        self.failed_frames = self.failed_frames.saturating_add(1);
    }

    fn success(&mut self) {
        if self.failed_frames > 0 {
            log::info!("Tracking recovered after {} failed frames", self.failed_frames);
            self.failed_frames = 0;
        }
    }
}

/// Run the detector for one frame and return at most `max_hands` hands in
/// field space. Failures are logged and yield no hands.
pub async fn detect_hands<T: HandTracker>(
    tracker: &mut T,
    frame: &T::Frame,
    settings: &Settings,
    health: &mut TrackingHealth,
) -> Vec<TrackedHand> {
    let hands = match tracker.estimate(frame).await {
        Ok(hands) => hands,
        Err(err) => {
            health.failure(&err);
            return Vec::new();
        }
    };

    let Some(transform) = FieldTransform::from_settings(frame.resolution(), settings) else {
        health.failure(&"video has no resolution yet");
        return Vec::new();
    };
    health.success();

    hands
        .iter()
        .take(settings.max_hands)
        .map(|hand| transform.apply(hand))
        .collect()
}
