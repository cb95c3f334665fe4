//! Hand tracking adapter
//!
//! Wraps the external hand-landmark capability and converts its output into
//! play-field space for the paddle controller.

pub mod adapter;
pub mod hand;
pub mod scripted;

pub use adapter::{
    FieldTransform, FrameOf, HandTracker, SetupError, TrackingError, TrackingHealth,
    TrackingSetup, VideoFrame, detect_hands,
};
pub use hand::{HAND_CONNECTIONS, HAND_LANDMARK_NAMES, Hand, Keypoint, TrackedHand};
pub use scripted::{ScriptedSetup, ScriptedTracker, SyntheticFrame, SyntheticFrames};
