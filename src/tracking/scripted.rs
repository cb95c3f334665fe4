//! Deterministic stand-ins for a camera and hand detector
//!
//! Used by the demo binary and tests to drive the game without a camera.

use std::collections::VecDeque;

use glam::Vec2;

use super::adapter::{HandTracker, SetupError, TrackingError, TrackingSetup, VideoFrame};
use super::hand::Hand;

/// A frame with only a size and a sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticFrame {
    pub width: u32,
    pub height: u32,
    pub index: u64,
}

impl SyntheticFrame {
    pub fn new(width: u32, height: u32, index: u64) -> Self {
        Self {
            width,
            height,
            index,
        }
    }
}

impl VideoFrame for SyntheticFrame {
    fn resolution(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Endless (or bounded) stream of synthetic frames
#[derive(Debug, Clone)]
pub struct SyntheticFrames {
    width: u32,
    height: u32,
    next: u64,
    limit: Option<u64>,
}

impl SyntheticFrames {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            next: 0,
            limit: None,
        }
    }

    /// Stop after `frames` frames
    pub fn take_frames(mut self, frames: u64) -> Self {
        self.limit = Some(self.next + frames);
        self
    }
}

impl Iterator for SyntheticFrames {
    type Item = SyntheticFrame;

    fn next(&mut self) -> Option<SyntheticFrame> {
        if self.limit.is_some_and(|limit| self.next >= limit) {
            return None;
        }
        let frame = SyntheticFrame::new(self.width, self.height, self.next);
        self.next += 1;
        Some(frame)
    }
}

type Script = Box<dyn FnMut(&SyntheticFrame) -> Result<Vec<Hand>, TrackingError>>;

/// Hand tracker whose output is produced by a closure
pub struct ScriptedTracker {
    script: Script,
}

impl ScriptedTracker {
    pub fn from_fn(
        script: impl FnMut(&SyntheticFrame) -> Result<Vec<Hand>, TrackingError> + 'static,
    ) -> Self {
        Self {
            script: Box::new(script),
        }
    }

    /// Replay `results` one per frame, then report no hands
    pub fn queued(results: impl IntoIterator<Item = Result<Vec<Hand>, TrackingError>>) -> Self {
        let mut queue: VecDeque<_> = results.into_iter().collect();
        Self::from_fn(move |_| queue.pop_front().unwrap_or_else(|| Ok(Vec::new())))
    }

    /// Never sees a hand
    pub fn idle() -> Self {
        Self::from_fn(|_| Ok(Vec::new()))
    }

    /// An open hand sweeping side to side near the bottom of the frame,
    /// completing one cycle every `period` frames
    pub fn sweeping(period: f32) -> Self {
        Self::from_fn(move |frame| {
            let size = frame.resolution();
            let phase = frame.index as f32 / period * std::f32::consts::TAU;
            let wrist = Vec2::new(
                size.x * (0.5 + 0.4 * phase.sin()),
                size.y * 0.85,
            );
            Ok(vec![Hand::open_palm(wrist, size.y * 0.25)])
        })
    }
}

impl HandTracker for ScriptedTracker {
    type Frame = SyntheticFrame;

    async fn estimate(&mut self, frame: &SyntheticFrame) -> Result<Vec<Hand>, TrackingError> {
        (self.script)(frame)
    }
}

/// Tracking setup backed by a factory closure
pub struct ScriptedSetup<F> {
    factory: F,
    acquired: u32,
}

impl<F> ScriptedSetup<F>
where
    F: FnMut() -> Result<ScriptedTracker, SetupError>,
{
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            acquired: 0,
        }
    }

    /// How many times a tracker was requested
    pub fn acquired(&self) -> u32 {
        self.acquired
    }
}

impl<F> TrackingSetup for ScriptedSetup<F>
where
    F: FnMut() -> Result<ScriptedTracker, SetupError>,
{
    type Tracker = ScriptedTracker;

    async fn acquire(&mut self) -> Result<ScriptedTracker, SetupError> {
        self.acquired += 1;
        (self.factory)()
    }
}
