//! Observational collaborators
//!
//! Render and HUD sinks receive a snapshot after every simulated frame. They
//! never feed anything back into the simulation.

use serde::{Deserialize, Serialize};

use crate::game::FinalScore;
use crate::sim::{FallingObject, GameEvent, Paddle, Session};
use crate::tracking::{HAND_CONNECTIONS, TrackedHand};

/// Values shown in the score/lives bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub missed_rewards: u32,
}

impl Hud {
    pub fn from_session(session: &Session) -> Self {
        Self {
            score: session.score,
            lives: session.lives,
            level: session.level(),
            missed_rewards: session.missed_rewards,
        }
    }
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    pub paddle: &'a Paddle,
    pub objects: &'a [FallingObject],
    /// Hands in field space, for the skeleton overlay
    pub hands: &'a [TrackedHand],
    pub connections: &'static [(usize, usize)],
}

impl<'a> RenderView<'a> {
    pub fn new(session: &'a Session, hands: &'a [TrackedHand]) -> Self {
        Self {
            paddle: &session.paddle,
            objects: &session.objects,
            hands,
            connections: &HAND_CONNECTIONS,
        }
    }
}

pub trait RenderSink {
    fn draw(&mut self, view: &RenderView<'_>);
}

pub trait HudSink {
    fn update(&mut self, hud: &Hud);

    /// Frame events, e.g. to flash the score on a catch
    fn events(&mut self, _events: &[GameEvent]) {}

    /// Session ended; show the final score
    fn game_over(&mut self, _final_score: &FinalScore) {}
}
