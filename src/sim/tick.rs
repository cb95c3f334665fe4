//! Per-frame simulation step
//!
//! Phases run in a fixed order: paddle, spawn, fall, off-field removal,
//! contacts, difficulty, loss check.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{ScoreRules, take_contacts};
use super::spawner::{advance, remove_off_field, roll_spawn};
use super::state::{ObjectKind, Session};

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Wrist of the primary tracked hand in field space, if one was seen
    pub wrist: Option<Vec2>,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Lives ran out from hazard contacts
    OutOfLives,
    /// Too many rewards fell past the paddle
    MissedRewards,
    /// Player left through the menu
    Exited,
}

/// Things that happened during a frame, for HUD effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { kind: ObjectKind },
    /// Paddle touched an object; `score` is the score after applying it
    Caught { kind: ObjectKind, score: u32 },
    /// A reward left the field uncaught
    Missed { missed_rewards: u32 },
    LevelChanged { level: u32 },
}

/// Result of one frame
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    pub events: Vec<GameEvent>,
    /// Set when a loss condition was reached this frame
    pub end: Option<EndReason>,
}

/// Advance the session by one frame
pub fn tick(session: &mut Session, input: &TickInput) -> TickOutcome {
    let mut events = Vec::new();
    session.time_ticks += 1;

    session.paddle.follow(input.wrist);

    let level_before = session.level();
    if let Some(obj) = roll_spawn(&mut session.rng, &session.settings, level_before) {
        log::debug!(
            "Spawned {} at x={:.1} speed={:.1}",
            obj.kind().as_str(),
            obj.pos().x,
            obj.speed()
        );
        events.push(GameEvent::Spawned { kind: obj.kind() });
        session.objects.push(obj);
    }

    advance(&mut session.objects);
    for obj in remove_off_field(&mut session.objects, session.settings.field_height) {
        if obj.kind() == ObjectKind::Reward {
            session.missed_rewards += 1;
            events.push(GameEvent::Missed {
                missed_rewards: session.missed_rewards,
            });
        }
    }

    let rules = ScoreRules::from_settings(&session.settings);
    for obj in take_contacts(&session.paddle, &mut session.objects) {
        rules.apply(obj.kind(), &mut session.score, &mut session.lives);
        events.push(GameEvent::Caught {
            kind: obj.kind(),
            score: session.score,
        });
    }

    let level = session.level();
    if level != level_before {
        log::info!("Level {level_before} -> {level} at score {}", session.score);
        events.push(GameEvent::LevelChanged { level });
    }

    TickOutcome {
        events,
        end: session.loss_reason(),
    }
}
