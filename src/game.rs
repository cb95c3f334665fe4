//! Session state machine and frame loop driver
//!
//! The session only exists inside the `Playing` and `Paused` variants, so a
//! transition is the only way to create, freeze or discard it. Each call to
//! `run_frame` checks the state first and does nothing unless playing, which
//! makes the loop stop on its own after a pause or an end.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::WRIST_LANDMARK;
use crate::settings::{ConfigError, Settings};
use crate::sim::{EndReason, GameEvent, Session, TickInput, tick};
use crate::sinks::{Hud, HudSink, RenderSink, RenderView};
use crate::tracking::{
    FrameOf, SetupError, TrackedHand, TrackingHealth, TrackingSetup, detect_hands,
};

/// Coarse state label (for logging, errors and UI routing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Playing,
    Paused,
    Ended,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::Ended => "ended",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named triggers exposed to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    Start,
    /// Open the in-game menu
    Pause,
    Resume,
    Restart,
    Exit,
    PlayAgain,
    ExitToStart,
}

impl Control {
    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Start => "start",
            Control::Pause => "pause",
            Control::Resume => "resume",
            Control::Restart => "restart",
            Control::Exit => "exit",
            Control::PlayAgain => "play_again",
            Control::ExitToStart => "exit_to_start",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(Control::Start),
            "pause" | "menu" => Some(Control::Pause),
            "resume" => Some(Control::Resume),
            "restart" => Some(Control::Restart),
            "exit" => Some(Control::Exit),
            "play_again" => Some(Control::PlayAgain),
            "exit_to_start" => Some(Control::ExitToStart),
            _ => None,
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result shown on the end screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub score: u32,
    pub level: u32,
    pub reason: EndReason,
    /// Frames simulated before the end
    pub frames: u64,
}

impl FinalScore {
    fn new(session: &Session, reason: EndReason) -> Self {
        Self {
            score: session.score,
            level: session.level(),
            reason,
            frames: session.time_ticks,
        }
    }
}

/// Authoritative game lifecycle
#[derive(Debug, Clone)]
pub enum GameState {
    Idle,
    Playing(Session),
    /// Frozen: nothing advances, nothing is lost
    Paused(Session),
    Ended(FinalScore),
}

impl GameState {
    pub fn phase(&self) -> Phase {
        match self {
            GameState::Idle => Phase::Idle,
            GameState::Playing(_) => Phase::Playing,
            GameState::Paused(_) => Phase::Paused,
            GameState::Ended(_) => Phase::Ended,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Could not start tracking: {0}")]
    Setup(#[from] SetupError),

    #[error("Invalid settings: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot {action} while {from}")]
    InvalidTransition { action: Control, from: Phase },
}

/// A successful state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
}

/// What a call to `run_frame` did
#[derive(Debug, Clone, PartialEq)]
pub enum FrameStatus {
    /// Not playing; nothing ran
    Inactive,
    /// Frame simulated, session continues
    Running { events: Vec<GameEvent> },
    /// Frame simulated and a loss condition ended the session
    Ended(FinalScore),
}

/// Game driver: owns the state machine, the tracker and the sinks
pub struct Game<S: TrackingSetup> {
    settings: Settings,
    setup: S,
    tracker: Option<S::Tracker>,
    state: GameState,
    /// Hands seen in the latest frame (field space)
    hands: Vec<TrackedHand>,
    tracking: TrackingHealth,
    render: Option<Box<dyn RenderSink>>,
    hud: Option<Box<dyn HudSink>>,
}

impl<S: TrackingSetup> Game<S> {
    pub fn new(settings: Settings, setup: S) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            settings,
            setup,
            tracker: None,
            state: GameState::Idle,
            hands: Vec::new(),
            tracking: TrackingHealth::default(),
            render: None,
            hud: None,
        })
    }

    pub fn with_render_sink(mut self, sink: Box<dyn RenderSink>) -> Self {
        self.render = Some(sink);
        self
    }

    pub fn with_hud_sink(mut self, sink: Box<dyn HudSink>) -> Self {
        self.hud = Some(sink);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn setup(&self) -> &S {
        &self.setup
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, GameState::Playing(_))
    }

    /// The live or paused session
    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            GameState::Playing(session) | GameState::Paused(session) => Some(session),
            _ => None,
        }
    }

    pub fn hands(&self) -> &[TrackedHand] {
        &self.hands
    }

    /// Consecutive frames the tracker has failed to deliver
    pub fn tracking(&self) -> TrackingHealth {
        self.tracking
    }

    fn invalid(&self, action: Control) -> SessionError {
        SessionError::InvalidTransition {
            action,
            from: self.phase(),
        }
    }

    /// Dispatch a named trigger
    pub async fn apply(&mut self, control: Control) -> Result<Transition, SessionError> {
        match control {
            Control::Start => self.start().await,
            Control::Pause => self.pause(),
            Control::Resume => self.resume(),
            Control::Restart => self.restart().await,
            Control::Exit => self.exit(),
            Control::PlayAgain => self.play_again().await,
            Control::ExitToStart => self.exit_to_start(),
        }
    }

    /// Idle -> Playing
    pub async fn start(&mut self) -> Result<Transition, SessionError> {
        if !matches!(self.state, GameState::Idle) {
            return Err(self.invalid(Control::Start));
        }
        self.begin_session(Phase::Idle).await
    }

    /// Playing -> Paused
    pub fn pause(&mut self) -> Result<Transition, SessionError> {
        match std::mem::replace(&mut self.state, GameState::Idle) {
            GameState::Playing(session) => {
                log::info!("Paused at frame {}", session.time_ticks);
                self.state = GameState::Paused(session);
                Ok(Transition {
                    from: Phase::Playing,
                    to: Phase::Paused,
                })
            }
            other => {
                self.state = other;
                Err(self.invalid(Control::Pause))
            }
        }
    }

    /// Paused -> Playing, continuing the frozen session
    pub fn resume(&mut self) -> Result<Transition, SessionError> {
        match std::mem::replace(&mut self.state, GameState::Idle) {
            GameState::Paused(session) => {
                log::info!("Resumed at frame {}", session.time_ticks);
                self.state = GameState::Playing(session);
                Ok(Transition {
                    from: Phase::Paused,
                    to: Phase::Playing,
                })
            }
            other => {
                self.state = other;
                Err(self.invalid(Control::Resume))
            }
        }
    }

    /// Paused -> Playing with a brand new session
    pub async fn restart(&mut self) -> Result<Transition, SessionError> {
        if !matches!(self.state, GameState::Paused(_)) {
            return Err(self.invalid(Control::Restart));
        }
        self.begin_session(Phase::Paused).await
    }

    /// Playing/Paused -> Ended without a loss condition
    pub fn exit(&mut self) -> Result<Transition, SessionError> {
        let from = self.phase();
        let final_score = match &self.state {
            GameState::Playing(session) | GameState::Paused(session) => {
                FinalScore::new(session, EndReason::Exited)
            }
            _ => return Err(self.invalid(Control::Exit)),
        };
        self.finish(final_score);
        Ok(Transition {
            from,
            to: Phase::Ended,
        })
    }

    /// Ended -> Playing
    pub async fn play_again(&mut self) -> Result<Transition, SessionError> {
        if !matches!(self.state, GameState::Ended(_)) {
            return Err(self.invalid(Control::PlayAgain));
        }
        self.begin_session(Phase::Ended).await
    }

    /// Ended -> Idle
    pub fn exit_to_start(&mut self) -> Result<Transition, SessionError> {
        if !matches!(self.state, GameState::Ended(_)) {
            return Err(self.invalid(Control::ExitToStart));
        }
        self.state = GameState::Idle;
        Ok(Transition {
            from: Phase::Ended,
            to: Phase::Idle,
        })
    }

    /// Discard any session, acquire tracking and start fresh.
    ///
    /// On setup failure the game is left idle.
    async fn begin_session(&mut self, from: Phase) -> Result<Transition, SessionError> {
        self.state = GameState::Idle;
        self.tracker = None;
        self.hands.clear();

        let seed = self.settings.seed.unwrap_or_else(rand::random);
        let session = Session::new(self.settings.clone(), seed)?;

        let tracker = match self.setup.acquire().await {
            Ok(tracker) => tracker,
            Err(err) => {
                log::error!("Failed to start session: {err}");
                return Err(err.into());
            }
        };
        self.tracker = Some(tracker);
        self.tracking.reset();
        log::info!("Session started (seed {seed})");

        if let Some(hud) = self.hud.as_mut() {
            hud.update(&Hud::from_session(&session));
        }
        self.state = GameState::Playing(session);

        Ok(Transition {
            from,
            to: Phase::Playing,
        })
    }

    /// Drop the session and tracker, publish the final score
    fn finish(&mut self, final_score: FinalScore) {
        log::info!(
            "Session over ({:?}): score {}, level {}, {} frames",
            final_score.reason,
            final_score.score,
            final_score.level,
            final_score.frames
        );
        self.tracker = None;
        self.hands.clear();
        if let Some(hud) = self.hud.as_mut() {
            hud.game_over(&final_score);
        }
        self.state = GameState::Ended(final_score);
    }

    /// One iteration of the game loop.
    ///
    /// Awaits hand detection, then runs the simulation step and notifies the
    /// sinks synchronously.
    pub async fn run_frame(&mut self, frame: &FrameOf<S>) -> FrameStatus {
        if !self.is_playing() {
            return FrameStatus::Inactive;
        }

        self.hands = match self.tracker.as_mut() {
            Some(tracker) => {
                detect_hands(tracker, frame, &self.settings, &mut self.tracking).await
            }
            None => Vec::new(),
        };

        let GameState::Playing(session) = &mut self.state else {
            return FrameStatus::Inactive;
        };

        let input = TickInput {
            wrist: self
                .hands
                .first()
                .and_then(|hand| hand.landmark(WRIST_LANDMARK)),
        };
        let outcome = tick(session, &input);

        if let Some(render) = self.render.as_mut() {
            render.draw(&RenderView::new(session, &self.hands));
        }
        if let Some(hud) = self.hud.as_mut() {
            hud.update(&Hud::from_session(session));
            if !outcome.events.is_empty() {
                hud.events(&outcome.events);
            }
        }

        match outcome.end {
            Some(reason) => {
                let final_score = FinalScore::new(session, reason);
                self.finish(final_score);
                FrameStatus::Ended(final_score)
            }
            None => FrameStatus::Running {
                events: outcome.events,
            },
        }
    }

    /// Run frames until the game stops playing or the frames run out.
    ///
    /// Returns the final score if a loss condition ended the session.
    pub async fn run<I>(&mut self, frames: I) -> Option<FinalScore>
    where
        I: IntoIterator<Item = FrameOf<S>>,
    {
        for frame in frames {
            match self.run_frame(&frame).await {
                FrameStatus::Inactive => break,
                FrameStatus::Running { .. } => {}
                FrameStatus::Ended(final_score) => return Some(final_score),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::{ScriptedSetup, ScriptedTracker, SyntheticFrame, SyntheticFrames};
    use pollster::block_on;

    fn settings() -> Settings {
        Settings {
            seed: Some(12345),
            ..Default::default()
        }
    }

    fn idle_game() -> Game<ScriptedSetup<impl FnMut() -> Result<ScriptedTracker, SetupError>>> {
        Game::new(settings(), ScriptedSetup::new(|| Ok(ScriptedTracker::idle()))).unwrap()
    }

    fn frame() -> SyntheticFrame {
        SyntheticFrame::new(640, 480, 0)
    }

    #[test]
    fn test_initial_state() {
        let game = idle_game();
        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.session().is_none());
    }

    #[test]
    fn test_start_creates_fresh_session() {
        let mut game = idle_game();
        let transition = block_on(game.start()).unwrap();
        assert_eq!(
            transition,
            Transition {
                from: Phase::Idle,
                to: Phase::Playing
            }
        );
        let session = game.session().unwrap();
        assert_eq!((session.score, session.lives, session.missed_rewards), (0, 5, 0));
        assert_eq!(session.seed(), 12345);
        assert_eq!(game.setup().acquired(), 1);
    }

    #[test]
    fn test_invalid_transitions_keep_state() {
        let mut game = idle_game();
        assert!(matches!(
            game.pause(),
            Err(SessionError::InvalidTransition {
                action: Control::Pause,
                from: Phase::Idle
            })
        ));
        assert!(game.resume().is_err());
        assert!(block_on(game.restart()).is_err());
        assert!(game.exit().is_err());
        assert!(block_on(game.play_again()).is_err());
        assert_eq!(game.phase(), Phase::Idle);

        block_on(game.start()).unwrap();
        assert!(block_on(game.start()).is_err());
        assert!(game.resume().is_err());
        assert!(game.exit_to_start().is_err());
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn test_setup_failure_stays_idle() {
        let setup = ScriptedSetup::new(|| Err(SetupError::PermissionDenied));
        let mut game = Game::new(settings(), setup).unwrap();
        let err = block_on(game.start()).unwrap_err();
        assert!(matches!(err, SessionError::Setup(SetupError::PermissionDenied)));
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(block_on(game.run_frame(&frame())), FrameStatus::Inactive);
    }

    #[test]
    fn test_paused_frames_are_noops() {
        let mut game = idle_game();
        block_on(game.start()).unwrap();
        for frame in SyntheticFrames::new(640, 480).take_frames(30) {
            block_on(game.run_frame(&frame));
        }
        game.pause().unwrap();
        let before = game.session().unwrap().clone();

        for frame in SyntheticFrames::new(640, 480).take_frames(30) {
            assert_eq!(block_on(game.run_frame(&frame)), FrameStatus::Inactive);
        }
        game.resume().unwrap();

        let after = game.session().unwrap();
        assert_eq!(after.score, before.score);
        assert_eq!(after.lives, before.lives);
        assert_eq!(after.objects, before.objects);
        assert_eq!(after.paddle, before.paddle);
        assert_eq!(after.time_ticks, before.time_ticks);
    }

    #[test]
    fn test_restart_discards_paused_session() {
        let mut game = idle_game();
        block_on(game.start()).unwrap();
        block_on(game.run(SyntheticFrames::new(640, 480).take_frames(50)));
        game.pause().unwrap();

        let transition = block_on(game.restart()).unwrap();
        assert_eq!(transition.from, Phase::Paused);
        assert_eq!(game.session().unwrap().time_ticks, 0);
        assert_eq!(game.setup().acquired(), 2);
    }

    #[test]
    fn test_exit_then_play_again_or_leave() {
        let mut game = idle_game();
        block_on(game.start()).unwrap();
        game.pause().unwrap();
        game.exit().unwrap();
        match game.state() {
            GameState::Ended(final_score) => assert_eq!(final_score.reason, EndReason::Exited),
            other => panic!("expected ended, got {:?}", other.phase()),
        }

        block_on(game.play_again()).unwrap();
        assert_eq!(game.phase(), Phase::Playing);
        game.exit().unwrap();
        game.exit_to_start().unwrap();
        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.session().is_none());
    }

    #[test]
    fn test_apply_dispatches_controls() {
        let mut game = idle_game();
        for name in ["start", "menu", "resume", "exit", "exit_to_start"] {
            let control = Control::from_name(name).unwrap();
            block_on(game.apply(control)).unwrap();
        }
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(Control::from_name("jump"), None);
    }
}
