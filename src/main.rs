//! Handcatch entry point
//!
//! Runs one headless session against a scripted hand sweeping across the
//! camera, logging the HUD as it goes. Settings are read from the JSON file
//! named by `HANDCATCH_CONFIG` when set.

use std::path::PathBuf;

use handcatch::game::FinalScore;
use handcatch::sim::{GameEvent, ObjectKind};
use handcatch::sinks::{Hud, HudSink, RenderSink, RenderView};
use handcatch::tracking::{ScriptedSetup, ScriptedTracker, SyntheticFrames};
use handcatch::{Game, Settings};

/// Safety stop for the demo (ten minutes at 60 fps)
const MAX_DEMO_FRAMES: u64 = 60 * 60 * 10;
/// Simulated camera resolution
const CAMERA_WIDTH: u32 = 1280;
const CAMERA_HEIGHT: u32 = 720;

/// Logs HUD changes instead of drawing them
#[derive(Default)]
struct LogHud {
    last: Option<Hud>,
}

impl HudSink for LogHud {
    fn update(&mut self, hud: &Hud) {
        if self.last.as_ref() != Some(hud) {
            log::info!(
                "Score: {}  Lives: {}  Level: {}  Missed: {}",
                hud.score,
                hud.lives,
                hud.level,
                hud.missed_rewards
            );
            self.last = Some(*hud);
        }
    }

    fn events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::Caught { kind, .. } = event {
                match kind {
                    ObjectKind::Reward => log::debug!("Caught gold"),
                    ObjectKind::Hazard => log::debug!("Hit red"),
                }
            }
        }
    }

    fn game_over(&mut self, final_score: &FinalScore) {
        log::info!("Final score: {}", final_score.score);
    }
}

/// Counts drawn frames; logs a summary every few seconds
#[derive(Default)]
struct FrameCounter {
    frames: u64,
}

impl RenderSink for FrameCounter {
    fn draw(&mut self, view: &RenderView<'_>) {
        self.frames += 1;
        if self.frames % 300 == 0 {
            log::debug!(
                "frame {}: paddle at {:?}, {} objects, {} hands",
                self.frames,
                view.paddle.pos(),
                view.objects.len(),
                view.hands.len()
            );
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::var_os("HANDCATCH_CONFIG").map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref());

    let setup = ScriptedSetup::new(|| Ok(ScriptedTracker::sweeping(240.0)));
    let mut game = match Game::new(settings, setup) {
        Ok(game) => game
            .with_hud_sink(Box::new(LogHud::default()))
            .with_render_sink(Box::new(FrameCounter::default())),
        Err(err) => {
            log::error!("Invalid settings: {err}");
            std::process::exit(1);
        }
    };

    pollster::block_on(async {
        if let Err(err) = game.start().await {
            log::error!("{err}");
            return;
        }

        let frames = SyntheticFrames::new(CAMERA_WIDTH, CAMERA_HEIGHT).take_frames(MAX_DEMO_FRAMES);
        if game.run(frames).await.is_none() {
            log::info!("Demo frame limit reached");
            if let Err(err) = game.exit() {
                log::warn!("{err}");
            }
        }
    });
}
