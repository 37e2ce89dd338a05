//! Kokaton Musou entry point
//!
//! Headless native runner: loads settings, replays the configured key script
//! through a paced session and logs the outcome.
//! Set `RUST_LOG=debug` to follow spawns and kills.

use std::path::PathBuf;

use kokaton_musou::Settings;
use kokaton_musou::platform::{FrameClock, ScriptedInput, run_session};
use kokaton_musou::renderer::FrameRecorder;
use kokaton_musou::sim::GameState;

fn main() {
    env_logger::init();
    log::info!("Kokaton Musou (native) starting...");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());

    let seed = settings.resolve_seed();
    let mut state = GameState::with_sprites(seed, settings.sprites.clone());
    let mut renderer = FrameRecorder::new();
    let mut clock = FrameClock::new(settings.frame_rate);

    let mut input = ScriptedInput::new(settings.script.clone());
    if !settings.script.is_empty() {
        input = input.then_quit();
    }
    log::info!("Replaying {} scripted frame(s)", input.remaining());

    let outcome = run_session(
        &mut state,
        &mut input,
        &mut renderer,
        &mut clock,
        settings.game_over_pause(),
        settings.max_frames,
    );

    if clock.overruns > 0 {
        log::warn!("{} frame(s) overran their time slice", clock.overruns);
    }
    println!(
        "Score: {} ({:?} after {} frames, seed {})",
        outcome.score, outcome.reason, outcome.frames, seed
    );
}
