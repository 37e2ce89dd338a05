//! Session loop
//!
//! Poll input, step the simulation, render, pace. Runs until the player
//! quits, gets hit, or an optional frame cap is reached.

use std::time::Duration;

use super::{FrameClock, InputSource};
use crate::renderer::{Renderer, render};
use crate::sim::{GameState, tick};

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Quit,
    GameOver,
    FrameLimit,
}

/// Summary returned when a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub reason: EndReason,
    pub frames: u64,
    pub score: u64,
}

/// Run a session to completion.
///
/// On game over the final frame (sad player, final score) is rendered once
/// more and the loop blocks for `game_over_pause` before returning.
pub fn run_session(
    state: &mut GameState,
    input: &mut impl InputSource,
    renderer: &mut impl Renderer,
    clock: &mut FrameClock,
    game_over_pause: Duration,
    max_frames: Option<u64>,
) -> SessionOutcome {
    log::info!("Session started with seed {}", state.seed);

    let reason = loop {
        if max_frames.is_some_and(|max| state.time_ticks >= max) {
            break EndReason::FrameLimit;
        }

        let frame_input = input.poll(state);
        if frame_input.quit_requested() {
            break EndReason::Quit;
        }

        let result = tick(state, &frame_input);
        for event in state.drain_events() {
            log::trace!("{:?}", event);
        }

        if result.player_hit {
            render(state, renderer);
            clock.pause(game_over_pause);
            break EndReason::GameOver;
        }

        render(state, renderer);
        clock.wait_for_next_frame();
    };

    let outcome = SessionOutcome {
        reason,
        frames: state.time_ticks,
        score: state.score.value(),
    };
    log::info!(
        "Session ended ({:?}) after {} frames with score {}",
        outcome.reason,
        outcome.frames,
        outcome.score
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ScriptedInput;
    use crate::renderer::FrameRecorder;
    use crate::sim::{Key, KeyEvent};

    #[test]
    fn test_quit_ends_session() {
        let mut state = GameState::new(3);
        let mut input = ScriptedInput::new([vec![], vec![KeyEvent::Pressed(Key::Up)]]).then_quit();
        let mut recorder = FrameRecorder::new();
        let mut clock = FrameClock::unpaced();

        let outcome = run_session(
            &mut state,
            &mut input,
            &mut recorder,
            &mut clock,
            Duration::ZERO,
            None,
        );
        assert_eq!(outcome.reason, EndReason::Quit);
        assert_eq!(outcome.frames, 2);
        assert_eq!(recorder.frames_presented, 2);
    }

    #[test]
    fn test_frame_limit() {
        let mut state = GameState::new(3);
        let mut input = ScriptedInput::default();
        let mut recorder = FrameRecorder::new();
        let mut clock = FrameClock::unpaced();

        let outcome = run_session(
            &mut state,
            &mut input,
            &mut recorder,
            &mut clock,
            Duration::ZERO,
            Some(10),
        );
        assert_eq!(outcome.reason, EndReason::FrameLimit);
        assert_eq!(outcome.frames, 10);
    }
}
