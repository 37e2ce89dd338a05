//! Platform abstraction layer
//!
//! Everything between the deterministic simulation and the outside world:
//! - Input sources (held keys + discrete events per tick)
//! - Frame pacing
//! - The session loop tying input, simulation and rendering together

pub mod clock;
pub mod script;
pub mod session;

pub use clock::FrameClock;
pub use script::ScriptedInput;
pub use session::{EndReason, SessionOutcome, run_session};

use crate::sim::{GameState, TickInput};

/// Supplies the input for each tick
pub trait InputSource {
    /// Collect held keys and the events that arrived since the last poll
    fn poll(&mut self, state: &GameState) -> TickInput;
}
