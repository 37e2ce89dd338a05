//! Rendering interface
//!
//! The simulation never touches pixels. Each frame is flattened into a list of
//! draw calls in a fixed group order and handed to a `Renderer` backend.

pub mod frame;

pub use frame::{DrawCall, DrawLayer, Visual, build_frame};

use crate::sim::GameState;

/// A backend that turns draw calls into pixels (or anything else)
pub trait Renderer {
    fn draw(&mut self, call: &DrawCall);

    /// Called once every draw call of a frame has been issued
    fn present(&mut self) {}
}

/// Issue every draw call for the current state, then present
pub fn render(state: &GameState, renderer: &mut impl Renderer) {
    for call in build_frame(state) {
        renderer.draw(&call);
    }
    renderer.present();
}

/// Keeps the draw calls of the last presented frame
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pending: Vec<DrawCall>,
    /// Draw calls of the last presented frame
    pub last_frame: Vec<DrawCall>,
    pub frames_presented: u64,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls on `layer` in the last frame
    pub fn count(&self, layer: DrawLayer) -> usize {
        self.last_frame.iter().filter(|c| c.layer == layer).count()
    }
}

impl Renderer for FrameRecorder {
    fn draw(&mut self, call: &DrawCall) {
        self.pending.push(call.clone());
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
        log::trace!(
            "Frame {}: {} draw calls",
            self.frames_presented,
            self.last_frame.len()
        );
    }
}
