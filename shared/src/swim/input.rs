use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Raw swim input for the current frame.
pub trait InputSource {
    /// Horizontal axis in [-1, 1].
    fn horizontal(&self) -> f32;
    /// Vertical axis in [-1, 1], positive up.
    fn vertical(&self) -> f32;
    /// True only on the frame the jump button went down.
    fn jump_pressed(&self) -> bool;
}

/// Input written by the host each frame.
///
/// `jump` is an edge: the swim systems clear it once the frame has been
/// processed.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SwimInput {
    pub horizontal: f32,
    pub vertical: f32,
    pub jump: bool,
}

impl SwimInput {
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
            jump: false,
        }
    }

    pub fn with_jump(mut self, jump: bool) -> Self {
        self.jump = jump;
        self
    }
}

impl InputSource for SwimInput {
    fn horizontal(&self) -> f32 {
        self.horizontal
    }

    fn vertical(&self) -> f32 {
        self.vertical
    }

    fn jump_pressed(&self) -> bool {
        self.jump
    }
}
