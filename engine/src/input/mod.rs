//! Input Module
//!
//! Platform-agnostic jump input. The host samples whatever device it uses
//! (key, mouse button, touch) once per frame as a single "jump held" level;
//! [`JumpInputTracker`] turns that into the [`InputState`] the physics reads.
//!
//! # Example
//!
//! ```rust,ignore
//! use pulse_runner_engine::input::JumpInputTracker;
//!
//! let mut tracker = JumpInputTracker::new();
//!
//! // Each frame:
//! let input = tracker.sample(space_is_down || mouse_is_down);
//! if input.jump_pressed {
//!     // first frame of this press
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Jump input for one tick. Read-only to the physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputState {
    /// True for exactly one tick per press
    pub jump_pressed: bool,
    /// True for every tick the button is down
    pub jump_held: bool,
}

impl InputState {
    /// No input.
    pub fn new() -> Self {
        Self::default()
    }

    /// The first tick of a press.
    pub fn pressed() -> Self {
        Self {
            jump_pressed: true,
            jump_held: true,
        }
    }

    /// A held button after its first tick.
    pub fn held() -> Self {
        Self {
            jump_pressed: false,
            jump_held: true,
        }
    }
}

/// Derives the press edge from a per-frame held level.
#[derive(Debug, Clone, Copy, Default)]
pub struct JumpInputTracker {
    /// Whether jump was down on the previous sample (for edge detection)
    was_held: bool,
}

impl JumpInputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples the raw level for this frame.
    pub fn sample(&mut self, held: bool) -> InputState {
        let pressed = held && !self.was_held;
        self.was_held = held;
        InputState {
            jump_pressed: pressed,
            jump_held: held,
        }
    }

    /// Forgets the previous sample, e.g. after a respawn, so a button still
    /// held does not produce a new press.
    pub fn reset(&mut self, held: bool) {
        self.was_held = held;
    }
}
