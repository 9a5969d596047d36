//! Horizontal Music Clock
//!
//! Horizontal position is never velocity-integrated. It is a function of
//! elapsed music time and the active speed tier:
//!
//! ```text
//! x = anchor_x + (t - anchor_time) * speed(tier)
//! ```
//!
//! With no speed change since the level start, `anchor_x == start_x` and
//! `anchor_time == 0`, so `x == start_x + music_time * speed`. A speed change
//! re-anchors at the current position and time so `x` stays continuous.
//!
//! When the audio collaborator supplies no music time, the clock advances by
//! the tick's wall-clock delta instead (fallback). Vertical physics is not
//! affected by this clock; it always integrates the tick's delta time.

use serde::{Deserialize, Serialize};

use super::speed::SpeedTier;

/// Maps music time to horizontal position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalClock {
    anchor_x: f32,
    anchor_time: f32,
    time: f32,
    speed: SpeedTier,
}

impl HorizontalClock {
    /// Creates a clock anchored at `start_x` at music time zero.
    pub fn new(start_x: f32, speed: SpeedTier) -> Self {
        Self {
            anchor_x: start_x,
            anchor_time: 0.0,
            time: 0.0,
            speed,
        }
    }

    /// Advances the clock and returns the new horizontal position.
    ///
    /// # Arguments
    /// * `music_time` - Authoritative audio position in seconds, if available
    /// * `delta_time` - Wall-clock frame delta, used only when `music_time` is `None`
    pub fn advance(&mut self, music_time: Option<f32>, delta_time: f32) -> f32 {
        match music_time {
            Some(t) => self.time = t,
            None => self.time += delta_time,
        }
        self.position()
    }

    /// Horizontal position at the current clock time.
    pub fn position(&self) -> f32 {
        self.anchor_x + (self.time - self.anchor_time) * self.speed.units_per_second()
    }

    /// Current clock time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn speed(&self) -> SpeedTier {
        self.speed
    }

    /// Horizontal velocity implied by the active tier.
    pub fn velocity(&self) -> f32 {
        self.speed.units_per_second()
    }

    /// Switches speed tier, re-anchoring so the position is continuous.
    pub fn set_speed(&mut self, speed: SpeedTier) {
        if speed == self.speed {
            return;
        }
        self.anchor_x = self.position();
        self.anchor_time = self.time;
        self.speed = speed;
    }

    /// Re-anchors the clock at an explicit position and time (reset / respawn).
    pub fn reanchor(&mut self, x: f32, time: f32, speed: SpeedTier) {
        self.anchor_x = x;
        self.anchor_time = time;
        self.time = time;
        self.speed = speed;
    }
}
