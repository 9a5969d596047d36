//! World Module
//!
//! Level-wide state that is not owned by the player: speed tiers, the
//! music-locked horizontal clock and the per-session world layout.

pub mod clock;
pub mod config;
pub mod speed;

pub use clock::HorizontalClock;
pub use config::{DEFAULT_GROUND_TOLERANCE, DEFAULT_PLAYER_SIZE, WorldConfig};
pub use speed::SpeedTier;
