//! Speed Tiers
//!
//! Discrete horizontal scroll speeds. A level starts at one tier and speed
//! portals switch between them; the active tier is the `speed id` carried
//! in [`crate::player::PhysicsState`].

use serde::{Deserialize, Serialize};

/// Horizontal speed tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedTier {
    /// 0.5x
    Slow,
    /// 1x
    #[default]
    Normal,
    /// 2x
    Fast,
    /// 3x
    Faster,
    /// 4x
    Fastest,
}

impl SpeedTier {
    /// All tiers, slowest first.
    pub const ALL: [SpeedTier; 5] = [
        SpeedTier::Slow,
        SpeedTier::Normal,
        SpeedTier::Fast,
        SpeedTier::Faster,
        SpeedTier::Fastest,
    ];

    /// Horizontal travel speed in units per second.
    pub fn units_per_second(self) -> f32 {
        match self {
            SpeedTier::Slow => 251.16,
            SpeedTier::Normal => 311.58,
            SpeedTier::Fast => 387.42,
            SpeedTier::Faster => 468.0,
            SpeedTier::Fastest => 576.0,
        }
    }

    /// Short display label (matches the serialized name).
    pub fn name(self) -> &'static str {
        match self {
            SpeedTier::Slow => "slow",
            SpeedTier::Normal => "normal",
            SpeedTier::Fast => "fast",
            SpeedTier::Faster => "faster",
            SpeedTier::Fastest => "fastest",
        }
    }
}
