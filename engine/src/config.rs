//! Configuration Errors
//!
//! Shared error type for loading and validating the session configuration
//! ([`crate::player::PhysicsConfig`], [`crate::world::WorldConfig`]).
//! The per-tick simulation itself never fails; only configuration does.

/// Errors raised while parsing or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration field `{field}` must be finite")]
    NonFinite { field: &'static str },

    #[error("Configuration field `{field}` must not be negative")]
    Negative { field: &'static str },

    #[error("Configuration field `{field}` must be greater than zero")]
    NotPositive { field: &'static str },
}

/// Rejects NaN and infinities.
pub(crate) fn require_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

/// Rejects non-finite and negative values.
pub(crate) fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field });
    }
    Ok(())
}

/// Rejects non-finite, zero and negative values.
pub(crate) fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NotPositive { field });
    }
    Ok(())
}
