//! Errors reported when a simulation is configured with unusable values.

/// Errors that can occur when validating a [`SimConfig`](crate::SimConfig).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A radius or diameter was zero, negative or not finite.
    NonPositiveSize {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A duration (cooldown, lifetime) was negative or not finite.
    InvalidDuration {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A motion or animation parameter was NaN or infinite.
    NotFinite {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A probability fell outside `0.0..=1.0`.
    InvalidProbability(f32),
    /// A `(min, max)` range had `min > max` or a non-finite bound.
    InvertedRange {
        /// Name of the offending setting.
        field: &'static str,
        /// Lower bound as configured.
        min: f32,
        /// Upper bound as configured.
        max: f32,
    },
    /// Birds would count as escaped on the tick they appear.
    SpawnBeyondEscape {
        /// Distance behind x = 0 at which birds enter.
        lateral_offset: f32,
        /// Distance past x = 0 at which birds are removed.
        escape_distance: f32,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositiveSize { field, value } => {
                write!(f, "'{}' must be positive, got {}", field, value)
            }
            ConfigError::InvalidDuration { field, value } => {
                write!(f, "'{}' must be a non-negative duration, got {}", field, value)
            }
            ConfigError::NotFinite { field, value } => {
                write!(f, "'{}' must be finite, got {}", field, value)
            }
            ConfigError::InvalidProbability(p) => {
                write!(f, "Spawn chance must be within 0..=1, got {}", p)
            }
            ConfigError::InvertedRange { field, min, max } => write!(
                f,
                "'{}' must be a finite min..=max range, got {}..={}",
                field, min, max
            ),
            ConfigError::SpawnBeyondEscape {
                lateral_offset,
                escape_distance,
            } => write!(
                f,
                "Birds entering at offset {} are already past escape distance {}",
                lateral_offset, escape_distance
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

pub(crate) fn check_size(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveSize { field, value })
    }
}

pub(crate) fn check_duration(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration { field, value })
    }
}

pub(crate) fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

/// Like [`check_finite`] for every component, reporting the first bad one.
pub(crate) fn check_all_finite(
    field: &'static str,
    values: impl IntoIterator<Item = f32>,
) -> Result<(), ConfigError> {
    values
        .into_iter()
        .try_for_each(|value| check_finite(field, value))
}

pub(crate) fn check_range(field: &'static str, (min, max): (f32, f32)) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, min, max })
    }
}
