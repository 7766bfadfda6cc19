//! Tuning knobs for block sizing.

use crate::DequeError;
use serde::{Deserialize, Serialize};

/// Smallest target block size used when no configuration is supplied.
pub const DEFAULT_MIN_BLOCK_SIZE: usize = 128;

/// Factor by which the length must drift before the target size is refreshed.
pub const DEFAULT_HYSTERESIS: usize = 4;

/// Block sizing configuration for a [`Deque`](crate::Deque).
///
/// The target block size is `max(floor(sqrt(n)), min_block_size)`, where `n`
/// is the length recorded the last time it drifted outside
/// `[n / hysteresis, n * hysteresis]`.
///
/// Missing fields fall back to their defaults when deserialized:
///
/// ```rust
/// use unrolled_deque::DequeConfig;
///
/// let config: DequeConfig = serde_json::from_str(r#"{ "min_block_size": 16 }"#).unwrap();
/// assert_eq!(config.min_block_size, 16);
/// assert_eq!(config.hysteresis, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DequeConfig {
    /// Lower bound of the target block size. Must be positive.
    pub min_block_size: usize,
    /// Hysteresis band factor. Must be at least 2.
    pub hysteresis: usize,
}

impl DequeConfig {
    /// Creates the default configuration.
    pub const fn new() -> Self {
        Self {
            min_block_size: DEFAULT_MIN_BLOCK_SIZE,
            hysteresis: DEFAULT_HYSTERESIS,
        }
    }

    /// Returns a copy with the given minimum block size.
    pub const fn with_min_block_size(mut self, min_block_size: usize) -> Self {
        self.min_block_size = min_block_size;
        self
    }

    /// Returns a copy with the given hysteresis factor.
    pub const fn with_hysteresis(mut self, hysteresis: usize) -> Self {
        self.hysteresis = hysteresis;
        self
    }

    /// Checks that the configuration can drive the sizing heuristic.
    ///
    /// # Errors
    /// Returns [`DequeError::InvalidConfig`] if `min_block_size` is zero or
    /// `hysteresis` is below 2.
    pub fn validate(&self) -> Result<(), DequeError> {
        if self.min_block_size == 0 {
            return Err(DequeError::InvalidConfig("min_block_size must be positive"));
        }
        if self.hysteresis < 2 {
            return Err(DequeError::InvalidConfig("hysteresis must be at least 2"));
        }
        Ok(())
    }
}

impl Default for DequeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DequeConfig::default();
        assert_eq!(config.min_block_size, 128);
        assert_eq!(config.hysteresis, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_degenerate_values() {
        assert_eq!(
            DequeConfig::new().with_min_block_size(0).validate(),
            Err(DequeError::InvalidConfig("min_block_size must be positive"))
        );
        assert_eq!(
            DequeConfig::new().with_hysteresis(1).validate(),
            Err(DequeError::InvalidConfig("hysteresis must be at least 2"))
        );
    }
}
