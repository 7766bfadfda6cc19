//! Target block size with hysteresis.
//!
//! The target is `max(floor(sqrt(n)), min_block_size)` where `n` is the
//! length last recorded. `n` is only refreshed once the live length leaves
//! `[n / hysteresis, n * hysteresis]`, so a deque hovering around one size
//! does not flap between splitting and merging.

use crate::DequeConfig;

#[derive(Debug, Clone)]
pub(crate) struct BlockSizing {
    config: DequeConfig,
    last_modified: usize,
}

impl BlockSizing {
    pub(crate) fn new(config: DequeConfig) -> Self {
        Self {
            config,
            last_modified: config.min_block_size,
        }
    }

    pub(crate) fn config(&self) -> DequeConfig {
        self.config
    }

    /// Records `len` if it left the band around the recorded length.
    ///
    /// Returns `true` if the target dropped as a result.
    pub(crate) fn refresh(&mut self, len: usize) -> bool {
        let factor = self.config.hysteresis;
        if len <= self.last_modified.saturating_mul(factor)
            && len.saturating_mul(factor) >= self.last_modified
        {
            return false;
        }
        let before = self.current();
        #[cfg(feature = "tracing")]
        tracing::debug!(from = self.last_modified, to = len, "refreshing block sizing");
        self.last_modified = len;
        self.current() < before
    }

    /// Target for the recorded length.
    pub(crate) fn current(&self) -> usize {
        isqrt(self.last_modified).max(self.config.min_block_size)
    }

    pub(crate) fn reset(&mut self) {
        self.last_modified = self.config.min_block_size;
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn isqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    // Correct the float estimate for large inputs.
    while root.checked_mul(root).map_or(true, |square| square > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|square| square <= n) {
        root += 1;
    }
    root
}
