//! L4 Atomic Layer: Configuration types for the scroll controller
//!
//! Re-exports configuration from scrollchase-core and provides additional utilities.

use std::time::Duration;

// Re-export config types from core
pub use scrollchase_core::{EasingType, ScrollConfig};

use super::timing::segment_duration;

/// Extension trait for ScrollConfig with utility methods
pub trait ScrollConfigExt {
    /// Ease-in duration for a segment opened at `elapsed`
    fn segment_duration_at(&self, elapsed: Duration) -> Duration;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn segment_duration_at(&self, elapsed: Duration) -> Duration {
        // A zero floor would let a segment end the instant it starts
        let floor = self.min_segment_duration().max(Duration::from_millis(1));
        segment_duration(self.animation_duration(), elapsed, floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_duration_at() {
        let config = ScrollConfig::default();
        assert_eq!(config.segment_duration_at(Duration::ZERO), Duration::from_millis(300));
        assert_eq!(
            config.segment_duration_at(Duration::from_millis(120)),
            Duration::from_millis(180)
        );
        assert_eq!(
            config.segment_duration_at(Duration::from_millis(290)),
            Duration::from_millis(125)
        );
    }

    #[test]
    fn test_segment_duration_never_zero() {
        let config = ScrollConfig {
            animation_duration_ms: 0,
            min_segment_duration_ms: 0,
            ..Default::default()
        };
        assert!(!config.segment_duration_at(Duration::ZERO).is_zero());
    }
}
