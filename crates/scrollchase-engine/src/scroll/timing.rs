//! L4 Atomic Layer: Time calculation utilities for retarget segments
//!
//! Provides pure functions over elapsed animation time. Times are measured
//! from the start of the current cycle, not from a wall clock.

use std::time::Duration;

/// Time spent inside a window starting at `start` and lasting `duration`
///
/// # Returns
/// `t - start` clamped to `[0, duration]`
#[inline]
pub fn elapsed_within(t: Duration, start: Duration, duration: Duration) -> Duration {
    t.saturating_sub(start).min(duration)
}

/// Linear progress (0.0 to 1.0) through a window
///
/// A zero-length window counts as complete.
#[inline]
pub fn progress(t: Duration, start: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = elapsed_within(t, start, duration).as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Ease-in time for a segment opened at `elapsed`
///
/// Uses whatever remains of the nominal `total` budget, never less than `floor`.
#[inline]
pub fn segment_duration(total: Duration, elapsed: Duration, floor: Duration) -> Duration {
    total.saturating_sub(elapsed).max(floor)
}
