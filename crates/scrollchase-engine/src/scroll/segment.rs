//! L4 Atomic Layer: One retarget event's contribution to one axis

use std::time::Duration;

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{elapsed_within, progress};

/// An eased ramp from 0 to `delta` over `[start, start + duration]`
///
/// Immutable once created. The contribution is monotonic in elapsed time and
/// bounded by `[0, delta]` (or `[delta, 0]` for negative deltas).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSegment {
    delta: f64,
    start: Duration,
    duration: Duration,
}

impl TargetSegment {
    /// Create a segment; a zero `duration` is raised to one millisecond
    pub fn new(delta: f64, start: Duration, duration: Duration) -> Self {
        Self {
            delta,
            start,
            duration: duration.max(Duration::from_millis(1)),
        }
    }

    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    #[inline]
    pub fn start(&self) -> Duration {
        self.start
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn end(&self) -> Duration {
        self.start + self.duration
    }

    #[inline]
    pub fn elapsed_within(&self, t: Duration) -> Duration {
        elapsed_within(t, self.start, self.duration)
    }

    #[inline]
    pub fn linear_progress(&self, t: Duration) -> f64 {
        progress(t, self.start, self.duration)
    }

    #[inline]
    pub fn eased_value(&self, t: Duration, easing: EasingType) -> f64 {
        easing.apply(self.linear_progress(t)) * self.delta
    }

    /// Whether the segment has fully eased in by `t`
    #[inline]
    pub fn is_settled(&self, t: Duration) -> bool {
        t >= self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_before_start_contributes_nothing() {
        let seg = TargetSegment::new(100.0, ms(100), ms(200));
        assert_eq!(seg.eased_value(ms(0), EasingType::CosineInOut), 0.0);
        assert_eq!(seg.elapsed_within(ms(50)), Duration::ZERO);
        assert!(!seg.is_settled(ms(299)));
    }

    #[test]
    fn test_after_end_contributes_full_delta() {
        let seg = TargetSegment::new(-40.0, ms(0), ms(200));
        assert_eq!(seg.eased_value(ms(200), EasingType::CosineInOut), -40.0);
        assert_eq!(seg.eased_value(ms(5000), EasingType::CosineInOut), -40.0);
        assert!(seg.is_settled(ms(200)));
        assert_eq!(seg.end(), ms(200));
    }

    #[test]
    fn test_bounded_and_monotonic_negative_delta() {
        let seg = TargetSegment::new(-80.0, ms(20), ms(160));
        let mut prev = 0.0;
        for i in 0..=40 {
            let v = seg.eased_value(ms(i * 5), EasingType::CosineInOut);
            assert!(v <= prev + 1e-12, "not monotonic at {}ms", i * 5);
            assert!((-80.0..=0.0).contains(&v));
            prev = v;
        }
    }

    #[test]
    fn test_zero_duration_is_raised() {
        let seg = TargetSegment::new(10.0, ms(0), Duration::ZERO);
        assert!(!seg.duration().is_zero());
        assert!((seg.linear_progress(ms(0)) - 0.0).abs() < 1e-12);
    }
}
