//! L3 Molecular Layer: Per-axis sum of retarget segments

use std::time::Duration;

use super::easing::EasingType;
use super::segment::TargetSegment;

/// Append-only collection of segments for one axis of one cycle
///
/// Segments are never removed individually; the whole accumulator is cleared
/// at cycle boundaries. At any time `t`, `start + value_at(t)` is the best
/// estimate of where the axis should be.
#[derive(Debug, Clone, Default)]
pub struct AxisAccumulator {
    segments: Vec<TargetSegment>,
}

impl AxisAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new segment. Zero deltas are ignored.
    pub fn append(&mut self, delta: f64, start: Duration, duration: Duration) {
        if delta == 0.0 {
            return;
        }
        self.segments.push(TargetSegment::new(delta, start, duration));
    }

    /// Sum of every segment's eased contribution at `t`
    pub fn value_at(&self, t: Duration, easing: EasingType) -> f64 {
        self.segments.iter().map(|s| s.eased_value(t, easing)).sum()
    }

    /// Sum of every segment's delta, i.e. the value once all have eased in
    pub fn committed(&self) -> f64 {
        self.segments.iter().map(TargetSegment::delta).sum()
    }

    /// True when every segment has fully eased in by `t`
    pub fn is_settled(&self, t: Duration) -> bool {
        self.segments.iter().all(|s| s.is_settled(t))
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[TargetSegment] {
        &self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_zero_delta_ignored() {
        let mut acc = AxisAccumulator::new();
        acc.append(0.0, ms(0), ms(100));
        assert!(acc.is_empty());
        assert_eq!(acc.value_at(ms(50), EasingType::Linear), 0.0);
    }

    #[test]
    fn test_sum_of_segments() {
        let mut acc = AxisAccumulator::new();
        acc.append(100.0, ms(0), ms(100));
        acc.append(50.0, ms(50), ms(100));

        // First half way, second not started
        assert!((acc.value_at(ms(50), EasingType::Linear) - 50.0).abs() < 1e-9);
        // First done, second half way
        assert!((acc.value_at(ms(100), EasingType::Linear) - 125.0).abs() < 1e-9);
        assert!((acc.value_at(ms(150), EasingType::Linear) - 150.0).abs() < 1e-9);
        assert_eq!(acc.committed(), 150.0);
    }

    #[test]
    fn test_settled_tracks_last_segment() {
        let mut acc = AxisAccumulator::new();
        assert!(acc.is_settled(ms(0)));

        acc.append(10.0, ms(0), ms(100));
        acc.append(-5.0, ms(80), ms(125));
        assert!(!acc.is_settled(ms(150)));
        assert!(acc.is_settled(ms(205)));
    }

    #[test]
    fn test_clear() {
        let mut acc = AxisAccumulator::new();
        acc.append(10.0, ms(0), ms(100));
        acc.append(20.0, ms(10), ms(100));
        assert_eq!(acc.len(), 2);

        acc.clear();
        assert!(acc.is_empty());
        assert_eq!(acc.committed(), 0.0);
    }
}
