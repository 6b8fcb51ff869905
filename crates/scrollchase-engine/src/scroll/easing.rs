//! L4 Atomic Layer: Pure easing functions for retarget segments
//!
//! Provides mathematical easing functions that map input [0, 1] to output [0, 1].
//! Every curve is monotonically non-decreasing with f(0) = 0 and f(1) = 1, which
//! keeps each segment's contribution bounded by its delta.

use std::f64::consts::PI;

// Re-export EasingType from core
pub use scrollchase_core::EasingType;

/// Extension trait for EasingType with calculation methods
pub trait EasingTypeExt {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value in range [0, 1]
    ///
    /// # Returns
    /// Eased value in range [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::CosineInOut => cosine_ease_in_out(t),
            EasingType::Cubic => cubic_ease_out(t),
            EasingType::Quintic => quintic_ease_out(t),
            EasingType::EaseOut => exponential_ease_out(t),
        }
    }
}

/// Cosine ease-in-out: f(t) = (cos(tπ - π) + 1) / 2
#[inline]
fn cosine_ease_in_out(t: f64) -> f64 {
    ((t * PI - PI).cos() + 1.0) / 2.0
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Quintic ease-out: f(t) = 1 - (1-t)⁵
#[inline]
fn quintic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv * inv
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 5] = [
        EasingType::Linear,
        EasingType::CosineInOut,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            assert!((easing.apply(0.0) - 0.0).abs() < 0.001, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=100 {
                let t = i as f64 / 100.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_input_clamped() {
        for easing in ALL {
            assert_eq!(easing.apply(-0.5), easing.apply(0.0));
            assert_eq!(easing.apply(1.5), 1.0);
        }
    }

    #[test]
    fn test_cosine_midpoint() {
        let v = EasingType::CosineInOut.apply(0.5);
        assert!((v - 0.5).abs() < 1e-12);
        // Slow start, slow finish
        assert!(EasingType::CosineInOut.apply(0.1) < 0.1);
        assert!(EasingType::CosineInOut.apply(0.9) > 0.9);
    }
}
