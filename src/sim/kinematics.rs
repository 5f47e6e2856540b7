//! Interpolation and oscillation helpers
//!
//! Pure functions shared by the trail, the shaking ramp, and the return
//! interpolation. No state, no RNG.

use glam::Vec2;

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sinusoidal jitter around an anchor point
///
/// `phase_x` and `phase_y` are independent accumulators so the motion never
/// visibly synchronizes across axes.
#[inline]
pub fn oscillate(anchor: Vec2, phase_x: f32, phase_y: f32, radius: f32) -> Vec2 {
    anchor + Vec2::new(phase_x.sin(), phase_y.sin()) * radius
}

/// Exponential smoothing step: move `current` toward `target` by `rate`
#[inline]
pub fn smooth_toward(current: f32, target: f32, rate: f32) -> f32 {
    current + (target - current) * rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(2.0, 10.0, 0.5), 6.0);
    }

    #[test]
    fn test_oscillate_stays_within_radius() {
        let anchor = Vec2::new(100.0, 50.0);
        for i in 0..64 {
            let phase = i as f32 * 0.37;
            let p = oscillate(anchor, phase, phase * 1.7, 12.0);
            assert!((p.x - anchor.x).abs() <= 12.0 + 1e-4);
            assert!((p.y - anchor.y).abs() <= 12.0 + 1e-4);
        }
    }

    #[test]
    fn test_smooth_toward_converges() {
        let mut level = 0.0;
        for _ in 0..200 {
            level = smooth_toward(level, 1.0, 0.1);
        }
        assert!((level - 1.0).abs() < 1e-6);
    }

    proptest! {
        /// For t in [0,1] the result never leaves the segment [a, b].
        #[test]
        fn prop_lerp_bounded(a in -1e4f32..1e4, b in -1e4f32..1e4, t in 0.0f32..=1.0) {
            let v = lerp(a, b, t);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(v >= lo - 1e-2 && v <= hi + 1e-2);
        }
    }
}
