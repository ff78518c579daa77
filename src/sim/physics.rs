//! Pure integration helpers
//!
//! No state, no side effects; everything here is exact arithmetic on its
//! arguments so the kinematics code stays trivially testable.

/// Apply gravity to a vertical velocity over a timestep
#[inline]
pub fn apply_gravity(velocity: f32, gravity: f32, dt: f32) -> f32 {
    velocity - gravity * dt
}

/// Exponential ease-out: fast start, slow settle
///
/// Maps t in [0, 1] to [0, 1] with f(1) == 1 exactly so a finished lane
/// switch lands on the target coordinate.
#[inline]
pub fn ease_out_expo(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else if t <= 0.0 {
        0.0
    } else {
        1.0 - 2f32.powf(-10.0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_apply_gravity_basic() {
        assert_eq!(apply_gravity(4.0, 9.8, 0.0), 4.0);
        assert_eq!(apply_gravity(0.0, 9.8, 1.0), -9.8);
    }

    #[test]
    fn test_ease_out_expo_endpoints() {
        assert_eq!(ease_out_expo(0.0), 0.0);
        assert_eq!(ease_out_expo(1.0), 1.0);
        assert_eq!(ease_out_expo(2.0), 1.0);
        assert_eq!(ease_out_expo(-0.5), 0.0);
    }

    #[test]
    fn test_ease_out_expo_front_loaded() {
        // Fast start: half the time covers far more than half the distance
        assert!(ease_out_expo(0.5) > 0.9);
        // Monotone on a coarse grid
        let mut prev = 0.0;
        for i in 1..=20 {
            let v = ease_out_expo(i as f32 / 20.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    proptest! {
        #[test]
        fn prop_apply_gravity_exact(
            v in -100.0f32..100.0,
            g in 0.0f32..50.0,
            dt in 0.0f32..1.0,
        ) {
            prop_assert_eq!(apply_gravity(v, g, dt), v - g * dt);
        }

        #[test]
        fn prop_ease_out_in_unit_range(t in -1.0f32..2.0) {
            let v = ease_out_expo(t);
            prop_assert!((0.0..=1.0).contains(&v));
        }
    }
}
