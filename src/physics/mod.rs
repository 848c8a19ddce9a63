//! Relativistic kinematics
//!
//! Pure functions mapping a speed (as a fraction of c) to the factors that
//! drive the contraction transform and the Doppler shading pipeline.
//! No state, no rendering dependencies.

use glam::Vec2;

/// Highest speed the rest of the app is allowed to see. Keeps gamma finite.
pub const MAX_SPEED: f32 = 0.9999;

/// Below this speed the motion direction is undefined; no contraction or hue
/// shift is applied so near-zero velocities cannot produce jitter.
pub const DIRECTION_EPSILON: f32 = 0.001;

/// Gain applied to ln(doppler) when converting it to a hue rotation.
pub const HUE_SHIFT_GAIN: f32 = 10.0;

/// Clamp a speed into `[0, MAX_SPEED]`. Non-finite input collapses to zero.
pub fn cap_speed(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, MAX_SPEED)
    } else {
        0.0
    }
}

/// Lorentz factor `1 / sqrt(1 - v^2)`. Caller is responsible for keeping
/// `v < 1` (see [`cap_speed`]).
pub fn gamma(v: f32) -> f32 {
    1.0 / (1.0 - v * v).sqrt()
}

/// Length-contraction factor along the direction of motion, `1 / gamma`.
pub fn scale_x(v: f32) -> f32 {
    1.0 / gamma(v)
}

/// Relativistic Doppler factor `sqrt((1 + v) / (1 - v))`.
pub fn doppler_factor(v: f32) -> f32 {
    ((1.0 + v) / (1.0 - v)).sqrt()
}

/// Hue rotation in degrees. Log compression keeps the rotation bounded even
/// though the Doppler factor itself diverges as v approaches 1.
pub fn hue_shift_degrees(v: f32) -> f32 {
    (HUE_SHIFT_GAIN * doppler_factor(v).ln()) % 360.0
}

/// Scale a pixel value by the Doppler factor, saturating at both ends.
pub fn brightness_boost(v: f32, value: f32) -> f32 {
    (value * doppler_factor(v)).clamp(0.0, 1.0)
}

/// Unit direction of motion, or zero when the speed is inside the dead zone.
pub fn motion_direction(vx: f32, vy: f32) -> Vec2 {
    let v = Vec2::new(vx, vy);
    let magnitude = v.length();
    if magnitude > DIRECTION_EPSILON {
        v / magnitude
    } else {
        Vec2::ZERO
    }
}

/// Per-frame derived factors. Recomputed from the current velocity every
/// frame, never persisted across frames.
#[derive(Debug, Clone, Copy)]
pub struct KinematicFactors {
    pub gamma: f32,
    pub doppler: f32,
    pub inv_gamma: f32,
}

impl KinematicFactors {
    pub fn for_speed(speed: f32) -> Self {
        let v = cap_speed(speed);
        let gamma = gamma(v);
        Self {
            gamma,
            doppler: doppler_factor(v),
            inv_gamma: 1.0 / gamma,
        }
    }
}

impl Default for KinematicFactors {
    fn default() -> Self {
        Self::for_speed(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_rest() {
        assert!((gamma(0.0) - 1.0).abs() < 0.01);
        assert!((scale_x(0.0) - 1.0).abs() < 0.01);
        assert!((doppler_factor(0.0) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_gamma_two_at_0_866c() {
        let v = 0.866;
        assert!((gamma(v) - 2.0).abs() < 0.01);
        assert!((scale_x(v) - 0.5).abs() < 0.01);
        assert!((doppler_factor(v) - 3.73).abs() < 0.02);
    }

    #[test]
    fn test_near_light_speed() {
        let v = 0.99;
        assert!((gamma(v) - 7.09).abs() < 0.02);
        assert!((scale_x(v) - 0.14).abs() < 0.01);
        assert!((doppler_factor(v) - 14.1).abs() < 0.05);
    }

    #[test]
    fn test_gamma_at_least_one() {
        for i in 0..100 {
            let v = i as f32 / 100.0;
            assert!(gamma(v) >= 1.0, "gamma({}) = {}", v, gamma(v));
            assert!(doppler_factor(v) >= 1.0);
        }
    }

    #[test]
    fn test_scale_x_strictly_decreasing() {
        let mut previous = scale_x(0.0);
        assert!(previous <= 1.0 && previous > 0.0);
        for i in 1..100 {
            let current = scale_x(i as f32 / 100.0);
            assert!(current < previous, "scale_x not decreasing at v={}", i);
            assert!(current > 0.0);
            previous = current;
        }
    }

    #[test]
    fn test_cap_speed() {
        assert_eq!(cap_speed(0.5), 0.5);
        assert_eq!(cap_speed(1.5), MAX_SPEED);
        assert_eq!(cap_speed(-0.1), 0.0);
        assert_eq!(cap_speed(f32::NAN), 0.0);
        assert_eq!(cap_speed(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_gamma_finite_at_cap() {
        let g = gamma(MAX_SPEED);
        assert!(g.is_finite());
        assert!(g > 1.0);
    }

    #[test]
    fn test_hue_shift_bounded() {
        for i in 0..1000 {
            let v = cap_speed(i as f32 / 1000.0);
            let shift = hue_shift_degrees(v);
            assert!((0.0..360.0).contains(&shift), "shift({}) = {}", v, shift);
        }
    }

    #[test]
    fn test_brightness_boost_clamped() {
        assert_eq!(brightness_boost(MAX_SPEED, 1.0), 1.0);
        assert_eq!(brightness_boost(MAX_SPEED, 0.9), 1.0);
        assert_eq!(brightness_boost(0.0, 0.5), 0.5);
        assert_eq!(brightness_boost(0.5, 0.0), 0.0);
    }

    #[test]
    fn test_direction_dead_zone() {
        assert_eq!(motion_direction(0.0, 0.0), Vec2::ZERO);
        assert_eq!(motion_direction(0.0005, 0.0005), Vec2::ZERO);

        let dir = motion_direction(0.3, 0.4);
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.x - 0.6).abs() < 1e-6);
        assert!((dir.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_factors_consistent() {
        let factors = KinematicFactors::for_speed(0.866);
        assert!((factors.inv_gamma * factors.gamma - 1.0).abs() < 1e-5);
        assert!((factors.inv_gamma - scale_x(0.866)).abs() < 1e-6);

        // Over-cap input is clamped before any formula sees it
        let capped = KinematicFactors::for_speed(2.0);
        assert!(capped.gamma.is_finite());
    }
}
