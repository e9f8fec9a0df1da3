//! Tank Arena - a top-down tank combat simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (combatants, shells, enemy AI, arena coordinator)
//! - `audio`: Audio sink boundary (event to sound-effect mapping)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless driver (60 Hz, one tick per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 5000.0;
    pub const WORLD_HEIGHT: f32 = 5000.0;

    /// Visible rectangle around the player (camera zoom 0.3 over the world)
    pub const VIEW_WIDTH: f32 = 1500.0;
    pub const VIEW_HEIGHT: f32 = 1500.0;

    /// Tank body size; hitbox is inset on every side
    pub const TANK_SIZE: f32 = 64.0;
    pub const HITBOX_INSET: f32 = 10.0;

    /// Spawn cadence
    pub const SPAWN_INTERVAL: f32 = 3.0;
    pub const MAX_ENEMIES: usize = 30;

    /// Shells
    pub const SHELL_SPEED: f32 = 3000.0;
    pub const SHELL_MAX_RANGE: f32 = 1500.0;
    pub const SHELL_SIZE: f32 = 16.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Shortest signed difference `to - from` in degrees, in [-180, 180)
#[inline]
pub fn angle_delta_deg(from: f32, to: f32) -> f32 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

/// Interpolate `from` toward `to` along the shortest arc.
///
/// `t` is the fraction of the remaining arc to cover, clamped to [0, 1].
#[inline]
pub fn lerp_angle_deg(from: f32, to: f32, t: f32) -> f32 {
    normalize_degrees(from + angle_delta_deg(from, to) * t.clamp(0.0, 1.0))
}

/// Unit vector for a heading in degrees (0 = +x, counter-clockwise)
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let r = degrees.to_radians();
    Vec2::new(r.cos(), r.sin())
}

/// Bearing in degrees [0, 360) from one point to another.
///
/// Coincident points have bearing 0.
#[inline]
pub fn bearing_deg(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    if d.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    normalize_degrees(d.y.atan2(d.x).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees_wraps() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert!((normalize_degrees(725.0) - 5.0).abs() < 1e-3);
        let tiny = normalize_degrees(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_lerp_angle_takes_short_way() {
        // 350 -> 10 should pass through 0, not 180
        let mid = lerp_angle_deg(350.0, 10.0, 0.5);
        assert!(mid.abs() < 1e-3 || (mid - 360.0).abs() < 1e-3);

        assert!((lerp_angle_deg(0.0, 90.0, 1.0) - 90.0).abs() < 1e-4);
        // Fraction is clamped, no overshoot
        assert!((lerp_angle_deg(0.0, 90.0, 2.0) - 90.0).abs() < 1e-4);
        assert!((lerp_angle_deg(0.0, 90.0, 0.0)).abs() < 1e-4);
    }

    #[test]
    fn test_bearing() {
        let b = bearing_deg(Vec2::ZERO, Vec2::new(0.0, 10.0));
        assert!((b - 90.0).abs() < 1e-3);
        let b = bearing_deg(Vec2::ZERO, Vec2::new(-10.0, 0.0));
        assert!((b - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_bearing_to_self_is_zero() {
        let p = Vec2::new(123.0, 456.0);
        let b = bearing_deg(p, p);
        assert_eq!(b, 0.0);
        assert!(!b.is_nan());
    }

    #[test]
    fn test_heading_vector() {
        let v = heading_vector(0.0);
        assert!((v.x - 1.0).abs() < 1e-6 && v.y.abs() < 1e-6);
        let v = heading_vector(90.0);
        assert!(v.x.abs() < 1e-6 && (v.y - 1.0).abs() < 1e-6);
    }

    proptest::proptest! {
        #[test]
        fn prop_normalized_angle_in_range(a in -1.0e6f32..1.0e6) {
            let n = normalize_degrees(a);
            proptest::prop_assert!((0.0..360.0).contains(&n));
        }

        #[test]
        fn prop_lerp_never_overshoots(from in 0.0f32..360.0, to in 0.0f32..360.0, t in -1.0f32..3.0) {
            let before = angle_delta_deg(from, to).abs();
            let after = angle_delta_deg(lerp_angle_deg(from, to, t), to).abs();
            proptest::prop_assert!(after <= before + 1e-2);
        }
    }
}
