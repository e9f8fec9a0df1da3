//! Axis-aligned rectangles for hitboxes and view bounds
//!
//! A rectangle is defined by its lower-left corner and its size:
//! - min: lower-left corner (world units)
//! - size: width and height (non-negative)

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Lower-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle of the given size centered on a point
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    /// Upper-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Grow by `margin` on every side
    #[inline]
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }

    /// Shrink by `margin` on every side
    #[inline]
    pub fn inset(&self, margin: f32) -> Self {
        self.expanded(-margin)
    }

    #[inline]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            size: self.size,
        }
    }

    /// Strict interior containment (edges are outside)
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x > self.min.x && p.x < max.x && p.y > self.min.y && p.y < max.y
    }

    /// Clamp a lower-left anchored body of `body_size` so it stays inside this rectangle
    pub fn clamp_body(&self, pos: Vec2, body_size: Vec2) -> Vec2 {
        let hi = (self.max() - body_size).max(self.min);
        pos.clamp(self.min, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_and_inset() {
        let r = Rect::new(10.0, 10.0, 44.0, 44.0);
        let e = r.expanded(40.0);
        assert_eq!(e.min, Vec2::new(-30.0, -30.0));
        assert_eq!(e.size, Vec2::new(124.0, 124.0));
        assert_eq!(e.inset(40.0), r);
    }

    #[test]
    fn test_center_and_from_center() {
        let r = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::splat(16.0));
        assert_eq!(r.min, Vec2::new(92.0, 42.0));
        assert_eq!(r.center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_contains_point_is_strict() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(Vec2::new(5.0, 5.0)));
        assert!(!r.contains_point(Vec2::new(0.0, 5.0)));
        assert!(!r.contains_point(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn test_clamp_body_keeps_body_inside() {
        let world = Rect::new(0.0, 0.0, 5000.0, 5000.0);
        let body = Vec2::splat(64.0);
        assert_eq!(world.clamp_body(Vec2::new(-5.0, 4990.0), body), Vec2::new(0.0, 4936.0));
        assert_eq!(world.clamp_body(Vec2::new(100.0, 200.0), body), Vec2::new(100.0, 200.0));
    }
}
