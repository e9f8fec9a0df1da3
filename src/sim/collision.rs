//! Overlap tests and penetration resolution for rectangular bodies
//!
//! Everything here is pure geometry: callers decide which pairs to test
//! (including excluding a body from testing against itself).

use glam::Vec2;

use super::rect::Rect;

/// Separation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Displacement that pushes one rectangle clear of another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation {
    pub axis: Axis,
    /// Signed distance along `axis` (negative = toward -x / -y)
    pub push: f32,
}

impl Separation {
    /// Displacement as a vector
    pub fn offset(&self) -> Vec2 {
        match self.axis {
            Axis::X => Vec2::new(self.push, 0.0),
            Axis::Y => Vec2::new(0.0, self.push),
        }
    }
}

/// Standard AABB overlap; touching edges do not count
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.min.x < b_max.x && b.min.x < a_max.x && a.min.y < b_max.y && b.min.y < a_max.y
}

/// Penetration depth of two rectangles on each axis (may be <= 0 when apart)
#[inline]
pub fn penetration(a: &Rect, b: &Rect) -> Vec2 {
    let (a_max, b_max) = (a.max(), b.max());
    Vec2::new(
        (a_max.x - b.min.x).min(b_max.x - a.min.x),
        (a_max.y - b.min.y).min(b_max.y - a.min.y),
    )
}

/// Push `this` out of `other` along the axis of least penetration.
///
/// The push covers the penetration depth plus `buffer` and points away from
/// `other`'s center. Equal depths resolve on the x-axis.
pub fn resolve_overlap(this: &Rect, other: &Rect, buffer: f32) -> Separation {
    let depth = penetration(this, other);
    let away = this.center() - other.center();

    // A body exactly on top of the other is pushed toward negative coordinates
    let sign = |d: f32| if d > 0.0 { 1.0 } else { -1.0 };

    if depth.x <= depth.y {
        Separation {
            axis: Axis::X,
            push: sign(away.x) * (depth.x + buffer),
        }
    } else {
        Separation {
            axis: Axis::Y,
            push: sign(away.y) * (depth.y + buffer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let above = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &above));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(9.9, 0.0, 5.0, 5.0),
            Rect::new(-3.0, -3.0, 2.0, 30.0),
            Rect::new(10.0, 10.0, 1.0, 1.0),
            Rect::new(2.0, 2.0, 1.0, 1.0),
            Rect::new(-100.0, 5.0, 500.0, 0.5),
        ];
        for a in &rects {
            for b in &rects {
                assert_eq!(overlaps(a, b), overlaps(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_resolve_prefers_smaller_depth() {
        // Overlap of 4 on x, 8 on y -> push along x
        let this = Rect::new(0.0, 0.0, 10.0, 10.0);
        let other = Rect::new(6.0, 2.0, 10.0, 10.0);
        let sep = resolve_overlap(&this, &other, 0.0);
        assert_eq!(sep.axis, Axis::X);
        assert!((sep.push + 4.0).abs() < 1e-5);

        let moved = this.translated(sep.offset());
        assert!(!overlaps(&moved, &other));
    }

    #[test]
    fn test_resolve_pushes_along_y_upward() {
        let this = Rect::new(2.0, 7.0, 10.0, 10.0);
        let other = Rect::new(0.0, 0.0, 10.0, 10.0);
        let sep = resolve_overlap(&this, &other, 5.0);
        assert_eq!(sep.axis, Axis::Y);
        assert!((sep.push - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_resolve_tie_breaks_on_x() {
        let this = Rect::new(0.0, 0.0, 10.0, 10.0);
        let other = Rect::new(5.0, 5.0, 10.0, 10.0);
        let sep = resolve_overlap(&this, &other, 1.0);
        assert_eq!(sep.axis, Axis::X);
        assert!((sep.push + 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_resolve_separates_with_buffer() {
        let this = Rect::new(0.0, 0.0, 44.0, 44.0);
        let other = Rect::new(30.0, 5.0, 44.0, 44.0);
        let sep = resolve_overlap(&this, &other, 60.0);
        let moved = this.translated(sep.offset());
        assert!(!overlaps(&moved, &other));
        assert!(!overlaps(&moved, &other.expanded(59.0)));
    }
}
