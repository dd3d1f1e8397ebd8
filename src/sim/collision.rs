//! Collision detection
//!
//! Every sprite is treated as a circle inscribed in its square: the center
//! is the middle of the square and the radius is half the side.

use glam::Vec2;

use crate::Viewport;
use crate::consts::BOUNDS_MARGIN;

/// Anything that can be tested for contact with the player
pub trait Circle {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// True if the center distance is strictly less than the sum of radii
#[inline]
pub fn circles_overlap(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    c1.distance(c2) < r1 + r2
}

/// Circle-circle contact between two bodies
#[inline]
pub fn collides(a: &impl Circle, b: &impl Circle) -> bool {
    circles_overlap(a.center(), a.radius(), b.center(), b.radius())
}

/// True if a top-left position has drifted past the viewport plus margin
#[inline]
pub fn outside_bounds(pos: Vec2, viewport: &Viewport) -> bool {
    pos.x < -BOUNDS_MARGIN
        || pos.x > viewport.width + BOUNDS_MARGIN
        || pos.y < -BOUNDS_MARGIN
        || pos.y > viewport.height + BOUNDS_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_touching_circles_do_not_collide() {
        // Exactly tangent: d == r1 + r2
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(20.0, 0.0), 10.0));
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(19.9, 0.0), 10.0));
    }

    #[test]
    fn test_bounds_margin_edges() {
        let vp = Viewport::new(800.0, 600.0);
        assert!(!outside_bounds(Vec2::new(-200.0, 0.0), &vp));
        assert!(outside_bounds(Vec2::new(-200.1, 0.0), &vp));
        assert!(!outside_bounds(Vec2::new(1000.0, 800.0), &vp));
        assert!(outside_bounds(Vec2::new(1000.0, 800.5), &vp));
        assert!(outside_bounds(Vec2::new(400.0, -300.0), &vp));
    }

    proptest! {
        #[test]
        fn prop_overlap_matches_distance(
            x1 in -1000.0f32..1000.0, y1 in -1000.0f32..1000.0,
            x2 in -1000.0f32..1000.0, y2 in -1000.0f32..1000.0,
            r1 in 1.0f32..100.0, r2 in 1.0f32..100.0,
        ) {
            let c1 = Vec2::new(x1, y1);
            let c2 = Vec2::new(x2, y2);
            let d = c1.distance(c2);
            prop_assert_eq!(circles_overlap(c1, r1, c2, r2), d < r1 + r2);
            // Symmetric
            prop_assert_eq!(circles_overlap(c1, r1, c2, r2), circles_overlap(c2, r2, c1, r1));
        }

        #[test]
        fn prop_bounds_iff_past_margin(
            x in -600.0f32..1600.0, y in -600.0f32..1400.0,
        ) {
            let vp = Viewport::new(1000.0, 800.0);
            let inside = (-200.0..=1200.0).contains(&x) && (-200.0..=1000.0).contains(&y);
            prop_assert_eq!(outside_bounds(Vec2::new(x, y), &vp), !inside);
        }
    }
}
