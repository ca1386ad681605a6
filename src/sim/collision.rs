//! Circle-circle collision test
//!
//! Every entity collides as a circle; the rendered outline is irrelevant here.

use glam::Vec2;

/// A collision circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    #[inline]
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Two circles collide when their centers are strictly closer than the sum of
/// their radii. Touching circles do not collide.
#[inline]
pub fn circles_collide(a: Circle, b: Circle) -> bool {
    a.center.distance(b.center) < a.radius + b.radius
}

/// Index of the first circle in `targets` that `probe` collides with, skipping
/// indices flagged in `taken`
pub fn first_hit(probe: Circle, targets: &[Circle], taken: &[bool]) -> Option<usize> {
    targets
        .iter()
        .zip(taken)
        .position(|(&target, &taken)| !taken && circles_collide(probe, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_touching_circles_do_not_collide() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 30.0);
        let b = Circle::new(Vec2::new(32.0, 0.0), 2.0);
        assert!(!circles_collide(a, b));

        let b = Circle::new(Vec2::new(31.99, 0.0), 2.0);
        assert!(circles_collide(a, b));
    }

    #[test]
    fn test_coincident_centers_collide() {
        let a = Circle::new(Vec2::new(50.0, 50.0), 2.0);
        let b = Circle::new(Vec2::new(50.0, 50.0), 30.0);
        assert!(circles_collide(a, b));
    }

    #[test]
    fn test_first_hit_uses_collection_order() {
        let probe = Circle::new(Vec2::new(100.0, 100.0), 2.0);
        let targets = [
            Circle::new(Vec2::new(500.0, 500.0), 10.0),
            Circle::new(Vec2::new(120.0, 100.0), 30.0),
            // Closer, but later in the list
            Circle::new(Vec2::new(100.0, 100.0), 30.0),
        ];
        assert_eq!(first_hit(probe, &targets, &[false; 3]), Some(1));
        assert_eq!(first_hit(probe, &targets, &[false, true, false]), Some(2));
        assert_eq!(first_hit(probe, &targets, &[false, true, true]), None);
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in 0.0f32..800.0, ay in 0.0f32..600.0, ar in 0.0f32..50.0,
            bx in 0.0f32..800.0, by in 0.0f32..600.0, br in 0.0f32..50.0,
        ) {
            let a = Circle::new(Vec2::new(ax, ay), ar);
            let b = Circle::new(Vec2::new(bx, by), br);
            prop_assert_eq!(circles_collide(a, b), circles_collide(b, a));
        }
    }
}
