//! Line geometry for the world
//!
//! Everything is emitted as a line list (two vertices per segment) in world
//! pixel coordinates. Shapes are presentation only; collisions use circles.

use glam::{Mat2, Vec2};
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::settings::Palette;
use crate::sim::World;

/// Ship outline in local space, nose along +y
pub const SHIP_OUTLINE: [Vec2; 3] = [
    Vec2::new(0.0, 20.0),
    Vec2::new(-10.0, -10.0),
    Vec2::new(10.0, -10.0),
];

/// Asteroid outline corner count
pub const ASTEROID_SEGMENTS: u32 = 10;

/// Bullet marker edge length (pixels)
pub const BULLET_MARKER_SIZE: f32 = 5.0;

/// Close a polygon into line-list segments
fn closed_loop(points: &[Vec2], color: [f32; 4], out: &mut Vec<Vertex>) {
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        out.push(Vertex::new(a.x, a.y, color));
        out.push(Vertex::new(b.x, b.y, color));
    }
}

/// Ship triangle, rotated by `rotation` degrees about its center
pub fn ship(pos: Vec2, rotation: f32, color: [f32; 4], out: &mut Vec<Vertex>) {
    let turn = Mat2::from_angle(rotation.to_radians());
    let points = SHIP_OUTLINE.map(|p| pos + turn * p);
    closed_loop(&points, color, out);
}

/// Regular polygon approximating an asteroid of the given radius
pub fn asteroid(pos: Vec2, radius: f32, color: [f32; 4], out: &mut Vec<Vertex>) {
    let points: Vec<Vec2> = (0..ASTEROID_SEGMENTS)
        .map(|i| {
            let theta = i as f32 / ASTEROID_SEGMENTS as f32 * TAU;
            pos + Vec2::new(theta.cos(), theta.sin()) * radius
        })
        .collect();
    closed_loop(&points, color, out);
}

/// Small square marker centered on a bullet
pub fn bullet(pos: Vec2, color: [f32; 4], out: &mut Vec<Vertex>) {
    let h = BULLET_MARKER_SIZE / 2.0;
    let points = [
        pos + Vec2::new(-h, -h),
        pos + Vec2::new(h, -h),
        pos + Vec2::new(h, h),
        pos + Vec2::new(-h, h),
    ];
    closed_loop(&points, color, out);
}

/// All line vertices for the current world
pub fn world_lines(world: &World, palette: Palette) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        6 + world.asteroids.len() * ASTEROID_SEGMENTS as usize * 2 + world.bullets.len() * 8,
    );

    ship(world.ship.pos, world.ship.rotation, palette.ship(), &mut vertices);
    for a in &world.asteroids {
        asteroid(a.pos, a.radius, palette.asteroid(), &mut vertices);
    }
    for b in &world.bullets {
        bullet(b.pos, palette.bullet(), &mut vertices);
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Bullet;

    fn pos(v: &Vertex) -> Vec2 {
        Vec2::from(v.position)
    }

    #[test]
    fn test_ship_nose_follows_rotation() {
        let mut out = Vec::new();
        ship(Vec2::new(100.0, 100.0), 90.0, [1.0; 4], &mut out);
        assert_eq!(out.len(), 6);
        // Rotated 90° counter-clockwise, the nose points to -x
        let nose = pos(&out[0]);
        assert!((nose - Vec2::new(80.0, 100.0)).length() < 1e-3);
    }

    #[test]
    fn test_asteroid_outline_radius() {
        let mut out = Vec::new();
        let center = Vec2::new(50.0, 60.0);
        asteroid(center, 30.0, [1.0; 4], &mut out);
        assert_eq!(out.len(), ASTEROID_SEGMENTS as usize * 2);
        for v in &out {
            assert!((pos(v).distance(center) - 30.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_world_lines_counts() {
        let mut world = World::new();
        world.bullets.push(Bullet::new(Vec2::new(10.0, 10.0), Vec2::ZERO));
        let lines = world_lines(&world, Palette::Classic);
        assert_eq!(lines.len(), 6 + 2 * 20 + 8);
        assert_eq!(lines.len() % 2, 0);
    }

    #[test]
    fn test_palette_colors_applied() {
        let world = World::with_asteroids(Vec::new());
        let lines = world_lines(&world, Palette::Amber);
        assert!(lines.iter().all(|v| v.color == Palette::Amber.ship()));
    }
}
