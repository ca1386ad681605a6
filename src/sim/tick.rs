//! Per-frame simulation step
//!
//! Integrates every entity by the frame's elapsed time, wraps them into the
//! world, then resolves ship and bullet collisions against the asteroid field.

use super::collision::{Circle, circles_collide, first_hit};
use super::input::Intent;
use super::state::{World, WorldEvent};
use crate::consts::*;
use crate::{forward_from_degrees, normalize_degrees, wrap_position};

/// Advance the world by `dt` seconds using the resolved intent
pub fn tick(world: &mut World, intent: &Intent, dt: f32) {
    integrate_ship(world, intent, dt);
    integrate_asteroids(world, dt);
    integrate_bullets(world, dt);

    resolve_ship_hits(world);
    resolve_bullet_hits(world);
}

/// Velocity multiplier for `dt` seconds of friction
#[inline]
pub fn friction_factor(dt: f32) -> f32 {
    FRICTION.powf(dt * REFERENCE_HZ)
}

fn integrate_ship(world: &mut World, intent: &Intent, dt: f32) {
    let ship = &mut world.ship;
    ship.rotation = normalize_degrees(ship.rotation + intent.turn * dt);

    // Thrust follows the rotation after this frame's turn
    let forward = forward_from_degrees(ship.rotation);
    ship.vel += forward * intent.thrust * dt;
    ship.vel *= friction_factor(dt);
    ship.pos = wrap_position(ship.pos + ship.vel * dt, world.bounds);
}

fn integrate_asteroids(world: &mut World, dt: f32) {
    let bounds = world.bounds;
    for asteroid in &mut world.asteroids {
        asteroid.pos = wrap_position(asteroid.pos + asteroid.vel * dt, bounds);
    }
}

fn integrate_bullets(world: &mut World, dt: f32) {
    let bounds = world.bounds;
    world.bullets.retain_mut(|bullet| {
        bullet.pos += bullet.vel * dt;
        bullet.life -= dt;
        if bullet.life <= 0.0 {
            return false;
        }
        bullet.pos = wrap_position(bullet.pos, bounds);
        true
    });
}

fn resolve_ship_hits(world: &mut World) {
    let ship = Circle::new(world.ship.pos, world.ship.radius());
    let hit = world
        .asteroids
        .iter()
        .any(|a| circles_collide(ship, Circle::new(a.pos, a.radius)));

    if hit {
        log::trace!("Ship hit at {:?}", world.ship.pos);
        world.events.push(WorldEvent::ShipReset {
            hit_at: world.ship.pos,
        });
        world.ship.respawn();
    }
}

/// Each bullet removes the first live asteroid it overlaps (collection order),
/// and is removed with it. Removal is deferred to a single compaction pass.
fn resolve_bullet_hits(world: &mut World) {
    if world.bullets.is_empty() || world.asteroids.is_empty() {
        return;
    }

    let targets: Vec<Circle> = world
        .asteroids
        .iter()
        .map(|a| Circle::new(a.pos, a.radius))
        .collect();
    let mut struck = vec![false; targets.len()];

    world.bullets.retain(|bullet| {
        let probe = Circle::new(bullet.pos, bullet.radius());
        match first_hit(probe, &targets, &struck) {
            Some(idx) => {
                struck[idx] = true;
                false
            }
            None => true,
        }
    });

    let events = &mut world.events;
    let mut flags = struck.iter();
    world.asteroids.retain(|asteroid| {
        let hit = flags.next().copied().unwrap_or(false);
        if hit {
            events.push(WorldEvent::AsteroidDestroyed {
                pos: asteroid.pos,
                radius: asteroid.radius,
            });
        }
        !hit
    });
}
