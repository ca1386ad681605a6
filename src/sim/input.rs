//! Keyboard state to per-frame intent
//!
//! Resolving input is also where shots are taken: the fire key is gated by
//! the cooldown and a successful shot appends a bullet to the world.

use super::state::{Bullet, World, WorldEvent};
use crate::consts::*;
use crate::forward_from_degrees;

/// Pressed/released state of the keys the game listens to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keys {
    /// W / Up
    pub forward: bool,
    /// A / Left
    pub turn_left: bool,
    /// D / Right
    pub turn_right: bool,
    /// Space
    pub fire: bool,
    /// Escape
    pub quit: bool,
}

/// What the pilot wants this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intent {
    /// Thrust acceleration (0 or `THRUST`)
    pub thrust: f32,
    /// Net turn rate in degrees/s (positive = counter-clockwise)
    pub turn: f32,
    /// A bullet was fired this frame
    pub fired: bool,
    pub quit: bool,
}

/// Resolve key state into an intent, firing a bullet if the cooldown allows.
///
/// `now` is the host clock in seconds. A shot is taken only when strictly more
/// than `FIRE_COOLDOWN` has passed since the previous one.
pub fn resolve_input(world: &mut World, keys: &Keys, now: f64) -> Intent {
    let thrust = if keys.forward { THRUST } else { 0.0 };

    let mut turn = 0.0;
    if keys.turn_left {
        turn += TURN_RATE;
    }
    if keys.turn_right {
        turn -= TURN_RATE;
    }

    let fired = keys.fire && cooldown_elapsed(world.last_shot, now);
    if fired {
        fire(world, now);
    }

    Intent {
        thrust,
        turn,
        fired,
        quit: keys.quit,
    }
}

/// Update key state from a DOM-style key name. Returns false for keys the
/// game does not use.
pub fn apply_key(keys: &mut Keys, key: &str, pressed: bool) -> bool {
    let slot = match key {
        "w" | "W" | "ArrowUp" => &mut keys.forward,
        "a" | "A" | "ArrowLeft" => &mut keys.turn_left,
        "d" | "D" | "ArrowRight" => &mut keys.turn_right,
        " " | "Space" | "Spacebar" => &mut keys.fire,
        "Escape" | "Esc" => &mut keys.quit,
        _ => return false,
    };
    *slot = pressed;
    true
}

fn cooldown_elapsed(last_shot: Option<f64>, now: f64) -> bool {
    match last_shot {
        Some(last) => now - last > f64::from(FIRE_COOLDOWN),
        None => true,
    }
}

/// Spawn a bullet at the ship's nose direction, inheriting ship velocity
fn fire(world: &mut World, now: f64) {
    let ship = &world.ship;
    let vel = forward_from_degrees(ship.rotation) * BULLET_SPEED + ship.vel;
    world.bullets.push(Bullet::new(ship.pos, vel));
    world.last_shot = Some(now);
    world.events.push(WorldEvent::BulletFired { pos: ship.pos });
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn fire_keys() -> Keys {
        Keys {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_turn_keys_combine() {
        let mut world = World::new();
        let both = Keys {
            turn_left: true,
            turn_right: true,
            ..Default::default()
        };
        assert_eq!(resolve_input(&mut world, &both, 0.0).turn, 0.0);

        let left = Keys {
            turn_left: true,
            ..Default::default()
        };
        assert_eq!(resolve_input(&mut world, &left, 0.0).turn, TURN_RATE);

        let right = Keys {
            turn_right: true,
            forward: true,
            ..Default::default()
        };
        let intent = resolve_input(&mut world, &right, 0.0);
        assert_eq!(intent.turn, -TURN_RATE);
        assert_eq!(intent.thrust, THRUST);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut world = World::new();

        assert!(resolve_input(&mut world, &fire_keys(), 1.0).fired);
        assert!(!resolve_input(&mut world, &fire_keys(), 1.1).fired);
        assert_eq!(world.bullets.len(), 1);

        assert!(resolve_input(&mut world, &fire_keys(), 1.25).fired);
        assert_eq!(world.bullets.len(), 2);
        assert_eq!(world.last_shot, Some(1.25));
    }

    #[test]
    fn test_fire_at_exact_cooldown_is_blocked() {
        let mut world = World::new();
        world.last_shot = Some(0.0);
        let at_cooldown = f64::from(FIRE_COOLDOWN);
        assert!(!resolve_input(&mut world, &fire_keys(), at_cooldown).fired);
        assert!(world.bullets.is_empty());
    }

    #[test]
    fn test_bullet_inherits_ship_velocity() {
        let mut world = World::new();
        world.ship.vel = Vec2::new(10.0, 0.0);

        resolve_input(&mut world, &fire_keys(), 0.0);

        let bullet = &world.bullets[0];
        assert_eq!(bullet.pos, world.ship.pos);
        assert!((bullet.vel.x - 10.0).abs() < 1e-4);
        assert!((bullet.vel.y - BULLET_SPEED).abs() < 1e-4);
        assert_eq!(bullet.life, BULLET_LIFETIME);
        assert!(matches!(world.events[0], WorldEvent::BulletFired { .. }));
    }

    #[test]
    fn test_apply_key_maps_both_layouts() {
        let mut keys = Keys::default();
        assert!(apply_key(&mut keys, "ArrowUp", true));
        assert!(apply_key(&mut keys, "a", true));
        assert!(apply_key(&mut keys, " ", true));
        assert!(keys.forward && keys.turn_left && keys.fire);

        assert!(apply_key(&mut keys, "W", false));
        assert!(!keys.forward);
        assert!(!apply_key(&mut keys, "q", true));
        assert!(!keys.quit);
        assert!(apply_key(&mut keys, "Escape", true));
        assert!(keys.quit);
    }

    #[test]
    fn test_quit_passes_through() {
        let mut world = World::new();
        let keys = Keys {
            quit: true,
            ..Default::default()
        };
        assert!(resolve_input(&mut world, &keys, 0.0).quit);
    }
}
