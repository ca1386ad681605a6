//! World state and entity types
//!
//! Everything the simulation step reads or writes lives in [`World`], which the
//! host owns and lends to `tick` once per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::world_center;

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rotation in degrees (0 = nose up)
    pub rotation: f32,
}

impl Ship {
    /// Ship parked at world center, at rest
    pub fn at_center() -> Self {
        Self {
            pos: world_center(),
            vel: Vec2::ZERO,
            rotation: 0.0,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        SHIP_RADIUS
    }

    /// Put the ship back at center with zero velocity (rotation is kept)
    pub fn respawn(&mut self) {
        self.pos = world_center();
        self.vel = Vec2::ZERO;
    }
}

impl Default for Ship {
    fn default() -> Self {
        Self::at_center()
    }
}

/// A drifting asteroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Carried for presentation; does not affect motion
    pub rotation: f32,
    /// Collision radius and outline size
    pub radius: f32,
}

impl Asteroid {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            rotation: 0.0,
            radius,
        }
    }
}

/// A bullet in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in seconds
    pub life: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            life: BULLET_LIFETIME,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        BULLET_RADIUS
    }
}

/// Something that happened during a step, for the host to log or react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEvent {
    BulletFired { pos: Vec2 },
    /// Ship touched an asteroid and was sent back to center
    ShipReset { hit_at: Vec2 },
    AsteroidDestroyed { pos: Vec2, radius: f32 },
}

/// Complete world state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Wrap bounds (width, height)
    pub bounds: Vec2,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    /// Host clock reading (seconds) of the last shot taken
    pub last_shot: Option<f64>,
    /// Events since the host last drained them
    #[serde(skip)]
    pub events: Vec<WorldEvent>,
}

impl World {
    /// World with the standard opening layout
    pub fn new() -> Self {
        let asteroids = INITIAL_ASTEROIDS
            .iter()
            .map(|&(pos, vel, radius)| Asteroid::new(Vec2::from(pos), Vec2::from(vel), radius))
            .collect();
        Self::with_asteroids(asteroids)
    }

    /// World with the ship at center and the given asteroid field
    pub fn with_asteroids(asteroids: Vec<Asteroid>) -> Self {
        Self {
            bounds: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            ship: Ship::at_center(),
            asteroids,
            bullets: Vec::new(),
            last_shot: None,
            events: Vec::new(),
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    /// True when every live entity is inside the wrap bounds
    pub fn all_in_bounds(&self) -> bool {
        let inside = |p: Vec2| p.x >= 0.0 && p.x <= self.bounds.x && p.y >= 0.0 && p.y <= self.bounds.y;
        inside(self.ship.pos)
            && self.asteroids.iter().all(|a| inside(a.pos))
            && self.bullets.iter().all(|b| inside(b.pos))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
