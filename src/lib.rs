//! Asteroids Demo - a minimal wrap-around arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation step (input intent, integration, collisions, world state)
//! - `renderer`: WebGPU line rendering of the world
//! - `autopilot`: Scripted pilot used for the headless attract loop
//! - `settings`: Host preferences

pub mod autopilot;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use autopilot::Autopilot;
pub use settings::{Palette, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// World dimensions (pixels)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Frame rate the per-frame tuning values were authored against
    pub const REFERENCE_HZ: f32 = 60.0;
    /// Longest frame the host hands to the simulation (keeps wrap single-step)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Ship turn rate (degrees/s) per held turn key
    pub const TURN_RATE: f32 = 200.0;
    /// Thrust acceleration along the nose (pixels/s²)
    pub const THRUST: f32 = 300.0;
    /// Velocity kept per reference frame
    pub const FRICTION: f32 = 0.99;
    pub const SHIP_RADIUS: f32 = 20.0;

    /// Muzzle speed added to the ship's own velocity (pixels/s)
    pub const BULLET_SPEED: f32 = 300.0;
    /// Seconds a bullet lives
    pub const BULLET_LIFETIME: f32 = 2.0;
    pub const BULLET_RADIUS: f32 = 2.0;
    /// Minimum seconds between shots
    pub const FIRE_COOLDOWN: f32 = 0.2;

    /// Initial asteroid field: (position, velocity in pixels/s, radius)
    pub const INITIAL_ASTEROIDS: [([f32; 2], [f32; 2], f32); 2] = [
        ([100.0, 100.0], [30.0, 18.0], 30.0),
        ([700.0, 500.0], [-24.0, -36.0], 40.0),
    ];
}

/// World center, where the ship starts and respawns
#[inline]
pub fn world_center() -> Vec2 {
    Vec2::new(consts::WORLD_WIDTH / 2.0, consts::WORLD_HEIGHT / 2.0)
}

/// Wrap a position into `[0, bounds]` with one corrective step per axis.
///
/// Not a modulo: a coordinate more than one world size outside stays outside.
/// The host's `MAX_FRAME_DT` clamp keeps per-frame motion well below that.
#[inline]
pub fn wrap_position(mut pos: Vec2, bounds: Vec2) -> Vec2 {
    if pos.x < 0.0 {
        pos.x += bounds.x;
    }
    if pos.x > bounds.x {
        pos.x -= bounds.x;
    }
    if pos.y < 0.0 {
        pos.y += bounds.y;
    }
    if pos.y > bounds.y {
        pos.y -= bounds.y;
    }
    pos
}

/// Normalize an angle in degrees to `[0, 360)`
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector the ship's nose points along for a rotation in degrees.
///
/// Rotation 0 points up (+y); positive rotation turns counter-clockwise.
#[inline]
pub fn forward_from_degrees(rotation: f32) -> Vec2 {
    let theta = rotation.to_radians();
    Vec2::new(-theta.sin(), theta.cos())
}
