//! Simulation core
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - The host owns a [`World`] and lends it to the step once per frame
//! - Input intent, integration and collisions run in that order
//! - Elapsed time is sampled once by the host and used for the whole step

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Circle, circles_collide};
pub use input::{Intent, Keys, apply_key, resolve_input};
pub use state::{Asteroid, Bullet, Ship, World, WorldEvent};
pub use tick::{friction_factor, tick};

/// Run one host frame: resolve input, then step the world.
///
/// `now` is the host clock in seconds and `dt` the time since the previous
/// frame, already clamped by the host.
pub fn step_frame(world: &mut World, keys: &Keys, now: f64, dt: f32) -> Intent {
    let intent = resolve_input(world, keys, now);
    tick(world, &intent, dt);
    intent
}
