//! Attract-mode pilot
//!
//! Produces key state from the current world, the same way a player would:
//! turn toward the nearest asteroid, thrust when it is far, fire when lined up.
//! Used by the headless native host.

use glam::Vec2;

use crate::forward_from_degrees;
use crate::sim::{Keys, World, WorldEvent, step_frame};

/// Degrees of misalignment the pilot tolerates before it stops turning
const AIM_TOLERANCE: f32 = 6.0;
/// Degrees of misalignment within which it opens fire
const FIRE_CONE: f32 = 12.0;
/// Keep thrusting while the target is farther than this (pixels)
const APPROACH_DISTANCE: f32 = 220.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    frames: u64,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames piloted so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Decide this frame's keys. Presses quit once the field is clear.
    pub fn keys(&mut self, world: &World) -> Keys {
        self.frames += 1;

        let ship = &world.ship;
        let Some(target) = world
            .asteroids
            .iter()
            .map(|a| shortest_offset(ship.pos, a.pos, world.bounds))
            .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
        else {
            return Keys {
                quit: true,
                ..Default::default()
            };
        };

        let error = signed_angle_deg(forward_from_degrees(ship.rotation), target);
        Keys {
            forward: target.length() > APPROACH_DISTANCE && error.abs() < FIRE_CONE,
            turn_left: error > AIM_TOLERANCE,
            turn_right: error < -AIM_TOLERANCE,
            fire: error.abs() < FIRE_CONE,
            quit: false,
        }
    }
}

/// Outcome of an attract run
#[derive(Debug, Clone)]
pub struct AttractRun {
    /// Frames stepped
    pub frames: u64,
    /// Shots the cooldown let through
    pub shots_fired: u32,
    /// Stopped because the pilot pressed quit on an empty field
    pub cleared: bool,
    /// Simulated seconds elapsed
    pub elapsed: f64,
    pub world: World,
}

/// Fly `world` with the autopilot at a fixed `dt` for at most `max_frames`
/// frames, stopping early when the pilot presses quit.
///
/// Every drained event and the post-step world are handed to `on_frame`.
pub fn run_attract(
    mut world: World,
    max_frames: u64,
    dt: f32,
    mut on_frame: impl FnMut(&World, &[WorldEvent]),
) -> AttractRun {
    let mut pilot = Autopilot::new();
    let mut now = 0.0f64;
    let mut shots_fired = 0;
    let mut cleared = false;

    while pilot.frames() < max_frames {
        let keys = pilot.keys(&world);
        now += f64::from(dt);

        let intent = step_frame(&mut world, &keys, now, dt);
        if intent.fired {
            shots_fired += 1;
        }

        let events = world.drain_events();
        on_frame(&world, &events);

        if intent.quit {
            cleared = true;
            break;
        }
    }

    AttractRun {
        frames: pilot.frames(),
        shots_fired,
        cleared,
        elapsed: now,
        world,
    }
}

/// Offset from `from` to `to` across the nearest wrap seam
fn shortest_offset(from: Vec2, to: Vec2, bounds: Vec2) -> Vec2 {
    let mut d = to - from;
    if d.x > bounds.x / 2.0 {
        d.x -= bounds.x;
    } else if d.x < -bounds.x / 2.0 {
        d.x += bounds.x;
    }
    if d.y > bounds.y / 2.0 {
        d.y -= bounds.y;
    } else if d.y < -bounds.y / 2.0 {
        d.y += bounds.y;
    }
    d
}

/// Counter-clockwise angle (degrees, -180..180) from `from` to `to`
fn signed_angle_deg(from: Vec2, to: Vec2) -> f32 {
    from.perp_dot(to).atan2(from.dot(to)).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Asteroid, step_frame};

    #[test]
    fn test_quits_when_field_clear() {
        let world = World::with_asteroids(Vec::new());
        assert!(Autopilot::new().keys(&world).quit);
    }

    #[test]
    fn test_turns_toward_target() {
        // Target directly left of a nose-up ship: counter-clockwise turn
        let world = World::with_asteroids(vec![Asteroid::new(
            Vec2::new(200.0, 300.0),
            Vec2::ZERO,
            10.0,
        )]);
        let keys = Autopilot::new().keys(&world);
        assert!(keys.turn_left);
        assert!(!keys.turn_right);
        assert!(!keys.fire);
    }

    #[test]
    fn test_fires_when_aligned() {
        let world = World::with_asteroids(vec![Asteroid::new(
            Vec2::new(400.0, 400.0),
            Vec2::ZERO,
            10.0,
        )]);
        let keys = Autopilot::new().keys(&world);
        assert!(keys.fire);
        assert!(!keys.turn_left && !keys.turn_right);
        assert!(!keys.forward);
    }

    #[test]
    fn test_shortest_offset_crosses_seam() {
        let bounds = Vec2::new(800.0, 600.0);
        let d = shortest_offset(Vec2::new(790.0, 10.0), Vec2::new(10.0, 590.0), bounds);
        assert_eq!(d, Vec2::new(20.0, -20.0));
    }

    #[test]
    fn test_attract_run_quits_on_empty_field() {
        let mut frames_seen = 0;
        let run = run_attract(World::with_asteroids(Vec::new()), 100, 1.0 / 60.0, |_, _| {
            frames_seen += 1;
        });

        assert!(run.cleared);
        assert_eq!(run.frames, 1);
        assert_eq!(frames_seen, 1);
        assert_eq!(run.shots_fired, 0);
    }

    #[test]
    fn test_attract_run_stops_at_frame_cap() {
        // Asteroid far off the nose and out of reach within the cap
        let world = World::with_asteroids(vec![Asteroid::new(
            Vec2::new(400.0, 100.0),
            Vec2::ZERO,
            10.0,
        )]);
        let run = run_attract(world, 5, 1.0 / 60.0, |_, _| {});

        assert!(!run.cleared);
        assert_eq!(run.frames, 5);
        assert_eq!(run.world.asteroids.len(), 1);
    }

    #[test]
    fn test_attract_run_counts_shots() {
        let world = World::with_asteroids(vec![Asteroid::new(
            Vec2::new(400.0, 450.0),
            Vec2::ZERO,
            20.0,
        )]);
        let mut fired_events = 0;
        let run = run_attract(world, 600, 1.0 / 60.0, |_, events| {
            fired_events += events
                .iter()
                .filter(|e| matches!(e, WorldEvent::BulletFired { .. }))
                .count() as u32;
        });

        assert!(run.cleared);
        assert!(run.shots_fired >= 1);
        assert_eq!(run.shots_fired, fired_events);
        assert!(run.world.asteroids.is_empty());
    }

    #[test]
    fn test_clears_a_stationary_field() {
        let mut world = World::with_asteroids(vec![Asteroid::new(
            Vec2::new(400.0, 450.0),
            Vec2::ZERO,
            20.0,
        )]);
        let mut pilot = Autopilot::new();
        let dt = 1.0 / 60.0;

        for frame in 0..600 {
            let keys = pilot.keys(&world);
            if keys.quit {
                break;
            }
            step_frame(&mut world, &keys, frame as f64 * f64::from(dt), dt);
        }

        assert!(world.asteroids.is_empty());
    }
}
