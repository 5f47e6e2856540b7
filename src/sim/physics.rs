//! Minimal 2D point-mass force field
//!
//! Just enough physics for the burst: per-tick force accumulation,
//! semi-implicit Euler integration, exponential air damping, and static
//! pinning. Bodies are mutually transparent - there is no collision detection,
//! only the attraction center matters. Mass is 1 for every body, velocities
//! are px/ms, and `dt` is milliseconds.

use glam::Vec2;

/// Handle to a body inside a [`World`]
///
/// Valid for the lifetime of the generation that created it; handles are
/// invalidated wholesale by [`World::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyHandle(usize);

/// A point mass
#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Visual radius (px); the integrator itself never reads it
    pub radius: f32,
    /// Fraction of velocity shed per tick, 0-1
    pub friction_air: f32,
    /// Force accumulated for the current tick
    pub force: Vec2,
    /// Static bodies ignore forces and integration entirely
    pub is_static: bool,
}

/// The force field world: a flat list of bodies, no gravity
#[derive(Debug, Clone, Default)]
pub struct World {
    bodies: Vec<Body>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dynamic body at rest and return its handle
    pub fn add_body(&mut self, position: Vec2, radius: f32, friction_air: f32) -> BodyHandle {
        self.bodies.push(Body {
            position,
            velocity: Vec2::ZERO,
            radius,
            friction_air,
            force: Vec2::ZERO,
            is_static: false,
        });
        BodyHandle(self.bodies.len() - 1)
    }

    pub fn body(&self, handle: BodyHandle) -> &Body {
        &self.bodies[handle.0]
    }

    /// Accumulate a force on a body for the current tick
    ///
    /// Static bodies swallow forces without effect.
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec2) {
        let body = &mut self.bodies[handle.0];
        if !body.is_static {
            body.force += force;
        }
    }

    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        self.bodies[handle.0].velocity = velocity;
    }

    /// Teleport a body, leaving its velocity untouched
    pub fn set_position(&mut self, handle: BodyHandle, position: Vec2) {
        self.bodies[handle.0].position = position;
    }

    /// Pin a body in place: zero velocity, immune to forces and integration.
    ///
    /// There is no unpin - frozen bodies are only ever discarded with the
    /// world at the end of a generation.
    pub fn set_static(&mut self, handle: BodyHandle) {
        let body = &mut self.bodies[handle.0];
        body.is_static = true;
        body.velocity = Vec2::ZERO;
        body.force = Vec2::ZERO;
    }

    /// Advance every dynamic body by `dt` milliseconds.
    ///
    /// Velocity picks up the accumulated force (mass 1), sheds `friction_air`
    /// of itself, then carries the position. The force accumulator resets
    /// whether or not the body moved.
    pub fn update(&mut self, dt: f32) {
        for body in &mut self.bodies {
            if body.is_static {
                body.force = Vec2::ZERO;
                continue;
            }
            body.velocity += body.force * dt;
            body.velocity *= 1.0 - body.friction_air;
            body.position += body.velocity * dt;
            body.force = Vec2::ZERO;
        }
    }

    /// Drop every body, invalidating all outstanding handles
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_accelerates_body() {
        let mut world = World::new();
        let h = world.add_body(Vec2::ZERO, 5.0, 0.0);
        world.apply_force(h, Vec2::new(0.01, 0.0));
        world.update(10.0);
        let body = world.body(h);
        assert!(body.velocity.x > 0.0);
        assert!(body.position.x > 0.0);
        assert_eq!(body.velocity.y, 0.0);
        // Accumulator drained after the tick
        assert_eq!(body.force, Vec2::ZERO);
    }

    #[test]
    fn test_air_friction_decays_velocity() {
        let mut world = World::new();
        let h = world.add_body(Vec2::ZERO, 5.0, 0.1);
        world.set_velocity(h, Vec2::new(1.0, 0.0));
        world.update(10.0);
        let v1 = world.body(h).velocity.x;
        assert!((v1 - 0.9).abs() < 1e-6);
        world.update(10.0);
        assert!(world.body(h).velocity.x < v1);
    }

    #[test]
    fn test_static_body_ignores_everything() {
        let mut world = World::new();
        let h = world.add_body(Vec2::new(3.0, 4.0), 5.0, 0.0);
        world.set_velocity(h, Vec2::new(1.0, 1.0));
        world.set_static(h);
        assert_eq!(world.body(h).velocity, Vec2::ZERO);
        world.apply_force(h, Vec2::new(100.0, 100.0));
        world.update(16.0);
        let body = world.body(h);
        assert_eq!(body.position, Vec2::new(3.0, 4.0));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_clear_empties_world() {
        let mut world = World::new();
        world.add_body(Vec2::ZERO, 5.0, 0.0);
        world.add_body(Vec2::ONE, 5.0, 0.0);
        assert_eq!(world.len(), 2);
        world.clear();
        assert!(world.is_empty());
    }
}
