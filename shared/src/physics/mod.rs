use bevy::prelude::*;

pub mod rapier;

/// How a force handed to a [`BodyHandle`] is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous force, integrated over the next physics step.
    Force,
    /// Instantaneous change in momentum.
    Impulse,
}

/// The slice of a rigid body the swim controller is allowed to touch.
pub trait BodyHandle {
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn gravity_scale(&self) -> f32;
    fn set_gravity_scale(&mut self, scale: f32);
    fn add_force(&mut self, force: Vec2, mode: ForceMode);
}

/// Minimal 2D point-mass body.
///
/// Forces accumulate until the next [`PhysicsBody::integrate`] call, impulses
/// change velocity immediately.
#[derive(Component, Clone, Copy, Debug)]
pub struct PhysicsBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
    pub mass: f32,
    force: Vec2,
    last_force: Vec2,
}

impl PhysicsBody {
    pub fn new(position: Vec2, velocity: Vec2, mass: f32) -> Self {
        Self {
            position,
            velocity,
            gravity_scale: 1.0,
            mass,
            force: Vec2::ZERO,
            last_force: Vec2::ZERO,
        }
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Force accumulated since the last integration.
    pub fn pending_force(&self) -> Vec2 {
        self.force
    }

    /// Force consumed by the most recent integration.
    pub fn last_force(&self) -> Vec2 {
        self.last_force
    }

    /// Semi-implicit Euler step: velocity first, then position.
    pub fn integrate(&mut self, gravity: Vec2, delta: f32) {
        let acceleration = gravity * self.gravity_scale + self.force / self.mass;
        self.velocity += acceleration * delta;
        self.position += self.velocity * delta;
        self.last_force = self.force;
        self.force = Vec2::ZERO;
    }
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::ZERO, 1.0)
    }
}

impl BodyHandle for PhysicsBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    fn add_force(&mut self, force: Vec2, mode: ForceMode) {
        match mode {
            ForceMode::Force => self.force += force,
            ForceMode::Impulse => self.velocity += force / self.mass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forces_accumulate_until_integration() {
        let mut body = PhysicsBody::default();
        body.add_force(Vec2::new(0.0, 3.0), ForceMode::Force);
        body.add_force(Vec2::new(1.0, 2.0), ForceMode::Force);
        assert_eq!(body.pending_force(), Vec2::new(1.0, 5.0));
        assert_eq!(body.velocity, Vec2::ZERO);

        body.integrate(Vec2::ZERO, 0.5);
        assert_eq!(body.pending_force(), Vec2::ZERO);
        assert_eq!(body.last_force(), Vec2::new(1.0, 5.0));
        assert!((body.velocity.y - 2.5).abs() < 1e-6);
        assert!((body.position.y - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_impulse_scales_with_mass() {
        let mut body = PhysicsBody::new(Vec2::ZERO, Vec2::ZERO, 2.0);
        body.add_force(Vec2::new(0.0, 7.0), ForceMode::Impulse);
        assert!((body.velocity.y - 3.5).abs() < 1e-6);
        assert_eq!(body.pending_force(), Vec2::ZERO);
    }

    #[test]
    fn test_gravity_scale_zero_floats() {
        let mut body = PhysicsBody::default().with_gravity_scale(0.0);
        body.integrate(Vec2::new(0.0, -9.81), 0.1);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.position, Vec2::ZERO);
    }
}
