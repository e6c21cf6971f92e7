//! Swim controller: water detection, swim input, buoyancy and surface bobbing.
//!
//! The controller owns no engine state. Each entry point borrows the host
//! capabilities it needs for the duration of the call:
//! - [`SwimController::on_tick`] once per rendered frame
//! - [`SwimController::on_physics_step`] once per fixed physics step

use bevy::prelude::*;

use super::animation::AnimationSink;
use super::config::{SwimConfig, VerticalInput};
use super::input::InputSource;
use crate::constants::{IS_IDLE_FLAG, IS_SWIMMING_FLAG};
use crate::physics::{BodyHandle, ForceMode};
use crate::water::{RegionShape, RegionTest};

/// Host capabilities lent to the controller for one frame.
pub struct SwimHost<'a> {
    pub body: &'a mut dyn BodyHandle,
    /// `None` when no water is wired up; the swimmer then reads as dry.
    pub water: Option<&'a dyn RegionTest>,
    pub input: &'a dyn InputSource,
    pub animation: &'a mut dyn AnimationSink,
}

/// Simulated time for a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepClock {
    /// Simulated seconds elapsed, monotonically increasing
    pub elapsed: f32,
    /// Fixed step length in seconds
    pub delta: f32,
}

impl StepClock {
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self { elapsed, delta }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwimState {
    OutOfWater,
    Swimming,
    /// Swimming and floating in the surface band.
    Surfaced,
}

#[derive(Component, Debug, Clone)]
pub struct SwimController {
    pub config: SwimConfig,
    in_water: bool,
    at_surface: bool,
    surface_y: f32,
    time_in_water: f32,
}

impl SwimController {
    pub fn new(config: SwimConfig) -> Self {
        Self {
            config,
            in_water: false,
            at_surface: false,
            surface_y: 0.0,
            time_in_water: 0.0,
        }
    }

    pub fn in_water(&self) -> bool {
        self.in_water
    }

    pub fn at_surface(&self) -> bool {
        self.at_surface
    }

    pub fn surface_y(&self) -> f32 {
        self.surface_y
    }

    /// Frame time accumulated since the swimmer last entered the water.
    pub fn time_in_water(&self) -> f32 {
        self.time_in_water
    }

    pub fn state(&self) -> SwimState {
        match (self.in_water, self.at_surface) {
            (false, _) => SwimState::OutOfWater,
            (true, false) => SwimState::Swimming,
            (true, true) => SwimState::Surfaced,
        }
    }

    /// Positive when the body is below the last known surface.
    pub fn depth(&self, body: &dyn BodyHandle) -> f32 {
        self.surface_y - body.position().y
    }

    /// Frame entry point: detection, swim input, animation flags, boost.
    pub fn on_tick(&mut self, host: &mut SwimHost, delta: f32) {
        self.detect_water(&mut *host.body, host.water);

        if self.in_water {
            self.time_in_water += delta;
            self.handle_swimming(&mut *host.body, host.input);
        }

        self.update_animations(&*host.body, &mut *host.animation);

        if self.at_surface && host.input.jump_pressed() {
            self.apply_boost_out_of_water(&mut *host.body);
        }
    }

    /// Fixed step entry point.
    pub fn on_physics_step(&mut self, body: &mut dyn BodyHandle, clock: StepClock) {
        if self.in_water {
            self.apply_buoyancy(body, clock);
        }
    }

    pub fn detect_water(&mut self, body: &mut dyn BodyHandle, water: Option<&dyn RegionTest>) {
        let contact = water.and_then(|region| region.probe(body.position()));
        let was_in_water = self.in_water;
        self.in_water = contact.is_some();

        match contact {
            Some(contact) => {
                match contact.surface_y {
                    Some(surface_y) => self.surface_y = surface_y,
                    // Depth keeps using the last known surface.
                    None if !was_in_water => log::warn!(
                        "Swimmer entered water with no known surface at {:?}, using y = {}",
                        body.position(),
                        self.surface_y
                    ),
                    None => {}
                }
                if !was_in_water {
                    self.time_in_water = 0.0;
                    if self.config.suspend_gravity_in_water {
                        body.set_gravity_scale(0.0);
                    }
                    log::debug!(
                        "Swimmer entered water at {:?} (surface at y = {})",
                        body.position(),
                        self.surface_y
                    );
                }
            }
            None => {
                self.at_surface = false;
                if was_in_water {
                    if self.config.suspend_gravity_in_water {
                        body.set_gravity_scale(self.config.dry_gravity_scale);
                    }
                    log::debug!(
                        "Swimmer left water at {:?} after {:.2}s",
                        body.position(),
                        self.time_in_water
                    );
                }
            }
        }
    }

    pub fn handle_swimming(&self, body: &mut dyn BodyHandle, input: &dyn InputSource) {
        let speed = self.config.swim_speed;
        let mut velocity = body.velocity();
        velocity.x = input.horizontal() * speed;

        match self.config.vertical_input {
            VerticalInput::DownOnly => {
                if input.vertical() < 0.0 {
                    velocity.y = -speed;
                }
            }
            VerticalInput::Free => velocity.y = input.vertical() * speed,
        }

        body.set_velocity(velocity);
    }

    /// Applies depth-proportional lift, drag and surface bobbing.
    ///
    /// Returns the buoyancy force applied this step, 0.0 when the body is at
    /// or above the surface.
    pub fn apply_buoyancy(&mut self, body: &mut dyn BodyHandle, clock: StepClock) -> f32 {
        let depth = self.depth(body);
        if depth <= 0.0 {
            return 0.0;
        }

        let buoyancy = self.config.buoyancy_force * depth;
        body.add_force(Vec2::Y * buoyancy, ForceMode::Force);

        if self.config.drag {
            let velocity = body.velocity();
            body.set_velocity(Vec2::new(
                velocity.x * (1.0 - clock.delta * self.config.horizontal_drag),
                velocity.y * (1.0 - clock.delta * self.config.vertical_drag),
            ));
        }

        self.at_surface = depth.abs() < self.config.surface_band
            && body.velocity().y > self.config.surface_velocity_floor;

        if self.at_surface {
            self.apply_float_at_surface(body, clock.elapsed);
        }

        buoyancy
    }

    /// Vertical bobbing force at simulated time `elapsed`.
    pub fn oscillation_force(&self, elapsed: f32) -> f32 {
        (elapsed * self.config.oscillation_speed).sin() * self.config.oscillation_strength
    }

    pub fn apply_float_at_surface(&self, body: &mut dyn BodyHandle, elapsed: f32) -> f32 {
        let oscillation = self.oscillation_force(elapsed);
        body.add_force(Vec2::Y * oscillation, ForceMode::Force);
        oscillation
    }

    pub fn apply_boost_out_of_water(&self, body: &mut dyn BodyHandle) {
        log::trace!("Swimmer boosting out of water from {:?}", body.position());
        body.add_force(
            Vec2::Y * self.config.jump_out_of_water_force,
            ForceMode::Impulse,
        );
    }

    pub fn is_moving(&self, body: &dyn BodyHandle) -> bool {
        let velocity = body.velocity();
        velocity.x.abs() > self.config.moving_threshold
            || velocity.y.abs() > self.config.moving_threshold
    }

    pub fn update_animations(&self, body: &dyn BodyHandle, animation: &mut dyn AnimationSink) {
        let moving = self.in_water && self.is_moving(body);
        animation.set_bool(IS_SWIMMING_FLAG, moving);

        if self.config.idle_flag {
            animation.set_bool(IS_IDLE_FLAG, self.in_water && !moving);
        }
    }

    /// Region outline for debug drawing, independent of the simulation.
    pub fn debug_shape(
        &self,
        water: Option<&dyn RegionTest>,
        position: Vec2,
    ) -> Option<RegionShape> {
        water.and_then(|region| region.debug_shape(position))
    }
}

impl Default for SwimController {
    fn default() -> Self {
        Self::new(SwimConfig::default())
    }
}
