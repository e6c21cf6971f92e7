//! ECS wiring for swimmers backed by [`PhysicsBody`].

use bevy::prelude::*;
use bevy_app::{App, FixedUpdate, Plugin, Update};
use bevy_log::debug;

use super::{
    AnimationFlags, StepClock, SwimConfig, SwimController, SwimHost, SwimInput,
};
use crate::constants::DEFAULT_GRAVITY;
use crate::physics::PhysicsBody;
use crate::sets::{SwimFixedUpdateSet, SwimUpdateSet};
use crate::water::WaterRegions;

/// World gravity applied when integrating [`PhysicsBody`] swimmers.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SwimGravity(pub Vec2);

impl Default for SwimGravity {
    fn default() -> Self {
        Self(DEFAULT_GRAVITY)
    }
}

#[derive(Bundle, Default)]
pub struct SwimmerBundle {
    pub controller: SwimController,
    pub body: PhysicsBody,
    pub input: SwimInput,
    pub animation: AnimationFlags,
}

impl SwimmerBundle {
    pub fn new(config: SwimConfig, body: PhysicsBody) -> Self {
        Self {
            controller: SwimController::new(config),
            body,
            ..default()
        }
    }
}

/// Registers the swim systems.
///
/// Hosts write [`SwimInput`] in [`SwimUpdateSet::PlayerInput`] and read
/// [`AnimationFlags`] after [`SwimUpdateSet::Swimming`].
pub struct SwimPlugin;

impl Plugin for SwimPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WaterRegions>()
            .init_resource::<SwimGravity>()
            .configure_sets(
                Update,
                (SwimUpdateSet::PlayerInput, SwimUpdateSet::Swimming).chain(),
            )
            .configure_sets(
                FixedUpdate,
                (SwimFixedUpdateSet::Buoyancy, SwimFixedUpdateSet::Integrate).chain(),
            )
            .add_systems(Update, swim_frame_system.in_set(SwimUpdateSet::Swimming))
            .add_systems(
                FixedUpdate,
                (
                    swim_physics_system.in_set(SwimFixedUpdateSet::Buoyancy),
                    integrate_bodies_system.in_set(SwimFixedUpdateSet::Integrate),
                ),
            );

        debug!("Swim plugin registered");
    }
}

pub fn swim_frame_system(
    time: Res<Time>,
    water: Res<WaterRegions>,
    mut query: Query<(
        &mut SwimController,
        &mut PhysicsBody,
        &mut SwimInput,
        &mut AnimationFlags,
    )>,
) {
    let delta = time.delta_secs();

    for (mut controller, mut body, mut input, mut animation) in query.iter_mut() {
        let mut host = SwimHost {
            body: &mut *body,
            water: water.as_region_test(),
            input: &*input,
            animation: &mut *animation,
        };
        controller.on_tick(&mut host, delta);

        input.jump = false;
    }
}

pub fn swim_physics_system(
    time: Res<Time<Fixed>>,
    mut query: Query<(&mut SwimController, &mut PhysicsBody)>,
) {
    let clock = StepClock::new(time.elapsed_secs(), time.delta_secs());

    for (mut controller, mut body) in query.iter_mut() {
        controller.on_physics_step(&mut *body, clock);
    }
}

pub fn integrate_bodies_system(
    time: Res<Time<Fixed>>,
    gravity: Res<SwimGravity>,
    mut query: Query<&mut PhysicsBody>,
) {
    let delta = time.delta_secs();
    for mut body in query.iter_mut() {
        body.integrate(gravity.0, delta);
    }
}
