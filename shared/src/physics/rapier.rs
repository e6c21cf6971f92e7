//! Rapier 2D integration.
//!
//! Lets a swimmer ride on a rapier rigid body instead of [`PhysicsBody`]:
//! the body handle writes into `Velocity`, `ExternalForce`,
//! `ExternalImpulse` and `GravityScale`, and water is found with a shape
//! intersection query against sensor colliders tagged [`WaterVolume`].
//!
//! [`PhysicsBody`]: super::PhysicsBody

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::{BodyHandle, ForceMode};
use crate::constants::DEFAULT_PROBE_RADIUS;
use crate::sets::{SwimFixedUpdateSet, SwimUpdateSet};
use crate::swim::{AnimationFlags, StepClock, SwimConfig, SwimController, SwimHost, SwimInput};
use crate::water::{RegionShape, RegionTest, WaterContact, WaterZone};

/// Collision groups used by swimmers and water.
pub mod collision_groups {
    use bevy_rapier2d::prelude::Group;

    /// Swimming characters
    pub const SWIMMER: Group = Group::GROUP_1;
    /// Solid world geometry
    pub const WORLD: Group = Group::GROUP_2;
    /// Water sensors
    pub const WATER: Group = Group::GROUP_5;
}

/// [`BodyHandle`] over the rapier components of one entity.
pub struct RapierBody<'a> {
    pub transform: &'a Transform,
    pub velocity: &'a mut Velocity,
    pub force: &'a mut ExternalForce,
    pub impulse: &'a mut ExternalImpulse,
    pub gravity_scale: &'a mut GravityScale,
}

impl BodyHandle for RapierBody<'_> {
    fn position(&self) -> Vec2 {
        self.transform.translation.truncate()
    }

    fn velocity(&self) -> Vec2 {
        self.velocity.linvel
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.linvel = velocity;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale.0
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale.0 = scale;
    }

    fn add_force(&mut self, force: Vec2, mode: ForceMode) {
        match mode {
            ForceMode::Force => self.force.force += force,
            ForceMode::Impulse => self.impulse.impulse += force,
        }
    }
}

/// Marks a sensor collider as water and records its surface height.
#[derive(Component, Debug, Clone, Copy)]
pub struct WaterVolume {
    pub surface_y: f32,
}

#[derive(Bundle)]
pub struct WaterVolumeBundle {
    pub volume: WaterVolume,
    pub collider: Collider,
    pub sensor: Sensor,
    pub transform: Transform,
    pub collision_groups: CollisionGroups,
}

impl WaterVolumeBundle {
    pub fn new(zone: WaterZone) -> Self {
        let half = zone.size() / 2.0;
        Self {
            volume: WaterVolume {
                surface_y: zone.surface_y(),
            },
            collider: Collider::cuboid(half.x, half.y),
            sensor: Sensor,
            transform: Transform::from_translation(zone.center().extend(0.0)),
            collision_groups: CollisionGroups::new(collision_groups::WATER, Group::ALL),
        }
    }
}

/// Circle probe used to look for water around a rapier swimmer.
#[derive(Component, Debug, Clone, Copy)]
pub struct RapierWaterProbeSettings {
    pub radius: f32,
    /// Only colliders whose memberships intersect this mask count as water
    pub mask: Group,
}

impl Default for RapierWaterProbeSettings {
    fn default() -> Self {
        Self {
            radius: DEFAULT_PROBE_RADIUS,
            mask: collision_groups::WATER,
        }
    }
}

/// [`RegionTest`] backed by a rapier shape intersection query.
pub struct RapierWaterProbe<'a> {
    pub colliders: &'a RapierContextColliders,
    pub bodies: &'a RapierRigidBodySet,
    pub pipeline: &'a RapierQueryPipeline,
    /// Surface height of a water entity, `None` if it isn't water
    pub surface_of: &'a dyn Fn(Entity) -> Option<f32>,
    pub settings: RapierWaterProbeSettings,
}

impl RegionTest for RapierWaterProbe<'_> {
    fn probe(&self, point: Vec2) -> Option<WaterContact> {
        let filter = QueryFilter::default()
            .groups(CollisionGroups::new(Group::ALL, self.settings.mask));
        let shape = Collider::ball(self.settings.radius);

        let hit = self.pipeline.intersection_with_shape(
            self.colliders,
            self.bodies,
            point,
            0.0,
            &shape,
            filter,
        )?;

        Some(WaterContact {
            surface_y: (self.surface_of)(hit),
        })
    }

    fn debug_shape(&self, point: Vec2) -> Option<RegionShape> {
        Some(RegionShape::Circle {
            center: point,
            radius: self.settings.radius,
        })
    }
}

/// Bundle for a rapier-driven swimmer.
#[derive(Bundle)]
pub struct SwimmerPhysicsBundle {
    pub body: RigidBody,
    pub collider: Collider,
    pub velocity: Velocity,
    pub force: ExternalForce,
    pub impulse: ExternalImpulse,
    pub gravity_scale: GravityScale,
    pub locked_axes: LockedAxes,
    pub collision_groups: CollisionGroups,
    pub probe: RapierWaterProbeSettings,
    pub controller: SwimController,
    pub input: SwimInput,
    pub animation: AnimationFlags,
}

impl SwimmerPhysicsBundle {
    /// # Arguments
    /// * `width` - Hitbox width
    /// * `height` - Hitbox height, at least `width`
    pub fn new(width: f32, height: f32, config: SwimConfig) -> Self {
        let radius = width / 2.0;
        Self {
            body: RigidBody::Dynamic,
            collider: Collider::capsule_y((height / 2.0 - radius).max(0.0), radius),
            velocity: Velocity::zero(),
            force: ExternalForce::default(),
            impulse: ExternalImpulse::default(),
            gravity_scale: GravityScale(config.dry_gravity_scale),
            // Characters stay upright
            locked_axes: LockedAxes::ROTATION_LOCKED,
            collision_groups: CollisionGroups::new(
                collision_groups::SWIMMER,
                collision_groups::WORLD,
            ),
            probe: RapierWaterProbeSettings::default(),
            controller: SwimController::new(config),
            input: SwimInput::default(),
            animation: AnimationFlags::default(),
        }
    }
}

/// Gravity handed to rapier when the context is created.
#[derive(Resource, Debug, Clone, Copy)]
pub struct RapierSwimGravity(pub Vec2);

impl Default for RapierSwimGravity {
    fn default() -> Self {
        Self(crate::constants::DEFAULT_GRAVITY)
    }
}

/// Runs swimmers on top of rapier. Rapier steps in the fixed schedule so
/// buoyancy forces line up with physics steps.
pub struct RapierSwimPlugin;

impl Plugin for RapierSwimPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
            .init_resource::<RapierSwimGravity>()
            .configure_sets(
                Update,
                (SwimUpdateSet::PlayerInput, SwimUpdateSet::Swimming).chain(),
            )
            .add_systems(Startup, configure_rapier_context)
            .add_systems(
                Update,
                rapier_swim_frame_system.in_set(SwimUpdateSet::Swimming),
            )
            .add_systems(
                FixedUpdate,
                rapier_swim_physics_system.in_set(SwimFixedUpdateSet::Buoyancy),
            );
    }
}

fn configure_rapier_context(
    gravity: Res<RapierSwimGravity>,
    mut query: Query<&mut RapierConfiguration>,
) {
    for mut config in query.iter_mut() {
        config.gravity = gravity.0;
    }
}

pub fn rapier_swim_frame_system(
    time: Res<Time>,
    rapier_context: Query<(
        &RapierContextColliders,
        &RapierRigidBodySet,
        &RapierQueryPipeline,
    )>,
    volumes: Query<&WaterVolume>,
    mut swimmers: Query<(
        &mut SwimController,
        &RapierWaterProbeSettings,
        &Transform,
        &mut Velocity,
        &mut ExternalForce,
        &mut ExternalImpulse,
        &mut GravityScale,
        &mut SwimInput,
        &mut AnimationFlags,
    )>,
) {
    let delta = time.delta_secs();
    let context = rapier_context.single().ok();
    let surface_of = |entity: Entity| volumes.get(entity).ok().map(|volume| volume.surface_y);

    for (
        mut controller,
        settings,
        transform,
        mut velocity,
        mut force,
        mut impulse,
        mut gravity_scale,
        mut input,
        mut animation,
    ) in swimmers.iter_mut()
    {
        let probe = context.map(|(colliders, bodies, pipeline)| RapierWaterProbe {
            colliders,
            bodies,
            pipeline,
            surface_of: &surface_of,
            settings: *settings,
        });
        let mut body = RapierBody {
            transform,
            velocity: &mut velocity,
            force: &mut force,
            impulse: &mut impulse,
            gravity_scale: &mut gravity_scale,
        };
        let mut host = SwimHost {
            body: &mut body,
            water: probe.as_ref().map(|probe| probe as &dyn RegionTest),
            input: &*input,
            animation: &mut *animation,
        };
        controller.on_tick(&mut host, delta);

        input.jump = false;
    }
}

pub fn rapier_swim_physics_system(
    time: Res<Time<Fixed>>,
    mut swimmers: Query<(
        &mut SwimController,
        &Transform,
        &mut Velocity,
        &mut ExternalForce,
        &mut ExternalImpulse,
        &mut GravityScale,
    )>,
) {
    let clock = StepClock::new(time.elapsed_secs(), time.delta_secs());

    for (mut controller, transform, mut velocity, mut force, mut impulse, mut gravity_scale) in
        swimmers.iter_mut()
    {
        // ExternalForce persists between steps, the controller re-adds it.
        force.force = Vec2::ZERO;

        let mut body = RapierBody {
            transform,
            velocity: &mut velocity,
            force: &mut force,
            impulse: &mut impulse,
            gravity_scale: &mut gravity_scale,
        };
        controller.on_physics_step(&mut body, clock);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::system::RunSystemOnce;
    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::physics::PhysicsBody;

    fn rapier_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, TransformPlugin, RapierSwimPlugin))
            .insert_resource(Time::<Fixed>::from_hz(50.0))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(20)));
        app
    }

    /// Surface at y = 1.
    fn pool() -> WaterZone {
        WaterZone::new(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 1.0))
    }

    fn spawn_swimmer(app: &mut App, y: f32) -> Entity {
        app.world_mut()
            .spawn((
                SwimmerPhysicsBundle::new(0.8, 1.8, SwimConfig::default()),
                Transform::from_xyz(0.0, y, 0.0),
            ))
            .id()
    }

    #[test]
    fn test_swimmer_physics_bundle_creation() {
        let bundle = SwimmerPhysicsBundle::new(0.8, 1.8, SwimConfig::default());
        assert!(matches!(bundle.body, RigidBody::Dynamic));
        assert_eq!(bundle.gravity_scale.0, 1.0);
        assert_eq!(bundle.probe.mask, collision_groups::WATER);
        assert!(!bundle.controller.in_water());
    }

    #[test]
    fn test_water_volume_bundle_geometry() {
        let zone = WaterZone::new(Vec2::new(-4.0, -3.0), Vec2::new(6.0, 1.0));
        let bundle = WaterVolumeBundle::new(zone);
        assert_eq!(bundle.volume.surface_y, 1.0);
        assert_eq!(bundle.transform.translation, Vec3::new(1.0, -1.0, 0.0));
        assert_eq!(bundle.collision_groups.memberships, collision_groups::WATER);
    }

    #[test]
    fn test_rapier_body_routes_forces() {
        let transform = Transform::from_xyz(1.0, -2.0, 0.0);
        let mut velocity = Velocity::linear(Vec2::new(0.5, 0.0));
        let mut force = ExternalForce::default();
        let mut impulse = ExternalImpulse::default();
        let mut gravity_scale = GravityScale(1.0);

        let mut body = RapierBody {
            transform: &transform,
            velocity: &mut velocity,
            force: &mut force,
            impulse: &mut impulse,
            gravity_scale: &mut gravity_scale,
        };
        assert_eq!(body.position(), Vec2::new(1.0, -2.0));

        body.add_force(Vec2::new(0.0, 3.0), ForceMode::Force);
        body.add_force(Vec2::new(0.0, 7.0), ForceMode::Impulse);
        body.set_gravity_scale(0.0);
        body.set_velocity(Vec2::new(0.0, -1.0));

        assert_eq!(force.force, Vec2::new(0.0, 3.0));
        assert_eq!(impulse.impulse, Vec2::new(0.0, 7.0));
        assert_eq!(gravity_scale.0, 0.0);
        assert_eq!(velocity.linvel, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_controller_drives_rapier_body() {
        let transform = Transform::from_xyz(0.0, 0.0, 0.0);
        let mut velocity = Velocity::zero();
        let mut force = ExternalForce::default();
        let mut impulse = ExternalImpulse::default();
        let mut gravity_scale = GravityScale(1.0);
        let mut body = RapierBody {
            transform: &transform,
            velocity: &mut velocity,
            force: &mut force,
            impulse: &mut impulse,
            gravity_scale: &mut gravity_scale,
        };

        let zone = WaterZone::new(Vec2::new(-5.0, -5.0), Vec2::new(5.0, 2.0));
        let mut controller = SwimController::default();
        controller.detect_water(&mut body, Some(&zone));
        controller.on_physics_step(&mut body, StepClock::new(0.0, 0.02));

        assert_eq!(force.force, Vec2::new(0.0, 50.0));
    }

    #[test]
    fn test_rapier_swimmer_floats_up() {
        let mut app = rapier_app();
        app.world_mut().spawn(WaterVolumeBundle::new(pool()));
        let entity = spawn_swimmer(&mut app, -1.0);
        app.finish();
        app.cleanup();

        for _ in 0..25 {
            app.update();
        }

        let world = app.world();
        let controller = world.get::<SwimController>(entity).unwrap();
        assert!(controller.in_water());
        assert_eq!(controller.surface_y(), 1.0);
        let y = world.get::<Transform>(entity).unwrap().translation.y;
        assert!(y > -1.0, "swimmer sank to {y}");
    }

    #[test]
    fn test_rapier_water_outside_mask_stays_dry() {
        let mut app = rapier_app();
        let mut volume = WaterVolumeBundle::new(pool());
        volume.collision_groups = CollisionGroups::new(Group::GROUP_8, Group::ALL);
        app.world_mut().spawn(volume);
        let entity = spawn_swimmer(&mut app, -1.0);
        app.finish();
        app.cleanup();

        for _ in 0..25 {
            app.update();
            let controller = app.world().get::<SwimController>(entity).unwrap();
            assert!(!controller.in_water());
        }

        let y = app.world().get::<Transform>(entity).unwrap().translation.y;
        assert!(y < -1.0, "dry swimmer should fall, got {y}");
    }

    #[test]
    fn test_physics_step_replaces_last_force() {
        let mut controller = SwimController::default();
        let mut body = PhysicsBody::new(Vec2::ZERO, Vec2::ZERO, 1.0);
        let zone = WaterZone::new(Vec2::new(-5.0, -5.0), Vec2::new(5.0, 2.0));
        controller.detect_water(&mut body, Some(&zone));

        let mut world = World::new();
        world.init_resource::<Time<Fixed>>();
        let entity = world
            .spawn((
                controller,
                Transform::from_xyz(0.0, 0.0, 0.0),
                Velocity::zero(),
                ExternalForce {
                    force: Vec2::new(0.0, 999.0),
                    ..default()
                },
                ExternalImpulse::default(),
                GravityScale(1.0),
            ))
            .id();

        for _ in 0..2 {
            world.run_system_once(rapier_swim_physics_system).unwrap();
            assert_eq!(
                world.get::<ExternalForce>(entity).unwrap().force,
                Vec2::new(0.0, 50.0)
            );
        }
    }
}
