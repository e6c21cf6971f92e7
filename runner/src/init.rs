use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_log::info;
use std::time::Duration;
use swim_shared::physics::PhysicsBody;
use swim_shared::sets::SwimUpdateSet;
use swim_shared::swim::{
    AnimationFlags, SwimController, SwimGravity, SwimInput, SwimPlugin, SwimState, SwimmerBundle,
};
use swim_shared::water::WaterRegions;
use swim_shared::{IS_IDLE_FLAG, IS_SWIMMING_FLAG};

use crate::scenario::Scenario;

/// Marks the swimmer driven by the scenario script.
#[derive(Component)]
pub struct ScriptedSwimmer;

/// Frame counter and script for the scenario being played.
#[derive(Resource)]
pub struct ScenarioPlayback {
    pub scenario: Scenario,
    pub frame: u32,
}

/// What happened over a run.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u32,
    pub entered_water_at: Option<u32>,
    pub surfaced_frames: u32,
    pub transitions: u32,
    pub final_state: Option<SwimState>,
    pub position: Vec2,
    pub velocity: Vec2,
}

pub fn build_app(scenario: Scenario, with_logging: bool) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    if with_logging {
        app.add_plugins(bevy_log::LogPlugin::default());
    }
    app.add_plugins(SwimPlugin);

    // One fixed step per update keeps runs reproducible.
    let step = Duration::from_secs_f64(1.0 / scenario.hz);
    app.insert_resource(Time::<Fixed>::from_duration(step));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));

    app.insert_resource(SwimGravity(scenario.gravity));
    app.insert_resource(WaterRegions {
        region: scenario.water.clone(),
    });

    app.world_mut().spawn((
        SwimmerBundle::new(scenario.swim_config(), scenario.body.to_body()),
        ScriptedSwimmer,
    ));

    app.insert_resource(ScenarioPlayback { scenario, frame: 0 });
    app.insert_resource(RunSummary::default());

    app.add_systems(
        Update,
        (
            scripted_input_system.in_set(SwimUpdateSet::PlayerInput),
            report_swim_state_system.after(SwimUpdateSet::Swimming),
        ),
    );

    app
}

pub fn run(scenario: Scenario, with_logging: bool) -> RunSummary {
    let steps = scenario.steps;
    let mut app = build_app(scenario, with_logging);
    app.finish();
    app.cleanup();

    info!("Running {} frames", steps);
    for _ in 0..steps {
        app.update();
    }

    let summary = app.world().resource::<RunSummary>().clone();
    info!(
        "Finished in state {:?} at {:?} (velocity {:?}), surfaced for {} frames, {} transitions",
        summary.final_state,
        summary.position,
        summary.velocity,
        summary.surfaced_frames,
        summary.transitions
    );
    summary
}

fn scripted_input_system(
    mut playback: ResMut<ScenarioPlayback>,
    mut query: Query<&mut SwimInput, With<ScriptedSwimmer>>,
) {
    let input = playback.scenario.input_at(playback.frame);
    for mut swim_input in query.iter_mut() {
        *swim_input = input;
    }
    playback.frame += 1;
}

fn report_swim_state_system(
    playback: Res<ScenarioPlayback>,
    mut summary: ResMut<RunSummary>,
    query: Query<(&SwimController, &PhysicsBody, &AnimationFlags), With<ScriptedSwimmer>>,
) {
    let frame = playback.frame.saturating_sub(1);
    for (controller, body, flags) in query.iter() {
        let state = controller.state();

        if summary.final_state != Some(state) {
            if summary.final_state.is_some() {
                summary.transitions += 1;
            }
            info!(
                "frame {frame}: {:?} -> {:?} at {:?} (swimming: {}, idle: {})",
                summary.final_state,
                state,
                body.position,
                flags.get(IS_SWIMMING_FLAG),
                flags.get(IS_IDLE_FLAG)
            );
        }

        if controller.in_water() && summary.entered_water_at.is_none() {
            summary.entered_water_at = Some(frame);
        }
        if state == SwimState::Surfaced {
            summary.surfaced_frames += 1;
        }

        summary.frames = playback.frame;
        summary.final_state = Some(state);
        summary.position = body.position;
        summary.velocity = body.velocity;
    }
}
