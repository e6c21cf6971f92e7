pub mod load_from_file;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use swim_shared::physics::PhysicsBody;
use swim_shared::swim::{SwimConfig, SwimInput, SwimPreset};
use swim_shared::water::{WaterRegion, WaterZone};
use swim_shared::{DEFAULT_GRAVITY, FIXED_TICKS_PER_SECOND};

/// Input change taking effect at a given frame.
///
/// Axes hold until the next event; `jump` only fires on `at_step`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct InputEvent {
    pub at_step: u32,
    pub horizontal: f32,
    pub vertical: f32,
    pub jump: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct BodySpawn {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f32,
}

impl Default for BodySpawn {
    fn default() -> Self {
        Self {
            position: Vec2::new(0.0, 6.0),
            velocity: Vec2::ZERO,
            mass: 1.0,
        }
    }
}

impl BodySpawn {
    pub fn to_body(self) -> PhysicsBody {
        PhysicsBody::new(self.position, self.velocity, self.mass)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Scenario {
    pub preset: SwimPreset,
    /// Replaces the preset tuning when present
    pub config: Option<SwimConfig>,
    pub body: BodySpawn,
    pub water: Option<WaterRegion>,
    pub gravity: Vec2,
    pub hz: f64,
    pub steps: u32,
    pub inputs: Vec<InputEvent>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            preset: SwimPreset::Buoyant,
            config: None,
            body: BodySpawn::default(),
            water: Some(WaterRegion::Zone(WaterZone::new(
                Vec2::new(-50.0, -10.0),
                Vec2::new(50.0, 2.0),
            ))),
            gravity: DEFAULT_GRAVITY,
            hz: FIXED_TICKS_PER_SECOND,
            steps: 600,
            inputs: vec![
                InputEvent {
                    at_step: 150,
                    horizontal: 1.0,
                    ..default()
                },
                InputEvent {
                    at_step: 250,
                    horizontal: 1.0,
                    vertical: -1.0,
                    ..default()
                },
                InputEvent {
                    at_step: 300,
                    ..default()
                },
                InputEvent {
                    at_step: 450,
                    jump: true,
                    ..default()
                },
            ],
        }
    }
}

impl Scenario {
    pub fn swim_config(&self) -> SwimConfig {
        self.config.unwrap_or_else(|| self.preset.to_config())
    }

    /// Input for frame `step`: the latest event at or before it.
    pub fn input_at(&self, step: u32) -> SwimInput {
        self.inputs
            .iter()
            .filter(|event| event.at_step <= step)
            .max_by_key(|event| event.at_step)
            .map(|event| {
                SwimInput::new(event.horizontal, event.vertical)
                    .with_jump(event.jump && event.at_step == step)
            })
            .unwrap_or_default()
    }
}
