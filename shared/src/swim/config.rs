//! Swim tuning, shared by the controller, the ECS plugin and the runner.

use serde::{Deserialize, Serialize};

use crate::constants::DRY_GRAVITY_SCALE;

/// Which vertical input the swimmer honors while in water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VerticalInput {
    /// Only diving is player driven, rising is left to buoyancy.
    #[default]
    DownOnly,
    /// Both directions map straight to vertical velocity.
    Free,
}

/// Tuning for a single swimmer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwimConfig {
    /// Velocity magnitude mapped from a full input axis
    pub swim_speed: f32,
    /// Upward force per unit of depth below the surface
    pub buoyancy_force: f32,
    /// Amplitude of the bobbing force at the surface
    pub oscillation_strength: f32,
    /// Angular speed of the bobbing force (rad/s)
    pub oscillation_speed: f32,
    /// Vertical velocity damping per second while submerged
    pub vertical_drag: f32,
    /// Horizontal velocity damping per second while submerged
    pub horizontal_drag: f32,
    /// Impulse applied by a jump at the surface
    pub jump_out_of_water_force: f32,
    /// Depth tolerance for being "at surface"
    pub surface_band: f32,
    /// Vertical velocity must stay above this to count as surfaced
    pub surface_velocity_floor: f32,
    /// Speed above which either axis counts as moving
    pub moving_threshold: f32,
    pub vertical_input: VerticalInput,
    /// Apply damping while submerged
    pub drag: bool,
    /// Zero the body's gravity scale while in water
    pub suspend_gravity_in_water: bool,
    /// Drive the "IsIdle" animation flag
    pub idle_flag: bool,
    /// Gravity scale restored when leaving the water
    pub dry_gravity_scale: f32,
}

impl Default for SwimConfig {
    fn default() -> Self {
        Self {
            swim_speed: 2.0,
            buoyancy_force: 25.0,
            oscillation_strength: 10.0,
            oscillation_speed: 5.0,
            vertical_drag: 10.0,
            horizontal_drag: 1.5,
            jump_out_of_water_force: 7.0,
            surface_band: 0.5,
            surface_velocity_floor: -0.1,
            moving_threshold: 0.1,
            vertical_input: VerticalInput::DownOnly,
            drag: true,
            suspend_gravity_in_water: false,
            idle_flag: true,
            dry_gravity_scale: DRY_GRAVITY_SCALE,
        }
    }
}

/// Ready-made tunings matching the two swim styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SwimPreset {
    /// Buoyancy driven: dive with input, float back up, water drag.
    #[default]
    Buoyant,
    /// Free two-axis swimming with gravity switched off in water.
    Free,
}

impl SwimPreset {
    pub fn to_config(self) -> SwimConfig {
        match self {
            SwimPreset::Buoyant => SwimConfig::default(),
            SwimPreset::Free => SwimConfig {
                vertical_input: VerticalInput::Free,
                drag: false,
                suspend_gravity_in_water: true,
                idle_flag: false,
                ..SwimConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ_only_in_style() {
        let buoyant = SwimPreset::Buoyant.to_config();
        let free = SwimPreset::Free.to_config();

        assert_eq!(buoyant, SwimConfig::default());
        assert_eq!(free.vertical_input, VerticalInput::Free);
        assert!(!free.drag);
        assert!(free.suspend_gravity_in_water);
        assert!(!free.idle_flag);
        assert_eq!(free.buoyancy_force, buoyant.buoyancy_force);
        assert_eq!(free.swim_speed, buoyant.swim_speed);
    }

    #[test]
    fn test_partial_ron_falls_back_to_defaults() {
        let config: SwimConfig =
            ron::de::from_str("(swim_speed: 3.5, vertical_input: Free)").unwrap();
        assert_eq!(config.swim_speed, 3.5);
        assert_eq!(config.vertical_input, VerticalInput::Free);
        assert_eq!(config.buoyancy_force, 25.0);
        assert_eq!(config.surface_band, 0.5);
        assert!(config.drag);
    }
}
