use bevy_log::info;
use ron::de::from_str;
use std::fs;
use std::path::Path;

use super::Scenario;

/// Loads a scenario from a RON file.
///
/// A missing file falls back to the default scenario; unreadable or
/// malformed files are errors, as is an `hz` outside `1..=1000`.
pub fn load_scenario(path: Option<&Path>) -> Result<Scenario, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        info!("No scenario given, running the default scenario");
        return Ok(Scenario::default());
    };

    if !path.exists() {
        info!(
            "Scenario file not found: {}. Running the default scenario.",
            path.display()
        );
        return Ok(Scenario::default());
    }

    let contents: String = fs::read_to_string(path)?;
    let scenario: Scenario = from_str(&contents)?;

    if !(1.0..=1000.0).contains(&scenario.hz) {
        return Err(format!(
            "{}: hz must be between 1 and 1000 (inclusive), got {}",
            path.display(),
            scenario.hz
        )
        .into());
    }

    info!("Loaded scenario from disk: {}", path.display());

    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;
    use std::path::PathBuf;
    use swim_shared::swim::{SwimPreset, VerticalInput};
    use swim_shared::water::WaterRegion;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("swim_runner_{}_{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_uses_default() {
        let path = std::env::temp_dir().join("swim_runner_does_not_exist.ron");
        let scenario = load_scenario(Some(&path)).unwrap();
        assert_eq!(scenario, Scenario::default());
        assert_eq!(load_scenario(None).unwrap(), Scenario::default());
    }

    #[test]
    fn test_partial_scenario_file() {
        let path = temp_file(
            "partial.ron",
            r#"(
                preset: Free,
                config: Some((swim_speed: 4.0, vertical_input: Free)),
                body: (position: (1.0, -3.0)),
                water: Some(Zone((min: (-5.0, -5.0), max: (5.0, 0.0)))),
                steps: 10,
                inputs: [(at_step: 2, horizontal: -1.0)],
            )"#,
        );
        let scenario = load_scenario(Some(&path)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(scenario.preset, SwimPreset::Free);
        assert_eq!(scenario.steps, 10);
        assert_eq!(scenario.body.position, Vec2::new(1.0, -3.0));
        assert_eq!(scenario.body.mass, 1.0);
        let config = scenario.swim_config();
        assert_eq!(config.swim_speed, 4.0);
        assert_eq!(config.vertical_input, VerticalInput::Free);
        assert_eq!(config.buoyancy_force, 25.0);
        assert!(matches!(scenario.water, Some(WaterRegion::Zone(_))));
        assert_eq!(scenario.inputs[0].at_step, 2);
        assert!(!scenario.inputs[0].jump);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = temp_file("broken.ron", "(preset: Sideways, steps: )");
        let result = load_scenario(Some(&path));
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_hz_scenario_is_an_error() {
        let path = temp_file("zero_hz.ron", "(hz: 0.0, steps: 1)");
        let result = load_scenario(Some(&path));
        fs::remove_file(&path).ok();
        assert!(result.is_err());

        let path = temp_file("negative_hz.ron", "(hz: -50.0)");
        let result = load_scenario(Some(&path));
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_demo_scenarios_parse() {
        let buoyant: Scenario =
            from_str(include_str!("../../../demos/scenarios/buoyant.ron")).unwrap();
        assert_eq!(buoyant.preset, SwimPreset::Buoyant);
        assert_eq!(buoyant.inputs.len(), 4);

        let free: Scenario = from_str(include_str!("../../../demos/scenarios/free.ron")).unwrap();
        assert_eq!(free.preset, SwimPreset::Free);
        let Some(WaterRegion::Probe(probe)) = free.water else {
            panic!("free scenario should use a probe");
        };
        assert_eq!(probe.bodies.len(), 3);
        assert_eq!(probe.bodies[0].layers, swim_shared::WATER_LAYER);
        assert_eq!(probe.bodies[2].layers, 128);
    }
}
