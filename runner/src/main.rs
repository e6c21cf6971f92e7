use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use swim_shared::swim::SwimPreset;

use crate::scenario::load_from_file::load_scenario;

mod init;
mod scenario;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PresetArg {
    Buoyant,
    Free,
}

impl From<PresetArg> for SwimPreset {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Buoyant => SwimPreset::Buoyant,
            PresetArg::Free => SwimPreset::Free,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Plays a swim scenario headless and logs what happens", long_about = None)]
struct Args {
    /// RON scenario file
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Swap the scenario tuning for a preset
    #[arg(short, long, value_enum)]
    preset: Option<PresetArg>,

    /// Number of frames to play
    #[arg(long)]
    steps: Option<u32>,

    /// Fixed physics rate
    #[arg(long)]
    hz: Option<f64>,
}

fn main() {
    let args = Args::parse();

    if let Some(hz) = args.hz {
        if !(1.0..=1000.0).contains(&hz) {
            eprintln!("Error: hz must be between 1 and 1000 (inclusive).");
            eprintln!("Got: {hz}");
            std::process::exit(1);
        }
    }

    let mut scenario = match load_scenario(args.scenario.as_deref()) {
        Ok(scenario) => scenario,
        Err(err) => {
            eprintln!("Failed to load scenario: {err}");
            std::process::exit(1);
        }
    };

    if let Some(preset) = args.preset {
        scenario.preset = preset.into();
        scenario.config = None;
    }
    if let Some(steps) = args.steps {
        scenario.steps = steps;
    }
    if let Some(hz) = args.hz {
        scenario.hz = hz;
    }

    init::run(scenario, true);
}
