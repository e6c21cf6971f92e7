pub mod animation;
pub mod config;
pub mod controller;
pub mod input;
pub mod plugin;

pub use animation::{AnimationFlags, AnimationSink};
pub use config::{SwimConfig, SwimPreset, VerticalInput};
pub use controller::{StepClock, SwimController, SwimHost, SwimState};
pub use input::{InputSource, SwimInput};
pub use plugin::{SwimGravity, SwimPlugin, SwimmerBundle};
