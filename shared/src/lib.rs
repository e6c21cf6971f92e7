//! Swimming for 2D characters.
//!
//! - [`swim::SwimController`]: water detection, swim input, buoyancy, surface
//!   bobbing and animation flags
//! - [`water`]: water regions the controller is tested against
//! - [`physics`]: the body contract plus a point-mass body and a rapier adapter
//! - [`swim::SwimPlugin`] / [`physics::rapier::RapierSwimPlugin`]: ECS wiring

pub mod constants;
pub mod physics;
pub mod sets;
pub mod swim;
pub mod water;

pub use constants::*;
