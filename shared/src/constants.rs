use bevy::prelude::*;

pub const FIXED_TICKS_PER_SECOND: f64 = 50.0;
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -9.81);
pub const DEFAULT_PROBE_RADIUS: f32 = 0.2;
pub const DRY_GRAVITY_SCALE: f32 = 1.0;

pub const IS_SWIMMING_FLAG: &str = "IsSwimming";
pub const IS_IDLE_FLAG: &str = "IsIdle";

/// Layer bit carried by water bodies unless told otherwise.
pub const WATER_LAYER: u32 = 1 << 4;
