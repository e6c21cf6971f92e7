use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SwimUpdateSet {
    PlayerInput,
    Swimming,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SwimFixedUpdateSet {
    Buoyancy,
    Integrate,
}
