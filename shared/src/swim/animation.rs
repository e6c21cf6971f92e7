use std::collections::HashMap;

use bevy::prelude::*;

/// Receiver for named boolean animation parameters.
pub trait AnimationSink {
    fn set_bool(&mut self, name: &str, value: bool);
}

/// Animation parameters as last written by the swim controller.
///
/// Stands in for an animator: the host reads the flags back and feeds them
/// to whatever animation graph it uses.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AnimationFlags {
    flags: HashMap<String, bool>,
}

impl AnimationFlags {
    /// Unset flags read as false.
    pub fn get(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }
}

impl AnimationSink for AnimationFlags {
    fn set_bool(&mut self, name: &str, value: bool) {
        match self.flags.get_mut(name) {
            Some(flag) => *flag = value,
            None => {
                self.flags.insert(name.to_owned(), value);
            }
        }
    }
}
