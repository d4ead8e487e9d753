//! Animation handle: outbound команды в animation player

use std::collections::HashMap;

use bevy::prelude::*;

use crate::ai::Animator;

/// Очередь trigger'ов + blend параметры для animation player
///
/// Player (engine AnimationTree или headless clip clock) забирает triggers
/// через `drain_triggers` и отвечает `AnimationSignal` событиями.
#[derive(Component, Debug, Clone, Default)]
pub struct AnimationDriver {
    pending_triggers: Vec<String>,
    blend: HashMap<String, f32>,
}

impl AnimationDriver {
    pub fn drain_triggers(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_triggers)
    }

    pub fn pending_triggers(&self) -> &[String] {
        &self.pending_triggers
    }
}

impl Animator for AnimationDriver {
    fn play_trigger(&mut self, name: &str) {
        self.pending_triggers.push(name.to_string());
    }

    fn set_blend_parameter(&mut self, name: &str, value: f32) {
        self.blend.insert(name.to_string(), value);
    }

    fn blend_parameter(&self, name: &str) -> f32 {
        self.blend.get(name).copied().unwrap_or(0.0)
    }
}
