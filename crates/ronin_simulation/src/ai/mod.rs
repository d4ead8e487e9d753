//! AI decision-making module
//!
//! Per-agent combat FSM: perception → states (Enter/Update/Exit) →
//! StateMachine → AgentController. Коллабораторы (навигация, анимация,
//! здоровье, хитбоксы): trait objects, собранные из ECS handles.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod collaborators;
pub mod components;
pub mod controller;
pub mod events;
pub mod machine;
pub mod perception;
pub mod state;
pub mod systems;

#[cfg(test)]
mod test_support;

// Re-export основных типов
pub use collaborators::{
    AgentContext, Animator, AttackDirection, AttackTrigger, Navigation, TargetSnapshot, Vitals,
};
pub use components::{AIConfig, ConfigError};
pub use controller::{AgentController, ControllerError};
pub use events::{AnimationSignal, AnimationSignalKind, StateChanged};
pub use machine::{StateChange, StateMachine};
pub use perception::{can_attack_target, can_see_target, PerceptionResult};
pub use state::{AIState, Phase, StateKind};

/// AI Plugin
///
/// Регистрирует AI события и FSM driver в FixedUpdate (SimulationSet::Brain):
/// animation signals этого тика уже записаны (Signals), навигация и
/// урон отработают после (Motion, Combat).
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationSignal>()
            .add_event::<StateChanged>();

        app.add_systems(
            FixedUpdate,
            systems::drive_agent_controllers.in_set(SimulationSet::Brain),
        );
    }
}
