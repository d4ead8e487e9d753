//! AI Events: animation lifecycle signals in, state changes out
//!
//! Animation player (engine side или headless clip clock) пишет
//! AnimationSignal; drive_agent_controllers читает их в том же fixed тике,
//! бакетит по агенту в порядке прихода и скармливает AgentController.

use bevy::prelude::*;

use crate::ai::state::StateKind;

/// Lifecycle сигналы от animation player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationSignalKind {
    /// Клип начался
    Start,
    /// Клип прошёл lead-in
    DelayedStart,
    /// Клип закончился → eager exit текущего состояния
    End,
    /// Окно удара открылось → enable hitbox
    HitWindowOpen,
    /// Окно удара закрылось → disable hitbox
    HitWindowClose,
    /// Начался hit-react → preemption в Hit
    HitReactStart,
    /// Hit-react закончился
    HitReactEnd,
}

/// Сигнал для конкретного агента
#[derive(Event, Debug, Clone, Copy)]
pub struct AnimationSignal {
    pub agent: Entity,
    pub kind: AnimationSignalKind,
}

/// Событие: агент сменил состояние (в т.ч. re-enter Attack → Attack)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChanged {
    pub agent: Entity,
    pub from: StateKind,
    pub to: StateKind,
}
