//! AgentController: per-agent driver of the StateMachine
//!
//! Порядок внутри одного тика (фиксированный):
//! 1. Death check: health dead → Dead немедленно, больше ничего
//! 2. Animation signals в порядке прихода, кроме hit-react
//! 3. Hit-react (если пришёл): preemption в Hit поверх всего, что сделали сигналы
//! 4. `process()` текущего состояния
//!
//! Hit-react применяется последним: устаревший End прерванного swing'а
//! не должен resolve'нуть только что выставленный Hit.

use bevy::prelude::*;
use thiserror::Error;

use crate::ai::collaborators::AgentContext;
use crate::ai::events::AnimationSignalKind;
use crate::ai::machine::{StateChange, StateMachine};
use crate::ai::state::{AIState, StateKind};
use crate::ai::{AIConfig, ConfigError};
use crate::components::{AnimationDriver, HitSurfaces, NavAgent};
use crate::combat::Attacker;
use crate::Actor;

/// Ошибки конструирования агента (precondition violations)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    #[error("agent has no tracked target")]
    MissingTarget,

    #[error("invalid AI config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// AI агент: FSM + цель + tunables
///
/// Коллабораторы: соседние компоненты того же entity (NavAgent,
/// AnimationDriver, HitSurfaces, Health); система собирает из них
/// AgentContext на каждый тик.
#[derive(Component, Debug, Clone)]
#[require(Actor, NavAgent, AnimationDriver, HitSurfaces, Attacker)]
pub struct AgentController {
    target: Entity,
    config: AIConfig,
    machine: StateMachine,
}

impl AgentController {
    pub fn new(target: Option<Entity>, config: AIConfig) -> Result<Self, ControllerError> {
        let target = target.ok_or(ControllerError::MissingTarget)?;
        config.validate()?;

        Ok(Self {
            target,
            config,
            machine: StateMachine::new(AIState::Idle),
        })
    }

    pub fn target(&self) -> Entity {
        self.target
    }

    pub fn config(&self) -> &AIConfig {
        &self.config
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn state_kind(&self) -> StateKind {
        self.machine.kind()
    }

    /// Один simulation тик агента. Возвращает все смены состояния за тик.
    pub fn tick(
        &mut self,
        ctx: &mut AgentContext,
        signals: &[AnimationSignalKind],
    ) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if ctx.vitals.is_dead() {
            changes.extend(self.enforce_death(ctx));
            return changes;
        }

        let mut hit_react = false;
        for &signal in signals {
            if signal == AnimationSignalKind::HitReactStart {
                hit_react = true;
                continue;
            }
            changes.extend(self.handle_signal(ctx, signal));
        }

        if hit_react {
            changes.extend(self.handle_signal(ctx, AnimationSignalKind::HitReactStart));
        }

        changes.extend(self.machine.process(ctx, &self.config));
        changes
    }

    /// Death preemption. Idempotent: уже Dead → ничего не делаем.
    pub fn enforce_death(&mut self, ctx: &mut AgentContext) -> Option<StateChange> {
        if !ctx.vitals.is_dead() || self.state_kind() == StateKind::Dead {
            return None;
        }

        let change = self.machine.force_entered(AIState::Dead, ctx, &self.config);
        crate::log_info(&format!(
            "💀 Agent died: {:?} → Dead (hit/hurt surfaces disabled)",
            change.from
        ));
        Some(change)
    }

    /// Route one animation lifecycle signal into the machine.
    pub fn handle_signal(
        &mut self,
        ctx: &mut AgentContext,
        signal: AnimationSignalKind,
    ) -> Option<StateChange> {
        // Мёртвым сигналы не нужны: поздний HitWindowOpen не должен включить hitbox трупу
        if self.state_kind() == StateKind::Dead {
            return None;
        }

        match signal {
            AnimationSignalKind::HitReactStart => {
                if self.state_kind().is_terminal() {
                    return None;
                }
                let change = self.machine.force(AIState::Hit);
                crate::log(&format!("💥 Hit-react: {:?} preempted → Hit", change.from));
                Some(change)
            }
            AnimationSignalKind::HitWindowOpen => {
                ctx.trigger.enable_hitbox();
                None
            }
            AnimationSignalKind::HitWindowClose => {
                ctx.trigger.disable_hitbox();
                None
            }
            AnimationSignalKind::End => {
                // Idle выходит только по конусу обзора
                if self.state_kind() == StateKind::Idle {
                    return None;
                }
                self.machine.resolve_now(ctx, &self.config)
            }
            AnimationSignalKind::Start
            | AnimationSignalKind::DelayedStart
            | AnimationSignalKind::HitReactEnd => {
                crate::log(&format!(
                    "AI: {:?} got {:?} (no-op hook)",
                    self.state_kind(),
                    signal
                ));
                None
            }
        }
    }

    /// External override (scripted retreat etc). Terminal states refuse.
    pub fn force_state(&mut self, state: AIState) -> Option<StateChange> {
        if self.state_kind().is_terminal() {
            crate::log_warning(&format!(
                "AI: refused to force {:?} out of terminal {:?}",
                state.kind(),
                self.state_kind()
            ));
            return None;
        }

        Some(self.machine.force(state))
    }
}
