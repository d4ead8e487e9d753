//! StateMachine: единственный слот "current state" агента

use crate::ai::collaborators::AgentContext;
use crate::ai::state::{AIState, ActiveState, Resolution, StateKind};
use crate::ai::AIConfig;

/// Запись об adopt'е нового состояния (для StateChanged событий и логов)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: StateKind,
    pub to: StateKind,
}

/// Holds exactly one current state per agent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateMachine {
    current: ActiveState,
}

impl StateMachine {
    pub fn new(initial: AIState) -> Self {
        Self {
            current: ActiveState::new(initial),
        }
    }

    pub fn current(&self) -> &ActiveState {
        &self.current
    }

    pub fn kind(&self) -> StateKind {
        self.current.kind()
    }

    /// Один `process()` текущего состояния; successor adopt'ится на следующий тик
    pub fn process(&mut self, ctx: &mut AgentContext, config: &AIConfig) -> Option<StateChange> {
        let resolution = self.current.process(ctx, config);
        self.adopt(resolution)
    }

    /// Eager exit (animation end): successor вычисляется сейчас, без учёта фазы
    pub fn resolve_now(&mut self, ctx: &mut AgentContext, config: &AIConfig) -> Option<StateChange> {
        let resolution = self.current.exit(ctx, config);
        self.adopt(resolution)
    }

    /// Preemption: заменить текущее состояние, отбросив его фазу.
    ///
    /// Новое состояние входит (Enter) на ближайшем `process()`.
    pub fn force(&mut self, state: AIState) -> StateChange {
        let from = self.current.kind();
        self.current = ActiveState::new(state);
        StateChange {
            from,
            to: self.current.kind(),
        }
    }

    /// Preemption с немедленным Enter (Dead: surfaces выключаются в этот же тик)
    pub fn force_entered(
        &mut self,
        state: AIState,
        ctx: &mut AgentContext,
        config: &AIConfig,
    ) -> StateChange {
        let change = self.force(state);
        self.current.enter_now(ctx, config);
        change
    }

    fn adopt(&mut self, resolution: Resolution) -> Option<StateChange> {
        match resolution {
            Resolution::Stay => None,
            Resolution::Enter(next) => Some(self.force(next)),
        }
    }
}
