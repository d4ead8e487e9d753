//! Agent FSM states (sum type + phase protocol)
//!
//! Каждое состояние живёт по фазам Enter → Update → Exit:
//! - Enter: one-time setup (навигация, выбор удара)
//! - Update: per-tick поведение; может выставить Exit
//! - Exit: вычисляет successor, машина его adopt'ит
//!
//! Правила переходов: чистая функция `resolve(state, senses)`, без
//! доступа к коллабораторам. Все `match` без wildcard: новый вариант без
//! правила не скомпилируется.

use bevy::prelude::*;

use crate::ai::collaborators::{AgentContext, AttackDirection};
use crate::ai::perception::PerceptionResult;
use crate::ai::AIConfig;

/// Blend параметр локомоции в animator
pub const FORWARD_SPEED: &str = "forwardSpeed";

/// Тег состояния (без данных): для событий, логов, сравнений
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum StateKind {
    Idle,
    Chase,
    Attack,
    Hit,
    MoveBack,
    Dead,
    Won,
}

impl StateKind {
    /// Dead и Won: без исходящих переходов
    pub fn is_terminal(&self) -> bool {
        matches!(self, StateKind::Dead | StateKind::Won)
    }
}

/// Фаза внутри жизни одного состояния
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum Phase {
    #[default]
    Enter,
    Update,
    Exit,
}

/// Поведенческий режим агента + variant-specific данные
#[derive(Debug, Clone, PartialEq, Reflect)]
pub enum AIState {
    /// Стоим, ждём пока цель попадёт в конус обзора
    Idle,

    /// Преследуем цель через навигацию
    Chase,

    /// Один swing; direction выбирается на Enter
    Attack { direction: AttackDirection },

    /// Hit-react, ждём конца анимации
    Hit,

    /// Отход от цели, resolve по таймеру
    MoveBack {
        /// Сколько ещё отходим (секунды)
        remaining: f32,
    },

    /// Терминальное: поведение заморожено, surfaces выключены
    Dead,

    /// Терминальное: цель мертва
    Won,
}

impl Default for AIState {
    fn default() -> Self {
        Self::Idle
    }
}

impl AIState {
    /// Attack до Enter (direction ещё не выбран)
    pub fn attack() -> Self {
        AIState::Attack {
            direction: AttackDirection::None,
        }
    }

    pub fn move_back() -> Self {
        AIState::MoveBack { remaining: 0.0 }
    }

    pub fn kind(&self) -> StateKind {
        match self {
            AIState::Idle => StateKind::Idle,
            AIState::Chase => StateKind::Chase,
            AIState::Attack { .. } => StateKind::Attack,
            AIState::Hit => StateKind::Hit,
            AIState::MoveBack { .. } => StateKind::MoveBack,
            AIState::Dead => StateKind::Dead,
            AIState::Won => StateKind::Won,
        }
    }
}

/// Снимок всего, от чего зависят правила переходов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Senses {
    pub can_see: bool,
    pub can_attack: bool,
    pub self_dead: bool,
    pub target_dead: bool,
}

impl Senses {
    pub fn read(ctx: &AgentContext, config: &AIConfig) -> Self {
        let perception = PerceptionResult::sense(&*ctx.body, ctx.target.position, config);
        Self {
            can_see: perception.can_see,
            can_attack: perception.can_attack,
            self_dead: ctx.vitals.is_dead(),
            target_dead: ctx.target.dead,
        }
    }
}

/// Итог Exit: остаёмся или входим в новое состояние
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Stay,
    Enter(AIState),
}

/// Successor rule for every variant.
pub fn resolve(state: &AIState, senses: &Senses) -> Resolution {
    match state {
        AIState::Idle => Resolution::Enter(AIState::Chase),
        AIState::Chase => {
            if senses.can_attack {
                Resolution::Enter(AIState::attack())
            } else if !senses.can_see {
                Resolution::Enter(AIState::Idle)
            } else {
                Resolution::Stay
            }
        }
        AIState::Attack { .. } | AIState::Hit | AIState::MoveBack { .. } => {
            Resolution::Enter(engagement_outcome(senses))
        }
        AIState::Dead | AIState::Won => Resolution::Stay,
    }
}

/// Приоритет после swing / hit-react / отхода:
/// self dead → Dead, target dead → Won, в радиусе → Attack, видим → Chase, иначе Idle
pub fn engagement_outcome(senses: &Senses) -> AIState {
    if senses.self_dead {
        AIState::Dead
    } else if senses.target_dead {
        AIState::Won
    } else if senses.can_attack {
        AIState::attack()
    } else if senses.can_see {
        AIState::Chase
    } else {
        AIState::Idle
    }
}

/// Текущее состояние агента вместе с его фазой
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct ActiveState {
    state: AIState,
    phase: Phase,
}

impl Default for ActiveState {
    fn default() -> Self {
        Self::new(AIState::Idle)
    }
}

impl ActiveState {
    /// Новое состояние, Enter ещё не выполнен
    pub fn new(state: AIState) -> Self {
        Self {
            state,
            phase: Phase::Enter,
        }
    }

    pub fn state(&self) -> &AIState {
        &self.state
    }

    pub fn kind(&self) -> StateKind {
        self.state.kind()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// One tick of the phase protocol.
    ///
    /// Фазы проверяются последовательно: состояние, вошедшее в этом тике,
    /// сразу же обновляется, а сработавший в Update exit resolve'ится тут же.
    pub fn process(&mut self, ctx: &mut AgentContext, config: &AIConfig) -> Resolution {
        if self.phase == Phase::Enter {
            self.enter(ctx, config);
            self.phase = Phase::Update;
        }

        if self.phase == Phase::Update {
            self.update(ctx, config);
        }

        if self.phase == Phase::Exit {
            return self.exit(ctx, config);
        }

        Resolution::Stay
    }

    /// Run the Enter phase right now (used by forced transitions).
    pub fn enter_now(&mut self, ctx: &mut AgentContext, config: &AIConfig) {
        if self.phase == Phase::Enter {
            self.enter(ctx, config);
            self.phase = Phase::Update;
        }
    }

    /// Exit evaluation, независимо от текущей фазы.
    ///
    /// `Stay` возвращает состояние в Update (если оно уже было в Exit).
    pub fn exit(&mut self, ctx: &mut AgentContext, config: &AIConfig) -> Resolution {
        let senses = Senses::read(ctx, config);
        let resolution = resolve(&self.state, &senses);

        if resolution == Resolution::Stay && self.phase == Phase::Exit {
            self.phase = Phase::Update;
        }

        resolution
    }

    fn enter(&mut self, ctx: &mut AgentContext, config: &AIConfig) {
        match &mut self.state {
            AIState::Idle | AIState::Hit | AIState::Won => {}

            AIState::Chase => {
                ctx.navigation.set_paused(false);
            }

            AIState::Attack { direction } => {
                ctx.navigation.set_paused(true);
                *direction = AttackDirection::roll(ctx.rng);
                ctx.trigger.trigger_attack(*direction);
                crate::log(&format!("🗡️ Attack enter: swing {:?}", direction));
            }

            AIState::MoveBack { remaining } => {
                *remaining = config.move_back_duration;
                let destination = retreat_point(ctx, config.move_back_distance);
                ctx.navigation.set_paused(false);
                ctx.navigation.set_destination(destination);
            }

            AIState::Dead => {
                ctx.trigger.disable_hitbox();
                ctx.trigger.disable_hurtbox();
                ctx.navigation.set_paused(true);
            }
        }
    }

    fn update(&mut self, ctx: &mut AgentContext, config: &AIConfig) {
        match &mut self.state {
            AIState::Idle => {
                let senses = Senses::read(ctx, config);
                if senses.can_see {
                    self.phase = Phase::Exit;
                }
            }

            AIState::Chase => {
                ctx.navigation.set_destination(ctx.target.position);

                // Пока путь не построен: ни blend, ни переходов
                if ctx.navigation.is_path_valid() {
                    blend_locomotion(ctx, config);

                    let senses = Senses::read(ctx, config);
                    if senses.can_attack || !senses.can_see {
                        self.phase = Phase::Exit;
                    }
                }
            }

            AIState::Attack { .. } => {
                face_target(ctx, config);
            }

            AIState::MoveBack { remaining } => {
                *remaining -= ctx.delta;
                if *remaining <= 0.0 {
                    self.phase = Phase::Exit;
                }
            }

            AIState::Hit | AIState::Dead | AIState::Won => {}
        }
    }
}

/// forwardSpeed ← lerp(forwardSpeed, |velocity|, delta × blend_rate)
fn blend_locomotion(ctx: &mut AgentContext, config: &AIConfig) {
    let current = ctx.animator.blend_parameter(FORWARD_SPEED);
    let speed = ctx.navigation.velocity_magnitude();
    let t = (ctx.delta * config.locomotion_blend_rate).clamp(0.0, 1.0);

    ctx.animator
        .set_blend_parameter(FORWARD_SPEED, current + (speed - current) * t);
}

/// Smoothed slerp toward the target, yaw only.
fn face_target(ctx: &mut AgentContext, config: &AIConfig) {
    let mut direction = ctx.target.position - ctx.body.translation;
    direction.y = 0.0;

    if direction.length_squared() <= f32::EPSILON {
        return;
    }

    let look = Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation;
    let t = (ctx.delta * config.rotation_speed).clamp(0.0, 1.0);
    ctx.body.rotation = ctx.body.rotation.slerp(look, t);
}

/// Точка отхода: от цели по горизонтали, либо назад по forward если цель в нас
fn retreat_point(ctx: &AgentContext, distance: f32) -> Vec3 {
    let mut away = ctx.body.translation - ctx.target.position;
    away.y = 0.0;

    let away = if away.length_squared() > f32::EPSILON {
        away.normalize()
    } else {
        *ctx.body.back()
    };

    ctx.body.translation + away * distance
}
