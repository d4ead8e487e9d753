//! Recording mock collaborators для unit тестов FSM

use std::collections::HashMap;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::collaborators::{
    AgentContext, Animator, AttackDirection, AttackTrigger, Navigation, TargetSnapshot, Vitals,
};

/// Один исходящий вызов в коллаборатор
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetDestination(Vec3),
    SetPaused(bool),
    PlayTrigger(String),
    SetBlend(String, f32),
    TriggerAttack(AttackDirection),
    EnableHitbox,
    DisableHitbox,
    EnableHurtbox,
    DisableHurtbox,
}

#[derive(Debug, Default)]
pub struct MockNavigation {
    pub path_valid: bool,
    pub velocity: f32,
    pub paused: bool,
    pub destination: Option<Vec3>,
    pub calls: Vec<Call>,
}

impl Navigation for MockNavigation {
    fn set_destination(&mut self, point: Vec3) {
        self.destination = Some(point);
        self.calls.push(Call::SetDestination(point));
    }

    fn is_path_valid(&self) -> bool {
        self.path_valid
    }

    fn velocity_magnitude(&self) -> f32 {
        self.velocity
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        self.calls.push(Call::SetPaused(paused));
    }
}

#[derive(Debug, Default)]
pub struct MockAnimator {
    pub blend: HashMap<String, f32>,
    pub calls: Vec<Call>,
}

impl Animator for MockAnimator {
    fn play_trigger(&mut self, name: &str) {
        self.calls.push(Call::PlayTrigger(name.to_string()));
    }

    fn set_blend_parameter(&mut self, name: &str, value: f32) {
        self.blend.insert(name.to_string(), value);
        self.calls.push(Call::SetBlend(name.to_string(), value));
    }

    fn blend_parameter(&self, name: &str) -> f32 {
        self.blend.get(name).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Default)]
pub struct MockVitals {
    pub dead: bool,
}

impl Vitals for MockVitals {
    fn is_dead(&self) -> bool {
        self.dead
    }
}

#[derive(Debug, Default)]
pub struct MockTrigger {
    pub calls: Vec<Call>,
}

impl MockTrigger {
    pub fn attacks(&self) -> Vec<AttackDirection> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::TriggerAttack(direction) => Some(*direction),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl AttackTrigger for MockTrigger {
    fn trigger_attack(&mut self, direction: AttackDirection) {
        self.calls.push(Call::TriggerAttack(direction));
    }

    fn enable_hitbox(&mut self) {
        self.calls.push(Call::EnableHitbox);
    }

    fn disable_hitbox(&mut self) {
        self.calls.push(Call::DisableHitbox);
    }

    fn enable_hurtbox(&mut self) {
        self.calls.push(Call::EnableHurtbox);
    }

    fn disable_hurtbox(&mut self) {
        self.calls.push(Call::DisableHurtbox);
    }
}

/// Агент в начале координат, смотрит в −Z; цель далеко за спиной (не видна)
pub struct Rig {
    pub body: Transform,
    pub target: TargetSnapshot,
    pub vitals: MockVitals,
    pub navigation: MockNavigation,
    pub animator: MockAnimator,
    pub trigger: MockTrigger,
    pub rng: ChaCha8Rng,
    pub delta: f32,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            body: Transform::IDENTITY,
            target: TargetSnapshot {
                position: Vec3::new(0.0, 0.0, 50.0),
                dead: false,
            },
            vitals: MockVitals::default(),
            navigation: MockNavigation {
                path_valid: true,
                ..Default::default()
            },
            animator: MockAnimator::default(),
            trigger: MockTrigger::default(),
            rng: ChaCha8Rng::seed_from_u64(42),
            delta: 1.0 / 60.0,
        }
    }

    /// Цель прямо по курсу на расстоянии `distance`
    pub fn target_ahead(mut self, distance: f32) -> Self {
        self.target.position = Vec3::new(0.0, 0.0, -distance);
        self
    }

    pub fn target_at(mut self, position: Vec3) -> Self {
        self.target.position = position;
        self
    }

    pub fn ctx(&mut self) -> AgentContext<'_> {
        AgentContext {
            body: &mut self.body,
            target: self.target,
            vitals: &self.vitals,
            navigation: &mut self.navigation,
            animator: &mut self.animator,
            trigger: &mut self.trigger,
            rng: &mut self.rng,
            delta: self.delta,
        }
    }

    pub fn clear_calls(&mut self) {
        self.navigation.calls.clear();
        self.animator.calls.clear();
        self.trigger.calls.clear();
    }
}
