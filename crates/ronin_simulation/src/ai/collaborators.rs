//! Collaborator capabilities consumed by the FSM
//!
//! FSM ничего не знает про engine: навигация, анимация, здоровье и хитбоксы
//! приходят как trait objects в `AgentContext`, который ECS система собирает
//! каждый тик из компонентов агента (см. `components::*`: ECS handles).

use bevy::prelude::*;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Navigation: "move toward point, report path validity and velocity"
pub trait Navigation {
    fn set_destination(&mut self, point: Vec3);
    fn is_path_valid(&self) -> bool;
    fn velocity_magnitude(&self) -> f32;
    fn set_paused(&mut self, paused: bool);
}

/// Animation player (outbound half; inbound signals: `AnimationSignalKind`)
pub trait Animator {
    fn play_trigger(&mut self, name: &str);
    fn set_blend_parameter(&mut self, name: &str, value: f32);
    /// Текущее значение blend параметра (0.0 если ещё не задан)
    fn blend_parameter(&self, name: &str) -> f32;
}

/// Health model, read-only с точки зрения FSM
pub trait Vitals {
    fn is_dead(&self) -> bool;
}

/// Attack trigger / hitbox system
pub trait AttackTrigger {
    fn trigger_attack(&mut self, direction: AttackDirection);
    fn enable_hitbox(&mut self);
    fn disable_hitbox(&mut self);
    fn enable_hurtbox(&mut self);
    fn disable_hurtbox(&mut self);
}

/// Направление удара (выбирает анимацию + hitbox variant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum AttackDirection {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl AttackDirection {
    /// Размер integer draw для выбора варианта: roll ∈ [0, 100)
    pub const ROLL_RANGE: u32 = 100;

    /// Fixed partition of a `[0, 100)` roll into four equal closed-open spans.
    ///
    /// `[0,25)` Right, `[25,50)` Left, `[50,75)` Up, `[75,100)` Down.
    pub fn from_roll(roll: u32) -> Self {
        debug_assert!(roll < Self::ROLL_RANGE, "attack roll {} out of range", roll);

        match roll {
            0..=24 => AttackDirection::Right,
            25..=49 => AttackDirection::Left,
            50..=74 => AttackDirection::Up,
            _ => AttackDirection::Down,
        }
    }

    pub fn roll(rng: &mut dyn RngCore) -> Self {
        use rand::Rng;
        Self::from_roll(rng.gen_range(0..Self::ROLL_RANGE))
    }

    /// Animator trigger для этого удара
    pub fn trigger_name(&self) -> &'static str {
        match self {
            AttackDirection::Up => "AttackUp",
            AttackDirection::Down => "AttackDown",
            AttackDirection::Left => "AttackLeft",
            AttackDirection::Right => "AttackRight",
            AttackDirection::None => "AttackNone",
        }
    }
}

/// Позиция + здоровье цели, снятые ДО мутации агентов в этом тике
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSnapshot {
    pub position: Vec3,
    pub dead: bool,
}

impl Vitals for TargetSnapshot {
    fn is_dead(&self) -> bool {
        self.dead
    }
}

/// Всё, что состоянию нужно на один тик
///
/// Explicit handles instead of scene lookups: each field is borrowed from
/// the agent's own components for the duration of one tick.
pub struct AgentContext<'a> {
    pub body: &'a mut Transform,
    pub target: TargetSnapshot,
    pub vitals: &'a dyn Vitals,
    pub navigation: &'a mut dyn Navigation,
    pub animator: &'a mut dyn Animator,
    pub trigger: &'a mut dyn AttackTrigger,
    pub rng: &'a mut dyn RngCore,
    /// Длительность fixed тика (секунды)
    pub delta: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_partition_boundaries() {
        assert_eq!(AttackDirection::from_roll(0), AttackDirection::Right);
        assert_eq!(AttackDirection::from_roll(24), AttackDirection::Right);
        assert_eq!(AttackDirection::from_roll(25), AttackDirection::Left);
        assert_eq!(AttackDirection::from_roll(49), AttackDirection::Left);
        assert_eq!(AttackDirection::from_roll(50), AttackDirection::Up);
        assert_eq!(AttackDirection::from_roll(74), AttackDirection::Up);
        assert_eq!(AttackDirection::from_roll(75), AttackDirection::Down);
        assert_eq!(AttackDirection::from_roll(99), AttackDirection::Down);
    }

    #[test]
    fn test_partition_has_equal_spans() {
        let mut counts = [0u32; 4];
        for roll in 0..AttackDirection::ROLL_RANGE {
            let slot = match AttackDirection::from_roll(roll) {
                AttackDirection::Right => 0,
                AttackDirection::Left => 1,
                AttackDirection::Up => 2,
                AttackDirection::Down => 3,
                AttackDirection::None => panic!("roll {} mapped to None", roll),
            };
            counts[slot] += 1;
        }
        assert_eq!(counts, [25, 25, 25, 25]);
    }

    #[test]
    fn test_roll_never_picks_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_ne!(AttackDirection::roll(&mut rng), AttackDirection::None);
        }
    }

    #[test]
    fn test_roll_is_seed_deterministic() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        let left: Vec<_> = (0..32).map(|_| AttackDirection::roll(&mut a)).collect();
        let right: Vec<_> = (0..32).map(|_| AttackDirection::roll(&mut b)).collect();
        assert_eq!(left, right);
    }

    proptest! {
        #[test]
        fn prop_partition_matches_quarter(roll in 0u32..100) {
            let expected = match roll / 25 {
                0 => AttackDirection::Right,
                1 => AttackDirection::Left,
                2 => AttackDirection::Up,
                _ => AttackDirection::Down,
            };
            prop_assert_eq!(AttackDirection::from_roll(roll), expected);
        }
    }
}
