//! Attacker component: характеристики атакующего актора
//!
//! Архитектура:
//! - ECS хранит: base_damage, reach (game state)
//! - Animation player + hit detection решают КОГДА удар попал
//! - Hit detection → HitLanded { damage: base_damage } → apply_damage

use bevy::prelude::*;

/// Attacker: компонент для акторов которые могут атаковать
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Attacker {
    /// Урон одного попадания
    pub base_damage: u32,

    /// Дальность клинка от центра атакующего (метры)
    pub reach: f32,
}

impl Default for Attacker {
    fn default() -> Self {
        Self {
            base_damage: 25,
            reach: 3.5,
        }
    }
}

impl Attacker {
    pub fn new(base_damage: u32, reach: f32) -> Self {
        Self { base_damage, reach }
    }

    /// Достаёт ли клинок до точки (строгое `<`, как perception)
    pub fn reaches(&self, from: Vec3, to: Vec3) -> bool {
        from.distance(to) < self.reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reach_is_strict() {
        let attacker = Attacker::new(10, 2.0);

        assert!(attacker.reaches(Vec3::ZERO, Vec3::new(1.99, 0.0, 0.0)));
        assert!(!attacker.reaches(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_default_reach_covers_attack_radius() {
        // Swing начинается при distance < 3.0: должен доставать
        let attacker = Attacker::default();
        assert!(attacker.reaches(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.99)));
    }
}
