//! Базовые компоненты акторов: Actor, Health

use bevy::prelude::*;

use crate::ai::Vitals;

/// Актор (AI агент, training dummy): базовый компонент для живых существ
///
/// Автоматически добавляет Health и Transform через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Transform)]
pub struct Actor;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

impl Vitals for Health {
    fn is_dead(&self) -> bool {
        !self.is_alive()
    }
}
