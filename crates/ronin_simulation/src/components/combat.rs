//! Combat компоненты: hit/hurt surfaces агента

use bevy::prelude::*;

use crate::ai::{AttackDirection, AttackTrigger};

/// Attack trigger handle
///
/// - hitbox: наносит урон (включается только в hit window swing'а)
/// - hurtbox: принимает урон (выключается навсегда при смерти)
/// - *_collider: опциональные rapier collider entities, которые
///   `sync_hit_surfaces` включает/выключает вслед за флагами
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HitSurfaces {
    pub hitbox_enabled: bool,
    pub hurtbox_enabled: bool,
    /// Swing запрошен FSM, animation player ещё не забрал
    pub queued_attack: Option<AttackDirection>,
    /// Блок: попадания по hurtbox не наносят урон
    pub shielded: bool,
    pub hitbox_collider: Option<Entity>,
    pub hurtbox_collider: Option<Entity>,
}

impl Default for HitSurfaces {
    fn default() -> Self {
        Self {
            hitbox_enabled: false,
            hurtbox_enabled: true,
            queued_attack: None,
            shielded: false,
            hitbox_collider: None,
            hurtbox_collider: None,
        }
    }
}

impl HitSurfaces {
    /// Может ли entity сейчас получить урон
    pub fn is_vulnerable(&self) -> bool {
        self.hurtbox_enabled && !self.shielded
    }
}

impl AttackTrigger for HitSurfaces {
    fn trigger_attack(&mut self, direction: AttackDirection) {
        self.queued_attack = Some(direction);
    }

    fn enable_hitbox(&mut self) {
        self.hitbox_enabled = true;
    }

    fn disable_hitbox(&mut self) {
        self.hitbox_enabled = false;
    }

    fn enable_hurtbox(&mut self) {
        self.hurtbox_enabled = true;
    }

    fn disable_hurtbox(&mut self) {
        self.hurtbox_enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_armed_for_defence_only() {
        let surfaces = HitSurfaces::default();
        assert!(!surfaces.hitbox_enabled);
        assert!(surfaces.is_vulnerable());
    }

    #[test]
    fn test_trigger_attack_queues_swing() {
        let mut surfaces = HitSurfaces::default();
        surfaces.trigger_attack(AttackDirection::Left);

        assert_eq!(surfaces.queued_attack, Some(AttackDirection::Left));
    }

    #[test]
    fn test_shield_blocks_vulnerability() {
        let mut surfaces = HitSurfaces::default();
        surfaces.shielded = true;
        assert!(!surfaces.is_vulnerable());

        surfaces.shielded = false;
        surfaces.disable_hurtbox();
        assert!(!surfaces.is_vulnerable());
    }
}
