//! Combat system module
//!
//! ECS ответственность:
//! - Game state: Health, Attacker stats, HitSurfaces
//! - Combat rules: damage application, shield/hurtbox gating
//! - Events: HitLanded (in), DamageDealt / EntityDied (out)
//!
//! Hit detection (когда hitbox задел hurtbox): engine side либо headless
//! sphere check (`headless::detect_headless_hits`).

use bevy::prelude::*;

use crate::SimulationSet;

pub mod attacker;
pub mod damage;
pub mod hitbox;

#[cfg(test)]
mod damage_tests;

// Re-export основных типов
pub use attacker::Attacker;
pub use damage::{apply_damage, DamageDealt, EntityDied, HitLanded, DIE_TRIGGER, HIT_TRIGGER};
pub use hitbox::sync_hit_surfaces;

/// Combat Plugin
///
/// Порядок выполнения (SimulationSet::Combat, после Brain):
/// 1. apply_damage: HitLanded → Health, DamageDealt, EntityDied
/// 2. sync_hit_surfaces: флаги HitSurfaces → rapier ColliderDisabled
///
/// Смерть FSM увидит на следующем тике (death check в начале тика агента).
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HitLanded>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            (apply_damage, sync_hit_surfaces)
                .chain()
                .in_set(SimulationSet::Combat),
        );
    }
}
