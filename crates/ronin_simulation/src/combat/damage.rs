//! Damage application
//!
//! HitLanded (от hit detection) → Health → DamageDealt / EntityDied.
//! Урон проходит только через включённый hurtbox без щита; мёртвых не бьём.

use bevy::prelude::*;

use crate::ai::Animator;
use crate::components::{AnimationDriver, Health, HitSurfaces};

/// Animator trigger: hit-react
pub const HIT_TRIGGER: &str = "Hit";
/// Animator trigger: смерть
pub const DIE_TRIGGER: &str = "Die";

/// Событие: hitbox атакующего пересёкся с hurtbox цели
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitLanded {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
}

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    pub target_died: bool,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Система: apply damage от HitLanded событий
///
/// 1. Пропускаем мёртвых и неуязвимых (hurtbox выключен / щит)
/// 2. Применяем damage к Health (clamp через saturating_sub)
/// 3. Animator: "Hit" если выжил, "Die" если нет
/// 4. Генерируем DamageDealt и EntityDied события
pub fn apply_damage(
    mut hits: EventReader<HitLanded>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
    mut targets: Query<(&mut Health, Option<&HitSurfaces>, Option<&mut AnimationDriver>)>,
) {
    for hit in hits.read() {
        let Ok((mut health, surfaces, animator)) = targets.get_mut(hit.target) else {
            crate::log_warning(&format!(
                "HitLanded: target {:?} has no Health component",
                hit.target
            ));
            continue;
        };

        if !health.is_alive() {
            continue;
        }

        if let Some(surfaces) = surfaces {
            if !surfaces.is_vulnerable() {
                crate::log(&format!(
                    "🛡️ Hit {:?} → {:?} absorbed (shield or hurtbox off)",
                    hit.attacker, hit.target
                ));
                continue;
            }
        }

        health.take_damage(hit.damage);
        let died = !health.is_alive();

        if let Some(mut animator) = animator {
            animator.play_trigger(if died { DIE_TRIGGER } else { HIT_TRIGGER });
        }

        damage_dealt_events.write(DamageDealt {
            attacker: hit.attacker,
            target: hit.target,
            damage: hit.damage,
            target_died: died,
        });

        if died {
            entity_died_events.write(EntityDied {
                entity: hit.target,
                killer: Some(hit.attacker),
            });

            crate::log_info(&format!("Entity {:?} killed by {:?}", hit.target, hit.attacker));
        }
    }
}
