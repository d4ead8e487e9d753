//! Headless hit detection: sphere check вместо rapier intersection queries

use std::collections::HashMap;

use bevy::prelude::*;

use crate::combat::{Attacker, HitLanded};
use crate::components::{Health, HitSurfaces};

/// Система: detect hitbox → hurtbox попадания
///
/// Пока hitbox атакующего включён, каждая цель в радиусе `reach` с
/// включённым hurtbox получает ровно один HitLanded за окно удара.
/// Окно закрылось → список задетых сбрасывается.
pub fn detect_headless_hits(
    attackers: Query<(Entity, &Transform, &Attacker, &HitSurfaces)>,
    targets: Query<(Entity, &Transform, &HitSurfaces), With<Health>>,
    mut landed: EventWriter<HitLanded>,
    mut struck: Local<HashMap<Entity, Vec<Entity>>>,
) {
    for (attacker_entity, attacker_transform, attacker, surfaces) in attackers.iter() {
        if !surfaces.hitbox_enabled {
            struck.remove(&attacker_entity);
            continue;
        }

        let already = struck.entry(attacker_entity).or_default();

        for (target_entity, target_transform, target_surfaces) in targets.iter() {
            // Не бьем самого себя
            if target_entity == attacker_entity {
                continue;
            }
            if !target_surfaces.hurtbox_enabled || already.contains(&target_entity) {
                continue;
            }
            if !attacker.reaches(attacker_transform.translation, target_transform.translation) {
                continue;
            }

            already.push(target_entity);
            landed.write(HitLanded {
                attacker: attacker_entity,
                target: target_entity,
                damage: attacker.base_damage,
            });
        }
    }
}
