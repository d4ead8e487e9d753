//! Hit/hurt surfaces → rapier colliders
//!
//! HitSurfaces флаги (их дёргает FSM) зеркалятся на collider entities через
//! `ColliderDisabled`: выключенный collider rapier не учитывает в
//! intersection queries, так что труп нельзя ударить и он не бьёт сам.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::HitSurfaces;

/// Система: sync HitSurfaces → ColliderDisabled на linked colliders
pub fn sync_hit_surfaces(
    mut commands: Commands,
    surfaces: Query<(Entity, &HitSurfaces), Changed<HitSurfaces>>,
) {
    for (owner, surfaces) in surfaces.iter() {
        toggle_collider(&mut commands, owner, surfaces.hitbox_collider, surfaces.hitbox_enabled);
        toggle_collider(&mut commands, owner, surfaces.hurtbox_collider, surfaces.hurtbox_enabled);
    }
}

fn toggle_collider(commands: &mut Commands, owner: Entity, collider: Option<Entity>, enabled: bool) {
    let Some(collider) = collider else {
        return;
    };

    let Ok(mut entity_commands) = commands.get_entity(collider) else {
        crate::log_warning(&format!(
            "HitSurfaces of {:?}: collider {:?} no longer exists",
            owner, collider
        ));
        return;
    };

    if enabled {
        entity_commands.remove::<ColliderDisabled>();
    } else {
        entity_commands.insert(ColliderDisabled);
    }
}
