//! Tests for damage application.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::{apply_damage, DamageDealt, EntityDied, HitLanded, DIE_TRIGGER, HIT_TRIGGER};
    use crate::components::{AnimationDriver, Health, HitSurfaces};

    fn damage_app() -> App {
        let mut app = App::new();
        app.add_event::<HitLanded>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_systems(Update, apply_damage);
        app
    }

    fn spawn_target(app: &mut App, hp: u32) -> Entity {
        app.world_mut()
            .spawn((Health::new(hp), HitSurfaces::default(), AnimationDriver::default()))
            .id()
    }

    fn hit(app: &mut App, attacker: Entity, target: Entity, damage: u32) {
        app.world_mut().send_event(HitLanded {
            attacker,
            target,
            damage,
        });
        app.update();
    }

    fn dealt(app: &App) -> Vec<DamageDealt> {
        app.world()
            .resource::<Events<DamageDealt>>()
            .iter_current_update_events()
            .cloned()
            .collect()
    }

    fn deaths(app: &App) -> Vec<EntityDied> {
        app.world()
            .resource::<Events<EntityDied>>()
            .iter_current_update_events()
            .cloned()
            .collect()
    }

    #[test]
    fn test_hit_reduces_health_and_plays_hit() {
        let mut app = damage_app();
        let attacker = app.world_mut().spawn_empty().id();
        let target = spawn_target(&mut app, 100);

        hit(&mut app, attacker, target, 30);

        assert_eq!(app.world().get::<Health>(target).map(|h| h.current), Some(70));
        assert_eq!(
            dealt(&app),
            vec![DamageDealt {
                attacker,
                target,
                damage: 30,
                target_died: false
            }]
        );
        assert!(deaths(&app).is_empty());

        let mut driver = app.world_mut().get_mut::<AnimationDriver>(target).unwrap();
        assert_eq!(driver.drain_triggers(), vec![HIT_TRIGGER]);
    }

    #[test]
    fn test_lethal_hit_emits_death_once() {
        let mut app = damage_app();
        let attacker = app.world_mut().spawn_empty().id();
        let target = spawn_target(&mut app, 20);

        hit(&mut app, attacker, target, 50);

        assert_eq!(app.world().get::<Health>(target).map(|h| h.current), Some(0));
        assert_eq!(
            deaths(&app),
            vec![EntityDied {
                entity: target,
                killer: Some(attacker)
            }]
        );
        let mut driver = app.world_mut().get_mut::<AnimationDriver>(target).unwrap();
        assert_eq!(driver.drain_triggers(), vec![DIE_TRIGGER]);

        // Труп больше не получает урон и не умирает повторно
        hit(&mut app, attacker, target, 50);
        assert!(dealt(&app).is_empty());
        assert!(deaths(&app).is_empty());
    }

    #[test]
    fn test_shield_absorbs_hit() {
        let mut app = damage_app();
        let attacker = app.world_mut().spawn_empty().id();
        let target = spawn_target(&mut app, 100);
        app.world_mut().get_mut::<HitSurfaces>(target).unwrap().shielded = true;

        hit(&mut app, attacker, target, 40);

        assert_eq!(app.world().get::<Health>(target).map(|h| h.current), Some(100));
        assert!(dealt(&app).is_empty());
    }

    #[test]
    fn test_disabled_hurtbox_absorbs_hit() {
        let mut app = damage_app();
        let attacker = app.world_mut().spawn_empty().id();
        let target = spawn_target(&mut app, 100);
        app.world_mut().get_mut::<HitSurfaces>(target).unwrap().hurtbox_enabled = false;

        hit(&mut app, attacker, target, 40);

        assert_eq!(app.world().get::<Health>(target).map(|h| h.current), Some(100));
    }

    #[test]
    fn test_hit_without_health_is_skipped() {
        let mut app = damage_app();
        let attacker = app.world_mut().spawn_empty().id();
        let rock = app.world_mut().spawn_empty().id();

        hit(&mut app, attacker, rock, 10);

        assert!(dealt(&app).is_empty());
    }
}
