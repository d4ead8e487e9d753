//! FSM driver system: one AgentController tick per agent per fixed step.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::ai::collaborators::{AgentContext, TargetSnapshot};
use crate::ai::controller::AgentController;
use crate::ai::events::{AnimationSignal, AnimationSignalKind, StateChanged};
use crate::ai::Vitals;
use crate::components::{AnimationDriver, Health, HitSurfaces, NavAgent};
use crate::DeterministicRng;

/// Система: tick всех AgentController
///
/// 1. Snapshot (position, dead) всех актеров: ДО мутаций, чтобы порядок
///    итерации агентов не влиял на perception (агенты могут целиться друг в друга)
/// 2. AnimationSignal события → inbox по агенту, в порядке прихода
/// 3. Для каждого агента: AgentContext из его компонентов → `tick()`
/// 4. Смены состояния → StateChanged события
///
/// Despawned цель: death check всё равно выполняется, остальное пропускаем.
pub fn drive_agent_controllers(
    mut world_view: ParamSet<(
        Query<(Entity, &Transform, &Health)>,
        Query<(
            Entity,
            &mut AgentController,
            &mut Transform,
            &Health,
            &mut NavAgent,
            &mut AnimationDriver,
            &mut HitSurfaces,
        )>,
    )>,
    mut signals: EventReader<AnimationSignal>,
    mut state_changed: EventWriter<StateChanged>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    let snapshots: HashMap<Entity, TargetSnapshot> = world_view
        .p0()
        .iter()
        .map(|(entity, transform, health)| {
            (
                entity,
                TargetSnapshot {
                    position: transform.translation,
                    dead: health.is_dead(),
                },
            )
        })
        .collect();

    let mut inbox: HashMap<Entity, Vec<AnimationSignalKind>> = HashMap::new();
    for signal in signals.read() {
        inbox.entry(signal.agent).or_default().push(signal.kind);
    }

    for (entity, mut controller, mut transform, health, mut navigation, mut animator, mut surfaces) in
        world_view.p1().iter_mut()
    {
        let target = snapshots.get(&controller.target()).copied();
        let pending = inbox.remove(&entity).unwrap_or_default();

        // Без цели контекст нужен только для death check
        let fallback = TargetSnapshot {
            position: transform.translation,
            dead: false,
        };

        let mut ctx = AgentContext {
            body: &mut *transform,
            target: target.unwrap_or(fallback),
            vitals: health,
            navigation: &mut *navigation,
            animator: &mut *animator,
            trigger: &mut *surfaces,
            rng: &mut rng.rng,
            delta,
        };

        let changes = match target {
            Some(_) => controller.tick(&mut ctx, &pending),
            None => {
                let death = controller.enforce_death(&mut ctx);
                if death.is_none() && !controller.state_kind().is_terminal() {
                    crate::log_warning(&format!(
                        "AI: {:?} lost target {:?} (despawned), skipping tick",
                        entity,
                        controller.target()
                    ));
                }
                death.into_iter().collect()
            }
        };

        for change in changes {
            crate::log(&format!(
                "🤖 {:?}: {:?} → {:?}",
                entity, change.from, change.to
            ));
            state_changed.write(StateChanged {
                agent: entity,
                from: change.from,
                to: change.to,
            });
        }
    }
}
