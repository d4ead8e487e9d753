//! Headless navigator: straight line к destination, без pathfinding

use bevy::prelude::*;

use crate::components::NavAgent;

/// Параметры headless навигации агента
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HeadlessNavigator {
    /// Скорость движения (м/с)
    pub speed: f32,
    /// Ближе этого к destination считаем что пришли
    pub arrival_tolerance: f32,
}

impl Default for HeadlessNavigator {
    fn default() -> Self {
        Self {
            speed: 4.0,
            arrival_tolerance: 0.05,
        }
    }
}

/// Система: исполнение NavAgent intent
///
/// Путь всегда "валиден" когда destination задан (прямая линия по XZ).
/// Агент поворачивается по направлению движения: как NavigationAgent
/// с включённым auto-rotate.
pub fn drive_headless_navigation(
    mut agents: Query<(&mut Transform, &mut NavAgent, &HeadlessNavigator)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut nav, navigator) in agents.iter_mut() {
        nav.path_valid = nav.destination.is_some();

        let Some(destination) = nav.destination else {
            nav.velocity = Vec3::ZERO;
            continue;
        };

        if nav.paused {
            nav.velocity = Vec3::ZERO;
            continue;
        }

        let mut offset = destination - transform.translation;
        offset.y = 0.0;
        let distance = offset.length();

        if distance <= navigator.arrival_tolerance {
            nav.velocity = Vec3::ZERO;
            continue;
        }

        let direction = offset / distance;
        let step = (navigator.speed * delta).min(distance);

        transform.translation += direction * step;
        transform.rotation = Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation;
        nav.velocity = direction * navigator.speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn nav_app() -> App {
        let mut app = App::new();
        app.insert_resource(Time::<Fixed>::from_duration(Duration::from_millis(100)));
        app.add_systems(Update, drive_headless_navigation);
        app
    }

    fn fixed_step(app: &mut App) {
        // Time<Fixed>::delta выставляет FixedUpdate runner; здесь двигаем руками
        let timestep = app.world().resource::<Time<Fixed>>().timestep();
        app.world_mut().resource_mut::<Time<Fixed>>().advance_by(timestep);
        app.update();
    }

    #[test]
    fn test_moves_toward_destination_and_faces_it() {
        let mut app = nav_app();
        let agent = app
            .world_mut()
            .spawn((
                Transform::IDENTITY,
                NavAgent {
                    destination: Some(Vec3::new(10.0, 0.0, 0.0)),
                    paused: false,
                    ..Default::default()
                },
                HeadlessNavigator::default(),
            ))
            .id();

        fixed_step(&mut app);

        let transform = app.world().get::<Transform>(agent).unwrap();
        assert!((transform.translation.x - 0.4).abs() < 1e-4);
        assert!(transform.forward().dot(Vec3::X) > 0.999);

        let nav = app.world().get::<NavAgent>(agent).unwrap();
        assert!(nav.path_valid);
        assert!((nav.velocity.length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_paused_agent_stays_put() {
        let mut app = nav_app();
        let agent = app
            .world_mut()
            .spawn((
                Transform::IDENTITY,
                NavAgent {
                    destination: Some(Vec3::new(10.0, 0.0, 0.0)),
                    paused: true,
                    ..Default::default()
                },
                HeadlessNavigator::default(),
            ))
            .id();

        fixed_step(&mut app);

        assert_eq!(app.world().get::<Transform>(agent).unwrap().translation, Vec3::ZERO);
        assert_eq!(app.world().get::<NavAgent>(agent).unwrap().velocity, Vec3::ZERO);
    }

    #[test]
    fn test_does_not_overshoot() {
        let mut app = nav_app();
        let agent = app
            .world_mut()
            .spawn((
                Transform::IDENTITY,
                NavAgent {
                    destination: Some(Vec3::new(0.0, 0.0, -0.1)),
                    paused: false,
                    ..Default::default()
                },
                HeadlessNavigator::default(),
            ))
            .id();

        fixed_step(&mut app);
        fixed_step(&mut app);

        let position = app.world().get::<Transform>(agent).unwrap().translation;
        assert!((position.z + 0.1).abs() < 1e-5);
        assert_eq!(app.world().get::<NavAgent>(agent).unwrap().velocity, Vec3::ZERO);
    }
}
