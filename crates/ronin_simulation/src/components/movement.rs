//! Movement компоненты: navigation handle агента

use bevy::prelude::*;

use crate::ai::Navigation;

/// Navigation handle: intent пишет FSM, исполняет navigator
///
/// Архитектура:
/// - FSM пишет destination / paused (high-level intent)
/// - Navigator (engine NavigationAgent или headless) читает intent,
///   двигает Transform и репортит path_valid + velocity обратно
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NavAgent {
    /// Куда идём (world coordinates). None: цели ещё не было
    pub destination: Option<Vec3>,
    /// На паузе navigator не двигает агента
    pub paused: bool,
    /// Путь до destination построен (выставляет navigator)
    pub path_valid: bool,
    /// Текущая скорость агента, м/с (выставляет navigator)
    pub velocity: Vec3,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            destination: None,
            paused: true,
            path_valid: false,
            velocity: Vec3::ZERO,
        }
    }
}

impl Navigation for NavAgent {
    fn set_destination(&mut self, point: Vec3) {
        self.destination = Some(point);
    }

    fn is_path_valid(&self) -> bool {
        self.path_valid
    }

    fn velocity_magnitude(&self) -> f32 {
        self.velocity.length()
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if paused {
            self.velocity = Vec3::ZERO;
        }
    }
}
