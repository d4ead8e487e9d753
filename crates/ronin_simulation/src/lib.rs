//! RONIN Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 (strategic layer): per-agent combat FSM,
//! health/damage, hit surfaces. Engine (навигация, анимация, физика) живёт
//! снаружи, связь через ECS handles и события. `headless` даёт stand-ins для тестов.
//!
//! Порядок внутри FixedUpdate (60Hz), `SimulationSet` chain:
//! Signals → Brain → Motion → Combat

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod headless;
pub mod logger;

// Re-export базовых компонентов для удобства
pub use ai::{
    AIConfig, AIPlugin, AIState, AgentController, AnimationSignal, AnimationSignalKind,
    AttackDirection, ControllerError, StateChanged, StateKind,
};
pub use combat::{Attacker, CombatPlugin, DamageDealt, EntityDied, HitLanded};
pub use components::*;
pub use headless::{Headless, HeadlessPlugin};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter,
};

/// Частота simulation тика (Hz)
pub const TICK_HZ: f64 = 60.0;

/// Фазы fixed тика
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Animation player → AnimationSignal
    Signals,
    /// AgentController tick (FSM)
    Brain,
    /// Навигация исполняет intent
    Motion,
    /// Hit detection → damage → collider sync
    Combat,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed и timestep мог выставить host (create_headless_app): не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Signals,
                    SimulationSet::Brain,
                    SimulationSet::Motion,
                    SimulationSet::Combat,
                )
                    .chain(), // Последовательное выполнение для детерминизма
            )
            .add_plugins((AIPlugin, CombatPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается вручную: каждый `app.update()` = ровно один fixed тик,
/// независимо от wall clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TICK_HZ,
        )));

    app
}

/// Spawn AI агента, нацеленного на `target`
///
/// Required Components добавят Actor, Health, NavAgent, AnimationDriver,
/// HitSurfaces, Attacker.
pub fn spawn_agent(
    commands: &mut Commands,
    transform: Transform,
    target: Option<Entity>,
    config: AIConfig,
) -> Result<Entity, ControllerError> {
    let controller = AgentController::new(target, config)?;
    Ok(commands.spawn((controller, transform)).id())
}

/// Snapshot мира для сравнения детерминизма
/// (упрощённая версия: Debug представление компонента, по Entity index)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
