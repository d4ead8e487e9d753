//! Headless симуляция RONIN
//!
//! Один AI агент против training dummy: печатает смены состояния, пока
//! агент не придёт в терминальное состояние (или не кончится лимит тиков).
//!
//! Usage: ronin_simulation [seed] [config.ron]

use bevy::prelude::*;
use ronin_simulation::*;

const MAX_TICKS: usize = 3600;

fn main() {
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(42);

    let config = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(message) => {
                log_error(&message);
                std::process::exit(1);
            }
        },
        None => AIConfig::default(),
    };

    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, HeadlessPlugin));
    log_info(&format!("Starting RONIN headless duel (seed: {})", seed));

    let dummy = app
        .world_mut()
        .spawn((
            Actor,
            Health::new(60),
            HitSurfaces::default(),
            AnimationDriver::default(),
            Headless,
            Transform::from_xyz(0.0, 0.0, -12.0),
        ))
        .id();

    let agent = {
        let mut commands = app.world_mut().commands();
        spawn_agent(&mut commands, Transform::IDENTITY, Some(dummy), config)
    };
    let agent = match agent {
        Ok(agent) => agent,
        Err(err) => {
            log_error(&format!("Failed to spawn agent: {}", err));
            std::process::exit(1);
        }
    };
    app.world_mut().flush();
    app.world_mut().entity_mut(agent).insert(Headless);

    for tick in 0..MAX_TICKS {
        app.update();

        let Some(controller) = app.world().get::<AgentController>(agent) else {
            break;
        };
        let state = controller.state_kind();
        if state.is_terminal() {
            let dummy_hp = app.world().get::<Health>(dummy).map(|h| h.current).unwrap_or(0);
            log_info(&format!(
                "Tick {}: agent reached {:?} (dummy hp: {})",
                tick, state, dummy_hp
            ));
            return;
        }
    }

    log_warning(&format!("No terminal state after {} ticks", MAX_TICKS));
}

fn load_config(path: &str) -> Result<AIConfig, String> {
    let source = std::fs::read_to_string(path)
        .map_err(|err| format!("Cannot read {}: {}", path, err))?;
    AIConfig::from_ron_str(&source).map_err(|err| format!("{}: {}", path, err))
}
