//! Headless animation player: clip clock, emitting lifecycle signals
//!
//! Клипы без поз и blend'ов: только таймлайн с метками. Swing:
//! Start → DelayedStart → HitWindowOpen → HitWindowClose → End.
//! Hit-react: HitReactStart → HitReactEnd → End. "Die" замораживает часы.

use bevy::prelude::*;

use crate::ai::{AnimationSignal, AnimationSignalKind};
use crate::combat::{DIE_TRIGGER, HIT_TRIGGER};
use crate::components::{AnimationDriver, HitSurfaces};

/// Таймлайн клипа (секунды от начала)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ClipTimings {
    pub swing_delayed_start: f32,
    pub swing_hit_window_open: f32,
    pub swing_hit_window_close: f32,
    pub swing_length: f32,
    pub hit_react_length: f32,
}

impl Default for ClipTimings {
    fn default() -> Self {
        Self {
            swing_delayed_start: 0.1,
            swing_hit_window_open: 0.3,
            swing_hit_window_close: 0.45,
            swing_length: 0.8,
            hit_react_length: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Clip {
    Swing,
    HitReact,
}

/// Clip clock одного агента
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct HeadlessAnimator {
    pub timings: ClipTimings,
    clip: Option<Clip>,
    elapsed: f32,
    hit_window_open: bool,
    frozen: bool,
}

impl HeadlessAnimator {
    pub fn clip(&self) -> Option<Clip> {
        self.clip
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn start(&mut self, clip: Clip, out: &mut Vec<AnimationSignalKind>) {
        // Прерванный swing закрывает окно, иначе hitbox останется включён
        if self.hit_window_open {
            self.hit_window_open = false;
            out.push(AnimationSignalKind::HitWindowClose);
        }

        self.clip = Some(clip);
        self.elapsed = 0.0;
        out.push(match clip {
            Clip::Swing => AnimationSignalKind::Start,
            Clip::HitReact => AnimationSignalKind::HitReactStart,
        });
    }

    fn freeze(&mut self) {
        self.clip = None;
        self.hit_window_open = false;
        self.frozen = true;
    }

    /// Продвинуть часы на `delta`, собрав пересечённые метки
    fn advance(&mut self, delta: f32, out: &mut Vec<AnimationSignalKind>) {
        let Some(clip) = self.clip else {
            return;
        };

        let before = self.elapsed;
        self.elapsed += delta;
        let after = self.elapsed;
        let crossed = |mark: f32| before < mark && after >= mark;
        let timings = self.timings;

        match clip {
            Clip::Swing => {
                if crossed(timings.swing_delayed_start) {
                    out.push(AnimationSignalKind::DelayedStart);
                }
                if crossed(timings.swing_hit_window_open) {
                    self.hit_window_open = true;
                    out.push(AnimationSignalKind::HitWindowOpen);
                }
                if crossed(timings.swing_hit_window_close) {
                    self.hit_window_open = false;
                    out.push(AnimationSignalKind::HitWindowClose);
                }
                if after >= timings.swing_length {
                    self.clip = None;
                    out.push(AnimationSignalKind::End);
                }
            }
            Clip::HitReact => {
                if after >= timings.hit_react_length {
                    self.clip = None;
                    out.push(AnimationSignalKind::HitReactEnd);
                    out.push(AnimationSignalKind::End);
                }
            }
        }
    }
}

/// Система: headless animation player
///
/// 1. Новый swing из HitSurfaces.queued_attack
/// 2. Triggers из AnimationDriver ("Hit" прерывает swing, "Die": всё)
/// 3. Часы → AnimationSignal события (читает FSM в этом же тике)
pub fn run_headless_animation(
    mut players: Query<(
        Entity,
        &mut HeadlessAnimator,
        &mut AnimationDriver,
        Option<&mut HitSurfaces>,
    )>,
    mut signals: EventWriter<AnimationSignal>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut player, mut driver, surfaces) in players.iter_mut() {
        let mut out = Vec::new();

        if let Some(mut surfaces) = surfaces {
            if let Some(direction) = surfaces.queued_attack {
                surfaces.queued_attack = None;
                if !player.frozen {
                    crate::log(&format!("🎬 {:?}: clip {}", entity, direction.trigger_name()));
                    player.start(Clip::Swing, &mut out);
                }
            }
        }

        for trigger in driver.drain_triggers() {
            match trigger.as_str() {
                DIE_TRIGGER => player.freeze(),
                HIT_TRIGGER if !player.frozen => player.start(Clip::HitReact, &mut out),
                HIT_TRIGGER => {}
                other => crate::log_warning(&format!(
                    "Headless animator {:?}: unknown trigger '{}'",
                    entity, other
                )),
            }
        }

        if !player.frozen {
            player.advance(delta, &mut out);
        }

        for kind in out {
            signals.write(AnimationSignal {
                agent: entity,
                kind,
            });
        }
    }
}
